#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use plan_overlay::core::raster;
use plan_overlay::{AppController, AppIntent, AppState, Extent, ImageCodec, MapHost, Point2D};
use std::sync::Arc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// PNG mit rotem Pixel oben links, Rest grün.
pub fn png_bytes(width: u32, height: u32) -> Arc<[u8]> {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 200, 0, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    raster::encode(&DynamicImage::ImageRgba8(img), ImageCodec::Png)
        .expect("PNG-Kodierung")
        .into()
}

/// Meldet einen Kartenausschnitt und lädt ein Overlay, das ihn in der Breite füllt.
pub fn upload_into_view(
    controller: &mut AppController,
    state: &mut AppState,
    name: &str,
    view: Extent,
    width: u32,
    height: u32,
) {
    controller
        .handle_intent(
            state,
            AppIntent::ViewChanged {
                center: view.center(),
                zoom: 17.0,
                extent: Some(view),
            },
        )
        .expect("ViewChanged");
    controller
        .handle_intent(
            state,
            AppIntent::OverlayUploaded {
                name: name.to_string(),
                bytes: png_bytes(width, height),
            },
        )
        .expect("OverlayUploaded");
}

pub fn click(
    controller: &mut AppController,
    state: &mut AppState,
    x: f64,
    y: f64,
) -> anyhow::Result<()> {
    controller.handle_intent(
        state,
        AppIntent::MapClicked {
            coordinate: Point2D::new(x, y),
        },
    )
}

/// Karten-Widget, das alle Aufrufe als Text protokolliert.
#[derive(Default)]
pub struct RecordingHost {
    pub calls: Vec<String>,
}

impl MapHost for RecordingHost {
    fn add_layer(&mut self, name: &str) -> anyhow::Result<()> {
        self.calls.push(format!("add {name}"));
        Ok(())
    }

    fn remove_layer(&mut self, name: &str) -> anyhow::Result<()> {
        self.calls.push(format!("remove {name}"));
        Ok(())
    }

    fn set_layer_source(
        &mut self,
        name: &str,
        image: &Arc<DynamicImage>,
        _extent: &Extent,
    ) -> anyhow::Result<()> {
        self.calls
            .push(format!("source {name} {}x{}", image.width(), image.height()));
        Ok(())
    }

    fn set_layer_opacity(&mut self, name: &str, opacity: f32) -> anyhow::Result<()> {
        self.calls.push(format!("opacity {name} {opacity}"));
        Ok(())
    }

    fn set_layer_visible(&mut self, name: &str, visible: bool) -> anyhow::Result<()> {
        self.calls.push(format!("visible {name} {visible}"));
        Ok(())
    }

    fn set_view(&mut self, center: Point2D, zoom: f64) -> anyhow::Result<()> {
        self.calls
            .push(format!("view {} {} {}", center.x, center.y, zoom));
        Ok(())
    }
}
