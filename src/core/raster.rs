//! Rasterbild-Operationen: Laden, Codec-Roundtrip und Rotation mit
//! Canvas-Erweiterung.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageEncoder, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Cursor};

/// Bildformat für gespeicherte Overlay-Bilder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ImageCodec {
    /// Verlustfrei, erhält Transparenz
    #[default]
    Png,
    /// Verlustbehaftet, ohne Alpha-Kanal. Transparente Flächen (etwa die
    /// Ecken gedrehter Overlays) werden beim Speichern auf Weiß gelegt und
    /// nach dem Laden deckend dargestellt.
    Jpeg {
        /// JPEG-Qualität (1–100)
        quality: u8,
    },
}

/// Lädt eine Bilddatei und konvertiert sie nach RGBA.
///
/// Schlägt die Erkennung über die Dateiendung fehl, wird das Format anhand
/// der Magic Bytes im Dateiinhalt bestimmt.
pub fn load_file(path: &str) -> Result<DynamicImage> {
    let image = match image::open(path) {
        Ok(img) => img,
        Err(ext_err) => {
            log::warn!(
                "Format-Erkennung via Dateiendung fehlgeschlagen für '{}': {}. Versuche Erkennung via Dateiinhalt...",
                path,
                ext_err
            );
            let file = std::fs::File::open(path)
                .with_context(|| format!("Datei nicht gefunden: {}", path))?;
            ImageReader::new(BufReader::new(file))
                .with_guessed_format()
                .with_context(|| format!("Format-Erkennung fehlgeschlagen für: {}", path))?
                .decode()
                .with_context(|| format!("Fehler beim Dekodieren des Overlay-Bilds: {}", path))?
        }
    };
    Ok(DynamicImage::ImageRgba8(image.to_rgba8()))
}

/// Dekodiert Bilddaten aus dem Speicher (Format via Magic Bytes) nach RGBA.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("Format-Erkennung fehlgeschlagen")?
        .decode()
        .context("Bilddaten konnten nicht dekodiert werden")?;
    Ok(DynamicImage::ImageRgba8(image.to_rgba8()))
}

/// Hintergrund für transparente Pixel bei Formaten ohne Alpha-Kanal.
pub const JPEG_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Legt ein RGBA-Bild per Alpha-Blending auf eine deckende Hintergrundfarbe.
pub fn flatten_onto(image: &DynamicImage, background: [u8; 3]) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = a as u32;
        let blend = |fg: u8, bg: u8| {
            ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}

/// Kodiert ein Bild mit dem gewählten Codec.
pub fn encode(image: &DynamicImage, codec: ImageCodec) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match codec {
        ImageCodec::Png => {
            image
                .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
                .context("PNG-Kodierung fehlgeschlagen")?;
        }
        ImageCodec::Jpeg { quality } => {
            let rgb = flatten_onto(image, JPEG_BACKGROUND);
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buffer,
                quality.clamp(1, 100),
            );
            encoder
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .context("JPEG-Kodierung fehlgeschlagen")?;
        }
    }
    Ok(buffer)
}

/// Canvas-Größe nach Rotation um `angle_deg` (achsenparallele Hülle, aufgerundet).
pub fn rotated_dimensions(width: u32, height: u32, angle_deg: f64) -> (u32, u32) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (w, h) = (width as f64, height as f64);
    // Toleranz gegen Rundungsrauschen bei Vielfachen von 90°
    let new_w = (w * cos.abs() + h * sin.abs() - 1e-6).ceil().max(1.0);
    let new_h = (w * sin.abs() + h * cos.abs() - 1e-6).ceil().max(1.0);
    (new_w as u32, new_h as u32)
}

/// Rotiert ein Bild um `angle_deg` gegen den Uhrzeigersinn (Kartensinn) und
/// erweitert die Leinwand, sodass nichts abgeschnitten wird.
///
/// Neue Flächen sind transparent. Abtastung per Nearest-Neighbour um die
/// Bildmitte.
pub fn rotate_expand(image: &DynamicImage, angle_deg: f64) -> DynamicImage {
    let src = image.to_rgba8();
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return DynamicImage::ImageRgba8(src);
    }

    let (new_w, new_h) = rotated_dimensions(width, height, angle_deg);
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let src_cx = width as f64 * 0.5;
    let src_cy = height as f64 * 0.5;
    let dst_cx = new_w as f64 * 0.5;
    let dst_cy = new_h as f64 * 0.5;

    // Pixel-y zeigt nach unten: sichtbare Drehung gegen den Uhrzeigersinn
    // entspricht x' = x·cos + y·sin, y' = -x·sin + y·cos. Rückabbildung:
    let rotated = RgbaImage::from_fn(new_w, new_h, |u, v| {
        let dx = u as f64 + 0.5 - dst_cx;
        let dy = v as f64 + 0.5 - dst_cy;
        let sx = dx * cos - dy * sin + src_cx;
        let sy = dx * sin + dy * cos + src_cy;
        if sx < 0.0 || sy < 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let (ix, iy) = (sx.floor() as u32, sy.floor() as u32);
        if ix >= width || iy >= height {
            return Rgba([0, 0, 0, 0]);
        }
        *src.get_pixel(ix, iy)
    });

    log::debug!(
        "Bild rotiert um {:.3}°: {}x{} -> {}x{}",
        angle_deg,
        width,
        height,
        new_w,
        new_h
    );
    DynamicImage::ImageRgba8(rotated)
}
