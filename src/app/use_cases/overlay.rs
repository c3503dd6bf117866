//! Use-Case-Funktionen für Overlay-Layer.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;

use crate::app::host::HostRequest;
use crate::app::AppState;
use crate::core::{raster, Extent, GeorefError};

/// Lädt eine Bilddatei als neues Overlay. Layer-Name ist der Dateiname.
pub fn add_overlay_from_file(state: &mut AppState, path: &str) -> Result<()> {
    log::info!("Lade Overlay: {}", path);
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    // Name vor dem Dekodieren prüfen: ein Duplikat soll keine Datei lesen
    if state.registry.contains(&name) {
        return Err(reject(state, GeorefError::DuplicateName(name)).into());
    }
    let image = raster::load_file(path)?;
    add_overlay(state, &name, image)?;
    Ok(())
}

/// Dekodiert hochgeladene Bilddaten als neues Overlay.
pub fn add_overlay_from_bytes(state: &mut AppState, name: &str, bytes: &[u8]) -> Result<()> {
    log::info!("Overlay hochgeladen: '{}' ({} Bytes)", name, bytes.len());
    if state.registry.contains(name) {
        return Err(reject(state, GeorefError::DuplicateName(name.to_string())).into());
    }
    let image = raster::decode(bytes)
        .with_context(|| format!("Overlay '{}' konnte nicht gelesen werden", name))?;
    add_overlay(state, name, image)?;
    Ok(())
}

/// Fügt ein dekodiertes Bild als Layer hinzu und platziert es im Kartenausschnitt.
///
/// Mit bekanntem sichtbarem Ausschnitt füllt das Bild dessen Breite
/// (Höhe aus dem Seitenverhältnis), sonst wird es mit einer Karteneinheit
/// pro Pixel um den Kartenmittelpunkt zentriert.
pub fn add_overlay(
    state: &mut AppState,
    name: &str,
    image: DynamicImage,
) -> Result<(), GeorefError> {
    let (width, height) = (image.width(), image.height());
    let placement = match state.view.visible_extent.as_ref() {
        Some(view) => Extent::fit_to_view(view, width, height),
        None => Extent::centered_on(state.view.center, width, height),
    };
    let extent = match placement {
        Ok(extent) => extent,
        Err(e) => return Err(reject(state, e)),
    };

    let opacity = state.options.default_layer_opacity;
    let layer = match state.registry.add(name, image, extent) {
        Ok(_) => state.registry.get_mut(name)?,
        Err(e) => return Err(reject(state, e)),
    };
    layer.set_opacity(opacity);
    state.host.announce_layer(layer);

    state.set_status(format!("Overlay '{}' hinzugefügt ({}x{} px)", name, width, height));
    Ok(())
}

/// Entfernt einen Layer und beendet eine auf ihn bezogene Ausrichtung.
pub fn remove_overlay(state: &mut AppState, name: &str) -> Result<(), GeorefError> {
    if let Err(e) = state.registry.remove(name) {
        return Err(reject(state, e));
    }
    if state.tools.alignment.layer() == Some(name) {
        log::info!("Ausrichtung für entfernten Layer '{}' beendet", name);
        state.tools.deactivate();
    }
    state.host.push(HostRequest::RemoveLayer {
        name: name.to_string(),
    });
    state.set_status(format!("Overlay '{}' entfernt", name));
    Ok(())
}

/// Setzt die Deckkraft eines Layers (begrenzt auf 0..=1).
pub fn set_opacity(state: &mut AppState, name: &str, opacity: f32) -> Result<(), GeorefError> {
    let layer = match state.registry.get_mut(name) {
        Ok(layer) => layer,
        Err(e) => return Err(reject(state, e)),
    };
    layer.set_opacity(opacity);
    let opacity = layer.opacity();
    state.host.push(HostRequest::SetLayerOpacity {
        name: name.to_string(),
        opacity,
    });
    Ok(())
}

/// Setzt die Sichtbarkeit eines Layers.
pub fn set_visible(state: &mut AppState, name: &str, visible: bool) -> Result<(), GeorefError> {
    match state.registry.get_mut(name) {
        Ok(layer) => layer.set_visible(visible),
        Err(e) => return Err(reject(state, e)),
    }
    state.host.push(HostRequest::SetLayerVisible {
        name: name.to_string(),
        visible,
    });
    Ok(())
}

/// Meldet einen nicht-fatalen Fehler in Log und Statuszeile.
fn reject(state: &mut AppState, err: GeorefError) -> GeorefError {
    log::warn!("{}", err);
    state.set_status(err.to_string());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255])))
    }

    #[test]
    fn test_add_fits_into_visible_extent() {
        let mut state = AppState::new();
        state.view.visible_extent = Some(Extent::new(1000.0, 2000.0, 1400.0, 2300.0).unwrap());

        add_overlay(&mut state, "plan.png", image(200, 50)).unwrap();

        let layer = state.registry.get("plan.png").unwrap();
        assert_eq!(*layer.extent(), Extent::new(1000.0, 2000.0, 1400.0, 2100.0).unwrap());
        assert_eq!(layer.opacity(), 0.8);
        let requests = state.host.drain();
        assert_eq!(requests.len(), 4);
        assert!(matches!(&requests[0], HostRequest::AddLayer { name } if name == "plan.png"));
    }

    #[test]
    fn test_add_without_view_extent_centres_on_view() {
        let mut state = AppState::new();
        state.view.center = glam::DVec2::new(50.0, 50.0);

        add_overlay(&mut state, "plan", image(10, 4)).unwrap();

        let layer = state.registry.get("plan").unwrap();
        assert_eq!(*layer.extent(), Extent::new(45.0, 48.0, 55.0, 52.0).unwrap());
    }

    #[test]
    fn test_add_duplicate_is_rejected_without_host_requests() {
        let mut state = AppState::new();
        add_overlay(&mut state, "plan", image(2, 2)).unwrap();
        state.host.drain();

        let err = add_overlay(&mut state, "plan", image(4, 4)).unwrap_err();
        assert_eq!(err, GeorefError::DuplicateName("plan".into()));
        assert!(state.host.is_empty());
        assert_eq!(state.registry.get("plan").unwrap().dimensions(), (2, 2));
    }

    #[test]
    fn test_add_from_bytes_rejects_garbage() {
        let mut state = AppState::new();
        assert!(add_overlay_from_bytes(&mut state, "kaputt", b"kein bild").is_err());
        assert!(state.registry.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let mut state = AppState::new();
        let err = remove_overlay(&mut state, "fehlt").unwrap_err();
        assert_eq!(err, GeorefError::NotFound("fehlt".into()));
        assert!(state.host.is_empty());
    }

    #[test]
    fn test_remove_ends_alignment_on_that_layer() {
        let mut state = AppState::new();
        add_overlay(&mut state, "plan", image(2, 2)).unwrap();
        state.tools.alignment.begin("plan");

        remove_overlay(&mut state, "plan").unwrap();
        assert!(!state.tools.alignment.is_active());
    }

    #[test]
    fn test_opacity_is_clamped_and_forwarded() {
        let mut state = AppState::new();
        add_overlay(&mut state, "plan", image(2, 2)).unwrap();
        state.host.drain();

        set_opacity(&mut state, "plan", 1.7).unwrap();
        assert_eq!(
            state.host.drain(),
            vec![HostRequest::SetLayerOpacity {
                name: "plan".into(),
                opacity: 1.0
            }]
        );
    }
}
