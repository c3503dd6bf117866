//! Handler für Overlay-Layer (Hinzufügen, Entfernen, Darstellung).

use std::sync::Arc;

use crate::app::use_cases;
use crate::app::AppState;

/// Lädt ein Overlay aus einer Bilddatei.
pub fn add_from_file(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::overlay::add_overlay_from_file(state, path)
}

/// Fügt ein Overlay aus hochgeladenen Bilddaten hinzu.
pub fn add_from_bytes(state: &mut AppState, name: &str, bytes: &Arc<[u8]>) -> anyhow::Result<()> {
    use_cases::overlay::add_overlay_from_bytes(state, name, bytes)
}

/// Entfernt ein Overlay.
pub fn remove(state: &mut AppState, name: &str) -> anyhow::Result<()> {
    use_cases::overlay::remove_overlay(state, name)?;
    Ok(())
}

/// Setzt die Deckkraft eines Overlays.
pub fn set_opacity(state: &mut AppState, name: &str, opacity: f32) -> anyhow::Result<()> {
    use_cases::overlay::set_opacity(state, name, opacity)?;
    Ok(())
}

/// Setzt die Sichtbarkeit eines Overlays.
pub fn set_visible(state: &mut AppState, name: &str, visible: bool) -> anyhow::Result<()> {
    use_cases::overlay::set_visible(state, name, visible)?;
    Ok(())
}
