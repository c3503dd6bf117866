//! Handler für Speichern und Laden.

use crate::app::use_cases;
use crate::app::AppState;

/// Speichert Overlays und Kartenausschnitt.
pub fn save(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::persistence::save(state)
}

/// Lädt Overlays und Kartenausschnitt.
pub fn load(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::persistence::load(state)
}
