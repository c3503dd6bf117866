//! Handler für das Ausrichtungs-Werkzeug.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::Point2D;

/// Startet die Ausrichtung eines Overlays.
pub fn begin(state: &mut AppState, name: &str) -> anyhow::Result<()> {
    use_cases::alignment::begin(state, name)?;
    Ok(())
}

/// Verarbeitet einen Klick während der Ausrichtung.
pub fn click(state: &mut AppState, coordinate: Point2D) -> anyhow::Result<()> {
    use_cases::alignment::click(state, coordinate)?;
    Ok(())
}
