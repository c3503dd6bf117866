//! Handler für Messung und Cursor-Anzeige.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::Point2D;

/// Startet eine Messung.
pub fn start(state: &mut AppState) {
    use_cases::measurement::start(state);
}

/// Verarbeitet einen Klick während der Messung.
pub fn click(state: &mut AppState, coordinate: Point2D) {
    use_cases::measurement::click(state, coordinate);
}

/// Aktualisiert die Cursor-Koordinate.
pub fn update_cursor(state: &mut AppState, coordinate: Point2D) {
    use_cases::measurement::update_cursor(state, coordinate);
}
