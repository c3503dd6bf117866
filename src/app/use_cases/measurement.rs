//! Use-Case-Funktionen für Distanzmessung und Cursor-Anzeige.

use crate::app::tools::{ActiveTool, ToolAction};
use crate::app::AppState;
use crate::core::Point2D;

/// Startet eine neue Messung und beendet eine laufende Ausrichtung.
pub fn start(state: &mut AppState) {
    state.tools.alignment.cancel();
    state.tools.measure.start();
    state.tools.active = ActiveTool::Measure;
    let hint = state.tools.measure.status_text();
    state.set_status(hint);
}

/// Reicht einen Kartenklick an die Messung weiter.
pub fn click(state: &mut AppState, coordinate: Point2D) {
    match state.tools.measure.feed(coordinate, &state.options) {
        ToolAction::Ignored => {}
        ToolAction::Continue => {
            let hint = state.tools.measure.status_text();
            state.set_status(hint);
        }
        ToolAction::Complete(measurement) => {
            state.tools.active = ActiveTool::None;
            let summary = measurement.summary();
            log::info!("Messung: {}", summary);
            state.set_status(summary);
            state.ui.last_measurement = Some(measurement);
        }
    }
}

/// Aktualisiert die Live-Anzeige der Cursor-Koordinate.
pub fn update_cursor(state: &mut AppState, coordinate: Point2D) {
    if !coordinate.is_finite() {
        return;
    }
    state.ui.cursor_text = Some(state.options.format_coordinate(coordinate));
}
