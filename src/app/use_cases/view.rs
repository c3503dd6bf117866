//! Use-Case-Funktionen für Kartenausschnitt und Werkzeugwahl.

use crate::app::AppState;
use crate::core::{Extent, Point2D};

/// Übernimmt den vom Host gemeldeten Kartenausschnitt.
///
/// Nicht-endliche Werte werden verworfen, ein ungültiger Extent wird
/// ignoriert (die Platzierung fällt dann auf den Mittelpunkt zurück).
pub fn update_view(state: &mut AppState, center: Point2D, zoom: f64, extent: Option<Extent>) {
    if !center.is_finite() || !zoom.is_finite() {
        log::warn!("Ungültiger Kartenausschnitt ignoriert: {:?} / {}", center, zoom);
        return;
    }
    state.view.center = center;
    state.view.zoom = zoom;
    state.view.visible_extent = extent.filter(|e| e.validate().is_ok());
}

/// Wählt das aktive Werkzeug ab. Laufende Sitzungen werden verworfen.
pub fn deactivate_tool(state: &mut AppState) {
    state.tools.deactivate();
    state.ui.status_message = None;
}
