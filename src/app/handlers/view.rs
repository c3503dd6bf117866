//! Handler für Kartenausschnitt und Werkzeugwahl.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{Extent, Point2D};

/// Übernimmt den Kartenausschnitt des Hosts.
pub fn update(state: &mut AppState, center: Point2D, zoom: f64, extent: Option<Extent>) {
    use_cases::view::update_view(state, center, zoom, extent);
}

/// Wählt das aktive Werkzeug ab.
pub fn deactivate_tool(state: &mut AppState) {
    use_cases::view::deactivate_tool(state);
}
