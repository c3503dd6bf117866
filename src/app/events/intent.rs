use std::sync::Arc;

use crate::core::{Extent, Point2D};

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus Host/Widget ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Bilddatei für ein neues Overlay wurde ausgewählt
    OverlayFileSelected { path: String },
    /// Bilddaten für ein neues Overlay wurden hochgeladen (Name = Dateiname)
    OverlayUploaded { name: String, bytes: Arc<[u8]> },
    /// Overlay entfernen
    RemoveOverlayRequested { name: String },
    /// Deckkraft eines Overlays geändert
    OverlayOpacityChanged { name: String, opacity: f32 },
    /// Sichtbarkeit eines Overlays geändert
    OverlayVisibilityChanged { name: String, visible: bool },
    /// Ausrichtungs-Werkzeug für ein Overlay gewählt
    AlignOverlayRequested { name: String },
    /// Mess-Werkzeug gewählt
    MeasureDistanceRequested,
    /// Aktives Werkzeug abwählen
    ToolCancelRequested,
    /// Klick auf die Karte (Kartenkoordinaten)
    MapClicked { coordinate: Point2D },
    /// Mauszeiger über der Karte bewegt
    PointerMoved { coordinate: Point2D },
    /// Kartenausschnitt hat sich geändert
    ViewChanged {
        center: Point2D,
        zoom: f64,
        extent: Option<Extent>,
    },
    /// Overlays und Kartenausschnitt speichern
    SaveRequested,
    /// Gespeicherte Overlays laden
    LoadRequested,
}
