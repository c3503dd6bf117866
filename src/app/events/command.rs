use std::sync::Arc;

use crate::core::{Extent, Point2D};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Overlay aus Bilddatei hinzufügen
    AddOverlayFromFile { path: String },
    /// Overlay aus Bilddaten hinzufügen
    AddOverlayFromBytes { name: String, bytes: Arc<[u8]> },
    /// Overlay entfernen
    RemoveOverlay { name: String },
    /// Deckkraft setzen (wird auf 0..=1 begrenzt)
    SetOverlayOpacity { name: String, opacity: f32 },
    /// Sichtbarkeit setzen
    SetOverlayVisible { name: String, visible: bool },
    /// Ausrichtungs-Sitzung für ein Overlay starten
    BeginAlignment { name: String },
    /// Klick an das Ausrichtungs-Werkzeug weiterreichen
    AlignmentClick { coordinate: Point2D },
    /// Messung starten
    StartMeasurement,
    /// Klick an das Mess-Werkzeug weiterreichen
    MeasurementClick { coordinate: Point2D },
    /// Cursor-Koordinate aktualisieren
    UpdateCursor { coordinate: Point2D },
    /// Aktives Werkzeug zurücksetzen
    DeactivateTool,
    /// Kartenausschnitt übernehmen
    UpdateView {
        center: Point2D,
        zoom: f64,
        extent: Option<Extent>,
    },
    /// Overlays und Kartenausschnitt in den Blob-Speicher schreiben
    SaveLayers,
    /// Overlays und Kartenausschnitt aus dem Blob-Speicher laden
    LoadLayers,
}
