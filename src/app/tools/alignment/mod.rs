//! Ausrichtungs-Werkzeug: sammelt vier Klicks (Bildpunkt, Kartenpunkt,
//! Bildpunkt, Kartenpunkt) für genau einen Overlay-Layer.

use super::ToolAction;
use crate::core::{solve, GeorefError, Point2D, SimilarityTransform};

/// Phase des Ausrichtungs-Automaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPhase {
    /// Keine Sitzung, Klicks werden ignoriert
    #[default]
    Idle,
    /// Erster Bildpunkt erwartet
    AwaitingPoint1,
    /// Zum ersten Bildpunkt gehörender Kartenpunkt erwartet
    AwaitingPoint2,
    /// Zweiter Bildpunkt erwartet
    AwaitingPoint3,
    /// Zum zweiten Bildpunkt gehörender Kartenpunkt erwartet
    AwaitingPoint4,
}

/// Vollständige Klickfolge einer abgeschlossenen Sitzung.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentCapture {
    /// Ziel-Layer der Sitzung
    pub layer: String,
    /// Klicks in Eingabereihenfolge: Bild 1, Karte 1, Bild 2, Karte 2
    pub points: [Point2D; 4],
}

impl AlignmentCapture {
    /// Bildanker (Quellpunkte) in Reihenfolge.
    pub fn image_anchors(&self) -> (Point2D, Point2D) {
        (self.points[0], self.points[2])
    }

    /// Kartenanker (Zielpunkte) in Reihenfolge.
    pub fn map_anchors(&self) -> (Point2D, Point2D) {
        (self.points[1], self.points[3])
    }

    /// Löst die Ähnlichkeitstransformation Bildanker → Kartenanker.
    pub fn solve(&self) -> Result<SimilarityTransform, GeorefError> {
        let (src1, src2) = self.image_anchors();
        let (dst1, dst2) = self.map_anchors();
        solve(src1, src2, dst1, dst2)
    }
}

/// Zustandsautomat der Vier-Klick-Ausrichtung.
///
/// Die Phase ergibt sich aus Ziel-Layer und Anzahl gesammelter Punkte,
/// dadurch gibt es keinen Zustand mit mehr als vier Punkten.
#[derive(Debug, Clone, Default)]
pub struct AlignmentTool {
    layer: Option<String>,
    points: Vec<Point2D>,
}

impl AlignmentTool {
    /// Erstellt einen inaktiven Automaten.
    pub fn new() -> Self {
        Self::default()
    }

    /// Startet eine neue Sitzung für `layer`.
    ///
    /// Eine laufende Sitzung wird kommentarlos verworfen.
    pub fn begin(&mut self, layer: impl Into<String>) {
        let layer = layer.into();
        if let Some(previous) = self.layer.as_deref() {
            log::debug!(
                "Ausrichtung für '{}' verworfen ({} Punkte)",
                previous,
                self.points.len()
            );
        }
        log::debug!("Ausrichtung gestartet für '{}'", layer);
        self.layer = Some(layer);
        self.points.clear();
    }

    /// Verarbeitet genau einen Kartenklick.
    pub fn feed(&mut self, point: Point2D) -> ToolAction<AlignmentCapture> {
        let Some(layer) = self.layer.as_deref() else {
            log::debug!("Ausrichtung inaktiv, Klick ignoriert");
            return ToolAction::Ignored;
        };

        self.points.push(point);
        log::debug!(
            "Ausrichtung '{}': Punkt {} = ({:.3}, {:.3})",
            layer,
            self.points.len(),
            point.x,
            point.y
        );
        if self.points.len() < 4 {
            return ToolAction::Continue;
        }

        let layer = self.layer.take().unwrap_or_default();
        let points = [
            self.points[0],
            self.points[1],
            self.points[2],
            self.points[3],
        ];
        self.points.clear();
        ToolAction::Complete(AlignmentCapture { layer, points })
    }

    /// Bricht die Sitzung ab (ohne Wirkung auf den Layer).
    pub fn cancel(&mut self) {
        self.layer = None;
        self.points.clear();
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> AlignmentPhase {
        match (self.layer.is_some(), self.points.len()) {
            (false, _) => AlignmentPhase::Idle,
            (true, 0) => AlignmentPhase::AwaitingPoint1,
            (true, 1) => AlignmentPhase::AwaitingPoint2,
            (true, 2) => AlignmentPhase::AwaitingPoint3,
            (true, _) => AlignmentPhase::AwaitingPoint4,
        }
    }

    /// Gibt `true` zurück, solange eine Sitzung läuft.
    pub fn is_active(&self) -> bool {
        self.layer.is_some()
    }

    /// Ziel-Layer der laufenden Sitzung.
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Bisher gesammelte Punkte.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Hinweistext für die Statuszeile.
    pub fn status_text(&self) -> &'static str {
        match self.phase() {
            AlignmentPhase::Idle => "Ausrichtung inaktiv",
            AlignmentPhase::AwaitingPoint1 => "Ersten Punkt im Overlay klicken",
            AlignmentPhase::AwaitingPoint2 | AlignmentPhase::AwaitingPoint4 => {
                "Entsprechenden Punkt auf der Karte klicken"
            }
            AlignmentPhase::AwaitingPoint3 => "Zweiten Punkt im Overlay zum Ausrichten klicken",
        }
    }
}
