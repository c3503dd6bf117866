//! Mess-Werkzeug: zwei Kartenklicks, Ergebnis ist die euklidische Distanz
//! in Projektionseinheiten (Meter).

use super::ToolAction;
use crate::core::Point2D;
use crate::shared::OverlayOptions;

/// Phase des Mess-Automaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurePhase {
    /// Inaktiv
    #[default]
    Idle,
    /// Erster Punkt erwartet
    AwaitingFirst,
    /// Zweiter Punkt erwartet
    AwaitingSecond,
}

/// Ergebnis einer abgeschlossenen Messung.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Erster Punkt
    pub first: Point2D,
    /// Zweiter Punkt
    pub second: Point2D,
    /// Anzeige des ersten Punkts
    pub first_display: String,
    /// Anzeige des zweiten Punkts
    pub second_display: String,
    /// Distanz in Projektionseinheiten
    pub distance: f64,
    /// Formatierte Distanz
    pub distance_display: String,
}

impl Measurement {
    /// Einzeilige Zusammenfassung für die Statuszeile.
    pub fn summary(&self) -> String {
        format!(
            "({}) → ({}): {} m",
            self.first_display, self.second_display, self.distance_display
        )
    }
}

/// Zustandsautomat der Zwei-Klick-Messung.
#[derive(Debug, Clone, Default)]
pub struct MeasureTool {
    phase: MeasurePhase,
    first: Option<(Point2D, String)>,
}

impl MeasureTool {
    /// Erstellt einen inaktiven Automaten.
    pub fn new() -> Self {
        Self::default()
    }

    /// Startet eine neue Messung und verwirft einen gespeicherten ersten Punkt.
    pub fn start(&mut self) {
        self.first = None;
        self.phase = MeasurePhase::AwaitingFirst;
    }

    /// Verarbeitet genau einen Kartenklick.
    pub fn feed(&mut self, point: Point2D, options: &OverlayOptions) -> ToolAction<Measurement> {
        match self.phase {
            MeasurePhase::Idle => ToolAction::Ignored,
            MeasurePhase::AwaitingFirst => {
                self.first = Some((point, options.format_coordinate(point)));
                self.phase = MeasurePhase::AwaitingSecond;
                ToolAction::Continue
            }
            MeasurePhase::AwaitingSecond => {
                self.phase = MeasurePhase::Idle;
                let Some((first, first_display)) = self.first.take() else {
                    return ToolAction::Ignored;
                };
                let distance = first.distance(point);
                log::debug!("Messung abgeschlossen: {:.3}", distance);
                ToolAction::Complete(Measurement {
                    first,
                    second: point,
                    first_display,
                    second_display: options.format_coordinate(point),
                    distance,
                    distance_display: options.format_distance(distance),
                })
            }
        }
    }

    /// Bricht die Messung ab.
    pub fn cancel(&mut self) {
        self.first = None;
        self.phase = MeasurePhase::Idle;
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> MeasurePhase {
        self.phase
    }

    /// Hinweistext für die Statuszeile.
    pub fn status_text(&self) -> &'static str {
        match self.phase {
            MeasurePhase::Idle => "Messung inaktiv",
            MeasurePhase::AwaitingFirst => "Ersten Messpunkt klicken",
            MeasurePhase::AwaitingSecond => "Zweiten Messpunkt klicken",
        }
    }
}
