//! Klick-Werkzeuge als explizite Zustandsautomaten.
//!
//! Jedes Werkzeug konsumiert genau einen Klick pro `feed()`-Aufruf und
//! meldet über `ToolAction`, ob weitere Eingaben nötig sind oder der
//! Ablauf abgeschlossen ist. Die Mutation des AppState erfolgt zentral in
//! den Use-Cases.

/// Vier-Klick-Ausrichtung eines Overlay-Layers.
pub mod alignment;
/// Zwei-Klick-Distanzmessung.
pub mod measure;

pub use alignment::{AlignmentCapture, AlignmentPhase, AlignmentTool};
pub use measure::{MeasurePhase, MeasureTool, Measurement};

/// Rückgabe von `feed`: steuert den Tool-Flow.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction<T> {
    /// Werkzeug ist inaktiv, Klick wurde verworfen
    Ignored,
    /// Punkt registriert, weitere Eingabe nötig
    Continue,
    /// Letzter Punkt gesetzt, Ergebnis liegt vor. Das Werkzeug ist wieder inaktiv.
    Complete(T),
}

/// Aktuell gewähltes Klick-Werkzeug. Es ist immer höchstens eines aktiv.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    /// Kein Werkzeug: Kartenklicks werden nicht ausgewertet
    #[default]
    None,
    /// Overlay-Ausrichtung
    Align,
    /// Distanzmessung
    Measure,
}

/// Zustand aller Klick-Werkzeuge.
#[derive(Debug, Default)]
pub struct ToolState {
    /// Aktives Werkzeug (bestimmt das Klick-Routing)
    pub active: ActiveTool,
    /// Ausrichtungs-Automat
    pub alignment: AlignmentTool,
    /// Mess-Automat
    pub measure: MeasureTool,
}

impl ToolState {
    /// Erstellt den Standard-Werkzeugzustand (kein Werkzeug aktiv).
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt beide Automaten zurück und deaktiviert das Werkzeug.
    pub fn deactivate(&mut self) {
        self.alignment.cancel();
        self.measure.cancel();
        self.active = ActiveTool::None;
    }
}
