//! Fehler-Taxonomie der Georeferenzierungs-Domäne.

use thiserror::Error;

/// Domänenfehler für Transformation, Registry und Wiederherstellung.
///
/// Alle Varianten sind nicht-fatal: der Aufrufer bekommt den Fehler gemeldet,
/// die betroffene Operation ist ein No-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeorefError {
    /// Zusammenfallende Korrespondenzpunkte, Null-Vektoren oder NaN/∞-Eingaben
    #[error("Degenerierte Eingabe: {0}")]
    DegenerateInput(String),
    /// Layer-Name ist in der Registry bereits vergeben
    #[error("Overlay-Layer '{0}' existiert bereits")]
    DuplicateName(String),
    /// Layer-Name ist in der Registry nicht vorhanden
    #[error("Overlay-Layer '{0}' nicht gefunden")]
    NotFound(String),
    /// Ein einzelner gespeicherter Layer konnte nicht wiederhergestellt werden
    #[error("Overlay-Layer '{name}' konnte nicht wiederhergestellt werden: {reason}")]
    Restore {
        /// Name des Layers (oder Index-Platzhalter, falls der Name fehlt)
        name: String,
        /// Ursache (fehlende Felder, defekte Bilddaten, …)
        reason: String,
    },
}

impl GeorefError {
    /// Kurzform für `DegenerateInput`.
    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Kurzform für `Restore`.
    pub(crate) fn restore(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Restore {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
