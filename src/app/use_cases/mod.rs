//! Use-Case-Funktionen: fachliche Abläufe auf dem AppState.

/// Vier-Klick-Ausrichtung und Commit auf den Layer.
pub mod alignment;
/// Distanzmessung und Cursor-Anzeige.
pub mod measurement;
/// Overlay hinzufügen, entfernen, Deckkraft und Sichtbarkeit.
pub mod overlay;
/// Speichern und Laden über den Blob-Speicher.
pub mod persistence;
/// Kartenausschnitt und Werkzeugwahl.
pub mod view;
