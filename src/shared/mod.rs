//! Geteilte Typen für schichtübergreifende Verträge (Konfiguration).

pub mod options;

pub use options::OverlayOptions;
pub use options::{DEFAULT_LAYER_OPACITY, DISTANCE_DECIMALS};
