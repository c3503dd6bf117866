//! Plan-Overlay-Georeferenzierung.
//! Ausrichtung von Rasterbildern auf einer Karte per Vier-Klick-Verfahren,
//! Distanzmessung und Persistierung der Overlays als Library.

pub mod app;
pub mod core;
pub mod persistence;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, HostOutbox, HostRequest, MapHost, UiState,
    ViewState,
};
pub use core::{
    recompute, solve, Extent, GeorefError, ImageCodec, OverlayLayer, OverlayRegistry, Point2D,
    SimilarityTransform,
};
pub use persistence::{BlobStore, DirStore, MemoryStore};
pub use shared::OverlayOptions;
