//! Core-Domänentypen: Geometrie, Extent, Rasterbild, Overlay-Layer und Registry.

pub mod error;
pub mod extent;
pub mod geometry;
pub mod overlay_layer;
pub mod overlay_registry;
pub mod raster;

pub use error::GeorefError;
pub use extent::{recompute, Extent};
pub use geometry::{normalize_degrees, solve, Point2D, SimilarityTransform};
pub use overlay_layer::OverlayLayer;
pub use overlay_registry::{OverlayRegistry, PersistedLayer, PersistedState, RestoreReport};
pub use raster::ImageCodec;
