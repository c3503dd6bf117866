//! Persistierung des Overlay-Zustands über einen opaken Blob-Speicher.

pub mod layout;
pub mod store;

pub use layout::{
    parse_index, read_overlays, read_view, write_overlays, write_view, IndexEntry,
    LoadedOverlays, ViewSnapshot,
};
pub use store::{BlobStore, DirStore, MemoryStore};
