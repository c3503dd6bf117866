//! Ablage des Overlay-Zustands im Blob-Speicher.
//!
//! Schlüssel-Layout:
//! - `overlays/index.json`: JSON-Array mit Name, Extent, Opacity, Sichtbarkeit
//!   und Bild-Schlüssel je Layer (Reihenfolge = Registry-Reihenfolge)
//! - `overlays/images/g<gen>/<n>`: kodierte Bilddaten je Speicher-Generation
//! - `view.json`: Kartenmittelpunkt und Zoom

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::BlobStore;
use crate::core::{Extent, GeorefError, PersistedLayer, PersistedState};

/// Schlüssel des Layer-Index.
pub const INDEX_KEY: &str = "overlays/index.json";
/// Präfix der Bild-Schlüssel.
pub const IMAGE_KEY_PREFIX: &str = "overlays/images/";
/// Schlüssel des gespeicherten Kartenausschnitts.
pub const VIEW_KEY: &str = "view.json";

/// Ein Eintrag im Layer-Index (Metadaten ohne Bilddaten).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Layer-Name
    pub name: String,
    /// Platzierung
    pub extent: Extent,
    /// Opacity
    pub opacity: f32,
    /// Sichtbarkeit
    pub visible: bool,
    /// Schlüssel der Bilddaten
    pub image_key: String,
}

/// Gespeicherter Kartenausschnitt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// Kartenmittelpunkt (projiziert)
    pub center: [f64; 2],
    /// Zoomstufe
    pub zoom: f64,
}

/// Ergebnis des Lesens: lesbare Layer plus Fehler defekter Einträge.
#[derive(Debug, Default)]
pub struct LoadedOverlays {
    /// Vollständig gelesene Layer in gespeicherter Reihenfolge
    pub state: PersistedState,
    /// Einträge mit fehlenden Feldern oder fehlenden Bilddaten
    pub errors: Vec<GeorefError>,
}

/// Parst den Layer-Index.
///
/// Ein nicht lesbares Gesamtdokument ist ein Fehler; einzelne defekte
/// Einträge werden als `Restore`-Fehler an ihrer Position zurückgegeben.
pub fn parse_index(bytes: &[u8]) -> Result<Vec<Result<IndexEntry, GeorefError>>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).context("Layer-Index ist kein JSON-Array")?;

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let label = value
                .get("name")
                .and_then(|n| n.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", i));
            serde_json::from_value::<IndexEntry>(value).map_err(|e| GeorefError::restore(label, e))
        })
        .collect())
}

/// Schreibt den gesamten Overlay-Zustand als Einheit.
///
/// Bilder landen unter einer neuen Generation (`overlays/images/g<n>/<i>`),
/// der Index wird zuletzt geschrieben. Schlägt ein Schritt fehl, bleiben
/// alter Index und alte Bilder unverändert lesbar. Bilder der Vorgänger-
/// Generation werden erst nach erfolgreichem Index-Schreiben gelöscht.
pub fn write_overlays(store: &mut dyn BlobStore, state: &PersistedState) -> Result<()> {
    let old_keys = previous_image_keys(store);
    let generation = old_keys
        .iter()
        .filter_map(|k| image_generation(k))
        .max()
        .map_or(0, |g| g + 1);

    let mut written: Vec<String> = Vec::with_capacity(state.layers.len());
    let result = write_generation(store, state, generation, &mut written);
    if let Err(e) = result {
        for key in &written {
            if let Err(cleanup) = store.delete(key) {
                log::warn!("Verwaiste Bilddaten '{}' nicht löschbar: {:#}", key, cleanup);
            }
        }
        return Err(e);
    }

    for stale in &old_keys {
        if let Err(e) = store.delete(stale) {
            log::warn!("Veraltete Bilddaten '{}' nicht löschbar: {:#}", stale, e);
        }
    }

    log::info!(
        "{} Overlay-Layer gespeichert (Generation {})",
        state.layers.len(),
        generation
    );
    Ok(())
}

fn write_generation(
    store: &mut dyn BlobStore,
    state: &PersistedState,
    generation: u64,
    written: &mut Vec<String>,
) -> Result<()> {
    let mut index = Vec::with_capacity(state.layers.len());
    for (i, layer) in state.layers.iter().enumerate() {
        let image_key = format!("{}g{}/{}", IMAGE_KEY_PREFIX, generation, i);
        store
            .set(&image_key, &layer.image)
            .with_context(|| format!("Bilddaten für '{}' nicht speicherbar", layer.name))?;
        written.push(image_key.clone());
        index.push(IndexEntry {
            name: layer.name.clone(),
            extent: layer.extent,
            opacity: layer.opacity,
            visible: layer.visible,
            image_key,
        });
    }

    let json = serde_json::to_vec_pretty(&index)?;
    store
        .set(INDEX_KEY, &json)
        .context("Layer-Index nicht speicherbar")
}

/// Generation eines Bild-Schlüssels (`overlays/images/g<n>/<i>`).
fn image_generation(key: &str) -> Option<u64> {
    let rest = key.strip_prefix(IMAGE_KEY_PREFIX)?.strip_prefix('g')?;
    let (generation, _) = rest.split_once('/')?;
    generation.parse().ok()
}

fn previous_image_keys(store: &dyn BlobStore) -> Vec<String> {
    let Ok(Some(bytes)) = store.get(INDEX_KEY) else {
        return Vec::new();
    };
    match parse_index(&bytes) {
        Ok(entries) => entries
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.image_key)
            .filter(|k| k.starts_with(IMAGE_KEY_PREFIX))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Liest den Overlay-Zustand. Ohne gespeicherten Index: leerer Zustand.
pub fn read_overlays(store: &dyn BlobStore) -> Result<LoadedOverlays> {
    let Some(bytes) = store.get(INDEX_KEY)? else {
        log::info!("Kein gespeicherter Overlay-Zustand vorhanden");
        return Ok(LoadedOverlays::default());
    };

    let mut loaded = LoadedOverlays::default();
    for entry in parse_index(&bytes)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("{}", err);
                loaded.errors.push(err);
                continue;
            }
        };

        match store.get(&entry.image_key) {
            Ok(Some(image)) => loaded.state.layers.push(PersistedLayer {
                name: entry.name,
                image,
                extent: entry.extent,
                opacity: entry.opacity,
                visible: entry.visible,
            }),
            Ok(None) => {
                let err = GeorefError::restore(entry.name, "Bilddaten fehlen");
                log::warn!("{}", err);
                loaded.errors.push(err);
            }
            Err(e) => {
                let err = GeorefError::restore(entry.name, format!("{e:#}"));
                log::warn!("{}", err);
                loaded.errors.push(err);
            }
        }
    }
    Ok(loaded)
}

/// Speichert den Kartenausschnitt.
pub fn write_view(store: &mut dyn BlobStore, view: &ViewSnapshot) -> Result<()> {
    store.set(VIEW_KEY, &serde_json::to_vec(view)?)
}

/// Liest den Kartenausschnitt (`None` wenn nicht gespeichert oder unlesbar).
pub fn read_view(store: &dyn BlobStore) -> Result<Option<ViewSnapshot>> {
    let Some(bytes) = store.get(VIEW_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_slice::<ViewSnapshot>(&bytes) {
        Ok(view) if view.zoom.is_finite() && view.center.iter().all(|c| c.is_finite()) => {
            Ok(Some(view))
        }
        Ok(_) | Err(_) => {
            log::warn!("Gespeicherter Kartenausschnitt unlesbar, wird ignoriert");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn layer(name: &str, image: &[u8]) -> PersistedLayer {
        PersistedLayer {
            name: name.to_string(),
            image: image.to_vec(),
            extent: Extent::new(0.5, 1.5, 2.25, 3.75).unwrap(),
            opacity: 0.8,
            visible: false,
        }
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut store = MemoryStore::new();
        let state = PersistedState {
            layers: vec![layer("b", b"bild-b"), layer("a", b"bild-a")],
        };

        write_overlays(&mut store, &state).unwrap();
        let loaded = read_overlays(&store).unwrap();

        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.state, state);
    }

    #[test]
    fn test_read_without_index_is_empty() {
        let store = MemoryStore::new();
        let loaded = read_overlays(&store).unwrap();
        assert!(loaded.state.layers.is_empty());
        assert!(loaded.errors.is_empty());
    }

    /// Speicher, dessen n-ter `set`-Aufruf fehlschlägt.
    struct FailingStore {
        inner: MemoryStore,
        sets: usize,
        fail_at: Option<usize>,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                sets: 0,
                fail_at: None,
            }
        }
    }

    impl BlobStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
            self.sets += 1;
            if self.fail_at == Some(self.sets) {
                anyhow::bail!("Speicher voll");
            }
            self.inner.set(key, value)
        }

        fn delete(&mut self, key: &str) -> Result<()> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_write_removes_stale_images() {
        let mut store = MemoryStore::new();
        let three = PersistedState {
            layers: vec![layer("a", b"1"), layer("b", b"2"), layer("c", b"3")],
        };
        write_overlays(&mut store, &three).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.get("overlays/images/g0/2").unwrap(), Some(b"3".to_vec()));

        let one = PersistedState {
            layers: vec![layer("a", b"1")],
        };
        write_overlays(&mut store, &one).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("overlays/images/g0/0").unwrap(), None);
        assert_eq!(store.get("overlays/images/g1/0").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn test_failed_write_keeps_previous_state_readable() {
        let mut store = FailingStore::new();
        let before = PersistedState {
            layers: vec![layer("A", b"bild-a"), layer("B", b"bild-b")],
        };
        write_overlays(&mut store, &before).unwrap();

        // Abbruch beim zweiten Bild, danach beim Index
        for fail_after in [2, 3] {
            store.fail_at = Some(store.sets + fail_after);
            let after = PersistedState {
                layers: vec![layer("X", b"bild-x"), layer("Y", b"bild-y")],
            };
            assert!(write_overlays(&mut store, &after).is_err());

            let loaded = read_overlays(&store).unwrap();
            assert!(loaded.errors.is_empty());
            assert_eq!(loaded.state, before);
            // Bilder und Index der ersten Generation, keine Reste
            assert_eq!(store.inner.len(), 3);
        }

        store.fail_at = None;
        let after = PersistedState {
            layers: vec![layer("X", b"bild-x")],
        };
        write_overlays(&mut store, &after).unwrap();
        assert_eq!(read_overlays(&store).unwrap().state, after);
        assert_eq!(store.inner.len(), 2);
    }

    #[test]
    fn test_read_reports_missing_fields_and_images_per_entry() {
        let mut store = MemoryStore::new();
        let index = br#"[
            {"name": "ok", "extent": {"x0": 0, "y0": 0, "x1": 1, "y1": 1},
             "opacity": 1.0, "visible": true, "image_key": "overlays/images/0"},
            {"name": "ohne_extent", "opacity": 1.0, "visible": true,
             "image_key": "overlays/images/1"},
            {"name": "ohne_bild", "extent": {"x0": 0, "y0": 0, "x1": 1, "y1": 1},
             "opacity": 1.0, "visible": true, "image_key": "overlays/images/9"}
        ]"#;
        store.set(INDEX_KEY, index).unwrap();
        store.set("overlays/images/0", b"bild").unwrap();
        store.set("overlays/images/1", b"bild").unwrap();

        let loaded = read_overlays(&store).unwrap();

        assert_eq!(loaded.state.layers.len(), 1);
        assert_eq!(loaded.state.layers[0].name, "ok");
        assert_eq!(loaded.errors.len(), 2);
        assert!(matches!(
            &loaded.errors[0],
            GeorefError::Restore { name, .. } if name == "ohne_extent"
        ));
        assert!(matches!(
            &loaded.errors[1],
            GeorefError::Restore { name, .. } if name == "ohne_bild"
        ));
    }

    #[test]
    fn test_parse_index_rejects_non_array() {
        assert!(parse_index(b"{\"name\": 1}").is_err());
        assert!(parse_index(b"kaputt").is_err());
        let entries = parse_index(b"[42]").unwrap();
        assert!(matches!(
            &entries[0],
            Err(GeorefError::Restore { name, .. }) if name == "#0"
        ));
    }

    #[test]
    fn test_view_roundtrip_and_garbage() {
        let mut store = MemoryStore::new();
        assert_eq!(read_view(&store).unwrap(), None);

        let view = ViewSnapshot {
            center: [1_680_924.3, 6_131_845.9],
            zoom: 17.0,
        };
        write_view(&mut store, &view).unwrap();
        assert_eq!(read_view(&store).unwrap(), Some(view));

        store.set(VIEW_KEY, b"???").unwrap();
        assert_eq!(read_view(&store).unwrap(), None);
    }
}
