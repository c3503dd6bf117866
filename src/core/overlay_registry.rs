//! Geordnete Registry aller Overlay-Layer inkl. Persistierungs-Snapshot.
//!
//! Die Reihenfolge der Registry ist die Zeichenreihenfolge (zuerst
//! hinzugefügt = zuunterst) und bleibt über `persist()`/`restore()` erhalten.

use anyhow::Result;
use image::DynamicImage;
use indexmap::IndexMap;

use super::raster::{self, ImageCodec};
use super::{Extent, GeorefError, OverlayLayer};

/// Serialisierter Zustand eines einzelnen Layers.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedLayer {
    /// Layer-Name
    pub name: String,
    /// Kodierte Bilddaten (Format siehe `ImageCodec`)
    pub image: Vec<u8>,
    /// Platzierung (exakt)
    pub extent: Extent,
    /// Opacity (exakt)
    pub opacity: f32,
    /// Sichtbarkeit
    pub visible: bool,
}

/// Gesamter Overlay-Zustand, wird als Einheit geschrieben und gelesen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    /// Layer in Registry-Reihenfolge
    pub layers: Vec<PersistedLayer>,
}

/// Ergebnis einer Wiederherstellung mit Teilfehler-Semantik.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Erfolgreich wiederhergestellte Layer (in Reihenfolge)
    pub restored: Vec<String>,
    /// Übersprungene Layer mit Ursache
    pub failed: Vec<GeorefError>,
}

/// Geordnete Sammlung benannter Overlay-Layer.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    layers: IndexMap<String, OverlayLayer>,
}

impl OverlayRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen neuen Layer hinzu.
    ///
    /// Doppelte Namen werden abgelehnt (`DuplicateName`), der bestehende
    /// Layer bleibt unverändert.
    pub fn add(
        &mut self,
        name: &str,
        image: DynamicImage,
        extent: Extent,
    ) -> Result<&OverlayLayer, GeorefError> {
        if self.layers.contains_key(name) {
            return Err(GeorefError::DuplicateName(name.to_string()));
        }
        extent.validate()?;
        let entry = self
            .layers
            .entry(name.to_string())
            .or_insert_with(|| OverlayLayer::new(name, image, extent));
        log::info!("Overlay-Layer hinzugefügt: '{}'", name);
        Ok(entry)
    }

    /// Entfernt einen Layer und gibt ihn zurück. Reihenfolge der übrigen bleibt.
    pub fn remove(&mut self, name: &str) -> Result<OverlayLayer, GeorefError> {
        let layer = self
            .layers
            .shift_remove(name)
            .ok_or_else(|| GeorefError::NotFound(name.to_string()))?;
        log::info!("Overlay-Layer entfernt: '{}'", name);
        Ok(layer)
    }

    /// Gibt den Layer mit dem Namen zurück (falls vorhanden).
    pub fn get(&self, name: &str) -> Option<&OverlayLayer> {
        self.layers.get(name)
    }

    /// Mutable Variante von `get` mit `NotFound`-Fehler.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut OverlayLayer, GeorefError> {
        self.layers
            .get_mut(name)
            .ok_or_else(|| GeorefError::NotFound(name.to_string()))
    }

    /// Prüft ob ein Layer mit dem Namen existiert.
    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Alle Layer-Namen in Registry-Reihenfolge.
    pub fn names(&self) -> Vec<&str> {
        self.layers.keys().map(String::as_str).collect()
    }

    /// Iteriert alle Layer in Registry-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayLayer> {
        self.layers.values()
    }

    /// Gibt die Anzahl der Layer zurück.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Gibt zurück ob die Registry leer ist.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Serialisiert alle Layer in Registry-Reihenfolge.
    pub fn persist(&self, codec: ImageCodec) -> Result<PersistedState> {
        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in self.layers.values() {
            let image = raster::encode(layer.image(), codec)?;
            layers.push(PersistedLayer {
                name: layer.name().to_string(),
                image,
                extent: *layer.extent(),
                opacity: layer.opacity(),
                visible: layer.is_visible(),
            });
        }
        Ok(PersistedState { layers })
    }

    /// Ersetzt den Inhalt durch den gespeicherten Zustand.
    ///
    /// Defekte Einträge (ungültiger Extent, nicht dekodierbare Bilddaten,
    /// doppelte Namen) werden übersprungen und im Report gemeldet; die
    /// übrigen Layer werden trotzdem geladen.
    pub fn restore(&mut self, state: PersistedState) -> RestoreReport {
        self.layers.clear();
        let mut report = RestoreReport::default();

        for entry in state.layers {
            match Self::restore_layer(&entry) {
                Ok(_) if self.layers.contains_key(&entry.name) => {
                    let err = GeorefError::restore(&entry.name, "Name doppelt vergeben");
                    log::warn!("{}", err);
                    report.failed.push(err);
                }
                Ok(layer) => {
                    report.restored.push(entry.name.clone());
                    self.layers.insert(entry.name, layer);
                }
                Err(err) => {
                    log::warn!("{}", err);
                    report.failed.push(err);
                }
            }
        }

        log::info!(
            "Overlay-Layer wiederhergestellt: {} ok, {} fehlerhaft",
            report.restored.len(),
            report.failed.len()
        );
        report
    }

    fn restore_layer(entry: &PersistedLayer) -> Result<OverlayLayer, GeorefError> {
        entry
            .extent
            .validate()
            .map_err(|e| GeorefError::restore(&entry.name, e))?;
        if !(0.0..=1.0).contains(&entry.opacity) {
            return Err(GeorefError::restore(
                &entry.name,
                format!("Opacity außerhalb [0, 1]: {}", entry.opacity),
            ));
        }
        let image = raster::decode(&entry.image)
            .map_err(|e| GeorefError::restore(&entry.name, format!("{e:#}")))?;

        let mut layer = OverlayLayer::new(&entry.name, image, entry.extent);
        layer.set_opacity(entry.opacity);
        layer.set_visible(entry.visible);
        Ok(layer)
    }
}
