//! Grenze zum Karten-Widget des Hosts.
//!
//! Use-Cases mutieren nur den AppState und legen ausgehende Anfragen in der
//! `HostOutbox` ab. Der Host liefert sie per `flush()` in Reihenfolge an
//! sein `MapHost`-Widget aus.

use std::collections::VecDeque;
use std::sync::Arc;

use image::DynamicImage;

use crate::core::{Extent, OverlayLayer, Point2D};

/// Ausgehende Anfrage an das Karten-Widget.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    /// Render-Handle für einen neuen Layer anlegen
    AddLayer { name: String },
    /// Render-Handle eines Layers freigeben
    RemoveLayer { name: String },
    /// Bild und Platzierung eines Layers setzen
    SetLayerSource {
        name: String,
        image: Arc<DynamicImage>,
        extent: Extent,
    },
    /// Deckkraft eines Layers setzen
    SetLayerOpacity { name: String, opacity: f32 },
    /// Sichtbarkeit eines Layers setzen
    SetLayerVisible { name: String, visible: bool },
    /// Kartenausschnitt setzen
    SetView { center: Point2D, zoom: f64 },
}

/// Karten-Widget des Hosts.
pub trait MapHost {
    /// Legt einen Layer an.
    fn add_layer(&mut self, name: &str) -> anyhow::Result<()>;
    /// Entfernt einen Layer.
    fn remove_layer(&mut self, name: &str) -> anyhow::Result<()>;
    /// Setzt Bild und Extent eines Layers.
    fn set_layer_source(
        &mut self,
        name: &str,
        image: &Arc<DynamicImage>,
        extent: &Extent,
    ) -> anyhow::Result<()>;
    /// Setzt die Deckkraft eines Layers.
    fn set_layer_opacity(&mut self, name: &str, opacity: f32) -> anyhow::Result<()>;
    /// Setzt die Sichtbarkeit eines Layers.
    fn set_layer_visible(&mut self, name: &str, visible: bool) -> anyhow::Result<()>;
    /// Setzt Kartenmittelpunkt und Zoom.
    fn set_view(&mut self, center: Point2D, zoom: f64) -> anyhow::Result<()>;
}

/// Warteschlange ausgehender Host-Anfragen.
#[derive(Debug, Default)]
pub struct HostOutbox {
    pending: VecDeque<HostRequest>,
}

impl HostOutbox {
    /// Erstellt eine leere Warteschlange.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt eine Anfrage an.
    pub fn push(&mut self, request: HostRequest) {
        self.pending.push_back(request);
    }

    /// Kündigt einen vollständigen Layer an (Handle, Bild, Deckkraft, Sichtbarkeit).
    pub fn announce_layer(&mut self, layer: &OverlayLayer) {
        let name = layer.name().to_string();
        self.push(HostRequest::AddLayer { name: name.clone() });
        self.push_source(layer);
        self.push(HostRequest::SetLayerOpacity {
            name: name.clone(),
            opacity: layer.opacity(),
        });
        self.push(HostRequest::SetLayerVisible {
            name,
            visible: layer.is_visible(),
        });
    }

    /// Hängt den aktuellen Bild- und Extent-Stand eines Layers an.
    pub fn push_source(&mut self, layer: &OverlayLayer) {
        self.push(HostRequest::SetLayerSource {
            name: layer.name().to_string(),
            image: Arc::clone(layer.image()),
            extent: *layer.extent(),
        });
    }

    /// Entnimmt alle ausstehenden Anfragen in Reihenfolge.
    pub fn drain(&mut self) -> Vec<HostRequest> {
        self.pending.drain(..).collect()
    }

    /// Ausstehende Anfragen (read-only).
    pub fn pending(&self) -> impl Iterator<Item = &HostRequest> {
        self.pending.iter()
    }

    /// Anzahl ausstehender Anfragen.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Gibt `true` zurück, wenn keine Anfragen ausstehen.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Liefert alle Anfragen in Reihenfolge an `host` aus.
    ///
    /// Schlägt eine Anfrage fehl, bleibt sie samt Nachfolgern in der
    /// Warteschlange und der Fehler wird zurückgegeben.
    pub fn flush(&mut self, host: &mut dyn MapHost) -> anyhow::Result<usize> {
        let mut delivered = 0;
        while let Some(request) = self.pending.pop_front() {
            if let Err(e) = deliver(host, &request) {
                log::warn!("Host-Anfrage fehlgeschlagen: {:#}", e);
                self.pending.push_front(request);
                return Err(e);
            }
            delivered += 1;
        }
        Ok(delivered)
    }
}

fn deliver(host: &mut dyn MapHost, request: &HostRequest) -> anyhow::Result<()> {
    match request {
        HostRequest::AddLayer { name } => host.add_layer(name),
        HostRequest::RemoveLayer { name } => host.remove_layer(name),
        HostRequest::SetLayerSource {
            name,
            image,
            extent,
        } => host.set_layer_source(name, image, extent),
        HostRequest::SetLayerOpacity { name, opacity } => host.set_layer_opacity(name, *opacity),
        HostRequest::SetLayerVisible { name, visible } => host.set_layer_visible(name, *visible),
        HostRequest::SetView { center, zoom } => host.set_view(*center, *zoom),
    }
}
