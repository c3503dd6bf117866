//! Overlay-Layer: georeferenziertes Rasterbild auf der Karte.

use image::{DynamicImage, GenericImageView};
use std::sync::Arc;

use super::Extent;

/// Vom Benutzer hochgeladenes Rasterbild mit Kartenplatzierung.
///
/// Gehört exklusiv der `OverlayRegistry`; der Host hält nur ein
/// Render-Handle, das über den Namen adressiert wird.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    name: String,
    /// Bilddaten (Arc für günstige Übergabe an den Host)
    image: Arc<DynamicImage>,
    /// Platzierung in Kartenkoordinaten
    extent: Extent,
    /// Opacity (0.0 = transparent, 1.0 = opak)
    opacity: f32,
    visible: bool,
}

impl OverlayLayer {
    /// Erstellt einen sichtbaren Layer mit voller Deckkraft.
    pub fn new(name: impl Into<String>, image: DynamicImage, extent: Extent) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
            extent,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Eindeutiger Name innerhalb der Registry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gibt die Bilddaten zurück
    pub fn image(&self) -> &Arc<DynamicImage> {
        &self.image
    }

    /// Gibt die Platzierung in Kartenkoordinaten zurück
    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Gibt die aktuelle Opacity zurück
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Setzt die Opacity (auf `[0, 1]` begrenzt)
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
    }

    /// Sichtbarkeit
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Setzt die Sichtbarkeit
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Ersetzt Bild und Platzierung (nach einer Ausrichtung).
    pub fn set_source(&mut self, image: DynamicImage, extent: Extent) {
        self.image = Arc::new(image);
        self.extent = extent;
    }

    /// Gibt die Pixel-Dimensionen des Bildes zurück
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
