//! Zentrale Konfiguration für Overlay-Ausrichtung und Messung.
//!
//! `OverlayOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::ImageCodec;

// ── Overlays ────────────────────────────────────────────────────────

/// Standard-Deckkraft neu hinzugefügter Overlay-Layer.
pub const DEFAULT_LAYER_OPACITY: f32 = 0.8;

// ── Anzeige ─────────────────────────────────────────────────────────

/// Nachkommastellen für angezeigte Koordinaten.
pub const COORDINATE_DECIMALS: usize = 2;
/// Nachkommastellen für angezeigte Distanzen.
pub const DISTANCE_DECIMALS: usize = 3;

// ── Kartenausschnitt ────────────────────────────────────────────────

/// Start-Kartenmittelpunkt (Web-Mercator, ca. 15.1° O / 48.15° N).
pub const DEFAULT_VIEW_CENTER: [f64; 2] = [1_680_924.31, 6_131_845.87];
/// Start-Zoomstufe.
pub const DEFAULT_VIEW_ZOOM: f64 = 17.0;

// ── Speicher ────────────────────────────────────────────────────────

/// Standard-Verzeichnis des Overlay-Speichers (relativ zum Programmverzeichnis).
pub const STORE_DIR: &str = "plan_overlay_store";

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `plan_overlay.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayOptions {
    /// Deckkraft neuer Overlay-Layer
    pub default_layer_opacity: f32,
    /// Nachkommastellen der Koordinatenanzeige
    pub coordinate_decimals: usize,
    /// Nachkommastellen der Distanzanzeige
    pub distance_decimals: usize,
    /// Kartenmittelpunkt ohne gespeicherten Ausschnitt
    pub default_view_center: [f64; 2],
    /// Zoomstufe ohne gespeicherten Ausschnitt
    pub default_view_zoom: f64,
    /// Verzeichnis des Overlay-Speichers (relativ: neben der Binary)
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
    /// Bildformat für gespeicherte Overlays
    #[serde(default)]
    pub image_codec: ImageCodec,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            default_layer_opacity: DEFAULT_LAYER_OPACITY,
            coordinate_decimals: COORDINATE_DECIMALS,
            distance_decimals: DISTANCE_DECIMALS,
            default_view_center: DEFAULT_VIEW_CENTER,
            default_view_zoom: DEFAULT_VIEW_ZOOM,
            store_dir: default_store_dir(),
            image_codec: ImageCodec::Png,
        }
    }
}

/// Serde-Default für `store_dir` (Abwärtskompatibilität).
fn default_store_dir() -> String {
    STORE_DIR.to_string()
}

impl OverlayOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Verzeichnis der Binary; Ablageort für Optionen und relativen Speicher.
    pub fn app_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        Self::app_dir().join("plan_overlay.toml")
    }

    /// Verzeichnis des Overlay-Speichers. Relative Angaben gelten ab `app_dir()`.
    pub fn store_path(&self) -> PathBuf {
        let dir = Path::new(&self.store_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            Self::app_dir().join(dir)
        }
    }

    /// Formatiert eine Koordinate für die Anzeige (`x, y`).
    pub fn format_coordinate(&self, point: glam::DVec2) -> String {
        let d = self.coordinate_decimals;
        format!("{:.*}, {:.*}", d, point.x, d, point.y)
    }

    /// Formatiert eine Distanz für die Anzeige.
    pub fn format_distance(&self, distance: f64) -> String {
        format!("{:.*}", self.distance_decimals, distance)
    }
}
