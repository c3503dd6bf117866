//! Application State: zentrale Datenhaltung.

use super::host::HostOutbox;
use super::tools::{Measurement, ToolState};
use super::CommandLog;
use crate::core::{Extent, GeorefError, OverlayRegistry, Point2D};
use crate::persistence::{BlobStore, DirStore, MemoryStore};
use crate::shared::OverlayOptions;

/// View-bezogener Anwendungszustand (vom Host gemeldet)
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Kartenmittelpunkt (projiziert)
    pub center: Point2D,
    /// Zoomstufe
    pub zoom: f64,
    /// Sichtbarer Kartenausschnitt, sobald der Host ihn gemeldet hat
    pub visible_extent: Option<Extent>,
}

impl ViewState {
    /// Erstellt den Start-Ausschnitt aus den Optionen.
    pub fn from_options(options: &OverlayOptions) -> Self {
        let [x, y] = options.default_view_center;
        Self {
            center: Point2D::new(x, y),
            zoom: options.default_view_zoom,
            visible_extent: None,
        }
    }
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Statusnachricht (Werkzeug-Hinweise, Ergebnisse, Fehler)
    pub status_message: Option<String>,
    /// Live-Anzeige der Cursor-Koordinate
    pub cursor_text: Option<String>,
    /// Ergebnis der letzten Messung
    pub last_measurement: Option<Measurement>,
    /// Fehler der letzten Wiederherstellung (ein Eintrag je übersprungenem Layer)
    pub restore_errors: Vec<GeorefError>,
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle Overlay-Layer in Zeichenreihenfolge
    pub registry: OverlayRegistry,
    /// Klick-Werkzeuge
    pub tools: ToolState,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Laufzeit-Optionen
    pub options: OverlayOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Ausstehende Anfragen an das Karten-Widget
    pub host: HostOutbox,
    /// Blob-Speicher für Speichern/Laden
    pub store: Box<dyn BlobStore>,
}

impl AppState {
    /// Erstellt einen leeren App-State mit flüchtigem Speicher und Standardoptionen.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()), OverlayOptions::default())
    }

    /// Erstellt einen App-State mit Verzeichnis-Speicher unter `options.store_path()`.
    pub fn from_options(options: OverlayOptions) -> anyhow::Result<Self> {
        let store = DirStore::open(options.store_path())?;
        Ok(Self::with_store(Box::new(store), options))
    }

    /// Lädt die Optionen neben der Binary (Fallback: Standardwerte) und
    /// öffnet den dort konfigurierten Speicher.
    pub fn from_config_file() -> anyhow::Result<Self> {
        Self::from_options(OverlayOptions::load_from_file(&OverlayOptions::config_path()))
    }

    /// Erstellt einen leeren App-State mit gegebenem Speicher und Optionen.
    pub fn with_store(store: Box<dyn BlobStore>, options: OverlayOptions) -> Self {
        Self {
            registry: OverlayRegistry::new(),
            tools: ToolState::new(),
            view: ViewState::from_options(&options),
            ui: UiState::default(),
            options,
            command_log: CommandLog::new(),
            host: HostOutbox::new(),
            store,
        }
    }

    /// Setzt die Statusnachricht.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui.status_message = Some(message.into());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
