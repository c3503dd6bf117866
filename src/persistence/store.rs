//! Schlüssel-Wert-Speicher für kleine Blobs (Persistierungs-Grenze).
//!
//! Alle Aufrufe sind synchron: nach `set()` ist der Wert sofort über `get()`
//! lesbar, es gibt kein Warten auf eine nachgelagerte Synchronisierung.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opaker Blob-Speicher.
pub trait BlobStore {
    /// Liest den Wert zum Schlüssel (`None` wenn nicht vorhanden).
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Schreibt (oder überschreibt) den Wert zum Schlüssel.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Löscht den Schlüssel. Fehlende Schlüssel sind kein Fehler.
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// Flüchtiger Speicher im Arbeitsspeicher (Standard, Tests).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Erstellt einen leeren Speicher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl gespeicherter Schlüssel.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt zurück ob der Speicher leer ist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Speicher als Verzeichnis: ein Schlüssel = eine Datei.
///
/// `/` im Schlüssel trennt Unterverzeichnisse. Erlaubt sind pro Segment nur
/// ASCII-Buchstaben, Ziffern, `_`, `-` und `.` (kein `..`).
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Öffnet (und erstellt ggf.) das Speicherverzeichnis.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Speicherverzeichnis nicht anlegbar: {}", root.display()))?;
        log::info!("Overlay-Speicher geöffnet: {}", root.display());
        Ok(Self { root })
    }

    /// Wurzelverzeichnis des Speichers.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            let valid = !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
            if !valid {
                bail!("Ungültiger Speicherschlüssel: '{}'", key);
            }
            path.push(segment);
        }
        Ok(path)
    }
}

impl BlobStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Lesefehler: {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Verzeichnis nicht anlegbar: {}", parent.display()))?;
        }
        std::fs::write(&path, value)
            .with_context(|| format!("Schreibfehler: {}", path.display()))
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Löschfehler: {}", path.display())),
        }
    }
}
