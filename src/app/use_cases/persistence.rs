//! Use-Case-Funktionen für Speichern und Laden des Overlay-Zustands.

use anyhow::{Context, Result};

use crate::app::host::HostRequest;
use crate::app::AppState;
use crate::core::Point2D;
use crate::persistence::{self, ViewSnapshot};

/// Schreibt alle Layer und den Kartenausschnitt in den Blob-Speicher.
pub fn save(state: &mut AppState) -> Result<()> {
    let persisted = state
        .registry
        .persist(state.options.image_codec)
        .context("Overlay-Bilder konnten nicht kodiert werden")?;
    persistence::write_overlays(state.store.as_mut(), &persisted)?;

    let view = ViewSnapshot {
        center: [state.view.center.x, state.view.center.y],
        zoom: state.view.zoom,
    };
    persistence::write_view(state.store.as_mut(), &view)
        .context("Kartenausschnitt konnte nicht gespeichert werden")?;

    state.set_status(format!("{} Overlays gespeichert", persisted.layers.len()));
    Ok(())
}

/// Ersetzt alle Layer durch den gespeicherten Zustand.
///
/// Defekte Einträge werden übersprungen und in `ui.restore_errors`
/// gemeldet; alle lesbaren Layer werden wiederhergestellt. Ein nicht
/// lesbarer Index bricht vor jeder Änderung ab. Ohne gespeicherten
/// Kartenausschnitt bleibt die aktuelle Ansicht unverändert.
pub fn load(state: &mut AppState) -> Result<()> {
    let loaded = persistence::read_overlays(state.store.as_ref())
        .context("Gespeicherte Overlays konnten nicht gelesen werden")?;
    let view = persistence::read_view(state.store.as_ref())?;

    state.tools.deactivate();
    let previous: Vec<String> = state.registry.names().into_iter().map(String::from).collect();
    for name in previous {
        state.host.push(HostRequest::RemoveLayer { name });
    }

    let report = state.registry.restore(loaded.state);
    for name in &report.restored {
        if let Some(layer) = state.registry.get(name) {
            state.host.announce_layer(layer);
        }
    }

    // Ohne gespeicherten Ausschnitt bleibt die aktuelle Ansicht
    if let Some(view) = view {
        let center = Point2D::from(view.center);
        state.view.center = center;
        state.view.zoom = view.zoom;
        state.host.push(HostRequest::SetView {
            center,
            zoom: view.zoom,
        });
    }

    let mut errors = loaded.errors;
    errors.extend(report.failed);
    let status = if errors.is_empty() {
        format!("{} Overlays geladen", report.restored.len())
    } else {
        format!(
            "{} Overlays geladen, {} übersprungen",
            report.restored.len(),
            errors.len()
        )
    };
    log::info!("{}", status);
    state.set_status(status);
    state.ui.restore_errors = errors;
    Ok(())
}
