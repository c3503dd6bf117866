//! Use-Case-Funktionen für die Vier-Klick-Ausrichtung.

use crate::app::tools::{ActiveTool, AlignmentCapture, ToolAction};
use crate::app::AppState;
use crate::core::{raster, recompute, GeorefError, Point2D};

/// Startet eine Ausrichtungs-Sitzung für `name`.
///
/// Eine laufende Messung wird beendet, eine laufende Ausrichtung verworfen.
pub fn begin(state: &mut AppState, name: &str) -> Result<(), GeorefError> {
    if !state.registry.contains(name) {
        let err = GeorefError::NotFound(name.to_string());
        log::warn!("{}", err);
        state.set_status(err.to_string());
        return Err(err);
    }
    state.tools.measure.cancel();
    state.tools.alignment.begin(name);
    state.tools.active = ActiveTool::Align;
    let hint = state.tools.alignment.status_text();
    state.set_status(hint);
    Ok(())
}

/// Reicht einen Kartenklick an die Sitzung weiter; der vierte Klick richtet aus.
pub fn click(state: &mut AppState, coordinate: Point2D) -> Result<(), GeorefError> {
    match state.tools.alignment.feed(coordinate) {
        ToolAction::Ignored => Ok(()),
        ToolAction::Continue => {
            let hint = state.tools.alignment.status_text();
            state.set_status(hint);
            Ok(())
        }
        ToolAction::Complete(capture) => {
            state.tools.active = ActiveTool::None;
            commit(state, &capture)
        }
    }
}

/// Wendet eine abgeschlossene Klickfolge auf ihren Layer an.
///
/// Löst die Transformation, berechnet den neuen Extent, dreht das Bild mit
/// erweiterter Leinwand und übergibt beides an Layer und Host. Bei Fehlern
/// bleibt der Layer unverändert.
pub fn commit(state: &mut AppState, capture: &AlignmentCapture) -> Result<(), GeorefError> {
    let result = capture.solve().and_then(|transform| {
        let layer = state
            .registry
            .get(&capture.layer)
            .ok_or_else(|| GeorefError::NotFound(capture.layer.clone()))?;
        let extent = recompute(&transform, layer.extent())?;
        let rotated = raster::rotate_expand(layer.image(), transform.angle_deg());
        Ok((transform, extent, rotated))
    });

    let (transform, extent, rotated) = match result {
        Ok(parts) => parts,
        Err(e) => {
            log::warn!("Ausrichtung von '{}' fehlgeschlagen: {}", capture.layer, e);
            state.set_status(format!("Ausrichtung fehlgeschlagen: {}", e));
            return Err(e);
        }
    };

    let layer = state.registry.get_mut(&capture.layer)?;
    layer.set_source(rotated, extent);
    state.host.push_source(layer);

    log::info!(
        "Overlay '{}' ausgerichtet: Maßstab {:.6}, Drehung {:.3}°, Extent ({:.3}, {:.3}, {:.3}, {:.3})",
        capture.layer,
        transform.scale(),
        transform.angle_deg(),
        extent.x0,
        extent.y0,
        extent.x1,
        extent.y1
    );
    state.set_status(format!(
        "Overlay '{}' ausgerichtet (Maßstab {:.4}, Drehung {:.2}°)",
        capture.layer,
        transform.scale(),
        transform.angle_deg()
    ));
    Ok(())
}
