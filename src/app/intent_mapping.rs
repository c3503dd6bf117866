//! Mapping von Host-Intents auf mutierende App-Commands.

use super::tools::ActiveTool;
use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Kartenklicks gehen ausschließlich an das aktive Werkzeug; ohne aktives
/// Werkzeug entsteht kein Command.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::OverlayFileSelected { path } => vec![AppCommand::AddOverlayFromFile { path }],
        AppIntent::OverlayUploaded { name, bytes } => {
            vec![AppCommand::AddOverlayFromBytes { name, bytes }]
        }
        AppIntent::RemoveOverlayRequested { name } => vec![AppCommand::RemoveOverlay { name }],
        AppIntent::OverlayOpacityChanged { name, opacity } => {
            vec![AppCommand::SetOverlayOpacity { name, opacity }]
        }
        AppIntent::OverlayVisibilityChanged { name, visible } => {
            vec![AppCommand::SetOverlayVisible { name, visible }]
        }
        AppIntent::AlignOverlayRequested { name } => vec![
            AppCommand::DeactivateTool,
            AppCommand::BeginAlignment { name },
        ],
        AppIntent::MeasureDistanceRequested => {
            vec![AppCommand::DeactivateTool, AppCommand::StartMeasurement]
        }
        AppIntent::ToolCancelRequested => vec![AppCommand::DeactivateTool],
        AppIntent::MapClicked { coordinate } => match state.tools.active {
            ActiveTool::Align => vec![AppCommand::AlignmentClick { coordinate }],
            ActiveTool::Measure => vec![AppCommand::MeasurementClick { coordinate }],
            ActiveTool::None => Vec::new(),
        },
        AppIntent::PointerMoved { coordinate } => vec![AppCommand::UpdateCursor { coordinate }],
        AppIntent::ViewChanged {
            center,
            zoom,
            extent,
        } => vec![AppCommand::UpdateView {
            center,
            zoom,
            extent,
        }],
        AppIntent::SaveRequested => vec![AppCommand::SaveLayers],
        AppIntent::LoadRequested => vec![AppCommand::LoadLayers],
    }
}

#[cfg(test)]
mod tests;
