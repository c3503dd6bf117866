//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Host-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Bricht beim ersten fehlgeschlagenen Command ab und gibt dessen Fehler
    /// zurück. Domänenfehler lassen sich per `downcast_ref::<GeorefError>()`
    /// unterscheiden.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Overlays ===
            AppCommand::AddOverlayFromFile { path } => {
                handlers::overlay::add_from_file(state, &path)?
            }
            AppCommand::AddOverlayFromBytes { name, bytes } => {
                handlers::overlay::add_from_bytes(state, &name, &bytes)?
            }
            AppCommand::RemoveOverlay { name } => handlers::overlay::remove(state, &name)?,
            AppCommand::SetOverlayOpacity { name, opacity } => {
                handlers::overlay::set_opacity(state, &name, opacity)?
            }
            AppCommand::SetOverlayVisible { name, visible } => {
                handlers::overlay::set_visible(state, &name, visible)?
            }

            // === Ausrichtung ===
            AppCommand::BeginAlignment { name } => handlers::alignment::begin(state, &name)?,
            AppCommand::AlignmentClick { coordinate } => {
                handlers::alignment::click(state, coordinate)?
            }

            // === Messung & Cursor ===
            AppCommand::StartMeasurement => handlers::measure::start(state),
            AppCommand::MeasurementClick { coordinate } => {
                handlers::measure::click(state, coordinate)
            }
            AppCommand::UpdateCursor { coordinate } => {
                handlers::measure::update_cursor(state, coordinate)
            }

            // === Kartenausschnitt & Werkzeuge ===
            AppCommand::DeactivateTool => handlers::view::deactivate_tool(state),
            AppCommand::UpdateView {
                center,
                zoom,
                extent,
            } => handlers::view::update(state, center, zoom, extent),

            // === Persistierung ===
            AppCommand::SaveLayers => handlers::persistence::save(state)?,
            AppCommand::LoadLayers => handlers::persistence::load(state)?,
        }

        Ok(())
    }
}
