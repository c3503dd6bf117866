use crate::app::tools::ActiveTool;
use crate::app::{AppCommand, AppIntent, AppState};
use glam::DVec2;

use super::map_intent_to_commands;

#[test]
fn click_without_active_tool_maps_to_nothing() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::MapClicked {
            coordinate: DVec2::ONE,
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn click_is_routed_to_active_tool() {
    let mut state = AppState::new();

    state.tools.active = ActiveTool::Align;
    let commands = map_intent_to_commands(
        &state,
        AppIntent::MapClicked {
            coordinate: DVec2::ONE,
        },
    );
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::AlignmentClick { .. }));

    state.tools.active = ActiveTool::Measure;
    let commands = map_intent_to_commands(
        &state,
        AppIntent::MapClicked {
            coordinate: DVec2::ONE,
        },
    );
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::MeasurementClick { .. }));
}

#[test]
fn tool_selection_deactivates_previous_tool_first() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::AlignOverlayRequested {
            name: "plan".into(),
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::DeactivateTool));
    assert!(matches!(&commands[1], AppCommand::BeginAlignment { name } if name == "plan"));

    let commands = map_intent_to_commands(&state, AppIntent::MeasureDistanceRequested);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::DeactivateTool));
    assert!(matches!(commands[1], AppCommand::StartMeasurement));
}

#[test]
fn pointer_move_always_updates_cursor() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerMoved {
            coordinate: DVec2::new(1.0, 2.0),
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::UpdateCursor { .. }));
}

#[test]
fn save_and_load_map_to_store_commands() {
    let state = AppState::new();

    let save = map_intent_to_commands(&state, AppIntent::SaveRequested);
    let load = map_intent_to_commands(&state, AppIntent::LoadRequested);

    assert!(matches!(save[..], [AppCommand::SaveLayers]));
    assert!(matches!(load[..], [AppCommand::LoadLayers]));
}
