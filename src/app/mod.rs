//! Application-Layer: Controller, State, Events, Werkzeuge und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod host;
mod intent_mapping;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Layer, View, Werkzeuge).
pub mod state;
pub mod tools;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use host::{HostOutbox, HostRequest, MapHost};
pub use state::{AppState, UiState, ViewState};
pub use tools::{ActiveTool, ToolState};
