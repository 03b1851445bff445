//! Shared application state.

use std::sync::{Arc, RwLock};

use fabula_core::navigation::Navigator;
use fabula_core::settings::ProviderSettings;
use fabula_core::store::ProjectStore;
use fabula_core::timeline::Transport;

use crate::config::ServerConfig;
use crate::engine::GenerationEngine;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The owning in-memory project store.
    pub store: Arc<ProjectStore>,
    /// Mock-generation engine.
    pub engine: Arc<GenerationEngine>,
    /// Active screen / current project / wizard step.
    pub navigator: Arc<RwLock<Navigator>>,
    /// Editor playback state.
    pub transport: Arc<RwLock<Transport>>,
    /// Provider API keys from the settings screen.
    pub settings: Arc<RwLock<ProviderSettings>>,
    /// Optional database pool; `None` in degraded deployments.
    pub pool: Option<fabula_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus.
    pub event_bus: Arc<fabula_events::EventBus>,
}
