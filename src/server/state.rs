use crate::libs::service::TaskService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
    /// Exposes error details in 500 responses.
    pub debug: bool,
}

impl AppState {
    pub fn new(service: TaskService, debug: bool) -> Self {
        AppState { service, debug }
    }
}
