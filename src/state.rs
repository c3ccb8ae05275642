use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::backend::ReservationBackend;

pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn ReservationBackend>,
}
