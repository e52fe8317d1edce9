use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{ChangeNotifier, HostRepository, SlotRepository};
use crate::domain::services::auth_service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub host_repo: Arc<dyn HostRepository>,
    pub notifier: Arc<dyn ChangeNotifier>,
    pub auth_service: Arc<AuthService>,
}
