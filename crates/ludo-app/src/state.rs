use std::sync::Arc;

use crate::{alert::Alerts, error::Result};
use ludo_dal::Pool;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool) -> Result<Self> {
        let alerts = Alerts::new(&app_config.app_name)?;
        Ok(AppState {
            state: Arc::new(AppStateInner {
                alerts,
                pool,
            }),
        })
    }

    pub fn alerts(&self) -> &Alerts {
        &self.state.alerts
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }
}

struct AppStateInner {
    pool: Pool,
    alerts: Alerts,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Used in names of alert headers
    pub app_name: String,
}
