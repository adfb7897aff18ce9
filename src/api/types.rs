//! Shared types for the API layer.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::core_state::CoreState;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    /// Date the handlers treat as "today". `None` uses the local clock.
    today_override: Option<NaiveDate>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            today_override: None,
        }
    }

    /// Pins "today" so chart spans and check-ins are reproducible.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today_override = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
