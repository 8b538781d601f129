use std::sync::Arc;

use chrono::Duration;

use crate::action::{ActionPolicy, Clock, SystemClock};

/// Parámetros del motor por instancia de flujo.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub action_policy: ActionPolicy,
    pub clock: Arc<dyn Clock>,
}

impl EngineSettings {
    /// Cooldown de las acciones de reenvío.
    pub fn with_resend_cooldown(mut self, cooldown: Duration) -> Self {
        self.action_policy = ActionPolicy::new(cooldown);
        self
    }

    pub fn with_policy(mut self, policy: ActionPolicy) -> Self {
        self.action_policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { action_policy: ActionPolicy::default(),
               clock: Arc::new(SystemClock) }
    }
}
