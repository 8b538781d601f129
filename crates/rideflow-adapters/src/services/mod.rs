//! Servicios simulados y el router que implementa `ActionService`.

mod accounts;
mod bank;
mod otp;
mod payment;

pub use accounts::AccountBackend;
pub use bank::{BankDirectory, BANKS};
pub use otp::OtpGateway;
pub use payment::PaymentGateway;

use async_trait::async_trait;
use log::{debug, warn};
use rideflow_core::{ActionService, AsyncActionResult, FieldValues};

use crate::config::MockServiceConfig;

/// Despacha cada acción al servicio simulado que la atiende, tras la latencia
/// configurada.
#[derive(Debug)]
pub struct MockServices {
    config: MockServiceConfig,
    otp: OtpGateway,
    bank: BankDirectory,
    payment: PaymentGateway,
    accounts: AccountBackend,
}

impl MockServices {
    pub fn new(config: MockServiceConfig) -> Self {
        Self { otp: OtpGateway::new(config.accepted_code.clone()),
               bank: BankDirectory::new(config.failing_account.clone()),
               payment: PaymentGateway::new(config.current_pin.clone(), config.max_pin_attempts, config.pin_lockout),
               accounts: AccountBackend,
               config }
    }

    pub fn config(&self) -> &MockServiceConfig {
        &self.config
    }

    fn route(&self, action: &str, payload: &FieldValues) -> AsyncActionResult {
        self.otp
            .handle(action, payload)
            .or_else(|| self.bank.handle(action, payload))
            .or_else(|| self.payment.handle(action, payload))
            .or_else(|| self.accounts.handle(action, payload))
            .unwrap_or_else(|| {
                warn!("mock:unsupported action={action}");
                AsyncActionResult::Failed(format!("unsupported action: {action}"))
            })
    }
}

impl Default for MockServices {
    fn default() -> Self {
        Self::new(MockServiceConfig::default())
    }
}

#[async_trait]
impl ActionService for MockServices {
    async fn invoke(&self, action: &str, payload: &FieldValues) -> AsyncActionResult {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
        let result = self.route(action, payload);
        debug!("mock:invoke action={action} success={}", result.is_success());
        result
    }
}
