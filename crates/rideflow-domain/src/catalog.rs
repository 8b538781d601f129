//! Catálogo de flujos por nombre.
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use rideflow_core::{CoreEngineError, FlowDefinition};

use crate::errors::DomainError;
use crate::flows::{account, booking, courier, security, wallet};

type Factory = fn() -> Result<FlowDefinition, CoreEngineError>;

const STANDARD: [(&str, Factory); 15] = [(account::LOGIN, account::login),
                                         (account::SIGNUP, account::signup),
                                         (account::FORGOT_PASSWORD, account::forgot_password),
                                         (account::SET_NEW_PASSWORD, account::set_new_password),
                                         (account::EDIT_PROFILE, account::edit_profile),
                                         (security::CHANGE_PASSWORD, security::change_password),
                                         (security::CHANGE_PIN, security::change_pin),
                                         (security::RESET_PAYMENT_PIN, security::reset_payment_pin),
                                         (security::CHANGE_PHONE, security::change_phone),
                                         (security::TWO_FACTOR_SETUP, security::two_factor_setup),
                                         (security::VERIFY_OTP, security::verify_otp),
                                         (courier::COURIER_REGISTRATION, courier::courier_registration),
                                         (courier::SCHEDULE_COURIER, courier::schedule_courier),
                                         (wallet::WITHDRAW_TO_BANK, wallet::withdraw_to_bank),
                                         (booking::BOOKING, booking::booking)];

/// Definiciones inmutables compartidas (`Arc`) entre instancias de flujo.
#[derive(Debug, Clone, Default)]
pub struct FlowCatalog {
    flows: IndexMap<String, Arc<FlowDefinition>>,
}

impl FlowCatalog {
    /// Todos los wizards de la app.
    pub fn standard() -> Result<Self, DomainError> {
        let mut catalog = Self::default();
        for (name, factory) in STANDARD {
            let definition = factory()?;
            debug!("catalog:register flow={name} hash={}", definition.definition_hash());
            catalog.register(definition);
        }
        Ok(catalog)
    }

    pub fn register(&mut self, definition: FlowDefinition) {
        self.flows.insert(definition.name().to_string(), Arc::new(definition));
    }

    pub fn get(&self, name: &str) -> Result<Arc<FlowDefinition>, DomainError> {
        self.flows
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UnknownFlow(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
