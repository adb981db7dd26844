//! Everything a physical file consults besides its container

use crate::config::DtausConfig;
use crate::directory::{
    CurrencyDirectory, StaticCurrencyDirectory, StaticTextschluesselDirectory,
    TextschluesselDirectory,
};
use crate::observability::{NoopMonitor, TaskMonitor};
use crate::validation::Validators;

/// Configuration, validators, reference directories and the task monitor
/// of a physical file.
///
/// `Default` gives the built-in tables, the built-in validators and a
/// monitor that never cancels.
pub struct Collaborators {
    pub config: DtausConfig,
    pub validators: Validators,
    pub textschluessel: Box<dyn TextschluesselDirectory>,
    pub currencies: Box<dyn CurrencyDirectory>,
    pub monitor: Box<dyn TaskMonitor>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            config: DtausConfig::default(),
            validators: Validators::default(),
            textschluessel: Box::new(StaticTextschluesselDirectory::default()),
            currencies: Box::new(StaticCurrencyDirectory::default()),
            monitor: Box::new(NoopMonitor),
        }
    }
}

impl Collaborators {
    pub fn with_config(mut self, config: DtausConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_validators(mut self, validators: Validators) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_textschluessel(mut self, directory: impl TextschluesselDirectory + 'static) -> Self {
        self.textschluessel = Box::new(directory);
        self
    }

    pub fn with_currencies(mut self, directory: impl CurrencyDirectory + 'static) -> Self {
        self.currencies = Box::new(directory);
        self
    }

    pub fn with_monitor(mut self, monitor: impl TaskMonitor + 'static) -> Self {
        self.monitor = Box::new(monitor);
        self
    }
}
