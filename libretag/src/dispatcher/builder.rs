// libretag/src/dispatcher/builder.rs

use crate::dispatcher::config::{Credentials, DispatcherConfig};
use crate::dispatcher::handle::Dispatcher;
use crate::transport::Transceiver;
use crate::{Error, Result};

/// Helper to construct a Dispatcher with optional configuration.
pub struct DispatcherBuilder<T> {
    transceiver: Option<T>,
    credentials: Option<Credentials>,
    config: DispatcherConfig,
}

impl<T: Transceiver> DispatcherBuilder<T> {
    /// Empty builder
    pub fn new() -> Self {
        Self {
            transceiver: None,
            credentials: None,
            config: DispatcherConfig::default(),
        }
    }

    /// Provide the transceiver (e.g. MockTransceiver)
    pub fn with_transceiver(mut self, transceiver: T) -> Self {
        self.transceiver = Some(transceiver);
        self
    }

    /// Store the unlock code and password.
    pub fn credentials(mut self, unlock_code: u32, password: impl Into<Vec<u8>>) -> Self {
        self.credentials = Some(Credentials::new(unlock_code, password));
        self
    }

    /// Override the default options.
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder. A transceiver is required.
    pub fn build(self) -> Result<Dispatcher<T>> {
        let transceiver = self.transceiver.ok_or_else(|| {
            Error::UnsupportedOperation("dispatcher needs a transceiver".into())
        })?;
        let mut dispatcher = Dispatcher::with_config(transceiver, self.config);
        if let Some(creds) = self.credentials {
            dispatcher.set_credentials(creds.unlock_code, creds.password);
        }
        Ok(dispatcher)
    }
}

impl<T: Transceiver> Default for DispatcherBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
