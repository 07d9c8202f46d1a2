// libpn532-rs/libpn532/src/device/builder.rs

use std::time::Duration;

use crate::device::config::{DeviceConfig, DeviceOption};
use crate::device::handle::{Device, Initialized, Uninitialized};
use crate::transport::{RetryConfig, Transport};
use crate::utils::CancellationToken;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
///
/// Options are recorded as given and applied in order by `build_*`, so
/// the first invalid one is reported there.
#[derive(Default)]
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport>>,
    config: DeviceConfig,
    options: Vec<DeviceOption>,
    token: Option<CancellationToken>,
}

impl DeviceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Start from a complete config instead of the defaults.
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn option(mut self, option: DeviceOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.option(DeviceOption::Timeout(timeout))
    }

    pub fn retry_config(self, retry: RetryConfig) -> Self {
        self.option(DeviceOption::RetryConfig(retry))
    }

    pub fn max_retries(self, attempts: u32) -> Self {
        self.option(DeviceOption::MaxRetries(attempts))
    }

    pub fn retry_backoff(self, initial: Duration) -> Self {
        self.option(DeviceOption::RetryBackoff(initial))
    }

    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Consume the builder and return an uninitialized Device.
    /// Requires a transport to be provided; otherwise returns DeviceNotFound.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        let transport = self.transport.ok_or(Error::DeviceNotFound)?;
        let config = self.config.with_options(self.options)?;
        let mut device = Device::with_config(transport, config)?;
        device.set_cancellation_token(self.token);
        Ok(device)
    }

    /// Build and run the initialization sequence.
    pub fn build(self) -> Result<Device<Initialized>> {
        self.build_uninitialized()?.initialize()
    }
}
