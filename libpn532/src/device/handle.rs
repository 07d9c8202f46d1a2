// libpn532-rs/libpn532/src/device/handle.rs

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use log::debug;
#[cfg(feature = "diagnostics")]
use log::trace;

use crate::constants::START_CODE_WINDOW;
use crate::device::config::{DeviceConfig, DeviceOption};
use crate::protocol::codec;
use crate::protocol::frame::{self, Frame};
use crate::protocol::{
    AutoPollTarget, AutoPollType, Command, DiagnoseTest, FirmwareVersion, GeneralStatus,
    Response, RfConfigItem, TargetData,
};
use crate::transport::{RetryConfig, RetryingTransport, Transport};
use crate::types::{BaudRate, SamMode, TransportType, WakeupSources};
use crate::utils::{CANCEL_TICK_MS, CancellationToken, CommandContext, ms};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Device handle that enforces initialization state at compile time.
///
/// Every command takes `&mut self`; one exchange is in flight at a time.
pub struct Device<State = Uninitialized> {
    transport: RetryingTransport,
    config: DeviceConfig,
    firmware: Option<FirmwareVersion>,
    token: Option<CancellationToken>,
    sam_configured: bool,
    _state: PhantomData<State>,
}

impl Device<Uninitialized> {
    /// Create a Device from an existing Transport instance with the
    /// default configuration.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Result<Self> {
        Self::with_config(transport, DeviceConfig::default())
    }

    pub fn with_config(transport: Box<dyn Transport>, config: DeviceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: RetryingTransport::new(transport, config.retry),
            config,
            firmware: None,
            token: None,
            sam_configured: false,
            _state: PhantomData,
        })
    }

    /// Wake the chip, read and cache its firmware version, and put the SAM
    /// in normal mode. Returns an initialized Device on success.
    pub fn initialize(mut self) -> Result<Device<Initialized>> {
        self.transport.wake_up()?;

        let ctx = self.context();
        let firmware = match self.execute_with(&Command::GetFirmwareVersion, &ctx)? {
            Response::FirmwareVersion(fw) => fw,
            other => return Err(unexpected(&Command::GetFirmwareVersion, &other)),
        };
        debug!("{} found on {}", firmware, self.transport.transport_type());
        self.firmware = Some(firmware);

        self.configure_sam(SamMode::Normal, false, &ctx)?;

        Ok(Device {
            transport: self.transport,
            config: self.config,
            firmware: self.firmware,
            token: self.token,
            sam_configured: self.sam_configured,
            _state: PhantomData,
        })
    }
}

impl<S> Device<S> {
    pub fn transport_type(&self) -> TransportType {
        self.transport.transport_type()
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Firmware version cached by `initialize`.
    pub fn firmware_version(&self) -> Option<&FirmwareVersion> {
        self.firmware.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.apply_option(DeviceOption::Timeout(timeout))
    }

    pub fn retry_config(&self) -> &RetryConfig {
        self.transport.config()
    }

    /// Replace the retry policy of this device's transport wrapper.
    pub fn set_retry_config(&mut self, retry: RetryConfig) -> Result<()> {
        self.apply_option(DeviceOption::RetryConfig(retry))
    }

    /// Apply a configuration option; takes effect from the next command.
    pub fn apply_option(&mut self, option: DeviceOption) -> Result<()> {
        self.config.apply(option)?;
        self.transport.set_config(self.config.retry);
        Ok(())
    }

    /// Token observed by every later command, wait and backoff.
    pub fn set_cancellation_token(&mut self, token: Option<CancellationToken>) {
        self.token = token;
    }

    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    pub fn is_sam_configured(&self) -> bool {
        self.sam_configured
    }

    /// Release the transport.
    pub fn close(mut self) -> Result<()> {
        debug!("closing {} transport", self.transport.transport_type());
        self.transport.close()
    }

    /// Context without an overall deadline, carrying the device token.
    pub(crate) fn context(&self) -> CommandContext {
        CommandContext::new().maybe_token(self.token.clone())
    }

    /// Context bounded by `deadline`, carrying the device token.
    pub(crate) fn context_until(&self, deadline: Option<Instant>) -> CommandContext {
        match deadline {
            Some(d) => CommandContext::with_deadline(d),
            None => CommandContext::new(),
        }
        .maybe_token(self.token.clone())
    }

    /// Run one command through the retrying transport. Each attempt is
    /// bounded by the configured timeout and by the deadline of `ctx`.
    pub(crate) fn execute_with(&mut self, cmd: &Command, ctx: &CommandContext) -> Result<Response> {
        let ctx = if ctx.cancellation_token().is_none() {
            ctx.clone().maybe_token(self.token.clone())
        } else {
            ctx.clone()
        };

        let wire = codec::encode_command_frame(cmd)?;
        debug!("command {:#04x} ({} bytes)", cmd.command_code(), wire.len());

        let timeout = self.config.timeout;
        self.transport
            .run(&ctx, timeout, |t, attempt| exchange(t, &wire, cmd, attempt))
    }

    pub(crate) fn configure_sam(
        &mut self,
        mode: SamMode,
        use_irq: bool,
        ctx: &CommandContext,
    ) -> Result<()> {
        let cmd = Command::SamConfiguration { mode, use_irq };
        match self.execute_with(&cmd, ctx)? {
            Response::SamConfiguration => {
                self.sam_configured = true;
                Ok(())
            }
            other => Err(unexpected(&cmd, &other)),
        }
    }
}

impl Device<Initialized> {
    /// Execute a command with the default timeout and return the parsed
    /// Response.
    pub fn execute(&mut self, cmd: Command) -> Result<Response> {
        let ctx = self.context();
        self.execute_with(&cmd, &ctx)
    }

    /// Execute a command under a caller-supplied context.
    pub fn execute_in(&mut self, cmd: Command, ctx: &CommandContext) -> Result<Response> {
        self.execute_with(&cmd, ctx)
    }

    /// Read the firmware version and refresh the cached copy.
    pub fn get_firmware_version(&mut self) -> Result<FirmwareVersion> {
        let cmd = Command::GetFirmwareVersion;
        match self.execute(cmd.clone())? {
            Response::FirmwareVersion(fw) => {
                self.firmware = Some(fw);
                Ok(fw)
            }
            other => Err(unexpected(&cmd, &other)),
        }
    }

    pub fn get_general_status(&mut self) -> Result<GeneralStatus> {
        let cmd = Command::GetGeneralStatus;
        match self.execute(cmd.clone())? {
            Response::GeneralStatus(st) => Ok(st),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    pub fn sam_configuration(&mut self, mode: SamMode, use_irq: bool) -> Result<()> {
        let ctx = self.context();
        self.configure_sam(mode, use_irq, &ctx)
    }

    /// Configure the SAM in normal mode unless that already happened since
    /// the last power-down.
    pub fn ensure_sam_configured(&mut self, ctx: &CommandContext) -> Result<()> {
        if self.sam_configured {
            return Ok(());
        }
        debug!("SAM not configured, sending SAMConfiguration(normal)");
        self.configure_sam(SamMode::Normal, false, ctx)
    }

    pub fn rf_configuration(&mut self, item: RfConfigItem) -> Result<()> {
        let cmd = Command::RfConfiguration { item };
        match self.execute(cmd.clone())? {
            Response::RfConfiguration => Ok(()),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Switch the RF field on or off.
    pub fn set_rf_field(&mut self, on: bool) -> Result<()> {
        self.rf_configuration(RfConfigItem::RfField {
            auto_rfca: true,
            rf_on: on,
        })
    }

    pub fn in_list_passive_target(
        &mut self,
        max_targets: u8,
        baud_rate: BaudRate,
        initiator_data: &[u8],
    ) -> Result<Vec<TargetData>> {
        let ctx = self.context();
        self.list_targets(max_targets, baud_rate, initiator_data, &ctx)
    }

    pub(crate) fn list_targets(
        &mut self,
        max_targets: u8,
        baud_rate: BaudRate,
        initiator_data: &[u8],
        ctx: &CommandContext,
    ) -> Result<Vec<TargetData>> {
        let cmd = Command::InListPassiveTarget {
            max_targets,
            baud_rate,
            initiator_data: initiator_data.to_vec(),
        };
        match self.execute_with(&cmd, ctx)? {
            Response::InListPassiveTarget { targets } => Ok(targets),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Send `data` to target `tg` and return its answer (status stripped).
    pub fn in_data_exchange(&mut self, tg: u8, data: &[u8]) -> Result<Vec<u8>> {
        let ctx = self.context();
        self.data_exchange(tg, data, &ctx)
    }

    pub(crate) fn data_exchange(
        &mut self,
        tg: u8,
        data: &[u8],
        ctx: &CommandContext,
    ) -> Result<Vec<u8>> {
        let cmd = Command::InDataExchange {
            target: tg,
            data: data.to_vec(),
        };
        match self.execute_with(&cmd, ctx)? {
            Response::InDataExchange { data } => Ok(data),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Raw exchange with the current target, bypassing the chip's protocol
    /// handling.
    pub fn in_communicate_thru(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let cmd = Command::InCommunicateThru {
            data: data.to_vec(),
        };
        match self.execute(cmd.clone())? {
            Response::InCommunicateThru { data } => Ok(data),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Release target `tg`; 0 releases all of them.
    pub fn in_release(&mut self, tg: u8) -> Result<()> {
        let cmd = Command::InRelease { target: tg };
        match self.execute(cmd.clone())? {
            Response::InRelease => Ok(()),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    pub fn in_select(&mut self, tg: u8) -> Result<()> {
        let cmd = Command::InSelect { target: tg };
        match self.execute(cmd.clone())? {
            Response::InSelect => Ok(()),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Let the chip poll on its own. `period` is in units of 150 ms.
    pub fn in_auto_poll(
        &mut self,
        poll_count: u8,
        period: u8,
        types: &[AutoPollType],
    ) -> Result<Vec<AutoPollTarget>> {
        let cmd = Command::InAutoPoll {
            poll_count,
            period,
            types: types.to_vec(),
        };
        match self.execute(cmd.clone())? {
            Response::InAutoPoll { targets } => Ok(targets),
            other => Err(unexpected(&cmd, &other)),
        }
    }

    /// Put the chip to sleep. The SAM has to be configured again afterwards,
    /// which the next detection does on its own.
    pub fn power_down(&mut self, wakeup: WakeupSources, generate_irq: Option<bool>) -> Result<()> {
        let cmd = Command::PowerDown {
            wakeup,
            generate_irq,
        };
        match self.execute(cmd.clone())? {
            Response::PowerDown => {
                self.sam_configured = false;
                Ok(())
            }
            other => Err(unexpected(&cmd, &other)),
        }
    }

    pub fn diagnose(&mut self, test: DiagnoseTest) -> Result<Vec<u8>> {
        let cmd = Command::Diagnose { test };
        match self.execute(cmd.clone())? {
            Response::Diagnose { result } => Ok(result),
            other => Err(unexpected(&cmd, &other)),
        }
    }
}

fn unexpected(cmd: &Command, got: &Response) -> Error {
    Error::UnexpectedResponse {
        expected: cmd.response_code(),
        actual: got.response_code(),
    }
}

/// One attempt: send the frame, take the ACK, read and decode the response.
fn exchange(
    transport: &mut dyn Transport,
    wire: &[u8],
    cmd: &Command,
    ctx: &CommandContext,
) -> Result<Response> {
    ctx.check()?;
    #[cfg(feature = "diagnostics")]
    trace!(">> {}", crate::utils::bytes_to_hex_spaced(wire));
    transport.send(wire)?;

    ctx.check()?;
    let mut buf = read_unit(transport, ctx)?;

    loop {
        let (frame, used) = Frame::decode_prefix(&buf)?;
        match frame {
            Frame::Ack => {
                buf.drain(..used);
                if frame::find_start_code(&buf, START_CODE_WINDOW).is_none() {
                    // Response comes as its own unit
                    ctx.check()?;
                    buf = read_unit(transport, ctx)?;
                }
            }
            other => {
                let (code, payload) = codec::response_parts(other)?;
                return Response::decode(cmd, code, &payload);
            }
        }
    }
}

/// Read one unit, waking every tick so cancellation is seen promptly.
fn read_unit(transport: &mut dyn Transport, ctx: &CommandContext) -> Result<Vec<u8>> {
    loop {
        ctx.check()?;
        let tick = Instant::now() + ms(CANCEL_TICK_MS);
        let slice_end = match ctx.deadline() {
            Some(d) if d < tick => d,
            _ => tick,
        };
        match transport.receive(slice_end) {
            Ok(bytes) if bytes.is_empty() => continue,
            Ok(bytes) => {
                #[cfg(feature = "diagnostics")]
                trace!("<< {}", crate::utils::bytes_to_hex_spaced(&bytes));
                return Ok(bytes);
            }
            Err(Error::Timeout) => continue,
            Err(err) => return Err(err),
        }
    }
}
