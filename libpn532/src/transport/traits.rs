// libpn532-rs/libpn532/src/transport/traits.rs

use std::time::Instant;

use crate::Result;
use crate::types::TransportType;

/// Transport trait abstracts I/O away from protocol/device logic.
///
/// Implementations move whole frames: `send` writes one encoded frame,
/// `receive` returns one response unit (an ACK, an ACK followed by the
/// response frame, a response frame, or an error frame). Reads that find
/// nothing before `deadline` return `Error::Timeout`.
pub trait Transport {
    /// Send raw bytes to the chip
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive the next response unit, giving up at `deadline`
    fn receive(&mut self, deadline: Instant) -> Result<Vec<u8>>;

    /// Release the underlying link. Further I/O fails with a
    /// `NotOpen` transport error.
    fn close(&mut self) -> Result<()>;

    /// Which physical link this is
    fn transport_type(&self) -> TransportType;

    /// Bring the chip out of low-power mode before the first command.
    /// Only HSU needs this; the default does nothing.
    fn wake_up(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, deadline: Instant) -> Result<Vec<u8>> {
        (**self).receive(deadline)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn transport_type(&self) -> TransportType {
        (**self).transport_type()
    }

    fn wake_up(&mut self) -> Result<()> {
        (**self).wake_up()
    }
}
