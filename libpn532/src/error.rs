// libpn532-rs/libpn532/src/error.rs

use thiserror::Error;

/// Classification of transport-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Generic I/O failure (short write, broken pipe, bus error ...)
    Io,
    /// The device node or bus endpoint is gone
    DeviceAbsent,
    /// The OS refused access to the device
    PermissionDenied,
    /// The transport was closed or never opened
    NotOpen,
}

/// 共通エラー型
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("device not found")]
    DeviceNotFound,

    #[error("transport error ({kind:?}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("operation timed out")]
    Timeout,

    #[error("operation canceled")]
    Canceled,

    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("chip answered with NACK")]
    Nack,

    #[error("chip error: status={0:#04x}")]
    ChipError(u8),

    #[error("no tag detected")]
    NoTagDetected,

    #[error("malformed TLV at offset {offset}: tag {tag:#04x}")]
    MalformedTlv { offset: usize, tag: u8 },

    #[error("no NDEF message TLV found")]
    NoNdefTlv,

    #[error("truncated NDEF TLV: need {needed} bytes, have {available}")]
    TruncatedNdef { needed: usize, available: usize },

    #[error("invalid NDEF message: {0}")]
    InvalidNdef(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// PN532 status codes (low six bits of the status byte) that indicate a
/// corrupted RF exchange rather than a protocol problem.
const CHIP_CRC_ERROR: u8 = 0x02;
const CHIP_PARITY_ERROR: u8 = 0x03;

impl Error {
    /// Shorthand for a transport failure of the given kind.
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Default classifier used by the retrying transport wrapper.
    ///
    /// Timeouts, NACKs, damaged frames, chip-reported CRC/parity errors and
    /// plain I/O errors are worth another attempt. Everything else is
    /// returned to the caller immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout
            | Self::Nack
            | Self::InvalidFrame(_)
            | Self::ChecksumMismatch { .. }
            | Self::InvalidLength { .. }
            | Self::UnexpectedResponse { .. } => true,
            Self::ChipError(code) => matches!(*code, CHIP_CRC_ERROR | CHIP_PARITY_ERROR),
            Self::Transport { kind, .. } => *kind == TransportErrorKind::Io,
            _ => false,
        }
    }

    /// True for every flavour of damaged or out-of-sync response frame.
    pub fn is_invalid_frame(&self) -> bool {
        matches!(
            self,
            Self::InvalidFrame(_)
                | Self::ChecksumMismatch { .. }
                | Self::InvalidLength { .. }
                | Self::UnexpectedResponse { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => Self::Timeout,
            ErrorKind::NotFound => Self::transport(TransportErrorKind::DeviceAbsent, err.to_string()),
            ErrorKind::PermissionDenied => {
                Self::transport(TransportErrorKind::PermissionDenied, err.to_string())
            }
            ErrorKind::NotConnected => Self::transport(TransportErrorKind::NotOpen, err.to_string()),
            _ => Self::transport(TransportErrorKind::Io, err.to_string()),
        }
    }
}
