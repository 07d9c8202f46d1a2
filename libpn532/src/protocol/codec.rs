// libpn532-rs/libpn532/src/protocol/codec.rs

use crate::{Error, Result};

use super::Frame;
use super::commands::Command;
use super::responses::Response;

/// Encode a Command into a full wire frame (with preamble/LCS/DCS/postamble).
pub fn encode_command_frame(cmd: &Command) -> Result<Vec<u8>> {
    cmd.validate()?;
    Frame::encode(&cmd.encode())
}

/// Map a decoded frame to the response it carries. ACK is not a response;
/// NACK and error frames become errors.
pub fn response_parts(frame: Frame) -> Result<(u8, Vec<u8>)> {
    match frame {
        Frame::Response { code, payload } => Ok((code, payload)),
        Frame::Ack => Err(Error::InvalidFrame("ACK where a response was expected".into())),
        Frame::Nack => Err(Error::Nack),
        Frame::Error(code) => Err(Error::ChipError(code)),
    }
}

/// Decode a full wire frame and parse the contained response for the
/// command that was sent.
pub fn decode_response_frame(cmd: &Command, frame: &[u8]) -> Result<Response> {
    let (code, payload) = response_parts(Frame::decode(frame)?)?;
    Response::decode(cmd, code, &payload)
}
