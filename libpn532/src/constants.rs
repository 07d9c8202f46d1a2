// libpn532-rs/libpn532/src/constants.rs
//! Common protocol constants used across the crate

/// Frame preamble byte
pub const PREAMBLE: u8 = 0x00;

/// Start code that opens every frame: 0x00 0xFF
pub const START_CODE: [u8; 2] = [0x00, 0xFF];

/// Frame postamble: 0x00
pub const POSTAMBLE: u8 = 0x00;

/// Host -> PN532 frame identifier (TFI)
pub const TFI_HOST_TO_PN532: u8 = 0xD4;

/// PN532 -> host frame identifier (TFI)
pub const TFI_PN532_TO_HOST: u8 = 0xD5;

/// ACK frame
pub const ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// NACK frame (asks the other side to resend its last frame)
pub const NACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];

/// Application-level error frame emitted for syntax errors
pub const ERROR_FRAME: [u8; 8] = [0x00, 0x00, 0xFF, 0x01, 0xFF, 0x7F, 0x81, 0x00];

/// Data byte carried by the application error frame
pub const ERROR_FRAME_CODE: u8 = 0x7F;

/// Number of leading bytes scanned for the start code
pub const START_CODE_WINDOW: usize = 32;

/// Largest parameter block the normal frame can carry (LEN <= 0xFF
/// covers TFI + command + params)
pub const MAX_PARAMS_LEN: usize = 253;

/// Minimal normal frame: start(2) + len(1) + lcs(1) + tfi(1) + dcs(1) + postamble(1)
pub const MIN_FRAME_LEN: usize = 7;

/// HSU wake-up sequence sent before the first command after power-on
pub const HSU_WAKEUP: [u8; 16] = [
    0x55, 0x55, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// PN532 command codes (host -> chip). Responses use `code + 1`.
pub mod cmd {
    pub const DIAGNOSE: u8 = 0x00;
    pub const GET_FIRMWARE_VERSION: u8 = 0x02;
    pub const GET_GENERAL_STATUS: u8 = 0x04;
    pub const SAM_CONFIGURATION: u8 = 0x14;
    pub const POWER_DOWN: u8 = 0x16;
    pub const RF_CONFIGURATION: u8 = 0x32;
    pub const IN_DATA_EXCHANGE: u8 = 0x40;
    pub const IN_COMMUNICATE_THRU: u8 = 0x42;
    pub const IN_LIST_PASSIVE_TARGET: u8 = 0x4A;
    pub const IN_RELEASE: u8 = 0x52;
    pub const IN_SELECT: u8 = 0x54;
    pub const IN_AUTO_POLL: u8 = 0x60;
}

/// NTAG/Ultralight GET_VERSION command sent through InDataExchange
pub const NTAG_GET_VERSION: u8 = 0x60;

/// Default FeliCa polling request used as InListPassiveTarget initiator
/// data: command 0x00, system code 0xFFFF, request code 0x01, time slot 0.
pub const FELICA_DEFAULT_POLLING: [u8; 5] = [0x00, 0xFF, 0xFF, 0x01, 0x00];
