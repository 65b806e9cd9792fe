//! Model — frame layout and decode outcomes.

use crate::token::TokenRecord;

/// Every frame on the wire is exactly this long.
pub const FRAME_LEN: usize = 8;

/// All-ones 64-bit pattern marking a known frame boundary. Not a log frame.
pub const SYNC_SENTINEL: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// Parameter word of the reserved reload control frame.
pub const RELOAD_PARAM_WORD: u32 = 0xFFFF_FFFF;

const TOKEN_ID_MASK: u32 = 0x0FFF_FFFF;
const FLAGS_SHIFT: u32 = 28;

/// One raw frame, already split into its two little-endian words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub token_word: u32,
    pub param_word: u32,
}

impl Frame {
    pub fn from_bytes(raw: [u8; FRAME_LEN]) -> Self {
        Self {
            token_word: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            param_word: u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]),
        }
    }

    /// Top 4 bits of the token word.
    pub fn flags(&self) -> u8 {
        (self.token_word >> FLAGS_SHIFT) as u8
    }

    /// Low 28 bits of the token word, the table key.
    pub fn token_id(&self) -> u32 {
        self.token_word & TOKEN_ID_MASK
    }
}

/// Outcome of decoding one frame against the current token table.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    /// The token id has a table entry.
    Resolved {
        record: TokenRecord,
        param: u32,
        flags: u8,
    },
    /// Reserved control frame: reload the token table and restart timing.
    ReloadSignal,
    /// No table entry and not the control frame.
    Unknown { token_id: u32, param_word: u32 },
}
