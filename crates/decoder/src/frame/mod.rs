/// Wire frames.
///
/// The device emits fixed 8-byte frames: a little-endian token word followed
/// by a little-endian parameter word. This module covers the full path from
/// raw bytes to a classified event:
///
/// - `model.rs`: frame layout, bit-field split, wire constants
/// - `sync.rs`: sliding-window search for the all-ones sync sentinel
/// - `read.rs`: assembly of exactly one frame from a byte source
/// - `decode.rs`: classification into resolved / reload / unknown
pub mod decode;
pub mod model;
pub mod read;
pub mod sync;

pub use decode::decode;
pub use model::{DecodedEvent, Frame, FRAME_LEN, SYNC_SENTINEL};
pub use read::read_frame;
pub use sync::sync;

use std::time::Duration;

/// Delay before retrying a read that returned no bytes, mirroring the serial
/// poll timeout the device side is tested against.
pub(crate) const POLL_DELAY: Duration = Duration::from_millis(100);
