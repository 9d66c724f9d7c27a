//! Fixed-layout glove input record and its wire codec.
//!
//! Every record is exactly [`RECORD_SIZE`] (120) bytes on the wire:
//! - 20 flexion floats, then 5 splay floats (f32, little-endian)
//! - joystick X and Y (f32, little-endian)
//! - eight button bytes (0x00 / 0x01)
//! - trigger value (f32, little-endian)
//!
//! The driver reads fields at fixed offsets, so the layout in [`layout`] is
//! an ABI, not a serialization detail. This crate performs no I/O.

pub mod codec;
pub mod error;
pub mod layout;
pub mod record;

pub use codec::{decode, encode, encode_into};
pub use error::{RecordError, Result};
pub use layout::{FINGER_COUNT, FLEXION_LEN, JOINTS_PER_FINGER, RECORD_SIZE};
pub use record::{flatten_flexion, Buttons, InputRecord};
