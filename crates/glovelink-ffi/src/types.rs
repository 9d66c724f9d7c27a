use std::ffi::c_void;

use glovelink_client::ChannelClient;
use glovelink_record::{InputRecord, FINGER_COUNT, FLEXION_LEN, RECORD_SIZE};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlResult {
    Ok = 0,
    InvalidArgument = 1,
    TransportFailure = 2,
    MalformedRecord = 3,
    Internal = 99,
}

pub const GL_HAND_LEFT: i32 = 0;
pub const GL_HAND_RIGHT: i32 = 1;

/// C view of an input record, field for field in wire order.
///
/// Buttons are bytes rather than `bool` so any value a C caller stores is
/// valid; non-zero means pressed.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlInputRecord {
    pub flexion: [f32; FLEXION_LEN],
    pub splay: [f32; FINGER_COUNT],
    pub joy_x: f32,
    pub joy_y: f32,
    pub joy_button: u8,
    pub trg_button: u8,
    pub a_button: u8,
    pub b_button: u8,
    pub grab: u8,
    pub pinch: u8,
    pub menu: u8,
    pub calibrate: u8,
    pub trg_value: f32,
}

// The C struct happens to match the wire size; the codec does not rely on it.
const _: () = assert!(std::mem::size_of::<GlInputRecord>() == RECORD_SIZE);

impl From<&GlInputRecord> for InputRecord {
    fn from(raw: &GlInputRecord) -> Self {
        InputRecord {
            flexion: raw.flexion,
            splay: raw.splay,
            joy_x: raw.joy_x,
            joy_y: raw.joy_y,
            joy_button: raw.joy_button != 0,
            trg_button: raw.trg_button != 0,
            a_button: raw.a_button != 0,
            b_button: raw.b_button != 0,
            grab: raw.grab != 0,
            pinch: raw.pinch != 0,
            menu: raw.menu != 0,
            calibrate: raw.calibrate != 0,
            trg_value: raw.trg_value,
        }
    }
}

impl From<&InputRecord> for GlInputRecord {
    fn from(record: &InputRecord) -> Self {
        GlInputRecord {
            flexion: record.flexion,
            splay: record.splay,
            joy_x: record.joy_x,
            joy_y: record.joy_y,
            joy_button: record.joy_button.into(),
            trg_button: record.trg_button.into(),
            a_button: record.a_button.into(),
            b_button: record.b_button.into(),
            grab: record.grab.into(),
            pinch: record.pinch.into(),
            menu: record.menu.into(),
            calibrate: record.calibrate.into(),
            trg_value: record.trg_value,
        }
    }
}

pub type GlClientHandle = *mut c_void;

pub(crate) struct ClientHandle {
    pub(crate) client: ChannelClient,
}
