//! Wire layout of an input record.
//!
//! ```text
//! offset  size  field
//! ------  ----  -----------------------------
//!      0    80  flexion[20]  f32 LE, index = finger * 4 + joint
//!     80    20  splay[5]     f32 LE, index = finger
//!    100     4  joy_x        f32 LE
//!    104     4  joy_y        f32 LE
//!    108     1  joy_button   0x00 / 0x01
//!    109     1  trg_button
//!    110     1  a_button
//!    111     1  b_button
//!    112     1  grab
//!    113     1  pinch
//!    114     1  menu
//!    115     1  calibrate
//!    116     4  trg_value    f32 LE
//!    120        end of record
//! ```
//!
//! There is no padding. The driver decodes by these offsets.

/// Number of fingers on a hand.
pub const FINGER_COUNT: usize = 5;

/// Flexion joints tracked per finger.
pub const JOINTS_PER_FINGER: usize = 4;

/// Flexion values in a record.
pub const FLEXION_LEN: usize = FINGER_COUNT * JOINTS_PER_FINGER;

const F32_SIZE: usize = 4;
const BOOL_SIZE: usize = 1;

pub const FLEXION_OFFSET: usize = 0;
pub const SPLAY_OFFSET: usize = FLEXION_OFFSET + FLEXION_LEN * F32_SIZE;
pub const JOY_X_OFFSET: usize = SPLAY_OFFSET + FINGER_COUNT * F32_SIZE;
pub const JOY_Y_OFFSET: usize = JOY_X_OFFSET + F32_SIZE;
pub const JOY_BUTTON_OFFSET: usize = JOY_Y_OFFSET + F32_SIZE;
pub const TRG_BUTTON_OFFSET: usize = JOY_BUTTON_OFFSET + BOOL_SIZE;
pub const A_BUTTON_OFFSET: usize = TRG_BUTTON_OFFSET + BOOL_SIZE;
pub const B_BUTTON_OFFSET: usize = A_BUTTON_OFFSET + BOOL_SIZE;
pub const GRAB_OFFSET: usize = B_BUTTON_OFFSET + BOOL_SIZE;
pub const PINCH_OFFSET: usize = GRAB_OFFSET + BOOL_SIZE;
pub const MENU_OFFSET: usize = PINCH_OFFSET + BOOL_SIZE;
pub const CALIBRATE_OFFSET: usize = MENU_OFFSET + BOOL_SIZE;
pub const TRG_VALUE_OFFSET: usize = CALIBRATE_OFFSET + BOOL_SIZE;

/// Size of one encoded record: 120 bytes.
pub const RECORD_SIZE: usize = TRG_VALUE_OFFSET + F32_SIZE;

const _: () = assert!(RECORD_SIZE == 120);

/// One field of the wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

/// All fields in wire order.
pub const FIELDS: [FieldLayout; 13] = [
    field("flexion", FLEXION_OFFSET, FLEXION_LEN * F32_SIZE),
    field("splay", SPLAY_OFFSET, FINGER_COUNT * F32_SIZE),
    field("joyX", JOY_X_OFFSET, F32_SIZE),
    field("joyY", JOY_Y_OFFSET, F32_SIZE),
    field("joyButton", JOY_BUTTON_OFFSET, BOOL_SIZE),
    field("trgButton", TRG_BUTTON_OFFSET, BOOL_SIZE),
    field("aButton", A_BUTTON_OFFSET, BOOL_SIZE),
    field("bButton", B_BUTTON_OFFSET, BOOL_SIZE),
    field("grab", GRAB_OFFSET, BOOL_SIZE),
    field("pinch", PINCH_OFFSET, BOOL_SIZE),
    field("menu", MENU_OFFSET, BOOL_SIZE),
    field("calibrate", CALIBRATE_OFFSET, BOOL_SIZE),
    field("trgValue", TRG_VALUE_OFFSET, F32_SIZE),
];

const fn field(name: &'static str, offset: usize, size: usize) -> FieldLayout {
    FieldLayout { name, offset, size }
}

/// Index of a flexion value in the flat array, or `None` when out of range.
pub fn flexion_index(finger: usize, joint: usize) -> Option<usize> {
    (finger < FINGER_COUNT && joint < JOINTS_PER_FINGER)
        .then_some(finger * JOINTS_PER_FINGER + joint)
}
