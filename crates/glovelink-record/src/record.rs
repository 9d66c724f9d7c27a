use crate::layout::{flexion_index, FINGER_COUNT, FLEXION_LEN, JOINTS_PER_FINGER, RECORD_SIZE};

/// One snapshot of glove input state, in wire field order.
///
/// Values are not range-checked. Flexion and the trigger are expected in
/// `[0, 1]`, splay and the joystick in `[-1, 1]`; the codec passes anything
/// else through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct InputRecord {
    /// Per-joint bend, index = finger * 4 + joint.
    pub flexion: [f32; FLEXION_LEN],
    /// Per-finger lateral spread.
    pub splay: [f32; FINGER_COUNT],
    pub joy_x: f32,
    pub joy_y: f32,
    pub joy_button: bool,
    pub trg_button: bool,
    pub a_button: bool,
    pub b_button: bool,
    pub grab: bool,
    pub pinch: bool,
    pub menu: bool,
    pub calibrate: bool,
    pub trg_value: f32,
}

/// The eight digital inputs of a record, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub joy_button: bool,
    pub trg_button: bool,
    pub a_button: bool,
    pub b_button: bool,
    pub grab: bool,
    pub pinch: bool,
    pub menu: bool,
    pub calibrate: bool,
}

impl InputRecord {
    /// The relaxed record: every float 0.0, every button released.
    pub const fn zeroed() -> Self {
        Self {
            flexion: [0.0; FLEXION_LEN],
            splay: [0.0; FINGER_COUNT],
            joy_x: 0.0,
            joy_y: 0.0,
            joy_button: false,
            trg_button: false,
            a_button: false,
            b_button: false,
            grab: false,
            pinch: false,
            menu: false,
            calibrate: false,
            trg_value: 0.0,
        }
    }

    /// Build a record from pre-flattened flexion values.
    pub fn from_flat(
        flexion: [f32; FLEXION_LEN],
        splay: [f32; FINGER_COUNT],
        joy_x: f32,
        joy_y: f32,
        buttons: Buttons,
        trg_value: f32,
    ) -> Self {
        Self {
            flexion,
            splay,
            joy_x,
            joy_y,
            joy_button: buttons.joy_button,
            trg_button: buttons.trg_button,
            a_button: buttons.a_button,
            b_button: buttons.b_button,
            grab: buttons.grab,
            pinch: buttons.pinch,
            menu: buttons.menu,
            calibrate: buttons.calibrate,
            trg_value,
        }
    }

    /// Build a record from a finger-by-joint flexion matrix.
    ///
    /// The matrix is flattened with [`flatten_flexion`] before anything else
    /// sees it, so both builders produce identical records.
    pub fn from_matrix(
        flexion: [[f32; JOINTS_PER_FINGER]; FINGER_COUNT],
        splay: [f32; FINGER_COUNT],
        joy_x: f32,
        joy_y: f32,
        buttons: Buttons,
        trg_value: f32,
    ) -> Self {
        Self::from_flat(
            flatten_flexion(&flexion),
            splay,
            joy_x,
            joy_y,
            buttons,
            trg_value,
        )
    }

    /// The eight buttons of this record.
    pub fn buttons(&self) -> Buttons {
        Buttons {
            joy_button: self.joy_button,
            trg_button: self.trg_button,
            a_button: self.a_button,
            b_button: self.b_button,
            grab: self.grab,
            pinch: self.pinch,
            menu: self.menu,
            calibrate: self.calibrate,
        }
    }

    /// Flexion of one joint, or `None` when finger or joint is out of range.
    pub fn flexion_at(&self, finger: usize, joint: usize) -> Option<f32> {
        flexion_index(finger, joint).map(|i| self.flexion[i])
    }

    /// Set the flexion of one joint. Returns false when out of range.
    pub fn set_flexion(&mut self, finger: usize, joint: usize, value: f32) -> bool {
        match flexion_index(finger, joint) {
            Some(i) => {
                self.flexion[i] = value;
                true
            }
            None => false,
        }
    }

    /// Flexion regrouped as finger-by-joint.
    pub fn flexion_matrix(&self) -> [[f32; JOINTS_PER_FINGER]; FINGER_COUNT] {
        let mut matrix = [[0.0; JOINTS_PER_FINGER]; FINGER_COUNT];
        for (finger, joints) in matrix.iter_mut().enumerate() {
            joints.copy_from_slice(
                &self.flexion[finger * JOINTS_PER_FINGER..(finger + 1) * JOINTS_PER_FINGER],
            );
        }
        matrix
    }

    /// Encode this record. See [`crate::encode`].
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        crate::codec::encode(self)
    }

    /// Decode a record. See [`crate::decode`].
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        crate::codec::decode(bytes)
    }
}

impl Buttons {
    /// Buttons in wire order.
    pub fn as_array(&self) -> [bool; 8] {
        [
            self.joy_button,
            self.trg_button,
            self.a_button,
            self.b_button,
            self.grab,
            self.pinch,
            self.menu,
            self.calibrate,
        ]
    }
}

/// Flatten a finger-by-joint matrix: outer index = finger, inner = joint.
pub fn flatten_flexion(matrix: &[[f32; JOINTS_PER_FINGER]; FINGER_COUNT]) -> [f32; FLEXION_LEN] {
    let mut flat = [0.0; FLEXION_LEN];
    for (finger, joints) in matrix.iter().enumerate() {
        for (joint, value) in joints.iter().enumerate() {
            flat[finger * JOINTS_PER_FINGER + joint] = *value;
        }
    }
    flat
}
