use bytes::{Buf, BufMut};

use crate::error::{RecordError, Result};
use crate::layout::{FINGER_COUNT, FLEXION_LEN, RECORD_SIZE};
use crate::record::InputRecord;

/// Encode a record into its fixed wire form.
///
/// Never fails. Float bit patterns are copied as-is, including NaN payloads
/// and out-of-range values.
pub fn encode(record: &InputRecord) -> [u8; RECORD_SIZE] {
    let mut out = [0u8; RECORD_SIZE];
    encode_into(record, &mut &mut out[..]);
    out
}

/// Append the wire form of `record` to `dst`.
///
/// Writes exactly [`RECORD_SIZE`] bytes. Panics if `dst` cannot grow and has
/// less room than that, like any other `BufMut` write.
pub fn encode_into<B: BufMut>(record: &InputRecord, dst: &mut B) {
    for value in record.flexion {
        dst.put_f32_le(value);
    }
    for value in record.splay {
        dst.put_f32_le(value);
    }
    dst.put_f32_le(record.joy_x);
    dst.put_f32_le(record.joy_y);
    for pressed in record.buttons().as_array() {
        dst.put_u8(u8::from(pressed));
    }
    dst.put_f32_le(record.trg_value);
}

/// Decode one record from exactly [`RECORD_SIZE`] bytes.
///
/// Any other length is rejected before a single field is read. A non-zero
/// button byte decodes as pressed.
pub fn decode(src: &[u8]) -> Result<InputRecord> {
    if src.len() != RECORD_SIZE {
        return Err(RecordError::MalformedRecord { len: src.len() });
    }

    let mut buf = src;

    let mut flexion = [0.0; FLEXION_LEN];
    for value in &mut flexion {
        *value = buf.get_f32_le();
    }
    let mut splay = [0.0; FINGER_COUNT];
    for value in &mut splay {
        *value = buf.get_f32_le();
    }

    let record = InputRecord {
        flexion,
        splay,
        joy_x: buf.get_f32_le(),
        joy_y: buf.get_f32_le(),
        joy_button: buf.get_u8() != 0,
        trg_button: buf.get_u8() != 0,
        a_button: buf.get_u8() != 0,
        b_button: buf.get_u8() != 0,
        grab: buf.get_u8() != 0,
        pinch: buf.get_u8() != 0,
        menu: buf.get_u8() != 0,
        calibrate: buf.get_u8() != 0,
        trg_value: buf.get_f32_le(),
    };
    debug_assert!(!buf.has_remaining());

    Ok(record)
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::layout::{
        CALIBRATE_OFFSET, GRAB_OFFSET, JOY_BUTTON_OFFSET, JOY_X_OFFSET, SPLAY_OFFSET,
        TRG_VALUE_OFFSET,
    };

    fn busy_record() -> InputRecord {
        let mut record = InputRecord::zeroed();
        for (i, v) in record.flexion.iter_mut().enumerate() {
            *v = i as f32 / 19.0;
        }
        record.splay = [-1.0, -0.25, 0.0, 0.25, 1.0];
        record.joy_x = -0.75;
        record.joy_y = 0.5;
        record.trg_button = true;
        record.b_button = true;
        record.pinch = true;
        record.calibrate = true;
        record.trg_value = 0.625;
        record
    }

    /// Indices of bytes that differ between two encodings.
    fn changed_bytes(a: &[u8; RECORD_SIZE], b: &[u8; RECORD_SIZE]) -> Vec<usize> {
        (0..RECORD_SIZE).filter(|&i| a[i] != b[i]).collect()
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let record = busy_record();
        let wire = encode(&record);
        assert_eq!(wire.len(), RECORD_SIZE);

        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(encode(&decoded), wire);
    }

    #[test]
    fn test_roundtrip_preserves_float_bits() {
        let mut record = InputRecord::zeroed();
        record.flexion[0] = f32::from_bits(0x7fc0_1234); // NaN with payload
        record.flexion[1] = -0.0;
        record.splay[2] = f32::INFINITY;
        record.joy_x = 7.5; // out of domain, passed through
        record.trg_value = f32::MIN_POSITIVE / 2.0; // subnormal

        let decoded = decode(&encode(&record)).unwrap();
        assert_eq!(decoded.flexion[0].to_bits(), 0x7fc0_1234);
        assert_eq!(decoded.flexion[1].to_bits(), (-0.0f32).to_bits());
        assert_eq!(decoded.splay[2], f32::INFINITY);
        assert_eq!(decoded.joy_x, 7.5);
        assert_eq!(decoded.trg_value.to_bits(), record.trg_value.to_bits());
    }

    #[test]
    fn test_zeroed_encodes_to_all_zero_bytes() {
        assert_eq!(encode(&InputRecord::zeroed()), [0u8; RECORD_SIZE]);
    }

    #[test]
    fn test_extreme_values_keep_fixed_size() {
        let mut record = InputRecord::zeroed();
        record.flexion = [1.0; FLEXION_LEN];
        record.splay = [-1.0; FINGER_COUNT];
        record.joy_x = -1.0;
        record.joy_y = 1.0;
        record.trg_value = 1.0;

        let mut buf = BytesMut::new();
        encode_into(&record, &mut buf);
        assert_eq!(buf.len(), RECORD_SIZE);
        assert_eq!(buf.as_ref(), encode(&record).as_slice());
    }

    #[test]
    fn test_known_byte_positions() {
        let wire = encode(&busy_record());
        assert_eq!(&wire[0..4], &0.0f32.to_le_bytes());
        assert_eq!(&wire[SPLAY_OFFSET..SPLAY_OFFSET + 4], &(-1.0f32).to_le_bytes());
        assert_eq!(&wire[JOY_X_OFFSET..JOY_X_OFFSET + 4], &(-0.75f32).to_le_bytes());
        assert_eq!(
            &wire[JOY_BUTTON_OFFSET..JOY_BUTTON_OFFSET + 8],
            &[0, 1, 0, 1, 0, 1, 0, 1]
        );
        assert_eq!(&wire[TRG_VALUE_OFFSET..], &0.625f32.to_le_bytes());
    }

    #[test]
    fn test_flexion_zero_touches_only_first_four_bytes() {
        let base = busy_record();
        let mut changed = base;
        changed.flexion[0] = 0.5;

        let diff = changed_bytes(&encode(&base), &encode(&changed));
        assert!(!diff.is_empty());
        assert!(diff.iter().all(|&i| i < 4), "leaked into {diff:?}");
    }

    #[test]
    fn test_calibrate_touches_only_its_byte() {
        let base = busy_record();
        let mut changed = base;
        changed.calibrate = !base.calibrate;

        let diff = changed_bytes(&encode(&base), &encode(&changed));
        assert_eq!(diff, vec![CALIBRATE_OFFSET]);
    }

    #[test]
    fn test_each_button_has_its_own_byte() {
        let base = InputRecord::zeroed();
        let mut grab = base;
        grab.grab = true;

        let wire = encode(&grab);
        assert_eq!(changed_bytes(&encode(&base), &wire), vec![GRAB_OFFSET]);
        assert_eq!(wire[GRAB_OFFSET], 0x01);
    }

    #[test]
    fn test_decode_rejects_wrong_lengths() {
        let wire = encode(&busy_record());
        for len in [0, 1, RECORD_SIZE - 1, RECORD_SIZE + 1, 2 * RECORD_SIZE] {
            let mut buf = wire.to_vec();
            buf.resize(len, 0);
            let err = decode(&buf).unwrap_err();
            assert_eq!(err, RecordError::MalformedRecord { len });
        }
    }

    #[test]
    fn test_decode_treats_nonzero_button_byte_as_pressed() {
        let mut wire = [0u8; RECORD_SIZE];
        wire[CALIBRATE_OFFSET] = 0xFF;
        let record = decode(&wire).unwrap();
        assert!(record.calibrate);
        assert!(!record.menu);
    }
}
