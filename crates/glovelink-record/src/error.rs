use crate::layout::RECORD_SIZE;

/// Errors that can occur while decoding a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The buffer is not exactly one record long.
    #[error("malformed record: expected {} bytes, got {len}", RECORD_SIZE)]
    MalformedRecord { len: usize },
}

pub type Result<T> = std::result::Result<T, RecordError>;
