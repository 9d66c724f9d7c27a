use std::io::{ErrorKind, Write};

use glovelink_record::{encode, InputRecord};

use crate::error::{ChannelError, Result};

/// Writes whole records to any `Write` sink.
///
/// One record is one blocking write of the full encoded buffer. Short writes
/// are continued, `Interrupted` is retried, and everything else is a
/// [`ChannelError::TransportFailure`].
#[derive(Debug)]
pub struct RecordWriter<T> {
    inner: T,
}

impl<T: Write> RecordWriter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Encode and send one record, then flush.
    pub fn write_record(&mut self, record: &InputRecord) -> Result<()> {
        let wire = encode(record);

        let mut offset = 0usize;
        while offset < wire.len() {
            match self.inner.write(&wire[offset..]) {
                Ok(0) => {
                    return Err(ChannelError::TransportFailure(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "channel closed mid-record",
                    )))
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ChannelError::TransportFailure(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ChannelError::TransportFailure(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
