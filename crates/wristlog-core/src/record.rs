//! Fixed-size accelerometer log record.
//!
//! Binary format (little-endian), 16 bytes:
//! - timestamp: 8 bytes (u64, milliseconds since epoch)
//! - x: 2 bytes (i16)
//! - y: 2 bytes (i16)
//! - z: 2 bytes (i16)
//! - padding: 2 bytes (zero)
//!
//! The trailing padding keeps the record at the natural alignment of its
//! widest field, so off-device decoders can read it as `<qhhhxx`.

use core::slice::ChunksExact;

use thiserror_no_std::Error;

use crate::host::AccelData;

/// Size of one encoded record in bytes.
pub const RECORD_SIZE: usize = 16;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("record must be 16 bytes, got {0}")]
    Length(usize),
}

/// One logged accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelRecord {
    pub timestamp: u64,
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelRecord {
    pub const fn new(timestamp: u64, x: i16, y: i16, z: i16) -> Self {
        Self { timestamp, x, y, z }
    }

    /// Converts the record to its on-wire byte form.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];

        bytes[0..8].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.x.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.z.to_le_bytes());

        // Padding is already zero
        bytes
    }

    /// Creates a record from its on-wire byte form. Padding is ignored.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut timestamp_bytes = [0u8; 8];
        timestamp_bytes.copy_from_slice(&bytes[0..8]);

        Self {
            timestamp: u64::from_le_bytes(timestamp_bytes),
            x: i16::from_le_bytes([bytes[8], bytes[9]]),
            y: i16::from_le_bytes([bytes[10], bytes[11]]),
            z: i16::from_le_bytes([bytes[12], bytes[13]]),
        }
    }
}

impl From<&AccelData> for AccelRecord {
    fn from(sample: &AccelData) -> Self {
        Self::new(sample.timestamp, sample.x, sample.y, sample.z)
    }
}

impl TryFrom<&[u8]> for AccelRecord {
    type Error = RecordError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: &[u8; RECORD_SIZE] = bytes
            .try_into()
            .map_err(|_| RecordError::Length(bytes.len()))?;
        Ok(Self::from_bytes(bytes))
    }
}

/// Iterator over the records of a synced session dump.
pub struct Records<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> Records<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            chunks: bytes.chunks_exact(RECORD_SIZE),
        }
    }

    /// Bytes at the end of the dump that do not form a whole record.
    pub fn trailing_bytes(&self) -> usize {
        self.chunks.remainder().len()
    }
}

impl Iterator for Records<'_> {
    type Item = AccelRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunks.next()?;
        let mut bytes = [0u8; RECORD_SIZE];
        bytes.copy_from_slice(chunk);
        Some(AccelRecord::from_bytes(&bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}
