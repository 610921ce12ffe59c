use thiserror_no_std::Error;

/// Opaque handle to an open data-logging session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataLoggingSessionRef(pub u32);

/// How the host should interpret each logged item when syncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    ByteArray,
    Uint,
    Int,
}

/// Failure reported by the host logging transport.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLoggingError {
    #[error("logging session is busy")]
    Busy,
    #[error("logging storage is full")]
    Full,
    #[error("logging session not found")]
    NotFound,
    #[error("logging session already closed")]
    Closed,
    #[error("invalid logging parameters")]
    InvalidParams,
    #[error("internal logging error")]
    Internal,
}

impl DataLoggingError {
    /// Numeric result code; 0 is reserved for success.
    pub const fn code(self) -> u8 {
        match self {
            Self::Busy => 1,
            Self::Full => 2,
            Self::NotFound => 3,
            Self::Closed => 4,
            Self::InvalidParams => 5,
            Self::Internal => 6,
        }
    }
}

/// Numeric result code for an append, as written to the diagnostic log.
pub fn result_code(result: &Result<(), DataLoggingError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

/// Host-managed, append-only channel of fixed-size items, synced off-device.
pub trait DataLogging {
    /// Open a session tagged `tag` whose items are `item_size` bytes each.
    ///
    /// With `persist` set, the host keeps the data on the device until it
    /// has been synced.
    fn create_session(
        &mut self,
        tag: u32,
        kind: ItemKind,
        item_size: usize,
        persist: bool,
    ) -> Result<DataLoggingSessionRef, DataLoggingError>;

    /// Append `num_items` items packed back to back in `data`.
    fn log(
        &mut self,
        session: DataLoggingSessionRef,
        data: &[u8],
        num_items: u32,
    ) -> Result<(), DataLoggingError>;

    /// Close the session. Flushing buffered items is the host's job.
    fn finish(&mut self, session: DataLoggingSessionRef);
}
