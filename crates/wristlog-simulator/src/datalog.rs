//! File-backed data logging
//!
//! Each session appends its items to `<dir>/session_<tag>.bin`, which is the
//! same byte stream the watch would sync to the phone. `wristlog-decode`
//! reads these files back.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use wristlog_core::host::{DataLogging, DataLoggingError, DataLoggingSessionRef, ItemKind};

use crate::error::SimError;

struct Session {
    tag: u32,
    item_size: usize,
    /// `None` once the session has been finished.
    file: Option<File>,
    items_written: u64,
}

pub struct FileDataLogging {
    dir: PathBuf,
    sessions: Vec<Session>,
}

impl FileDataLogging {
    /// Log into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SimError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            sessions: Vec::new(),
        })
    }

    pub fn session_path(&self, tag: u32) -> PathBuf {
        session_path(&self.dir, tag)
    }

    /// Items accepted by `session` so far.
    pub fn items_written(&self, session: DataLoggingSessionRef) -> Option<u64> {
        self.sessions
            .get(session.0 as usize)
            .map(|s| s.items_written)
    }

    fn session_mut(
        &mut self,
        session: DataLoggingSessionRef,
    ) -> Result<&mut Session, DataLoggingError> {
        self.sessions
            .get_mut(session.0 as usize)
            .ok_or(DataLoggingError::NotFound)
    }
}

fn session_path(dir: &Path, tag: u32) -> PathBuf {
    dir.join(format!("session_{tag}.bin"))
}

impl DataLogging for FileDataLogging {
    fn create_session(
        &mut self,
        tag: u32,
        kind: ItemKind,
        item_size: usize,
        persist: bool,
    ) -> Result<DataLoggingSessionRef, DataLoggingError> {
        if item_size == 0 {
            return Err(DataLoggingError::InvalidParams);
        }

        let path = session_path(&self.dir, tag);
        // Persistent sessions resume the existing file
        let file = OpenOptions::new()
            .create(true)
            .append(persist)
            .write(true)
            .truncate(!persist)
            .open(&path)
            .map_err(|e| {
                error!("Failed to open {}: {}", path.display(), e);
                DataLoggingError::Internal
            })?;

        let handle = DataLoggingSessionRef(self.sessions.len() as u32);
        self.sessions.push(Session {
            tag,
            item_size,
            file: Some(file),
            items_written: 0,
        });

        info!(
            "Data-logging session {} opened: {:?}, {} byte items -> {}",
            tag,
            kind,
            item_size,
            path.display()
        );
        Ok(handle)
    }

    fn log(
        &mut self,
        session: DataLoggingSessionRef,
        data: &[u8],
        num_items: u32,
    ) -> Result<(), DataLoggingError> {
        let session = self.session_mut(session)?;

        if num_items == 0 || data.len() != session.item_size * num_items as usize {
            return Err(DataLoggingError::InvalidParams);
        }

        let file = session.file.as_mut().ok_or(DataLoggingError::Closed)?;
        file.write_all(data).map_err(|e| {
            warn!("Write to session {} failed: {}", session.tag, e);
            DataLoggingError::Internal
        })?;

        session.items_written += u64::from(num_items);
        Ok(())
    }

    fn finish(&mut self, session: DataLoggingSessionRef) {
        let Ok(session) = self.session_mut(session) else {
            debug!("Finish for unknown session {:?}", session);
            return;
        };

        if let Some(mut file) = session.file.take() {
            if let Err(e) = file.flush() {
                warn!("Flush of session {} failed: {}", session.tag, e);
            }
            info!(
                "Data-logging session {} finished after {} items",
                session.tag, session.items_written
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wristlog_core::record::Records;
    use wristlog_core::{AccelRecord, RECORD_SIZE};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wristlog-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_records_land_in_session_file_in_order() {
        let dir = temp_dir("order");
        let mut datalog = FileDataLogging::new(&dir).unwrap();
        let session = datalog
            .create_session(1, ItemKind::ByteArray, RECORD_SIZE, true)
            .unwrap();

        let records = [
            AccelRecord::new(100, 1, 2, 3),
            AccelRecord::new(110, -1, -2, -3),
            AccelRecord::new(120, 0, 0, 0),
        ];
        for record in &records {
            datalog.log(session, &record.to_bytes(), 1).unwrap();
        }
        datalog.finish(session);

        let bytes = fs::read(datalog.session_path(1)).unwrap();
        assert_eq!(bytes.len(), 3 * RECORD_SIZE);
        assert_eq!(Records::new(&bytes).collect::<Vec<_>>(), records);
        assert_eq!(datalog.items_written(session), Some(3));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_item_size_is_rejected() {
        let dir = temp_dir("size");
        let mut datalog = FileDataLogging::new(&dir).unwrap();
        let session = datalog
            .create_session(1, ItemKind::ByteArray, RECORD_SIZE, false)
            .unwrap();

        assert_eq!(
            datalog.log(session, &[0u8; RECORD_SIZE - 1], 1),
            Err(DataLoggingError::InvalidParams)
        );
        assert_eq!(
            datalog.log(session, &[0u8; RECORD_SIZE], 2),
            Err(DataLoggingError::InvalidParams)
        );
        assert_eq!(
            datalog.create_session(2, ItemKind::ByteArray, 0, false),
            Err(DataLoggingError::InvalidParams)
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_finished_and_unknown_sessions() {
        let dir = temp_dir("closed");
        let mut datalog = FileDataLogging::new(&dir).unwrap();
        let session = datalog
            .create_session(1, ItemKind::ByteArray, RECORD_SIZE, false)
            .unwrap();

        datalog.finish(session);
        assert_eq!(
            datalog.log(session, &[0u8; RECORD_SIZE], 1),
            Err(DataLoggingError::Closed)
        );
        assert_eq!(
            datalog.log(DataLoggingSessionRef(9), &[0u8; RECORD_SIZE], 1),
            Err(DataLoggingError::NotFound)
        );

        // Finishing twice is harmless
        datalog.finish(session);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_persist_appends_and_non_persist_truncates() {
        let dir = temp_dir("persist");
        let record = AccelRecord::new(1, 1, 1, 1).to_bytes();

        let mut datalog = FileDataLogging::new(&dir).unwrap();
        let first = datalog
            .create_session(1, ItemKind::ByteArray, RECORD_SIZE, true)
            .unwrap();
        datalog.log(first, &record, 1).unwrap();
        datalog.finish(first);

        let resumed = datalog
            .create_session(1, ItemKind::ByteArray, RECORD_SIZE, true)
            .unwrap();
        datalog.log(resumed, &record, 1).unwrap();
        datalog.finish(resumed);
        assert_eq!(fs::read(datalog.session_path(1)).unwrap().len(), 2 * RECORD_SIZE);

        let fresh = datalog
            .create_session(1, ItemKind::ByteArray, RECORD_SIZE, false)
            .unwrap();
        datalog.finish(fresh);
        assert_eq!(fs::read(datalog.session_path(1)).unwrap().len(), 0);

        fs::remove_dir_all(&dir).ok();
    }
}
