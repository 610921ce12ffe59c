//! Forwards accelerometer batches to a data-logging session

use log::{debug, info};

use crate::config::LogConfig;
use crate::host::{
    AccelData, DataLogging, DataLoggingError, DataLoggingSessionRef, ItemKind, result_code,
};
use crate::record::{AccelRecord, RECORD_SIZE};

/// Owns the app's single data-logging session.
///
/// Every sample becomes exactly one record, appended in arrival order.
/// Append failures are reported on the diagnostic log and otherwise
/// ignored; nothing is retried.
#[derive(Debug)]
pub struct AccelLogger {
    session: DataLoggingSessionRef,
    appended: u32,
    failed: u32,
}

impl AccelLogger {
    /// Open the session described by `config`.
    pub fn open<L: DataLogging>(
        datalog: &mut L,
        config: &LogConfig,
    ) -> Result<Self, DataLoggingError> {
        let session =
            datalog.create_session(config.tag, ItemKind::ByteArray, RECORD_SIZE, config.persist)?;
        debug!("Opened data-logging session {:?} (tag {})", session, config.tag);

        Ok(Self {
            session,
            appended: 0,
            failed: 0,
        })
    }

    pub fn session(&self) -> DataLoggingSessionRef {
        self.session
    }

    /// Append one record per sample, in order.
    pub fn log_batch<L: DataLogging>(&mut self, datalog: &mut L, samples: &[AccelData]) {
        for sample in samples {
            let record = AccelRecord::from(sample);
            let result = datalog.log(self.session, &record.to_bytes(), 1);
            info!("{}", result_code(&result));

            match result {
                Ok(()) => self.appended = self.appended.wrapping_add(1),
                Err(_) => self.failed = self.failed.wrapping_add(1),
            }
        }
    }

    /// Records the host accepted since the session was opened.
    pub fn appended(&self) -> u32 {
        self.appended
    }

    /// Records the host rejected since the session was opened.
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// Close the session. Consumes the logger so it cannot be closed twice.
    pub fn close<L: DataLogging>(self, datalog: &mut L) {
        datalog.finish(self.session);
        debug!(
            "Closed data-logging session {:?}: {} appended, {} failed",
            self.session, self.appended, self.failed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    /// Records every call; optionally rejects every `reject_every`-th append.
    #[derive(Default)]
    struct RecordingLog {
        created: Vec<(u32, ItemKind, usize, bool)>,
        appends: Vec<(DataLoggingSessionRef, Vec<u8>, u32)>,
        finished: Vec<DataLoggingSessionRef>,
        reject_every: Option<usize>,
    }

    impl DataLogging for RecordingLog {
        fn create_session(
            &mut self,
            tag: u32,
            kind: ItemKind,
            item_size: usize,
            persist: bool,
        ) -> Result<DataLoggingSessionRef, DataLoggingError> {
            self.created.push((tag, kind, item_size, persist));
            Ok(DataLoggingSessionRef(self.created.len() as u32))
        }

        fn log(
            &mut self,
            session: DataLoggingSessionRef,
            data: &[u8],
            num_items: u32,
        ) -> Result<(), DataLoggingError> {
            self.appends.push((session, data.to_vec(), num_items));
            match self.reject_every {
                Some(n) if self.appends.len() % n == 0 => Err(DataLoggingError::Busy),
                _ => Ok(()),
            }
        }

        fn finish(&mut self, session: DataLoggingSessionRef) {
            self.finished.push(session);
        }
    }

    fn decoded(log: &RecordingLog) -> Vec<AccelRecord> {
        log.appends
            .iter()
            .map(|(_, bytes, _)| AccelRecord::try_from(bytes.as_slice()).unwrap())
            .collect()
    }

    #[test]
    fn test_open_uses_record_layout() {
        let mut log = RecordingLog::default();
        let logger = AccelLogger::open(&mut log, &LogConfig::default()).unwrap();

        assert_eq!(log.created.as_slice(), &[(1, ItemKind::ByteArray, RECORD_SIZE, true)]);
        assert_eq!(logger.session(), DataLoggingSessionRef(1));
    }

    #[test]
    fn test_batch_of_three_appends_in_order() {
        let mut log = RecordingLog::default();
        let mut logger = AccelLogger::open(&mut log, &LogConfig::default()).unwrap();

        let batch = [
            AccelData::new(100, 1, 2, 3),
            AccelData::new(110, -1, -2, -3),
            AccelData::new(120, 0, 0, 0),
        ];
        logger.log_batch(&mut log, &batch);

        assert_eq!(log.appends.len(), 3);
        assert!(log.appends.iter().all(|(s, bytes, n)| {
            *s == logger.session() && bytes.len() == RECORD_SIZE && *n == 1
        }));
        assert_eq!(
            decoded(&log),
            [
                AccelRecord::new(100, 1, 2, 3),
                AccelRecord::new(110, -1, -2, -3),
                AccelRecord::new(120, 0, 0, 0),
            ]
        );
        assert_eq!(logger.appended(), 3);
        assert_eq!(logger.failed(), 0);
    }

    #[test]
    fn test_failed_appends_are_not_retried() {
        let mut log = RecordingLog {
            reject_every: Some(2),
            ..Default::default()
        };
        let mut logger = AccelLogger::open(&mut log, &LogConfig::default()).unwrap();

        let batch: Vec<AccelData> = (0..5).map(|i| AccelData::new(i * 100, 1, 1, 1)).collect();
        logger.log_batch(&mut log, &batch);

        assert_eq!(log.appends.len(), 5, "one write per sample, no retries");
        assert_eq!(logger.appended(), 3);
        assert_eq!(logger.failed(), 2);
    }

    #[test]
    fn test_duplicate_samples_are_kept() {
        let mut log = RecordingLog::default();
        let mut logger = AccelLogger::open(&mut log, &LogConfig::default()).unwrap();

        let sample = AccelData::new(500, 7, 7, 7);
        logger.log_batch(&mut log, &[sample, sample]);

        assert_eq!(decoded(&log), [AccelRecord::new(500, 7, 7, 7); 2]);
    }

    #[test]
    fn test_close_finishes_session_once() {
        let mut log = RecordingLog::default();
        let logger = AccelLogger::open(&mut log, &LogConfig::default()).unwrap();
        let session = logger.session();

        logger.close(&mut log);
        assert_eq!(log.finished.as_slice(), &[session]);
    }

    proptest! {
        #[test]
        fn prop_batch_maps_one_to_one(
            batch in proptest::collection::vec(
                (any::<u64>(), any::<i16>(), any::<i16>(), any::<i16>(), any::<bool>()),
                0..64,
            )
        ) {
            let samples: Vec<AccelData> = batch
                .iter()
                .map(|&(timestamp, x, y, z, did_vibrate)| AccelData { x, y, z, did_vibrate, timestamp })
                .collect();

            let mut log = RecordingLog::default();
            let mut logger = AccelLogger::open(&mut log, &LogConfig::default()).unwrap();
            logger.log_batch(&mut log, &samples);

            prop_assert_eq!(log.appends.len(), samples.len());
            let records = decoded(&log);
            for (record, sample) in records.iter().zip(&samples) {
                prop_assert_eq!(record.timestamp, sample.timestamp);
                prop_assert_eq!((record.x, record.y, record.z), (sample.x, sample.y, sample.z));
            }
        }
    }
}
