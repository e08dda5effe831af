//! Record sink trait
//!
//! A sink receives the records of one listing page at a time. It never
//! rewrites rows it already accepted.

use crate::record::RestaurantRecord;
use crate::SinkError;

/// Append-only destination for assembled records
pub trait RecordSink {
    /// Prepares the destination; writes the header row if it starts empty
    ///
    /// Must be called once, before the first [`append`](RecordSink::append).
    fn initialize(&mut self) -> Result<(), SinkError>;

    /// Persists a batch of records after any previously appended rows
    ///
    /// Once this returns `Ok`, the batch survives a crash of the process.
    fn append(&mut self, records: &[RestaurantRecord]) -> Result<(), SinkError>;

    /// Highest id already persisted, 0 if none
    fn last_id(&self) -> u64;
}
