// src/readers/correlator.rs

//! Slice the [`UnifiedRecordTable`] per [`Session`] window.
//!
//! A record is within a session window when
//! `window_start < timestamp < window_end`. Both ends are exclusive.
//!
//! [`UnifiedRecordTable`]: crate::readers::recordtable::UnifiedRecordTable
//! [`Session`]: crate::data::session::Session

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::data::record::RawRecord;
use crate::data::session::Session;
use crate::readers::recordtable::UnifiedRecordTable;

/// Return the records of `table` within the window of `session`, in table
/// order.
///
/// The table is sorted by timestamp so the window bounds are found with
/// two binary searches. The result equals [`records_in_window_scan`].
pub fn records_in_window<'a>(
    table: &'a UnifiedRecordTable,
    session: &Session,
) -> &'a [RawRecord] {
    let records: &'a [RawRecord] = table.records();
    let beg: usize = records.partition_point(|record| record.timestamp <= session.window_start);
    let end: usize = records.partition_point(|record| record.timestamp < session.window_end);
    if end <= beg {
        defñ!("{} no records", session);
        return &records[0..0];
    }
    defñ!("{} records [{}‥{})", session, beg, end);

    &records[beg..end]
}

/// Linear scan version of [`records_in_window`].
pub fn records_in_window_scan<'a>(
    records: &'a [RawRecord],
    session: &Session,
) -> Vec<&'a RawRecord> {
    records
        .iter()
        .filter(|record| session.window_contains(&record.timestamp))
        .collect()
}
