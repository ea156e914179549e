// src/tests/correlator_tests.rs

//! tests for `correlator.rs`

use std::path::PathBuf;

use crate::data::datetime::{ymdhms, DateTimeU, Duration};
use crate::data::record::{RawRecord, RawRecords, SentenceKind};
use crate::data::session::Session;
use crate::readers::correlator::{records_in_window, records_in_window_scan};
use crate::readers::recordtable::UnifiedRecordTable;
use crate::tests::common::{record_at, GGA_120000};

use ::test_case::test_case;

fn session(
    start: DateTimeU,
    end: DateTimeU,
) -> Session {
    Session {
        archive_path: PathBuf::from("/adcp/S_20210615_120000_01.SigVM"),
        extracted_folder_path: PathBuf::from("/adcp/S_20210615_120000_01"),
        output_archive_path: PathBuf::from("/adcp_out/S_20210615_120000_01"),
        name_stem: String::from("S_20210615_120000_01"),
        window_start: start,
        window_end: end,
    }
}

fn hms(
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeU {
    ymdhms(2021, 6, 15, hour, min, sec).unwrap()
}

/// one `Fix` record at each of the passed `(hour, min, sec)`
fn table_at(times: &[(u32, u32, u32)]) -> UnifiedRecordTable {
    let records: RawRecords = times
        .iter()
        .map(|(h, m, s)| record_at(GGA_120000, SentenceKind::Fix, *h, *m, *s))
        .collect();

    UnifiedRecordTable::from_families(vec![records])
}

#[test]
fn test_records_in_window_boundaries_excluded() {
    let table = table_at(&[(11, 59, 59), (12, 0, 0), (12, 0, 1), (17, 59, 59), (18, 0, 0), (18, 0, 1)]);
    let session_ = session(hms(12, 0, 0), hms(18, 0, 0));
    let records: &[RawRecord] = records_in_window(&table, &session_);
    let times: Vec<DateTimeU> = records.iter().map(|record| record.timestamp).collect();
    assert_eq!(times, vec![hms(12, 0, 1), hms(17, 59, 59)]);
}

#[test]
fn test_records_in_window_adjacent_sessions_disjoint() {
    let table = table_at(&[(12, 30, 0), (18, 0, 0), (18, 30, 0)]);
    let first = session(hms(12, 0, 0), hms(18, 0, 0));
    let second = session(hms(18, 0, 0), hms(18, 0, 0) + Duration::hours(24));
    assert_eq!(records_in_window(&table, &first).len(), 1);
    assert_eq!(records_in_window(&table, &second).len(), 1);
    assert_eq!(records_in_window(&table, &second)[0].timestamp, hms(18, 30, 0));
}

#[test]
fn test_records_in_window_subsecond() {
    let start = hms(12, 0, 0);
    let mut record = record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0);
    record.timestamp = start + Duration::milliseconds(1);
    let table = UnifiedRecordTable::from_families(vec![vec![record]]);
    assert_eq!(records_in_window(&table, &session(start, hms(12, 0, 1))).len(), 1);
}

#[test_case(hms(10, 0, 0), hms(11, 0, 0), 0; "before all")]
#[test_case(hms(19, 0, 0), hms(20, 0, 0), 0; "after all")]
#[test_case(hms(12, 0, 0), hms(12, 0, 0), 0; "empty window")]
#[test_case(hms(13, 0, 0), hms(12, 0, 0), 0; "inverted window")]
#[test_case(hms(11, 0, 0), hms(19, 0, 0), 6; "all")]
#[test_case(hms(12, 0, 0), hms(18, 0, 1), 3; "start excluded")]
fn test_records_in_window_equals_scan(
    start: DateTimeU,
    end: DateTimeU,
    expect_len: usize,
) {
    let table = table_at(&[(11, 59, 59), (12, 0, 0), (12, 0, 1), (17, 59, 59), (18, 0, 0), (18, 0, 2)]);
    let session_ = session(start, end);
    let found: &[RawRecord] = records_in_window(&table, &session_);
    let scanned: Vec<&RawRecord> = records_in_window_scan(table.records(), &session_);
    assert_eq!(found.len(), expect_len);
    assert_eq!(found.iter().collect::<Vec<&RawRecord>>(), scanned);
}

#[test]
fn test_records_in_window_empty_table() {
    let table = UnifiedRecordTable::default();
    assert!(records_in_window(&table, &session(hms(12, 0, 0), hms(18, 0, 0))).is_empty());
}
