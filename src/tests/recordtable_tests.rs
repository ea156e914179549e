// src/tests/recordtable_tests.rs

//! tests for `recordtable.rs`

#![allow(non_snake_case)]

use crate::data::record::{RawRecord, RawRecords, SentenceKind};
use crate::readers::recordtable::{
    dedup_across_families,
    dedup_within_family,
    UnifiedRecordTable,
};
use crate::tests::common::{
    record_at,
    DT_20210615_120000,
    DT_20210615_120001,
    GGA_120000,
    HEHDT_180,
    PCHPR_271,
    RMC_120001,
};

use ::more_asserts::assert_le;
use ::test_case::test_case;

fn heading_record_at(
    raw_text: &str,
    kind: SentenceKind,
    sec: u32,
) -> RawRecord {
    let mut record = record_at(raw_text, kind, 12, 0, sec);
    record.source_family = "heading";

    record
}

fn raw_texts(records: &[RawRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.raw_text.as_str())
        .collect()
}

#[test]
fn test_dedup_within_family_keep_first() {
    let records: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
        // rotated log repeats the same kind and datetime with other text
        record_at("$GPGGA,repeat*00", SentenceKind::Fix, 12, 0, 0),
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
    ];
    let deduped: RawRecords = dedup_within_family(records);
    assert_eq!(raw_texts(&deduped), vec![GGA_120000, RMC_120001]);
}

#[test]
fn test_dedup_within_family_different_kind_same_datetime() {
    let records: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(HEHDT_180, SentenceKind::TrueHeading, 12, 0, 0),
    ];
    assert_eq!(dedup_within_family(records.clone()), records);
}

#[test]
fn test_dedup_within_family_idempotent() {
    let records: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(PCHPR_271, SentenceKind::HeadingCorrection, 12, 0, 0),
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
    ];
    let once: RawRecords = dedup_within_family(records);
    let twice: RawRecords = dedup_within_family(once.clone());
    assert_eq!(once.len(), 3);
    assert_eq!(once, twice);
}

#[test]
fn test_dedup_across_families_drops_all() {
    let records: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
        heading_record_at(GGA_120000, SentenceKind::Fix, 0),
        heading_record_at(PCHPR_271, SentenceKind::HeadingCorrection, 1),
    ];
    let deduped: RawRecords = dedup_across_families(records);
    assert_eq!(raw_texts(&deduped), vec![RMC_120001, PCHPR_271]);
}

#[test]
fn test_dedup_across_families_same_text_other_datetime() {
    let records: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        heading_record_at(GGA_120000, SentenceKind::Fix, 5),
    ];
    assert_eq!(dedup_across_families(records).len(), 2);
}

#[test]
fn test_UnifiedRecordTable_from_families() {
    let nav: RawRecords = vec![
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 2),
    ];
    let heading: RawRecords = vec![
        heading_record_at(PCHPR_271, SentenceKind::HeadingCorrection, 1),
        heading_record_at(GGA_120000, SentenceKind::Fix, 2),
    ];
    let table = UnifiedRecordTable::from_families(vec![nav, heading]);
    // GGA at 12:00:02 is in both families so neither is kept
    assert_eq!(table.len(), 3);
    let records: &[RawRecord] = table.records();
    assert_eq!(raw_texts(records), vec![GGA_120000, RMC_120001, PCHPR_271]);
    assert_eq!(records[1].source_family, "nav");
    assert_eq!(records[2].source_family, "heading");
    for pair in records.windows(2) {
        assert_le!(pair[0].timestamp, pair[1].timestamp);
    }
    assert_eq!(table.datetime_range(), Some((*DT_20210615_120000, *DT_20210615_120001)));
}

#[test_case(vec![], 0; "no families")]
#[test_case(vec![vec![]], 0; "one empty family")]
#[test_case(vec![vec![], vec![]], 0; "two empty families")]
fn test_UnifiedRecordTable_from_families_empty(
    families: Vec<RawRecords>,
    expect_len: usize,
) {
    let table = UnifiedRecordTable::from_families(families);
    assert_eq!(table.len(), expect_len);
    assert!(table.is_empty());
    assert_eq!(table.datetime_range(), None);
    assert!(table.count_by_kind().is_empty());
}

#[test]
fn test_UnifiedRecordTable_count_by_kind() {
    let nav: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 2),
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
    ];
    let table = UnifiedRecordTable::from_families(vec![nav]);
    let counts = table.count_by_kind();
    assert_eq!(counts.get(&SentenceKind::Fix), Some(&2));
    assert_eq!(counts.get(&SentenceKind::CompositeFixCourse), Some(&1));
    assert_eq!(counts.get(&SentenceKind::TrueHeading), None);
}
