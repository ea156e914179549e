// src/readers/recordtable.rs

//! Implements the [`UnifiedRecordTable`], the merged, deduplicated,
//! time-ordered [`RawRecord`]s of all raw navigation logs of a batch.
//!
//! Deduplication is asymmetric:
//! - within one log family, overlapping log files (from log rotation)
//!   repeat records; the first `(kind, timestamp)` is kept,
//!   see [`dedup_within_family`].
//! - across log families, an identical `(raw_text, timestamp)` found more
//!   than once is an identity conflict; every member of the group is
//!   dropped, see [`dedup_across_families`].

use std::collections::BTreeMap;

use ::itertools::Itertools; // brings in `unique_by`, `counts_by`, `sorted_by_key`
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::Count;
use crate::data::datetime::DateTimeU;
use crate::data::record::{
    RawRecord,
    RawRecords,
    SentenceKind,
};

/// Remove records with a repeated `(kind, timestamp)`, keeping the first.
///
/// Idempotent; the result passed again returns an identical result.
pub fn dedup_within_family(records: RawRecords) -> RawRecords {
    defn!("({} records)", records.len());
    let records_: RawRecords = records
        .into_iter()
        .unique_by(|record| (record.kind, record.timestamp))
        .collect();
    defx!("return {} records", records_.len());

    records_
}

/// Remove every record whose `(raw_text, timestamp)` occurs more than once.
///
/// Unlike [`dedup_within_family`] no occurrence is kept.
pub fn dedup_across_families(records: RawRecords) -> RawRecords {
    defn!("({} records)", records.len());
    let keep: Vec<bool> = {
        let counts = records
            .iter()
            .counts_by(|record| (record.raw_text.as_str(), record.timestamp));
        records
            .iter()
            .map(|record| counts[&(record.raw_text.as_str(), record.timestamp)] == 1)
            .collect()
    };
    let records_: RawRecords = records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep_)| if keep_ { Some(record) } else { None })
        .collect();
    defx!("return {} records", records_.len());

    records_
}

/// The merged record table of one batch run. Read-only once built.
///
/// Invariants:
/// - records are sorted by `timestamp`; records with equal `timestamp`
///   keep their input order.
/// - no two records share `(kind, raw_text, timestamp)`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnifiedRecordTable {
    records: RawRecords,
}

impl UnifiedRecordTable {
    /// Build the table from the records of each log family. Each inner
    /// `RawRecords` is all records of one family, in log file order.
    pub fn from_families(families: Vec<RawRecords>) -> UnifiedRecordTable {
        defn!("({} families)", families.len());
        let merged: RawRecords = families
            .into_iter()
            .map(dedup_within_family)
            .fold(RawRecords::new(), |mut acc, family_records| {
                acc.extend(family_records);
                acc
            });
        let records: RawRecords = dedup_across_families(merged)
            .into_iter()
            .sorted_by_key(|record| record.timestamp)
            .collect();
        defx!("return table of {} records", records.len());

        UnifiedRecordTable { records }
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last record datetimes.
    pub fn datetime_range(&self) -> Option<(DateTimeU, DateTimeU)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    pub fn count_by_kind(&self) -> BTreeMap<SentenceKind, Count> {
        self.records
            .iter()
            .fold(BTreeMap::new(), |mut map, record| {
                *map.entry(record.kind).or_insert(0) += 1;
                map
            })
    }
}
