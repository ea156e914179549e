// src/tests/translator_tests.rs

//! tests for `translator.rs`

#![allow(non_snake_case)]

use crate::data::record::{RawRecord, RawRecords, SentenceKind};
use crate::data::sentence::{validate, SentenceError, TranslatedSentence, TranslatedSentences};
use crate::tests::common::{
    record_at,
    DT_20210615_120000,
    DT_20210615_120001,
    GGA_120000,
    GGA_FROM_RMC_120001,
    GGA_FROM_RMC_120001_V,
    HDT_FROM_RMC_120001,
    HEHDT_180,
    HEHDT_FROM_PCHPR_271,
    PCHPR_271,
    PCHPR_271_NO_CHECKSUM,
    RMC_120001,
    RMC_120001_V,
    RMC_DOC,
    VTG_FROM_RMC_120001,
    VTG_FROM_RMC_DOC,
};
use crate::translate::translator::{
    CompositeMode,
    SentenceTranslator,
    TranslateResult,
    TranslatorOptions,
    KNOTS_TO_KMH,
};

use ::test_case::test_case;

fn translator(composite_mode: CompositeMode) -> SentenceTranslator {
    SentenceTranslator::new(TranslatorOptions {
        composite_mode,
        ..Default::default()
    })
}

fn texts(result: TranslateResult) -> Vec<String> {
    match result {
        TranslateResult::Translated(sentences) => sentences
            .into_iter()
            .map(|sentence| sentence.text)
            .collect(),
        TranslateResult::Skipped(err) => panic!("unexpected Skipped({:?})", err),
    }
}

#[test]
fn test_TranslatorOptions_default() {
    let options = TranslatorOptions::default();
    assert_eq!(options.composite_mode, CompositeMode::Velocity);
    assert_eq!(options.knots_to_kmh, KNOTS_TO_KMH);
}

#[test_case(GGA_120000, SentenceKind::Fix, GGA_120000; "fix")]
#[test_case(HEHDT_180, SentenceKind::TrueHeading, HEHDT_180; "true heading")]
#[test_case(PCHPR_271, SentenceKind::HeadingCorrection, HEHDT_FROM_PCHPR_271; "heading correction")]
#[test_case(PCHPR_271_NO_CHECKSUM, SentenceKind::HeadingCorrection, HEHDT_FROM_PCHPR_271; "heading correction no checksum")]
#[test_case(RMC_120001, SentenceKind::CompositeFixCourse, VTG_FROM_RMC_120001; "composite")]
#[test_case(RMC_DOC, SentenceKind::CompositeFixCourse, VTG_FROM_RMC_DOC; "composite doc")]
fn test_translate_record_one(
    raw_text: &str,
    kind: SentenceKind,
    expect: &str,
) {
    let record: RawRecord = record_at(raw_text, kind, 12, 0, 1);
    let result = translator(CompositeMode::Velocity).translate_record(&record);
    assert_eq!(
        result,
        TranslateResult::Translated(vec![TranslatedSentence::new(expect.to_string(), *DT_20210615_120001)])
    );
    // every output is itself a valid sentence
    assert!(validate(expect).is_ok());
}

#[test]
fn test_translate_record_fix_crlf() {
    let raw_text = format!("{}\r\n", GGA_120000);
    let record: RawRecord = record_at(&raw_text, SentenceKind::Fix, 12, 0, 0);
    assert_eq!(texts(translator(CompositeMode::Velocity).translate_record(&record)), vec![GGA_120000]);
}

#[test_case(RMC_120001, vec![GGA_FROM_RMC_120001, HDT_FROM_RMC_120001]; "status A")]
#[test_case(RMC_120001_V, vec![GGA_FROM_RMC_120001_V, HDT_FROM_RMC_120001]; "status V")]
fn test_translate_record_fix_and_heading(
    raw_text: &str,
    expect: Vec<&str>,
) {
    let record: RawRecord = record_at(raw_text, SentenceKind::CompositeFixCourse, 12, 0, 1);
    let result = translator(CompositeMode::FixAndHeading).translate_record(&record);
    assert_eq!(texts(result), expect);
}

#[test]
fn test_translate_record_knots_to_kmh_option() {
    let translator_ = SentenceTranslator::new(TranslatorOptions {
        composite_mode: CompositeMode::Velocity,
        knots_to_kmh: 1.94384,
    });
    let record: RawRecord = record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1);
    assert_eq!(
        texts(translator_.translate_record(&record)),
        vec!["$GPVTG,090.0,T,090.0,M,10.0,N,19.438,K,D*20"]
    );
}

#[test_case(
    "$GPRMC,120001.00,A,5030.1234,N,00405.4321,W,10.0,090.0,150621,,,A*71",
    SentenceKind::CompositeFixCourse,
    SentenceError::ChecksumMismatch { expected: 0x70, found: 0x71 };
    "bad checksum"
)]
#[test_case(
    "$GPRMC,120001.00,A,5030.1234,N,00405.4321,W,abc,090.0,150621,,,A",
    SentenceKind::CompositeFixCourse,
    SentenceError::NotNumeric(7, String::from("abc"));
    "speed not numeric"
)]
#[test_case(
    "$GPRMC,120001.00,A,5030.1234,N,00405.4321,W,10.0,,150621,,,A",
    SentenceKind::CompositeFixCourse,
    SentenceError::MissingField(8);
    "course missing"
)]
#[test_case("$PCHPR,,1.20,-0.35", SentenceKind::HeadingCorrection, SentenceError::MissingField(1); "heading missing")]
#[test_case("$PCHPR", SentenceKind::HeadingCorrection, SentenceError::MissingField(1); "no fields")]
#[test_case("GPGGA,120000.00*43", SentenceKind::Fix, SentenceError::NoStart; "no start")]
fn test_translate_record_skipped(
    raw_text: &str,
    kind: SentenceKind,
    expect: SentenceError,
) {
    let record: RawRecord = record_at(raw_text, kind, 12, 0, 1);
    let result = translator(CompositeMode::Velocity).translate_record(&record);
    assert_eq!(result, TranslateResult::Skipped(expect));
}

#[test]
fn test_translate_records_summary() {
    let records: RawRecords = vec![
        record_at(GGA_120000, SentenceKind::Fix, 12, 0, 0),
        record_at(PCHPR_271, SentenceKind::HeadingCorrection, 12, 0, 0),
        record_at(RMC_120001, SentenceKind::CompositeFixCourse, 12, 0, 1),
        record_at("$PCHPR,x,1.20,-0.35", SentenceKind::HeadingCorrection, 12, 0, 2),
        record_at(RMC_120001_V, SentenceKind::CompositeFixCourse, 12, 0, 3),
    ];
    let (sentences, summary) = translator(CompositeMode::FixAndHeading).translate_records(records.iter());
    let texts_: Vec<&str> = sentences
        .iter()
        .map(|sentence| sentence.text.as_str())
        .collect();
    assert_eq!(
        texts_,
        vec![
            GGA_120000,
            HEHDT_FROM_PCHPR_271,
            GGA_FROM_RMC_120001,
            HDT_FROM_RMC_120001,
            GGA_FROM_RMC_120001_V,
            HDT_FROM_RMC_120001,
        ]
    );
    // synthesized sentences carry the datetime of their record
    assert_eq!(sentences[0].timestamp, *DT_20210615_120000);
    assert_eq!(sentences[2].timestamp, *DT_20210615_120001);
    assert_eq!(sentences[3].timestamp, *DT_20210615_120001);

    assert_eq!(summary.sentences_out, 6);
    assert_eq!(summary.records_translated(), 4);
    assert_eq!(summary.records_skipped(), 1);
    assert_eq!(summary.translated.get(&SentenceKind::CompositeFixCourse), Some(&2));
    assert_eq!(summary.translated.get(&SentenceKind::HeadingCorrection), Some(&1));
    assert_eq!(summary.translated.get(&SentenceKind::TrueHeading), None);
    let (_dt, kind, reason) = &summary.skipped[0];
    assert_eq!(*kind, SentenceKind::HeadingCorrection);
    assert_eq!(*reason, SentenceError::NotNumeric(1, String::from("x")));
}

#[test]
fn test_translate_records_empty() {
    let records: RawRecords = RawRecords::new();
    let (sentences, summary): (TranslatedSentences, _) =
        SentenceTranslator::default().translate_records(records.iter());
    assert!(sentences.is_empty());
    assert_eq!(summary.sentences_out, 0);
    assert_eq!(summary.records_skipped(), 0);
}
