// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`RawRecord`]s, [`Session`]s, and [`TranslatedSentence`]s.
//!
//! ## Definitions of data
//!
//! ### Sentence
//!
//! A "sentence" is one line of the NMEA 0183 positioning protocol, e.g.
//! `$GPGGA,120000.00,5030.1234,N,00405.4321,W,1,08,1.0,0.0,M,0.0,M,,*43`.
//!
//! ### RawRecord
//!
//! A "raw record" is one recognized sentence found at a fixed offset in one
//! line of a raw navigation log, along with the datetime found at another
//! fixed offset of that line.
//!
//! A "raw record" is represented by a [`RawRecord`] and found by a
//! [`RawLogReader`].
//!
//! ### Session
//!
//! A "session" is one fixed-duration recording unit of the instrument,
//! packaged as an archive. The archive file name embeds the session start
//! datetime.
//!
//! A "session" is represented by a [`Session`] and found by
//! [`index_sessions`].
//!
//! ### TranslatedSentence
//!
//! A "translated sentence" is a sentence in the vocabulary the instrument
//! software understands, either passed through from a `RawRecord` or
//! synthesized from one.
//!
//! A "translated sentence" is represented by a [`TranslatedSentence`] and
//! created by a [`SentenceTranslator`].
//!
//! [`RawRecord`]: crate::data::record::RawRecord
//! [`Session`]: crate::data::session::Session
//! [`TranslatedSentence`]: crate::data::sentence::TranslatedSentence
//! [`RawLogReader`]: crate::readers::rawlogreader::RawLogReader
//! [`index_sessions`]: crate::readers::sessionindexer::index_sessions
//! [`SentenceTranslator`]: crate::translate::translator::SentenceTranslator

pub mod datetime;
pub mod record;
pub mod sentence;
pub mod session;
