// src/translate/mod.rs

//! Translation of [`RawRecord`s] into the sentence vocabulary of the
//! instrument's post-processing software.
//!
//! The instrument software understands `$GPGGA`, `$GPVTG`, `$GPHDT`, and
//! `$HEHDT`. Navigation loggers also emit `$GPRMC` and the proprietary
//! `$PCHPR`; those are synthesized into understood sentences by a
//! [`SentenceTranslator`].
//!
//! [`RawRecord`s]: crate::data::record::RawRecord
//! [`SentenceTranslator`]: crate::translate::translator::SentenceTranslator

pub mod translator;
