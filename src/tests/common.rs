// src/tests/common.rs

//! Shared sentences, log lines, and datetimes for tests.

#![allow(non_upper_case_globals)]

use ::lazy_static::lazy_static;

use crate::data::datetime::{ymdhms, DateTimeU};
use crate::data::record::{RawRecord, SentenceKind};

// sentences

pub const GGA_120000: &str = "$GPGGA,120000.00,5030.1234,N,00405.4321,W,1,08,1.0,0.0,M,0.0,M,,*43";
pub const RMC_120001: &str = "$GPRMC,120001.00,A,5030.1234,N,00405.4321,W,10.0,090.0,150621,,,A*70";
/// status `V`, void
pub const RMC_120001_V: &str = "$GPRMC,120001.00,V,5030.1234,N,00405.4321,W,10.0,090.0,150621,,,A*67";
pub const PCHPR_271: &str = "$PCHPR,271.40,1.20,-0.35*43";
pub const PCHPR_271_NO_CHECKSUM: &str = "$PCHPR,271.40,1.20,-0.35";
pub const HEHDT_180: &str = "$HEHDT,180.5,T*23";

/// well known sentences from the NMEA 0183 documentation
pub const GGA_DOC: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
pub const RMC_DOC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

// translations of the sentences above

pub const VTG_FROM_RMC_120001: &str = "$GPVTG,090.0,T,090.0,M,10.0,N,18.520,K,D*29";
pub const VTG_FROM_RMC_DOC: &str = "$GPVTG,084.4,T,084.4,M,022.4,N,41.485,K,D*1E";
pub const GGA_FROM_RMC_120001: &str = "$GPGGA,120001.00,5030.1234,N,00405.4321,W,1,08,1.0,0.0,M,0.0,M,,*42";
pub const GGA_FROM_RMC_120001_V: &str = "$GPGGA,120001.00,5030.1234,N,00405.4321,W,0,08,1.0,0.0,M,0.0,M,,*43";
pub const HDT_FROM_RMC_120001: &str = "$GPHDT,090.0,T*3C";
pub const HEHDT_FROM_PCHPR_271: &str = "$HEHDT,271.40,T*1F";

// raw log lines

pub const NAV_LINE_GGA_120000: &str =
    "210615,12:00:00;$GPGGA,120000.00,5030.1234,N,00405.4321,W,1,08,1.0,0.0,M,0.0,M,,*43";
pub const NAV_LINE_RMC_120001: &str =
    "210615,12:00:01;$GPRMC,120001.00,A,5030.1234,N,00405.4321,W,10.0,090.0,150621,,,A*70";
pub const NAV_LINE_VTG_120002: &str = "210615,12:00:02;$GPVTG,090.0,T,090.0,M,10.0,N,18.520,K,D*29";
pub const HEADING_LINE_PCHPR_120000_250: &str = "2021/06/15 12:00:00.250 [GYRO01] $PCHPR,271.40,1.20,-0.35*43";

lazy_static! {
    pub static ref DT_20210615_120000: DateTimeU = ymdhms(2021, 6, 15, 12, 0, 0).unwrap();
    pub static ref DT_20210615_120001: DateTimeU = ymdhms(2021, 6, 15, 12, 0, 1).unwrap();
    pub static ref DT_20210615_180000: DateTimeU = ymdhms(2021, 6, 15, 18, 0, 0).unwrap();
    pub static ref DT_20210616_180000: DateTimeU = ymdhms(2021, 6, 16, 18, 0, 0).unwrap();
}

/// Create a `RawRecord` of family `"nav"` with a datetime on
/// 2021-06-15.
pub fn record_at(
    raw_text: &str,
    kind: SentenceKind,
    hour: u32,
    min: u32,
    sec: u32,
) -> RawRecord {
    RawRecord::new(raw_text.to_string(), kind, ymdhms(2021, 6, 15, hour, min, sec).unwrap(), "nav")
}
