//! Date/time parsing
//!
//! Volume descriptors carry 17-byte ASCII timestamps.

use core::fmt;

/// 17-byte ASCII datetime (volume descriptors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime17 {
    /// Year (4 ASCII digits)
    pub year: u16,

    /// Month (2 ASCII digits, 1-12)
    pub month: u8,

    /// Day (2 ASCII digits, 1-31)
    pub day: u8,

    /// Hour (2 ASCII digits, 0-23)
    pub hour: u8,

    /// Minute (2 ASCII digits, 0-59)
    pub minute: u8,

    /// Second (2 ASCII digits, 0-59)
    pub second: u8,

    /// Hundredths (2 ASCII digits)
    pub hundredths: u8,

    /// GMT offset in 15-minute intervals
    pub gmt_offset: i8,
}

impl DateTime17 {
    /// Parse from 17-byte ASCII string
    ///
    /// Returns `None` for the "not specified" encoding (all digits zero) and
    /// for fields that are not decimal digits.
    pub fn from_bytes(bytes: &[u8; 17]) -> Option<Self> {
        if bytes[..16].iter().all(|&b| b == b'0' || b == 0) {
            return None;
        }

        let year = digits(&bytes[0..4])?;
        let dt = Self {
            year: u16::try_from(year).ok()?,
            month: digits(&bytes[4..6])? as u8,
            day: digits(&bytes[6..8])? as u8,
            hour: digits(&bytes[8..10])? as u8,
            minute: digits(&bytes[10..12])? as u8,
            second: digits(&bytes[12..14])? as u8,
            hundredths: digits(&bytes[14..16])? as u8,
            gmt_offset: bytes[16] as i8,
        };

        if !(1..=12).contains(&dt.month) || !(1..=31).contains(&dt.day) {
            return None;
        }
        Some(dt)
    }
}

impl fmt::Display for DateTime17 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset_minutes = i32::from(self.gmt_offset) * 15;
        let sign = if offset_minutes < 0 { '-' } else { '+' };
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:02} UTC{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.hundredths,
            sign,
            offset_minutes.abs() / 60,
            offset_minutes.abs() % 60,
        )
    }
}

fn digits(field: &[u8]) -> Option<u32> {
    field.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}
