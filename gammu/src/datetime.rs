//! `GSM_DateTime` mirror.

use std::fmt;

use gammu_sys::GSM_DateTime;

/// Calendar date and time as exchanged with the phone.
///
/// Values are not validated on construction; use
/// [`Gammu::check_date`](crate::Gammu::check_date) and
/// [`Gammu::check_time`](crate::Gammu::check_time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTime {
    /// Year, four digits.
    pub year: i32,
    /// Month, 1-12.
    pub month: i32,
    /// Day of month, 1-31.
    pub day: i32,
    /// Hour, 0-23.
    pub hour: i32,
    /// Minute, 0-59.
    pub minute: i32,
    /// Second, 0-59.
    pub second: i32,
    /// Offset from UTC in seconds.
    pub timezone: i32,
}

impl DateTime {
    /// A date at midnight UTC.
    #[must_use]
    pub const fn date(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            timezone: 0,
        }
    }

    /// Same date, different wall-clock time.
    #[must_use]
    pub const fn at(self, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    /// Same instant label, different UTC offset (seconds).
    #[must_use]
    pub const fn with_timezone(self, timezone: i32) -> Self {
        Self { timezone, ..self }
    }

    /// The all-zero value the library uses for "no timestamp".
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.timezone != 0 {
            let sign = if self.timezone < 0 { '-' } else { '+' };
            let abs = self.timezone.unsigned_abs();
            write!(f, " {sign}{:02}{:02}", abs / 3600, (abs % 3600) / 60)?;
        }
        Ok(())
    }
}

impl From<GSM_DateTime> for DateTime {
    fn from(dt: GSM_DateTime) -> Self {
        Self {
            year: dt.Year,
            month: dt.Month,
            day: dt.Day,
            hour: dt.Hour,
            minute: dt.Minute,
            second: dt.Second,
            timezone: dt.Timezone,
        }
    }
}

impl From<DateTime> for GSM_DateTime {
    fn from(dt: DateTime) -> Self {
        Self {
            Timezone: dt.timezone,
            Second: dt.second,
            Minute: dt.minute,
            Hour: dt.hour,
            Day: dt.day,
            Month: dt.month,
            Year: dt.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_field_order() {
        let dt = DateTime::date(2000, 2, 29).at(23, 59, 58).with_timezone(3600);
        let raw = GSM_DateTime::from(dt);
        assert_eq!((raw.Year, raw.Month, raw.Day), (2000, 2, 29));
        assert_eq!((raw.Hour, raw.Minute, raw.Second), (23, 59, 58));
        assert_eq!(raw.Timezone, 3600);
    }

    #[test]
    fn display() {
        let dt = DateTime::date(2009, 7, 1).at(8, 5, 0);
        assert_eq!(dt.to_string(), "2009-07-01 08:05:00");
        assert_eq!(dt.with_timezone(-5400).to_string(), "2009-07-01 08:05:00 -0130");
        assert!(DateTime::default().is_unset());
    }
}
