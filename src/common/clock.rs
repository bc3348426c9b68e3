use chrono::{DateTime, Datelike, Utc};

/// Source of the current time, injectable so tests get stable ids and dates.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Turns a creation timestamp into the string shown next to a review.
pub trait DateFormatter {
    fn format(&self, timestamp: DateTime<Utc>) -> String;
}

/// `day/month/year` without zero padding, e.g. `5/3/2024`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayMonthYear;

impl DateFormatter for DayMonthYear {
    fn format(&self, timestamp: DateTime<Utc>) -> String {
        format!(
            "{}/{}/{}",
            timestamp.day(),
            timestamp.month(),
            timestamp.year()
        )
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).expect("valid timestamp"))
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_month_year_is_unpadded() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        assert_eq!(DayMonthYear.format(ts), "5/3/2024");

        let ts = Utc.with_ymd_and_hms(2023, 11, 14, 0, 0, 0).unwrap();
        assert_eq!(DayMonthYear.format(ts), "14/11/2023");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at_millis(1_700_000_000_000);
        assert_eq!(clock.now().timestamp_millis(), 1_700_000_000_000);
    }
}
