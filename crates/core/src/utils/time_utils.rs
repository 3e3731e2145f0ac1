use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// Timezone of the exchange whose trading hours gate revaluation.
/// This is the canonical timezone used to convert UTC instants to trading dates.
pub const EXCHANGE_TZ: Tz = chrono_tz::America::New_York;

/// Regular session open (inclusive), minutes after exchange-local midnight.
pub const MARKET_OPEN_MINUTE: u32 = 9 * 60 + 30;

/// Regular session close (exclusive), minutes after exchange-local midnight.
pub const MARKET_CLOSE_MINUTE: u32 = 16 * 60;

/// Converts a UTC instant to the civil date on the exchange calendar.
///
/// This is the single source of truth for converting instants to trading dates.
/// Two timestamps belong to the same trading day when this returns the same date.
pub fn exchange_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&EXCHANGE_TZ).date_naive()
}

/// Returns true while the regular session is running: Monday to Friday,
/// 09:30 inclusive to 16:00 exclusive, exchange-local time. Holidays are
/// not modelled.
pub fn is_market_open(instant: DateTime<Utc>) -> bool {
    let local = instant.with_timezone(&EXCHANGE_TZ);
    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    let minute_of_day = local.hour() * 60 + local.minute();
    (MARKET_OPEN_MINUTE..MARKET_CLOSE_MINUTE).contains(&minute_of_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_market_open_during_summer_session() {
        // 2024-07-15 is a Monday; New York is UTC-4
        assert!(is_market_open(utc(2024, 7, 15, 13, 30)));
        assert!(is_market_open(utc(2024, 7, 15, 19, 59)));
    }

    #[test]
    fn test_market_closed_at_boundaries() {
        assert!(!is_market_open(utc(2024, 7, 15, 13, 29)));
        assert!(!is_market_open(utc(2024, 7, 15, 20, 0)));
    }

    #[test]
    fn test_market_open_during_winter_session() {
        // 2024-01-15 is a Monday; New York is UTC-5
        assert!(!is_market_open(utc(2024, 1, 15, 14, 29)));
        assert!(is_market_open(utc(2024, 1, 15, 14, 30)));
        assert!(!is_market_open(utc(2024, 1, 15, 21, 0)));
    }

    #[test]
    fn test_market_closed_on_weekends() {
        // Saturday and Sunday at what would be midday in New York
        assert!(!is_market_open(utc(2024, 7, 13, 16, 0)));
        assert!(!is_market_open(utc(2024, 7, 14, 16, 0)));
    }

    #[test]
    fn test_exchange_date_uses_new_york_calendar() {
        // 02:00 UTC on the 16th is still the evening of the 15th in New York
        assert_eq!(
            exchange_date(utc(2024, 7, 16, 2, 0)),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
        );
        assert_eq!(
            exchange_date(utc(2024, 7, 16, 4, 0)),
            NaiveDate::from_ymd_opt(2024, 7, 16).unwrap()
        );
    }
}
