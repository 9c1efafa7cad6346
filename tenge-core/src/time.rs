//! Time utilities: the calendar date "today" in a given IANA timezone.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone used when nothing else is configured. Statements come from
/// Kazakh banks, so "today" is evaluated in Almaty.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Almaty;

/// Current calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_close_to_utc_today() {
        let utc = Utc::now().date_naive();
        let almaty = today_in(DEFAULT_TIMEZONE);
        let diff = (almaty - utc).num_days().abs();
        assert!(diff <= 1);
    }
}
