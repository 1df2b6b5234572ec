use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Pure date arithmetic for the reminder engine. Everything here works on
/// calendar dates in the timezone the caller has already resolved.

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // Inclusive upper bound of the day
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("Valid time of day");
    date.and_time(last_milli)
}

/// Calendar addition, `days` may be negative
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn is_same_calendar_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// The calendar date a reminder's event falls on this cycle. Events that
/// repeat every year are projected onto the reference year no matter how far
/// in the past or future the stored date is. A February 29 event projected
/// onto a non-leap year maps to February 28.
pub fn effective_event_date(
    original_date: NaiveDate,
    repeats_every_year: bool,
    reference_date: NaiveDate,
) -> NaiveDate {
    if !repeats_every_year {
        return original_date;
    }

    match NaiveDate::from_ymd_opt(
        reference_date.year(),
        original_date.month(),
        original_date.day(),
    ) {
        Some(projected) => projected,
        None => NaiveDate::from_ymd_opt(reference_date.year(), 2, 28).expect("Valid date"),
    }
}

/// The date on which a reminder should first trigger a notification
pub fn notify_date(event_date: NaiveDate, remind_before_days: u32) -> NaiveDate {
    add_days(event_date, -(remind_before_days as i64))
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("Valid date")
    }

    #[test]
    fn it_projects_recurring_dates_onto_the_reference_year() {
        assert_eq!(
            effective_event_date(ymd(2020, 3, 10), true, ymd(2026, 1, 1)),
            ymd(2026, 3, 10)
        );
        // Stored dates in the future are projected as well
        assert_eq!(
            effective_event_date(ymd(2030, 12, 24), true, ymd(2026, 6, 14)),
            ymd(2026, 12, 24)
        );
    }

    #[test]
    fn it_keeps_non_recurring_dates_unchanged() {
        let original = ymd(2025, 6, 15);
        for reference in [ymd(2020, 1, 1), ymd(2026, 6, 14), ymd(2099, 12, 31)] {
            assert_eq!(effective_event_date(original, false, reference), original);
        }
    }

    #[test]
    fn it_maps_leap_day_to_february_28_in_non_leap_years() {
        assert_eq!(
            effective_event_date(ymd(2024, 2, 29), true, ymd(2026, 1, 1)),
            ymd(2026, 2, 28)
        );
        assert_eq!(
            effective_event_date(ymd(2024, 2, 29), true, ymd(2028, 1, 1)),
            ymd(2028, 2, 29)
        );
    }

    #[test]
    fn it_subtracts_lead_days_for_the_notify_date() {
        assert_eq!(notify_date(ymd(2026, 3, 10), 3), ymd(2026, 3, 7));
        assert_eq!(notify_date(ymd(2026, 3, 10), 0), ymd(2026, 3, 10));
        // Lead time crossing a month boundary
        assert_eq!(notify_date(ymd(2026, 3, 1), 1), ymd(2026, 2, 28));
    }

    #[test]
    fn it_adds_days_across_boundaries() {
        assert_eq!(add_days(ymd(2026, 12, 31), 1), ymd(2027, 1, 1));
        assert_eq!(add_days(ymd(2026, 3, 1), -1), ymd(2026, 2, 28));
    }

    #[test]
    fn day_boundaries_cover_the_whole_day() {
        let day = ymd(2026, 6, 14);
        let start = start_of_day(day);
        let end = end_of_day(day);
        assert!(start < end);
        assert!(is_same_calendar_day(start, end));
        assert!(!is_same_calendar_day(end, start_of_day(add_days(day, 1))));
    }
}
