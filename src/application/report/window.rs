//! Local-day arithmetic in the report timezone.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Map a local wall-clock time to an instant.
///
/// A time inside a DST gap moves forward to the first valid minute; an
/// ambiguous time resolves to the earlier instant.
#[must_use]
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    // Gaps are at most a few hours; a day of minutes is a hard bound.
    for _ in 0..=24 * 60 {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(at) => return at,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => candidate += Duration::minutes(1),
        }
    }
    tz.from_utc_datetime(&naive)
}

/// `[start, end)` of a local date, in UTC.
#[must_use]
pub fn day_window(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = resolve_local(tz, date.and_time(NaiveTime::MIN));
    let next = date.succ_opt().unwrap_or(date);
    let end = resolve_local(tz, next.and_time(NaiveTime::MIN));
    (start.with_timezone(&Utc), end.with_timezone(&Utc))
}

/// Next instant at which a daily job scheduled for `at` local time fires.
///
/// Today's slot is used while it is not in the past; otherwise tomorrow's.
/// Missed slots are never caught up.
#[must_use]
pub fn next_daily_run(now: DateTime<Utc>, at: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let today = now.with_timezone(&tz).date_naive();
    let candidate = resolve_local(tz, today.and_time(at)).with_timezone(&Utc);
    if candidate >= now {
        return candidate;
    }
    let tomorrow = today.succ_opt().unwrap_or(today);
    resolve_local(tz, tomorrow.and_time(at)).with_timezone(&Utc)
}

/// The window a daily run fired at `run` reports on: from the previous
/// day's slot up to `run`, labelled with the local date of its last instant.
///
/// A run at 00:00 therefore covers the day that just ended, and a run at
/// 23:55 covers the five minutes before the previous midnight as well.
#[must_use]
pub fn report_window(
    run: DateTime<Utc>,
    at: NaiveTime,
    tz: Tz,
) -> (NaiveDate, DateTime<Utc>, DateTime<Utc>) {
    let local = run.with_timezone(&tz).date_naive();
    let previous = local.pred_opt().unwrap_or(local);
    let start = resolve_local(tz, previous.and_time(at)).with_timezone(&Utc);
    let label = (run - Duration::nanoseconds(1))
        .with_timezone(&tz)
        .date_naive();
    (label, start, run)
}

#[cfg(test)]
mod tests {
    use chrono_tz::Europe::Warsaw;

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn runs_today_when_time_is_ahead() {
        // 20:00 UTC = 22:00 Warsaw (CEST), report at 23:55 local = 21:55 UTC.
        let next = next_daily_run(utc(2024, 6, 10, 20, 0), time(23, 55), Warsaw);
        assert_eq!(next, utc(2024, 6, 10, 21, 55));
    }

    #[test]
    fn runs_tomorrow_when_time_has_passed() {
        let next = next_daily_run(utc(2024, 6, 10, 22, 0), time(23, 55), Warsaw);
        assert_eq!(next, utc(2024, 6, 11, 21, 55));
    }

    #[test]
    fn exact_slot_counts_as_today() {
        let now = utc(2024, 6, 10, 21, 55);
        assert_eq!(next_daily_run(now, time(23, 55), Warsaw), now);
    }

    #[test]
    fn gap_moves_forward() {
        // 2024-03-31 02:00-03:00 does not exist in Warsaw.
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let at = resolve_local(Warsaw, date.and_time(time(2, 30)));
        assert_eq!(at.with_timezone(&Utc), utc(2024, 3, 31, 1, 0));
    }

    #[test]
    fn ambiguous_takes_earlier() {
        // 2024-10-27 02:30 happens twice in Warsaw; the first is CEST.
        let date = NaiveDate::from_ymd_opt(2024, 10, 27).unwrap();
        let at = resolve_local(Warsaw, date.and_time(time(2, 30)));
        assert_eq!(at.with_timezone(&Utc), utc(2024, 10, 27, 0, 30));
    }

    #[test]
    fn window_covers_local_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let (start, end) = day_window(date, Warsaw);
        assert_eq!(start, utc(2024, 1, 14, 23, 0));
        assert_eq!(end, utc(2024, 1, 15, 23, 0));
    }

    #[test]
    fn dst_day_is_short() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let (start, end) = day_window(date, Warsaw);
        assert_eq!(end - start, Duration::hours(23));
    }

    #[test]
    fn midnight_run_reports_the_day_that_ended() {
        // 2024-03-11 00:00 Warsaw (CET) = 2024-03-10 23:00 UTC.
        let run = utc(2024, 3, 10, 23, 0);
        let (date, start, end) = report_window(run, time(0, 0), Warsaw);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(start, utc(2024, 3, 9, 23, 0));
        assert_eq!(end, run);
    }

    #[test]
    fn evening_run_starts_at_yesterdays_slot() {
        let run = utc(2024, 6, 11, 21, 55);
        let (date, start, end) = report_window(run, time(23, 55), Warsaw);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert_eq!(start, utc(2024, 6, 10, 21, 55));
        assert_eq!(end, run);
    }
}
