use chrono::{Duration, NaiveDateTime};

use crate::config::STREAK_WINDOW_HOURS;

/// Computes the next learning-streak value for a dashboard visit at `now`.
///
/// Returns `None` when the streak should not change (same calendar day as
/// the last visit). Otherwise returns the new streak value: incremented when
/// the last visit was under the streak window, reset to 1 when it was not
/// (or when there is no previous visit).
pub fn next_streak(
    last_active_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
    current_streak: i32,
) -> Option<i32> {
    let last = match last_active_at {
        Some(last) => last,
        None => return Some(1),
    };

    if last.date() == now.date() {
        return None;
    }

    if now - last < Duration::hours(STREAK_WINDOW_HOURS) {
        Some(current_streak + 1)
    } else {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn first_visit_starts_streak_at_one() {
        assert_eq!(next_streak(None, at(2025, 6, 2, 9), 0), Some(1));
    }

    #[test]
    fn same_day_visit_does_not_change_streak() {
        let last = at(2025, 6, 2, 9);
        let now = at(2025, 6, 2, 21);
        assert_eq!(next_streak(Some(last), now, 4), None);
    }

    #[test]
    fn next_day_within_window_increments() {
        let last = at(2025, 6, 2, 21);
        let now = at(2025, 6, 3, 9);
        assert_eq!(next_streak(Some(last), now, 4), Some(5));
    }

    #[test]
    fn gap_over_window_resets_to_one() {
        let last = at(2025, 6, 2, 9);
        let now = at(2025, 6, 4, 10);
        assert_eq!(next_streak(Some(last), now, 9), Some(1));
    }

    #[test]
    fn day_change_just_inside_window_still_counts() {
        // 47 hours apart, two calendar days later
        let last = at(2025, 6, 2, 23);
        let now = at(2025, 6, 4, 22);
        assert_eq!(next_streak(Some(last), now, 2), Some(3));
    }
}
