//! Resolves the active display window and its navigation context.
//!
//! Given a saved window, a granularity, and an optional override date, this
//! module computes the current, previous, and next periods plus the twelve
//! navigation labels in each direction, and the elapsed/remaining day counts
//! used by the progress display.

use time::{Date, Duration, Month, format_description::BorrowedFormatItem, macros::format_description};

use super::{Granularity, Period, PeriodLabel};

/// How many periods of navigation links to offer in each direction.
const LABEL_COUNT: usize = 12;

const OVERRIDE_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// The current period and everything the overview needs to navigate away
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    /// The window being displayed.
    pub current: Period,
    /// The full period immediately before `current`.
    pub previous: Period,
    /// The full period immediately after `current`.
    pub next: Period,
    /// Navigation entries stepping backwards from `current`, nearest first.
    pub previous_labels: Vec<PeriodLabel>,
    /// Navigation entries stepping forwards from `current`, nearest first.
    pub next_labels: Vec<PeriodLabel>,
    /// Days from today until the window ends, at least 1.
    pub days_remaining: i64,
    /// Days from the window start until today, at least 1.
    pub days_elapsed: i64,
}

/// Determine the window to display.
///
/// `saved` is the `(start, end)` pair carried over from the previous request,
/// if any. When `override_date` is present and parses as `YYYY-MM-DD` it wins
/// and the window is re-snapped around it; a value that fails to parse is
/// ignored and the saved window is kept, so a bad link never fails the
/// request.
pub fn current_window(
    saved: Option<(Date, Date)>,
    granularity: Granularity,
    override_date: Option<&str>,
    today: Date,
) -> Period {
    let fallback = match saved {
        Some((start, end)) => Period {
            start,
            end,
            granularity,
        },
        None => Period::around(today, granularity),
    };

    let Some(raw) = override_date else {
        return fallback;
    };

    match Date::parse(raw, OVERRIDE_DATE_FORMAT) {
        Ok(start) => Period {
            start,
            end: end_of_period(start, granularity),
            granularity,
        },
        Err(error) => {
            tracing::debug!("ignoring override date {raw:?}, window already defined: {error}");
            fallback
        }
    }
}

/// Compute the navigation context for `window`.
///
/// Pure over its inputs; `today` is injected by the caller.
pub fn resolve_period(window: Period, today: Date) -> ResolvedPeriod {
    let Period {
        start,
        end,
        granularity,
    } = window;

    let mut days_remaining = 0;
    let mut days_elapsed = 0;

    if today >= start && today <= end {
        days_remaining = (end - today).whole_days();
        days_elapsed = (today - start).whole_days();
    }
    // This branch must stay after the in-window branch: at today == start and
    // today == end both conditions hold, and the full window length wins.
    if today <= start || today >= end {
        let window_length = (end - start).whole_days();
        days_remaining = window_length;
        days_elapsed = window_length;
    }

    if days_remaining == 0 {
        days_remaining = 1;
    }
    if days_elapsed == 0 {
        days_elapsed = 1;
    }

    let next_start = end + Duration::days(1);
    let next = Period {
        start: next_start,
        end: end_of_period(next_start, granularity),
        granularity,
    };

    let previous_end = start - Duration::days(1);
    let previous = Period {
        start: start_of_period(previous_end, granularity),
        end: previous_end,
        granularity,
    };

    let mut previous_labels = Vec::with_capacity(LABEL_COUNT);
    let mut date = start;
    for _ in 0..LABEL_COUNT {
        date = start_of_period(date - Duration::days(1), granularity);
        previous_labels.push(PeriodLabel {
            key: date,
            label: period_label(date, granularity),
        });
    }

    let mut next_labels = Vec::with_capacity(LABEL_COUNT);
    let mut date = end + Duration::days(1);
    for _ in 0..LABEL_COUNT {
        next_labels.push(PeriodLabel {
            key: date,
            label: period_label(date, granularity),
        });
        date = end_of_period(date, granularity) + Duration::days(1);
    }

    ResolvedPeriod {
        current: window,
        previous,
        next,
        previous_labels,
        next_labels,
        days_remaining,
        days_elapsed,
    }
}

/// The first day of the period of `granularity` containing `date`.
pub fn start_of_period(date: Date, granularity: Granularity) -> Date {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => {
            let weekday_number = date.weekday().number_from_monday() as i64;
            date - Duration::days(weekday_number - 1)
        }
        Granularity::Month => Date::from_calendar_date(date.year(), date.month(), 1)
            .expect("invalid month start date"),
        Granularity::Quarter => {
            let start_month = month_from_number(quarter_start_month(date.month()));
            Date::from_calendar_date(date.year(), start_month, 1)
                .expect("invalid quarter start date")
        }
        Granularity::HalfYear => {
            let start_month = if month_number(date.month()) <= 6 {
                Month::January
            } else {
                Month::July
            };
            Date::from_calendar_date(date.year(), start_month, 1)
                .expect("invalid half-year start date")
        }
        Granularity::Year => Date::from_calendar_date(date.year(), Month::January, 1)
            .expect("invalid year start date"),
    }
}

/// The last day of the period of `granularity` containing `date`.
pub fn end_of_period(date: Date, granularity: Granularity) -> Date {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => start_of_period(date, Granularity::Week) + Duration::days(6),
        Granularity::Month => {
            let month = date.month();
            Date::from_calendar_date(date.year(), month, last_day_of_month(date.year(), month))
                .expect("invalid month end date")
        }
        Granularity::Quarter => {
            let end_month = month_from_number(quarter_start_month(date.month()) + 2);
            Date::from_calendar_date(
                date.year(),
                end_month,
                last_day_of_month(date.year(), end_month),
            )
            .expect("invalid quarter end date")
        }
        Granularity::HalfYear => {
            let (end_month, end_day) = if month_number(date.month()) <= 6 {
                (Month::June, 30)
            } else {
                (Month::December, 31)
            };
            Date::from_calendar_date(date.year(), end_month, end_day)
                .expect("invalid half-year end date")
        }
        Granularity::Year => Date::from_calendar_date(date.year(), Month::December, 31)
            .expect("invalid year end date"),
    }
}

/// The human-readable name of the period of `granularity` containing `date`,
/// e.g. "August 2026" or "Q3 2026".
pub fn period_label(date: Date, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => format!(
            "{} {} {}",
            date.day(),
            month_abbrev(date.month()),
            date.year()
        ),
        Granularity::Week => {
            let (year, week, _) = date.to_iso_week_date();
            format!("Week {week} {year}")
        }
        Granularity::Month => format!("{} {}", date.month(), date.year()),
        Granularity::Quarter => format!(
            "Q{} {}",
            (month_number(date.month()) - 1) / 3 + 1,
            date.year()
        ),
        Granularity::HalfYear => {
            let half = if month_number(date.month()) <= 6 { 1 } else { 2 };
            format!("H{half} {}", date.year())
        }
        Granularity::Year => date.year().to_string(),
    }
}

fn quarter_start_month(month: Month) -> u8 {
    ((month_number(month) - 1) / 3) * 3 + 1
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn month_number(month: Month) -> u8 {
    month as u8
}

fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => panic!("invalid month number {month}"),
    }
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}



#[cfg(test)]
mod resolve_period_tests {
    use time::macros::date;

    use crate::period::{Granularity, Period, resolve_period};

    fn august() -> Period {
        Period {
            start: date!(2026 - 08 - 01),
            end: date!(2026 - 08 - 31),
            granularity: Granularity::Month,
        }
    }

    #[test]
    fn days_split_around_today_inside_the_window() {
        let resolved = resolve_period(august(), date!(2026 - 08 - 07));

        assert_eq!(resolved.days_remaining, 24);
        assert_eq!(resolved.days_elapsed, 6);
    }

    #[test]
    fn boundary_day_at_window_end_reports_the_full_window() {
        // today == end satisfies both day-count conditions; the second one
        // must win.
        let resolved = resolve_period(august(), date!(2026 - 08 - 31));

        assert_eq!(resolved.days_remaining, 30);
        assert_eq!(resolved.days_elapsed, 30);
    }

    #[test]
    fn boundary_day_at_window_start_reports_the_full_window() {
        let resolved = resolve_period(august(), date!(2026 - 08 - 01));

        assert_eq!(resolved.days_remaining, 30);
        assert_eq!(resolved.days_elapsed, 30);
    }

    #[test]
    fn today_outside_the_window_reports_the_full_window() {
        let resolved = resolve_period(august(), date!(2026 - 10 - 15));

        assert_eq!(resolved.days_remaining, 30);
        assert_eq!(resolved.days_elapsed, 30);
    }

    #[test]
    fn day_counts_are_never_zero() {
        let single_day = Period {
            start: date!(2026 - 08 - 07),
            end: date!(2026 - 08 - 07),
            granularity: Granularity::Day,
        };

        let resolved = resolve_period(single_day, date!(2026 - 08 - 07));

        assert_eq!(resolved.days_remaining, 1);
        assert_eq!(resolved.days_elapsed, 1);
    }

    #[test]
    fn previous_and_next_are_adjacent_whole_periods() {
        let resolved = resolve_period(august(), date!(2026 - 08 - 07));

        assert_eq!(resolved.previous.start, date!(2026 - 07 - 01));
        assert_eq!(resolved.previous.end, date!(2026 - 07 - 31));
        assert_eq!(resolved.next.start, date!(2026 - 09 - 01));
        assert_eq!(resolved.next.end, date!(2026 - 09 - 30));
    }

    #[test]
    fn twelve_labels_in_each_direction_with_monotonic_keys() {
        let resolved = resolve_period(august(), date!(2026 - 08 - 07));

        assert_eq!(resolved.previous_labels.len(), 12);
        assert_eq!(resolved.next_labels.len(), 12);

        let mut upper_bound = resolved.current.start;
        for label in &resolved.previous_labels {
            assert!(
                label.key < upper_bound,
                "previous keys must strictly decrease away from the window"
            );
            upper_bound = label.key;
        }

        let mut lower_bound = resolved.current.end;
        for label in &resolved.next_labels {
            assert!(
                label.key > lower_bound,
                "next keys must strictly increase away from the window"
            );
            lower_bound = label.key;
        }
    }

    #[test]
    fn month_labels_render_month_and_year() {
        let resolved = resolve_period(august(), date!(2026 - 08 - 07));

        assert_eq!(resolved.previous_labels[0].key, date!(2026 - 07 - 01));
        assert_eq!(resolved.previous_labels[0].label, "July 2026");
        assert_eq!(resolved.previous_labels[11].key, date!(2025 - 08 - 01));
        assert_eq!(resolved.previous_labels[11].label, "August 2025");
        assert_eq!(resolved.next_labels[0].key, date!(2026 - 09 - 01));
        assert_eq!(resolved.next_labels[0].label, "September 2026");
        assert_eq!(resolved.next_labels[11].key, date!(2027 - 08 - 01));
        assert_eq!(resolved.next_labels[11].label, "August 2027");
    }

    #[test]
    fn week_navigation_steps_whole_weeks() {
        let window = Period {
            start: date!(2026 - 08 - 03),
            end: date!(2026 - 08 - 09),
            granularity: Granularity::Week,
        };

        let resolved = resolve_period(window, date!(2026 - 08 - 07));

        assert_eq!(resolved.previous_labels[0].key, date!(2026 - 07 - 27));
        assert_eq!(resolved.next_labels[0].key, date!(2026 - 08 - 10));
        assert_eq!(resolved.next_labels[1].key, date!(2026 - 08 - 17));
    }
}
