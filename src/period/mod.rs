//! Date periods for the budgets overview.
//!
//! A [Period] is the date window a page reports on, tagged with the
//! [Granularity] that controls boundary snapping and how far one step of
//! navigation moves.

mod resolver;

pub use resolver::{
    ResolvedPeriod, current_window, end_of_period, period_label, resolve_period, start_of_period,
};

use serde::{Deserialize, Serialize};
use time::Date;

/// The display period unit controlling start/end snapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl Granularity {
    /// The token used to store this granularity in the preference table.
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::HalfYear => "half-year",
            Self::Year => "year",
        }
    }

    /// Parse a preference token such as "month". Unknown tokens yield `None`.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "half-year" => Some(Self::HalfYear),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// The date window a view reports on.
///
/// `start` and `end` are inclusive calendar days. The next window starts at
/// `end + 1 day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// The first day of the window.
    pub start: Date,
    /// The last day of the window.
    pub end: Date,
    /// The unit the window was derived from.
    pub granularity: Granularity,
}

impl Period {
    /// The period of `granularity` that contains `date`.
    pub fn around(date: Date, granularity: Granularity) -> Self {
        Self {
            start: resolver::start_of_period(date, granularity),
            end: resolver::end_of_period(date, granularity),
            granularity,
        }
    }
}

/// A navigation entry for one period: the canonical date key used in links
/// and the label rendered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLabel {
    /// The date used in the navigation URL, always the first day the link
    /// should display from.
    pub key: Date,
    /// The human-readable period name, e.g. "August 2026".
    pub label: String,
}

#[cfg(test)]
mod granularity_tests {
    use super::Granularity;

    #[test]
    fn tokens_round_trip() {
        for granularity in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Quarter,
            Granularity::HalfYear,
            Granularity::Year,
        ] {
            assert_eq!(
                Granularity::parse_token(granularity.as_token()),
                Some(granularity)
            );
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert_eq!(Granularity::parse_token("fortnight"), None);
        assert_eq!(Granularity::parse_token(""), None);
    }
}
