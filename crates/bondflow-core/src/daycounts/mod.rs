//! Day count conventions.
//!
//! A day count convention turns a calendar span into the fraction of a year
//! used for interest accrual.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - money market and coupon accrual
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`ActActIsda`]: Actual/Actual ISDA - the default for schedule bookkeeping
//! - [`Thirty360US`]: 30/360 US bond basis
//!
//! # Usage
//!
//! ```rust
//! use bondflow_core::daycounts::{day_count, DayCount, DayCountConvention, Act360};
//! use bondflow_core::types::Date;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 4, 1).unwrap();
//!
//! assert_eq!(Act360.day_count(start, end), 91);
//! assert_eq!(day_count(start, end, DayCountConvention::Act360).unwrap(), 91.0 / 360.0);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::Thirty360US;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Trait for day count conventions.
///
/// `year_fraction` is signed and unchecked: callers that need the
/// `end >= start` guarantee go through [`day_count`].
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; 30/360 uses the
    /// 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// `Default` is [`DayCountConvention::ActActIsda`], the convention used for
/// period-length bookkeeping when none is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/360
    Act360,
    /// Actual/365 Fixed
    Act365Fixed,
    /// Actual/Actual ISDA
    #[default]
    ActActIsda,
    /// 30/360 US (Bond Basis)
    Thirty360US,
}

impl DayCountConvention {
    /// Returns the implementation as a trait object.
    #[must_use]
    pub fn to_day_count(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
            DayCountConvention::ActActIsda => &ActActIsda,
            DayCountConvention::Thirty360US => &Thirty360US,
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.to_day_count().name()
    }

    /// Signed, unchecked year fraction under this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.to_day_count().year_fraction(start, end)
    }

    /// Signed day count numerator under this convention.
    #[must_use]
    pub fn days(&self, start: Date, end: Date) -> i64 {
        self.to_day_count().day_count(start, end)
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360US,
        ]
    }
}

/// Accrual fraction between `start` and `end` under `convention`.
///
/// Equal dates give `0.0`.
///
/// # Errors
///
/// Returns `CoreError::InvalidDateRange` if `end` is before `start`.
pub fn day_count(start: Date, end: Date, convention: DayCountConvention) -> CoreResult<f64> {
    if end < start {
        return Err(CoreError::invalid_date_range(start, end));
    }
    if end == start {
        return Ok(0.0);
    }
    Ok(convention.year_fraction(start, end))
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a market name, alias or enum-style name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" | "A360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACTUAL/365 FIXED"
            | "ACT365" | "ACT365FIXED" | "A365F" => Ok(DayCountConvention::Act365Fixed),

            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTUAL/ACTUAL ISDA" | "ACTACT"
            | "ACTACTISDA" => Ok(DayCountConvention::ActActIsda),

            "30/360" | "30/360 US" | "30U/360" | "BOND" | "THIRTY360US" => {
                Ok(DayCountConvention::Thirty360US)
            }

            _ => Err(CoreError::unknown_day_count(s)),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(convention: DayCountConvention) -> Self {
        convention.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_day_count_act360_leap_quarter() {
        let dcf = day_count(d(2024, 1, 1), d(2024, 4, 1), DayCountConvention::Act360).unwrap();
        assert_eq!(dcf, 91.0 / 360.0);
    }

    #[test]
    fn test_day_count_act365() {
        let dcf =
            day_count(d(2025, 1, 1), d(2026, 1, 1), DayCountConvention::Act365Fixed).unwrap();
        assert_eq!(dcf, 1.0);
    }

    #[test]
    fn test_day_count_same_date_is_zero() {
        for convention in DayCountConvention::all() {
            assert_eq!(day_count(d(2025, 3, 31), d(2025, 3, 31), *convention).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_day_count_rejects_reversed_range() {
        let err = day_count(d(2025, 6, 15), d(2025, 6, 1), DayCountConvention::Act360)
            .unwrap_err();
        assert_eq!(err, CoreError::invalid_date_range("2025-06-15", "2025-06-01"));
    }

    #[test]
    fn test_days_per_convention() {
        let (start, end) = (d(2024, 2, 15), d(2024, 3, 15));
        assert_eq!(DayCountConvention::Act360.days(start, end), 29);
        assert_eq!(DayCountConvention::ActActIsda.days(start, end), 29);
        assert_eq!(DayCountConvention::Thirty360US.days(start, end), 30);
    }

    #[test]
    fn test_default_is_actact() {
        assert_eq!(DayCountConvention::default(), DayCountConvention::ActActIsda);
    }

    #[test]
    fn test_convention_names() {
        assert_eq!(DayCountConvention::Act360.name(), "ACT/360");
        assert_eq!(DayCountConvention::Act365Fixed.name(), "ACT/365F");
        assert_eq!(DayCountConvention::ActActIsda.name(), "ACT/ACT ISDA");
        assert_eq!(DayCountConvention::Thirty360US.name(), "30/360 US");
        assert_eq!(format!("{}", DayCountConvention::Act360), "ACT/360");
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("act/360".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act360);
        assert_eq!(
            "ACT/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "Actual/Actual".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
        assert_eq!(
            "BOND".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360US
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let result = "ACT/999".parse::<DayCountConvention>();
        assert!(matches!(result, Err(CoreError::UnknownDayCount { .. })));
    }

    #[test]
    fn test_from_str_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    #[test]
    fn test_serde_uses_market_names() {
        let json = serde_json::to_string(&DayCountConvention::Act360).unwrap();
        assert_eq!(json, "\"ACT/360\"");
        let parsed: DayCountConvention = serde_json::from_str("\"30/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Thirty360US);
    }

    proptest! {
        #[test]
        fn prop_day_count_non_negative(
            start_offset in 0i64..20_000,
            span in 0i64..4_000,
            idx in 0usize..4,
        ) {
            let start = d(1990, 1, 1).add_days(start_offset);
            let end = start.add_days(span);
            let convention = DayCountConvention::all()[idx];
            let dcf = day_count(start, end, convention).unwrap();
            prop_assert!(dcf >= 0.0);
        }
    }
}
