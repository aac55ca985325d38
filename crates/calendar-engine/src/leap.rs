//! Leap-year rules.
//!
//! A [`LeapYearRule`] answers one question, [`LeapYearRule::is_leap_year`],
//! for any year number including zero and negative years. The formula is
//! applied uniformly; there is no special case for years before the epoch.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Caller-supplied leap-year predicate.
#[derive(Clone)]
pub struct CustomLeapRule(Arc<dyn Fn(i64) -> bool + Send + Sync>);

impl CustomLeapRule {
    pub fn new(predicate: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }
}

impl fmt::Debug for CustomLeapRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomLeapRule(..)")
    }
}

impl PartialEq for CustomLeapRule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// How a calendar decides which years are leap years.
///
/// Serialized with a `kind` tag: `{"kind": "none"}`, `{"kind": "gregorian"}`,
/// `{"kind": "interval", "interval": 4, "offset": 0}`. The `Custom` variant
/// only exists in code and fails to serialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeapYearRule {
    /// No year is ever a leap year.
    #[default]
    None,
    /// Every 4th year, except centuries not divisible by 400.
    Gregorian,
    /// Every `interval`-th year counted from `offset`.
    Interval {
        interval: u32,
        #[serde(default)]
        offset: i64,
    },
    /// Any predicate the caller provides.
    #[serde(skip)]
    Custom(CustomLeapRule),
}

impl LeapYearRule {
    /// Shorthand for a rule that fires every `interval` years starting at year 0.
    pub fn every(interval: u32) -> Self {
        Self::Interval {
            interval,
            offset: 0,
        }
    }

    pub fn custom(predicate: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(CustomLeapRule::new(predicate))
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        match self {
            Self::None => false,
            Self::Gregorian => {
                year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
            }
            Self::Interval { interval, offset } => {
                *interval > 0
                    && (i128::from(year) - i128::from(*offset)).rem_euclid(i128::from(*interval))
                        == 0
            }
            Self::Custom(rule) => (rule.0)(year),
        }
    }

    /// Whether this rule can ever produce a leap year.
    pub(crate) fn can_leap(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Number of years after which the leap pattern repeats, when known.
    pub(crate) fn cycle_length(&self) -> Option<i64> {
        match self {
            Self::None => Some(1),
            Self::Gregorian => Some(400),
            Self::Interval { interval, .. } if *interval > 0 => Some(i64::from(*interval)),
            Self::Interval { .. } | Self::Custom(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_leaps() {
        let rule = LeapYearRule::None;
        assert!((-10..10).all(|y| !rule.is_leap_year(y)));
    }

    #[test]
    fn test_gregorian_rule() {
        let rule = LeapYearRule::Gregorian;
        assert!(rule.is_leap_year(2000));
        assert!(rule.is_leap_year(2024));
        assert!(!rule.is_leap_year(1900));
        assert!(!rule.is_leap_year(2023));
        // Proleptic: year 0 and -4 are leap years
        assert!(rule.is_leap_year(0));
        assert!(rule.is_leap_year(-4));
        assert!(!rule.is_leap_year(-100));
    }

    #[test]
    fn test_interval_rule_with_offset() {
        let rule = LeapYearRule::Interval {
            interval: 4,
            offset: 2,
        };
        assert!(rule.is_leap_year(2));
        assert!(rule.is_leap_year(6));
        assert!(rule.is_leap_year(-2));
        assert!(!rule.is_leap_year(4));
        assert!(!rule.is_leap_year(-1));
    }

    #[test]
    fn test_interval_rule_at_i64_limits() {
        let rule = LeapYearRule::Interval {
            interval: 4,
            offset: -3,
        };
        // i64::MAX - 2 + 3 == 2^63
        assert!(rule.is_leap_year(i64::MAX - 2));
        assert!(!rule.is_leap_year(i64::MAX));
        assert!(rule.is_leap_year(i64::MIN + 1));
        assert!(!rule.is_leap_year(i64::MIN));
    }

    #[test]
    fn test_interval_zero_never_leaps() {
        let rule = LeapYearRule::every(0);
        assert!(!rule.is_leap_year(0));
        assert_eq!(rule.cycle_length(), None);
    }

    #[test]
    fn test_custom_rule() {
        let rule = LeapYearRule::custom(|y| y % 7 == 3);
        assert!(rule.is_leap_year(10));
        assert!(!rule.is_leap_year(11));
        assert_eq!(rule.cycle_length(), None);
        assert_eq!(rule.clone(), rule);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&LeapYearRule::every(4)).unwrap();
        assert_eq!(json, r#"{"kind":"interval","interval":4,"offset":0}"#);

        let parsed: LeapYearRule = serde_json::from_str(r#"{"kind":"gregorian"}"#).unwrap();
        assert_eq!(parsed, LeapYearRule::Gregorian);

        let parsed: LeapYearRule =
            serde_json::from_str(r#"{"kind":"interval","interval":5}"#).unwrap();
        assert_eq!(
            parsed,
            LeapYearRule::Interval {
                interval: 5,
                offset: 0
            }
        );
    }

    #[test]
    fn test_custom_rule_refuses_to_serialize() {
        let rule = LeapYearRule::custom(|_| true);
        assert!(serde_json::to_string(&rule).is_err());
    }
}
