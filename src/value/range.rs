//! Interval with optional, independently inclusive bounds.
//!
//! A [`Range<T>`] is a plain filter value: each side is either unbounded
//! (`None`) or a [`RangeBound`] that is inclusive or exclusive. Membership is
//! decided by a strict-less function, so any type with a total order works,
//! even one without `PartialOrd`.
//!
//! ```text
//!   closed(a, b)      [a, b]        at_least(a)     [a, +inf)
//!   open(a, b)        (a, b)        greater_than(a) (a, +inf)
//!   half_open(a, b)   [a, b)        at_most(b)      (-inf, b]
//!   unbounded()       (-inf, +inf)  less_than(b)    (-inf, b)
//! ```
//!
//! Serialized as `{"min": <bound|null>, "max": <bound|null>}` where a bound is
//! `{"value": <v>, "inclusive": <bool>}`. On input, a missing side, a null
//! side and a bound whose `value` is null or missing all mean unbounded; a
//! missing `inclusive` is `false`.

use serde::{Deserialize, Deserializer, Serialize};

/// One side of a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeBound<T> {
    pub value: T,
    pub inclusive: bool,
}

impl<T> RangeBound<T> {
    pub const fn inclusive(value: T) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub const fn exclusive(value: T) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// Interval over `T`; a missing bound means that side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Range<T> {
    #[serde(rename = "min", default, deserialize_with = "deserialize_side")]
    pub lower: Option<RangeBound<T>>,
    #[serde(rename = "max", default, deserialize_with = "deserialize_side")]
    pub upper: Option<RangeBound<T>>,
}

/// Wire form of one side; `value` may be null.
#[derive(Deserialize)]
struct WireBound<T> {
    value: Option<T>,
    #[serde(default)]
    inclusive: bool,
}

fn deserialize_side<'de, D, T>(deserializer: D) -> Result<Option<RangeBound<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let wire = Option::<WireBound<T>>::deserialize(deserializer)?;
    Ok(wire.and_then(|bound| {
        bound.value.map(|value| RangeBound {
            value,
            inclusive: bound.inclusive,
        })
    }))
}

impl<T> Range<T> {
    pub const fn new(lower: Option<RangeBound<T>>, upper: Option<RangeBound<T>>) -> Self {
        Self { lower, upper }
    }

    /// `[min, max]`
    pub const fn closed(min: T, max: T) -> Self {
        Self::new(Some(RangeBound::inclusive(min)), Some(RangeBound::inclusive(max)))
    }

    /// `(min, max)`
    pub const fn open(min: T, max: T) -> Self {
        Self::new(Some(RangeBound::exclusive(min)), Some(RangeBound::exclusive(max)))
    }

    /// `[min, max)`
    pub const fn half_open(min: T, max: T) -> Self {
        Self::new(Some(RangeBound::inclusive(min)), Some(RangeBound::exclusive(max)))
    }

    /// `(min, +inf)`
    pub const fn greater_than(min: T) -> Self {
        Self::new(Some(RangeBound::exclusive(min)), None)
    }

    /// `[min, +inf)`
    pub const fn at_least(min: T) -> Self {
        Self::new(Some(RangeBound::inclusive(min)), None)
    }

    /// `(-inf, max)`
    pub const fn less_than(max: T) -> Self {
        Self::new(None, Some(RangeBound::exclusive(max)))
    }

    /// `(-inf, max]`
    pub const fn at_most(max: T) -> Self {
        Self::new(None, Some(RangeBound::inclusive(max)))
    }

    /// Matches every value.
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// Returns `true` if both sides are bounded.
    pub const fn is_bounded(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Returns `true` if neither side is bounded.
    pub const fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Tests membership with `less(a, b)` meaning "a is strictly before b".
    ///
    /// An inverted range (lower above upper) contains nothing.
    pub fn contains_by(&self, value: &T, less: impl Fn(&T, &T) -> bool) -> bool {
        if let Some(lower) = &self.lower {
            let below = if lower.inclusive {
                less(value, &lower.value)
            } else {
                !less(&lower.value, value)
            };
            if below {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            let above = if upper.inclusive {
                less(&upper.value, value)
            } else {
                !less(value, &upper.value)
            };
            if above {
                return false;
            }
        }
        true
    }
}

impl<T: PartialOrd> Range<T> {
    /// Tests membership using `T`'s ordering.
    ///
    /// Values incomparable with a bound (such as NaN) are outside the range
    /// whenever that bound is exclusive.
    pub fn contains(&self, value: &T) -> bool {
        self.contains_by(value, |a, b| a < b)
    }
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_includes_both_ends() {
        let r = Range::closed(1, 5);
        assert!(r.contains(&1));
        assert!(r.contains(&3));
        assert!(r.contains(&5));
        assert!(!r.contains(&0));
        assert!(!r.contains(&6));
    }

    #[test]
    fn open_excludes_both_ends() {
        let r = Range::open(1, 5);
        assert!(!r.contains(&1));
        assert!(r.contains(&2));
        assert!(!r.contains(&5));
    }

    #[test]
    fn half_open_includes_lower_only() {
        let r = Range::half_open(1, 5);
        assert!(r.contains(&1));
        assert!(r.contains(&4));
        assert!(!r.contains(&5));
    }

    #[test]
    fn one_sided_constructors() {
        assert!(!Range::greater_than(10).contains(&10));
        assert!(Range::greater_than(10).contains(&11));
        assert!(Range::at_least(10).contains(&10));
        assert!(!Range::at_least(10).contains(&9));
        assert!(!Range::less_than(10).contains(&10));
        assert!(Range::less_than(10).contains(&i32::MIN));
        assert!(Range::at_most(10).contains(&10));
        assert!(!Range::at_most(10).contains(&11));
    }

    #[test]
    fn unbounded_matches_everything() {
        let r = Range::<i64>::default();
        assert!(r.is_unbounded());
        assert!(!r.is_bounded());
        assert!(r.contains(&i64::MIN));
        assert!(r.contains(&i64::MAX));

        assert!(Range::closed(0, 1).is_bounded());
        assert!(!Range::at_least(0).is_bounded());
        assert!(!Range::at_least(0).is_unbounded());
    }

    #[test]
    fn contains_by_custom_order() {
        // Compare strings by length only.
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        let r = Range::closed("aa", "aaaa");
        assert!(r.contains_by(&"xyz", by_len));
        assert!(r.contains_by(&"zz", by_len));
        assert!(!r.contains_by(&"x", by_len));
        assert!(!r.contains_by(&"xxxxx", by_len));
    }

    #[test]
    fn inverted_range_is_empty() {
        let r = Range::closed(5, 1);
        assert!((0..=6).all(|v| !r.contains(&v)));
    }

    #[test]
    fn serde_uses_min_max_fields() {
        let json = serde_json::to_string(&Range::half_open(1, 9)).unwrap();
        assert_eq!(
            json,
            r#"{"min":{"value":1,"inclusive":true},"max":{"value":9,"inclusive":false}}"#
        );

        let back: Range<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Range::half_open(1, 9));

        let lower_only: Range<i32> =
            serde_json::from_str(r#"{"min":{"value":3,"inclusive":false}}"#).unwrap();
        assert_eq!(lower_only, Range::greater_than(3));

        let nulls: Range<i32> = serde_json::from_str(r#"{"min":null,"max":null}"#).unwrap();
        assert!(nulls.is_unbounded());
    }

    #[test]
    fn serde_null_bound_value_is_unbounded() {
        let r: Range<i32> =
            serde_json::from_str(r#"{"min":{"value":null,"inclusive":true},"max":null}"#).unwrap();
        assert!(r.is_unbounded());
        assert!(r.contains(&i32::MIN));

        let r: Range<i32> = serde_json::from_str(
            r#"{"min":{"value":null,"inclusive":true},"max":{"value":5,"inclusive":true}}"#,
        )
        .unwrap();
        assert_eq!(r, Range::at_most(5));
        assert!(!r.is_bounded());

        let r: Range<i32> = serde_json::from_str(r#"{"min":{"inclusive":true},"max":{"value":5}}"#).unwrap();
        assert_eq!(r, Range::less_than(5));
    }

    #[test]
    fn serde_rejects_bad_bound_value() {
        assert!(serde_json::from_str::<Range<i32>>(r#"{"min":{"value":"x"}}"#).is_err());
    }
}
