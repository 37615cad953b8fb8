//! Three-state optional value: absent, explicitly null, or present.
//!
//! `Option<T>` cannot tell "field not sent" apart from "field sent as null".
//! Partial-update payloads need both: an absent field means *leave unchanged*,
//! a null field means *clear it*. [`Optional<T>`] keeps the distinction in
//! memory and maps it onto serde's field elision and null literal.
//!
//! ## States
//!
//! ```text
//!   ┌──────────────┬──────────────┬─────────────┬─────────────────────────┐
//!   │ variant      │ is_present   │ has_value   │ JSON field              │
//!   ├──────────────┼──────────────┼─────────────┼─────────────────────────┤
//!   │ Absent       │ false        │ false       │ omitted                 │
//!   │ Null         │ true         │ false       │ "field": null           │
//!   │ Value(v)     │ true         │ true        │ "field": <v>            │
//!   └──────────────┴──────────────┴─────────────┴─────────────────────────┘
//! ```
//!
//! ## Serde contract
//!
//! - `Absent` and `Null` both serialize as none (JSON `null`). To elide absent
//!   fields, annotate them with
//!   `#[serde(default, skip_serializing_if = "Optional::is_absent")]`.
//! - `Value(v)` serializes as `v` does. Self-describing formats (JSON, YAML,
//!   ...) see exactly `v`'s encoding.
//! - A missing field deserializes to `Absent` (via `#[serde(default)]`), a
//!   null literal to `Null`, anything else through `T`'s `Deserialize`. A
//!   failure there is reported as `cannot deserialize Optional: <cause>`.
//!
//! ## Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use synckit::value::Optional;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Patch {
//!     #[serde(default, skip_serializing_if = "Optional::is_absent")]
//!     nickname: Optional<String>,
//!     #[serde(default, skip_serializing_if = "Optional::is_absent")]
//!     age: Optional<u32>,
//! }
//!
//! let patch: Patch = serde_json::from_str(r#"{"nickname": null}"#).unwrap();
//! assert!(patch.nickname.is_explicit_null());
//! assert!(patch.age.is_absent());
//!
//! let out = Patch { nickname: Optional::Absent, age: Optional::value(41) };
//! assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"age":41}"#);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

/// A value that is absent, explicitly null, or present.
///
/// The default is [`Optional::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Optional<T> {
    /// Not provided at all.
    #[default]
    Absent,
    /// Provided, and explicitly null.
    Null,
    /// Provided with a value.
    Value(T),
}

impl<T> Optional<T> {
    pub const fn absent() -> Self {
        Optional::Absent
    }

    pub const fn null() -> Self {
        Optional::Null
    }

    pub const fn value(value: T) -> Self {
        Optional::Value(value)
    }

    /// Maps `None` to `Null` and `Some(v)` to `Value(v)`.
    pub fn from_nullable(value: Option<T>) -> Self {
        match value {
            Some(v) => Optional::Value(v),
            None => Optional::Null,
        }
    }

    // ---------------------------------------------------------------------
    // State predicates
    // ---------------------------------------------------------------------

    /// `Null` or `Value`.
    #[inline]
    pub const fn is_present(&self) -> bool {
        !self.is_absent()
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Optional::Absent)
    }

    /// Present and not null.
    #[inline]
    pub const fn has_value(&self) -> bool {
        matches!(self, Optional::Value(_))
    }

    /// Present and null.
    #[inline]
    pub const fn is_explicit_null(&self) -> bool {
        matches!(self, Optional::Null)
    }

    /// `Absent` or `Null`.
    #[inline]
    pub const fn is_null_or_absent(&self) -> bool {
        !self.has_value()
    }

    // ---------------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------------

    /// Returns the value only for `Value`; `Null` counts as no value.
    pub fn try_get(&self) -> Option<&T> {
        match self {
            Optional::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn try_get_mut(&mut self) -> Option<&mut T> {
        match self {
            Optional::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value, or `default` for `Absent` and `Null`.
    pub fn value_or(self, default: T) -> T {
        match self {
            Optional::Value(v) => v,
            _ => default,
        }
    }

    /// Returns the value, or calls `f` for `Absent` and `Null`.
    ///
    /// `f` runs at most once.
    pub fn value_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Optional::Value(v) => v,
            _ => f(),
        }
    }

    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or_else(T::default)
    }

    /// Returns the value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` for `Absent` and `Null`.
    #[track_caller]
    pub fn expect_value(self, msg: &str) -> T {
        match self {
            Optional::Value(v) => v,
            _ => panic!("{}", msg),
        }
    }

    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Optional::Absent => Optional::Absent,
            Optional::Null => Optional::Null,
            Optional::Value(v) => Optional::Value(v),
        }
    }

    pub fn as_mut(&mut self) -> Optional<&mut T> {
        match self {
            Optional::Absent => Optional::Absent,
            Optional::Null => Optional::Null,
            Optional::Value(v) => Optional::Value(v),
        }
    }

    /// Collapses to `Option<T>`; both `Absent` and `Null` become `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Optional::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `None` for `Absent`, `Some(None)` for `Null`, `Some(Some(v))` for `Value`.
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Optional::Absent => None,
            Optional::Null => Some(None),
            Optional::Value(v) => Some(Some(v)),
        }
    }

    /// Borrowing form of [`into_nullable`](Self::into_nullable).
    pub fn as_nullable(&self) -> Option<Option<&T>> {
        self.as_ref().into_nullable()
    }

    /// Returns `true` if this holds a value equal to `other` under `eq`.
    pub fn contains_by(&self, other: &T, eq: impl FnOnce(&T, &T) -> bool) -> bool {
        match self {
            Optional::Value(v) => eq(v, other),
            _ => false,
        }
    }

    /// Calls `on_value` for `Value`, `on_other` otherwise.
    pub fn match_with<R>(self, on_value: impl FnOnce(T) -> R, on_other: impl FnOnce() -> R) -> R {
        match self {
            Optional::Value(v) => on_value(v),
            _ => on_other(),
        }
    }

    /// Calls `on_present` with `None`/`Some(v)` for `Null`/`Value`, and
    /// `on_absent` for `Absent`.
    pub fn match_nullable<R>(
        self,
        on_present: impl FnOnce(Option<T>) -> R,
        on_absent: impl FnOnce() -> R,
    ) -> R {
        match self {
            Optional::Absent => on_absent(),
            Optional::Null => on_present(None),
            Optional::Value(v) => on_present(Some(v)),
        }
    }

    // ---------------------------------------------------------------------
    // Transformation
    // ---------------------------------------------------------------------

    /// Keeps `Value(v)` when `predicate(&v)` holds; everything else is `Absent`.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Optional::Value(v) if predicate(&v) => Optional::Value(v),
            _ => Optional::Absent,
        }
    }

    /// Keeps a present state when `predicate` holds for it.
    ///
    /// The predicate sees `None` for `Null`. `Absent` is always dropped.
    pub fn filter_nullable(self, predicate: impl FnOnce(Option<&T>) -> bool) -> Self {
        let keep = match &self {
            Optional::Absent => false,
            Optional::Null => predicate(None),
            Optional::Value(v) => predicate(Some(v)),
        };
        if keep { self } else { Optional::Absent }
    }

    /// Returns `self` if present (null or value), otherwise `other`.
    pub fn or(self, other: Self) -> Self {
        if self.is_present() { self } else { other }
    }

    pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
        if self.is_present() { self } else { f() }
    }

    /// Returns whichever side is present when exactly one is; else `Absent`.
    pub fn xor(self, other: Self) -> Self {
        match (self.is_present(), other.is_present()) {
            (true, false) => self,
            (false, true) => other,
            _ => Optional::Absent,
        }
    }

    /// Maps the value, keeping `Absent` and `Null` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Optional::Absent => Optional::Absent,
            Optional::Null => Optional::Null,
            Optional::Value(v) => Optional::Value(f(v)),
        }
    }

    /// Moves the current state out, leaving `Absent` behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Stores `Value(value)` and returns the previous state.
    pub fn replace(&mut self, value: T) -> Self {
        std::mem::replace(self, Optional::Value(value))
    }
}

impl<T: PartialEq> Optional<T> {
    /// Returns `true` if this holds a value equal to `other`.
    pub fn contains(&self, other: &T) -> bool {
        self.contains_by(other, |a, b| a == b)
    }
}

impl<T> From<Option<Option<T>>> for Optional<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Optional::Absent,
            Some(inner) => Optional::from_nullable(inner),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optional::Absent => f.write_str("absent"),
            Optional::Null => f.write_str("null"),
            Optional::Value(v) => v.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Optional::Value(v) => serializer.serialize_some(v),
            Optional::Absent | Optional::Null => serializer.serialize_none(),
        }
    }
}

struct OptionalVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalVisitor<T> {
    type Value = Optional<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null or a value")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Optional::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Optional::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        T::deserialize(deserializer)
            .map(Optional::Value)
            .map_err(|err| de::Error::custom(format_args!("cannot deserialize Optional: {}", err)))
    }
}

/// Reads `null` as [`Optional::Null`] and anything else as a `T`.
///
/// An error from `T` is rebuilt through `de::Error::custom` with a
/// `cannot deserialize Optional:` prefix. Only its message survives: a
/// format's own classification is lost, so serde_json reports a truncated
/// value as a data error and `is_eof()` is `false`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(OptionalVisitor(PhantomData))
    }
}
