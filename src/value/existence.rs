//! Membership filter: "value is in this list" or "value is not in this list".
//!
//! Serialized as `{"in": [...], "contains": <bool>}`, where `contains: true`
//! means the value must be one of the listed values. On input, a missing or
//! null `"in"` is an empty list and a missing `"contains"` is `false`.

use serde::{Deserialize, Deserializer, Serialize};

/// Inclusion or exclusion claim over a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ExistenceClaim<T> {
    #[serde(rename = "in", default, deserialize_with = "null_as_empty")]
    pub values: Vec<T>,
    #[serde(default)]
    pub contains: bool,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> ExistenceClaim<T> {
    /// Matches values equal to one of `values`.
    pub fn in_values(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
            contains: true,
        }
    }

    /// Matches values equal to none of `values`.
    pub fn not_in(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
            contains: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns the claim with the inclusion flag flipped.
    pub fn negate(self) -> Self {
        Self {
            values: self.values,
            contains: !self.contains,
        }
    }

    /// Returns `true` if `value` satisfies the claim under `eq`.
    ///
    /// An empty inclusion claim matches nothing; an empty exclusion claim
    /// matches everything.
    pub fn check_by(&self, value: &T, eq: impl Fn(&T, &T) -> bool) -> bool {
        let found = self.values.iter().any(|v| eq(v, value));
        found == self.contains
    }

    /// Returns clones of the items in `items` that satisfy the claim, in order.
    pub fn apply_by(&self, items: &[T], eq: impl Fn(&T, &T) -> bool) -> Vec<T>
    where
        T: Clone,
    {
        items
            .iter()
            .filter(|item| self.check_by(item, &eq))
            .cloned()
            .collect()
    }
}

impl<T: PartialEq> ExistenceClaim<T> {
    pub fn check(&self, value: &T) -> bool {
        self.check_by(value, |a, b| a == b)
    }

    pub fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        self.apply_by(items, |a, b| a == b)
    }
}
