use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// Finite `f64` wrapper so float values can participate in `Eq`, `Ord` and
/// `Hash` alongside the other value variants. NaN and the infinities are
/// rejected at construction, which keeps the total order free of special
/// cases. Ordering is `total_cmp`, so `-0.0 < 0.0`.
///

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Float64(f64);

impl Float64 {
    pub fn try_new(value: f64) -> Result<Self, ValueError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(ValueError::NonFiniteFloat { value })
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float64 {}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // total_cmp equality for finite floats is bit equality
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Float64 {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Float64> for f64 {
    fn from(value: Float64) -> Self {
        value.get()
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
