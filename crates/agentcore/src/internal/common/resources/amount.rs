use derive_more::Sum;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

pub type ResourceUnits = i64;
pub type ResourceFractions = i64;

pub const FRACTIONS_PER_UNIT: ResourceFractions = 10_000;
pub const FRACTIONS_MAX_DIGITS: usize = 4; // = log10(FRACTIONS_PER_UNIT)

/// Fixed-point resource quantity.
///
/// Amounts are stored as a signed count of fractions, so repeated additions and
/// subtractions never drift. Intermediate results may be negative (e.g. after
/// over-subtraction); callers clamp with [`ResourceAmount::max_zero`].
/// Arithmetic saturates at [`ResourceAmount::MIN`] and [`ResourceAmount::MAX`].
#[derive(
    Debug,
    Serialize,
    Clone,
    Copy,
    Hash,
    Eq,
    Deserialize,
    PartialEq,
    Ord,
    PartialOrd,
    Default,
    Sum,
)]
pub struct ResourceAmount(i64);

impl ResourceAmount {
    pub const ZERO: ResourceAmount = ResourceAmount(0);
    pub const MAX: ResourceAmount = ResourceAmount(i64::MAX);
    pub const MIN: ResourceAmount = ResourceAmount(i64::MIN);

    pub fn new(units: ResourceUnits, fractions: ResourceFractions) -> Self {
        assert!((0..FRACTIONS_PER_UNIT).contains(&fractions));
        ResourceAmount(units * FRACTIONS_PER_UNIT + fractions)
    }

    pub fn new_units(units: ResourceUnits) -> Self {
        ResourceAmount(units * FRACTIONS_PER_UNIT)
    }

    /// Rounds to the nearest representable fraction. Values out of range are clamped
    /// to [`ResourceAmount::MIN`]/[`ResourceAmount::MAX`]; NaN yields `None`.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        // `as` saturates for out-of-range and infinite values
        let fractions = (value * FRACTIONS_PER_UNIT as f64).round() as i64;
        Some(ResourceAmount(fractions))
    }

    /// Same as [`ResourceAmount::try_from_f64`], NaN is converted to zero.
    pub fn from_f64(value: f64) -> Self {
        Self::try_from_f64(value).unwrap_or(Self::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn max_zero(self) -> Self {
        self.max(Self::ZERO)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / FRACTIONS_PER_UNIT as f64
    }
}

impl Add for ResourceAmount {
    type Output = ResourceAmount;

    #[inline]
    fn add(self, rhs: ResourceAmount) -> Self::Output {
        ResourceAmount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for ResourceAmount {
    type Output = ResourceAmount;

    #[inline]
    fn sub(self, rhs: ResourceAmount) -> Self::Output {
        ResourceAmount(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for ResourceAmount {
    #[inline]
    fn add_assign(&mut self, rhs: ResourceAmount) {
        *self = *self + rhs;
    }
}

impl SubAssign for ResourceAmount {
    #[inline]
    fn sub_assign(&mut self, rhs: ResourceAmount) {
        *self = *self - rhs;
    }
}

impl std::fmt::Display for ResourceAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.0 < 0 {
            write!(f, "-")?;
        }
        let abs = self.0.unsigned_abs();
        let per_unit = FRACTIONS_PER_UNIT as u64;
        let fractions = abs % per_unit;
        write!(f, "{}", abs / per_unit)?;
        if fractions != 0 {
            let num = format!("{:01$}", fractions, FRACTIONS_MAX_DIGITS);
            write!(f, ".{}", num.trim_end_matches('0'))?;
        }
        Ok(())
    }
}
