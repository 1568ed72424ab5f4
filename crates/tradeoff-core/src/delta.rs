//! Delta - Exact signed contribution value

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_traits::Zero;
use rust_decimal::Decimal;

use crate::domain::Polarity;

/// A signed contribution value, `weight × (gradeA − gradeB)`.
///
/// Backed by [`Decimal`], so sums over groups are exact for any grade or
/// weight written with a finite number of decimal places. The operators
/// panic on overflow; instances built by
/// [`Instance::from_alternatives`](crate::Instance::from_alternatives) keep
/// their total supply and demand in range, so no sum over their values can.
///
/// # Examples
///
/// ```
/// use tradeoff_core::{Delta, Polarity};
///
/// let pro = Delta::of(32);
/// let con = Delta::of(-28);
///
/// assert_eq!(pro + con, Delta::of(4));
/// assert_eq!(con.polarity(), Polarity::Con);
/// assert_eq!(format!("{:+}", pro), "+32");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Delta(Decimal);

impl Delta {
    /// The zero delta.
    pub const ZERO: Delta = Delta(Decimal::ZERO);

    /// Creates a delta from an integer value.
    #[inline]
    pub fn of(value: i64) -> Self {
        Delta(Decimal::from(value))
    }

    /// Creates a delta from a decimal value.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Delta(value)
    }

    /// Computes `weight × (grade_a − grade_b)`, or `None` if the result
    /// leaves the decimal range.
    #[inline]
    pub fn checked_weighted(weight: Decimal, grade_a: Decimal, grade_b: Decimal) -> Option<Self> {
        grade_a
            .checked_sub(grade_b)
            .and_then(|diff| weight.checked_mul(diff))
            .map(Delta)
    }

    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Delta)
    }

    /// Returns the underlying decimal value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Classifies the delta by strict sign comparison.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        match self.0.cmp(&Decimal::ZERO) {
            Ordering::Greater => Polarity::Pro,
            Ordering::Less => Polarity::Con,
            Ordering::Equal => Polarity::Neutral,
        }
    }

    #[inline]
    pub fn is_pro(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[inline]
    pub fn is_con(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this delta is balanced, i.e. `>= 0`.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.0 >= Decimal::ZERO
    }
}

impl Zero for Delta {
    #[inline]
    fn zero() -> Self {
        Delta::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<i64> for Delta {
    fn from(value: i64) -> Self {
        Delta::of(value)
    }
}

impl From<i32> for Delta {
    fn from(value: i32) -> Self {
        Delta(Decimal::from(value))
    }
}

impl From<Decimal> for Delta {
    fn from(value: Decimal) -> Self {
        Delta(value)
    }
}

impl Add for Delta {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Delta(self.0 + other.0)
    }
}

impl Sub for Delta {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Delta(self.0 - other.0)
    }
}

impl Neg for Delta {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Delta(-self.0)
    }
}

impl AddAssign for Delta {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Delta {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Delta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Delta::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Delta> for Delta {
    fn sum<I: Iterator<Item = &'a Delta>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Debug for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delta({})", self.0.normalize())
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.normalize();
        if f.sign_plus() && value > Decimal::ZERO {
            write!(f, "+{}", value)
        } else {
            write!(f, "{}", value)
        }
    }
}
