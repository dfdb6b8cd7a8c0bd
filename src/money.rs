use anyhow::{Context, Error, Result};
use num_traits::Zero;
use rust_decimal::prelude::*;
use serde::Serialize;
use std::convert::TryFrom;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// Basically this holds a Decimal that is scaled out to at least 2 dp (doesn't round).
///
/// Addition and subtraction saturate at the bounds of `Decimal` rather than overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub fn new(mut d: Decimal) -> Self {
        if d.scale() < 2 {
            d.rescale(2);
        }
        Self(d)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self::new(self.0.abs())
    }
}

impl TryFrom<f64> for Money {
    type Error = Error;

    fn try_from(f: f64) -> Result<Self> {
        let d = Decimal::from_f64(f).context(format!("Failed to convert {} to Money", f))?;
        Ok(Self::new(d))
    }
}

impl From<i64> for Money {
    fn from(i: i64) -> Self {
        Self::new(Decimal::from(i))
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Self::new(Decimal::from(i))
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let d: Decimal = s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .with_context(|| format!("Failed to parse Money from '{}'", s))?;
        Ok(Self::new(d))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            write!(f, "(${})", self.0.abs())
        } else {
            write!(f, "${}", self.0.abs())
        }
    }
}

impl Zero for Money {
    fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add<Money> for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.0.saturating_add(other.0))
    }
}

impl Sub<Money> for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::new(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
