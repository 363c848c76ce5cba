//! Unit newtypes for power quantities.
//!
//! Generation capacity and demand targets are both active power in MW.
//! Wrapping them in a newtype keeps them from being mixed with raw edge
//! weights (cost units) at compile time.
//!
//! All types use `#[repr(transparent)]` so they have the same memory layout
//! as `f64`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Active power in megawatts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Megawatts(pub f64);

impl Megawatts {
    pub const ZERO: Megawatts = Megawatts(0.0);

    #[inline]
    pub fn new(value: f64) -> Self {
        Megawatts(value)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Add for Megawatts {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Megawatts(self.0 + rhs.0)
    }
}

impl AddAssign for Megawatts {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Megawatts {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Megawatts(self.0 - rhs.0)
    }
}

impl Mul<f64> for Megawatts {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Megawatts(self.0 * rhs)
    }
}

impl Div<f64> for Megawatts {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Megawatts(self.0 / rhs)
    }
}

impl Sum for Megawatts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Megawatts::ZERO, |acc, x| acc + x)
    }
}

impl fmt::Display for Megawatts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} MW", self.0)
    }
}
