use std::{
    fmt::{Debug, Display},
    ops::Add,
};

use noisy_float::types::{R64, r64};
use num_traits::Zero;

/// The cost of an alignment or of a single alignment operation.
///
/// Costs are minimised, so a negative cost acts as a reward.
pub trait AlignmentCost:
    Add<Output = Self> + Zero + PartialOrd + Display + Debug + Copy
{
    fn from_i32(value: i32) -> Self;

    /// Returns `None` if the sum is not representable by this cost type.
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// Returns `None` if the value is not representable by this cost type.
    fn try_from_f64(value: f64) -> Option<Self>;
}

macro_rules! primitive_cost {
    ($name:ident, $primitive:ident) => {
        #[doc = concat!("An integer alignment cost.\n\nThis cost type uses [`", stringify!($primitive), "`] as the internal representation of cost.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($primitive);

        impl $name {
            pub fn as_primitive(&self) -> $primitive {
                self.0
            }
        }

        impl $crate::cost::AlignmentCost for $name {
            fn from_i32(value: i32) -> Self {
                Self(value.into())
            }

            fn checked_add(self, rhs: Self) -> Option<Self> {
                self.0.checked_add(rhs.0).map(Self)
            }

            fn try_from_f64(value: f64) -> Option<Self> {
                let limit = -($primitive::MIN as f64);
                if value.fract() == 0.0 && (-limit..limit).contains(&value) {
                    Some(Self(value as $primitive))
                } else {
                    None
                }
            }
        }

        impl From<$primitive> for $name {
            fn from(value: $primitive) -> Self {
                Self(value)
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0.checked_add(rhs.0).unwrap())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <$primitive as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $primitive::from_str(s).map(Self)
            }
        }

        impl num_traits::Zero for $name {
            fn zero() -> Self {
                $primitive::zero().into()
            }

            fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }
    };
}

primitive_cost!(I32Cost, i32);
primitive_cost!(I64Cost, i64);

/// Real-valued costs.
///
/// [`R64`] cannot hold NaN or infinite values, so every cost in a matrix stays finite.
impl AlignmentCost for R64 {
    fn from_i32(value: i32) -> Self {
        r64(value.into())
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self.raw() + rhs.raw();
        sum.is_finite().then(|| r64(sum))
    }

    fn try_from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| r64(value))
    }
}
