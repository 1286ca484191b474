//! A single `(x, y)` point on the hidden Shamir polynomial.

use num_bigint::BigUint;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the `N` outputs of [`crate::ThresholdSecretSplitter::split`].
///
/// `x` is reserved nonzero (`x = 0` would evaluate the polynomial at the
/// secret itself); `y` is the polynomial's value at `x`, reduced mod the
/// fixed 521-bit prime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Share {
    #[cfg_attr(feature = "serde", serde(rename = "shareNumber"))]
    pub x: u64,
    #[cfg_attr(feature = "serde", serde(rename = "shareValue", with = "y_as_hex"))]
    pub y: BigUint,
}

#[cfg(feature = "serde")]
mod y_as_hex {
    use num_bigint::BigUint;
    use num_traits::Num;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(y: &BigUint, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&y.to_str_radix(16))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(d)?;
        BigUint::from_str_radix(&text, 16).map_err(D::Error::custom)
    }
}

impl Share {
    pub fn new(x: u64, y: BigUint) -> Self {
        Share { x, y }
    }
}
