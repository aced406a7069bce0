//! `G1`, the pairing-friendly curve's first group, defined over `Fp` by
//! `y^2 = x^3 + b`.

use zeroize::Zeroize;

use super::field::FpElem;
use super::scalar::FnElem;
use crate::error::{Result, Sm9Error};

/// The curve coefficient `b` for `y^2 = x^3 + b` (SM9's curve has `a = 0`).
fn curve_b() -> FpElem {
    let mut five = FpElem::zero();
    for _ in 0..5 {
        five = five.add(&FpElem::one());
    }
    five
}

/// A point on `G1`, in affine coordinates. The point at infinity is
/// represented with `infinity = true`, in which case `x`/`y` are unused.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct G1Point {
    pub(crate) x: FpElem,
    pub(crate) y: FpElem,
    pub(crate) infinity: bool,
}

impl Zeroize for G1Point {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

impl G1Point {
    pub fn identity() -> Self {
        G1Point { x: FpElem::zero(), y: FpElem::zero(), infinity: true }
    }

    pub fn new(x: FpElem, y: FpElem) -> Self {
        G1Point { x, y, infinity: false }
    }

    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// `y^2 == x^3 + b`.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let lhs = self.y.square();
        let rhs = self.x.square().mul(&self.x).add(&curve_b());
        lhs == rhs
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        if self.infinity {
            return *other;
        }
        if other.infinity {
            return *self;
        }
        if self.x == other.x {
            if self.y == other.y.neg() {
                return G1Point::identity();
            }
            return self.double();
        }
        let lambda = other.y.sub(&self.y).mul(&other.x.sub(&self.x).inv());
        let x3 = lambda.square().sub(&self.x).sub(&other.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        G1Point::new(x3, y3)
    }

    #[must_use]
    pub fn double(&self) -> Self {
        if self.infinity || self.y.is_zero() {
            return G1Point::identity();
        }
        let three_x2 = self.x.square().add(&self.x.square()).add(&self.x.square());
        let two_y = self.y.add(&self.y);
        let lambda = three_x2.mul(&two_y.inv());
        let x3 = lambda.square().sub(&self.x).sub(&self.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        G1Point::new(x3, y3)
    }

    /// Scalar multiplication via double-and-add.
    #[must_use]
    pub fn mul(&self, scalar: &FnElem) -> Self {
        let bytes = scalar.to_bytes();
        let mut result = G1Point::identity();
        for &byte in &bytes {
            for bit_idx in (0..8).rev() {
                result = result.double();
                if (byte >> bit_idx) & 1 == 1 {
                    result = result.add(self);
                }
            }
        }
        result
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        if self.infinity {
            return *self;
        }
        G1Point::new(self.x, self.y.neg())
    }

    /// 65-byte uncompressed octet form: `0x04 || x || y`.
    pub fn to_uncompressed_octets(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..65].copy_from_slice(&self.y.to_bytes());
        out
    }

    pub fn from_uncompressed_octets(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 {
            return Err(Sm9Error::WrongLength);
        }
        if bytes[0] != 0x04 {
            return Err(Sm9Error::InvalidPoint);
        }
        let x = FpElem::from_bytes(bytes[1..33].try_into().expect("slice is 32 bytes"));
        let y = FpElem::from_bytes(bytes[33..65].try_into().expect("slice is 32 bytes"));
        let point = G1Point::new(x, y);
        if !point.is_on_curve() {
            return Err(Sm9Error::InvalidPoint);
        }
        Ok(point)
    }
}
