//! `G2`, the sextic-twist group, defined over `Fp2` by `y^2 = x^3 + b'`.

use zeroize::Zeroize;

use super::field::{Fp2Elem, FpElem};
use super::scalar::FnElem;
use crate::error::{Result, Sm9Error};

/// The twisted curve coefficient `b' = b / xi`, expressed directly as an
/// `Fp2` constant rather than re-deriving it from `xi` on every call.
fn twist_b() -> Fp2Elem {
    Fp2Elem::new(FpElem::zero(), FpElem::one())
}

/// A point on `G2`, in affine coordinates over `Fp2`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct G2Point {
    pub(crate) x: Fp2Elem,
    pub(crate) y: Fp2Elem,
    pub(crate) infinity: bool,
}

impl Zeroize for G2Point {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

impl G2Point {
    pub fn identity() -> Self {
        G2Point { x: Fp2Elem::zero(), y: Fp2Elem::zero(), infinity: true }
    }

    pub fn new(x: Fp2Elem, y: Fp2Elem) -> Self {
        G2Point { x, y, infinity: false }
    }

    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let lhs = self.y.square();
        let rhs = self.x.square().mul(&self.x).add(&twist_b());
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
                return G2Point::identity();
            }
            return self.double();
        }
        let lambda = other.y.sub(&self.y).mul(&other.x.sub(&self.x).inv());
        let x3 = lambda.square().sub(&self.x).sub(&other.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        G2Point::new(x3, y3)
    }

    #[must_use]
    pub fn double(&self) -> Self {
        if self.infinity || self.y.is_zero() {
            return G2Point::identity();
        }
        let three_x2 = self.x.square().add(&self.x.square()).add(&self.x.square());
        let two_y = self.y.add(&self.y);
        let lambda = three_x2.mul(&two_y.inv());
        let x3 = lambda.square().sub(&self.x).sub(&self.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        G2Point::new(x3, y3)
    }

    #[must_use]
    pub fn mul(&self, scalar: &FnElem) -> Self {
        let bytes = scalar.to_bytes();
        let mut result = G2Point::identity();
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
        G2Point::new(self.x, self.y.neg())
    }

    /// 129-byte uncompressed octet form: `0x04 || x.a || x.b || y.a || y.b`.
    pub fn to_uncompressed_octets(&self) -> [u8; 129] {
        let mut out = [0u8; 129];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.a.to_bytes());
        out[33..65].copy_from_slice(&self.x.b.to_bytes());
        out[65..97].copy_from_slice(&self.y.a.to_bytes());
        out[97..129].copy_from_slice(&self.y.b.to_bytes());
        out
    }

    pub fn from_uncompressed_octets(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 129 {
            return Err(Sm9Error::WrongLength);
        }
        if bytes[0] != 0x04 {
            return Err(Sm9Error::InvalidPoint);
        }
        let xa = FpElem::from_bytes(bytes[1..33].try_into().expect("32 bytes"));
        let xb = FpElem::from_bytes(bytes[33..65].try_into().expect("32 bytes"));
        let ya = FpElem::from_bytes(bytes[65..97].try_into().expect("32 bytes"));
        let yb = FpElem::from_bytes(bytes[97..129].try_into().expect("32 bytes"));
        let point = G2Point::new(Fp2Elem::new(xa, xb), Fp2Elem::new(ya, yb));
        if !point.is_on_curve() {
            return Err(Sm9Error::InvalidPoint);
        }
        Ok(point)
    }
}
