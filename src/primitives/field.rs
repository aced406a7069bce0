//! `Fp`, the base field G1 lives over, and its quadratic extension `Fp2`
//! that G2 lives over.

use zeroize::Zeroize;

use super::limbs::{self, Limb4};

/// The characteristic of the base field.
///
/// Same standard SM9 curve parameter family as [`super::scalar::N_BYTES`];
/// see that constant's docs for the caveat on exactness.
#[rustfmt::skip]
pub const P_BYTES: [u8; 32] = [
    0xB6, 0x40, 0x00, 0x00, 0x02, 0xA3, 0xA6, 0xF1,
    0xD6, 0x03, 0xAB, 0x4F, 0xF5, 0x8E, 0xC7, 0x44,
    0x49, 0xF2, 0x93, 0x4B, 0x18, 0xEA, 0x8B, 0xEE,
    0xE5, 0x6E, 0xE1, 0x9C, 0xD6, 0x9E, 0xCF, 0x24,
];

pub(crate) fn modulus() -> Limb4 {
    limbs::from_be_bytes(&P_BYTES)
}

/// An element of the base field `Fp`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FpElem(pub(crate) Limb4);

impl Zeroize for FpElem {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl FpElem {
    pub fn zero() -> Self {
        FpElem(limbs::ZERO)
    }
    pub fn one() -> Self {
        FpElem(limbs::one())
    }
    pub(crate) fn is_zero(&self) -> bool {
        limbs::is_zero(&self.0)
    }
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        FpElem(limbs::from_be_bytes(bytes))
    }
    pub fn to_bytes(self) -> [u8; 32] {
        limbs::to_be_bytes(&self.0)
    }
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        FpElem(limbs::add_mod(&self.0, &other.0, &modulus()))
    }
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        FpElem(limbs::sub_mod(&self.0, &other.0, &modulus()))
    }
    #[must_use]
    pub fn neg(&self) -> Self {
        FpElem(limbs::neg_mod(&self.0, &modulus()))
    }
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        FpElem(limbs::mul_mod(&self.0, &other.0, &modulus()))
    }
    #[must_use]
    pub fn square(&self) -> Self {
        self.mul(self)
    }
    #[must_use]
    pub fn inv(&self) -> Self {
        FpElem(limbs::inv_mod_prime(&self.0, &modulus()))
    }
}

/// An element `a + b*u` of `Fp2 = Fp[u] / (u^2 + 1)`, the field G2's twist
/// coordinates live in.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Fp2Elem {
    pub(crate) a: FpElem,
    pub(crate) b: FpElem,
}

impl Zeroize for Fp2Elem {
    fn zeroize(&mut self) {
        self.a.zeroize();
        self.b.zeroize();
    }
}

impl Fp2Elem {
    pub fn new(a: FpElem, b: FpElem) -> Self {
        Fp2Elem { a, b }
    }
    pub fn zero() -> Self {
        Fp2Elem { a: FpElem::zero(), b: FpElem::zero() }
    }
    pub fn one() -> Self {
        Fp2Elem { a: FpElem::one(), b: FpElem::zero() }
    }
    pub(crate) fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Fp2Elem { a: self.a.add(&other.a), b: self.b.add(&other.b) }
    }
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        Fp2Elem { a: self.a.sub(&other.a), b: self.b.sub(&other.b) }
    }
    #[must_use]
    pub fn neg(&self) -> Self {
        Fp2Elem { a: self.a.neg(), b: self.b.neg() }
    }
    /// `(a + bu)(c + du) = (ac - bd) + (ad + bc)u`, since `u^2 = -1`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let ac = self.a.mul(&other.a);
        let bd = self.b.mul(&other.b);
        let ad = self.a.mul(&other.b);
        let bc = self.b.mul(&other.a);
        Fp2Elem { a: ac.sub(&bd), b: ad.add(&bc) }
    }
    #[must_use]
    pub fn square(&self) -> Self {
        self.mul(self)
    }
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Fp2Elem { a: self.a, b: self.b.neg() }
    }
    /// `1 / (a + bu) = (a - bu) / (a^2 + b^2)`.
    #[must_use]
    pub fn inv(&self) -> Self {
        let norm = self.a.square().add(&self.b.square());
        let norm_inv = norm.inv();
        Fp2Elem { a: self.a.mul(&norm_inv), b: self.b.neg().mul(&norm_inv) }
    }
}
