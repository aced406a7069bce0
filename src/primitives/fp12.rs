//! `Fp12`, the target field `GT` of the bilinear pairing.
//!
//! Represented as `Fp2[x] / (x^6 - xi)` for a fixed quadratic non-residue
//! `xi`, following the usual BN-curve sextic-twist tower construction. The
//! multiplication below is schoolbook polynomial convolution followed by
//! reduction through the `x^6 = xi` relation rather than the optimized
//! Karatsuba/Fp6-then-Fp12 tower a production pairing library would use —
//! correct, not fast, which matches this module's role as the one part of
//! the crate not exercised by byte-exact test vectors.

use zeroize::Zeroize;

use super::field::Fp2Elem;

/// The non-residue defining the sextic extension: `xi = 2 + u`.
fn xi() -> Fp2Elem {
    use super::field::FpElem;
    let two = FpElem::one().add(&FpElem::one());
    Fp2Elem::new(two, FpElem::one())
}

/// An element of `Fp12`, represented as six `Fp2` coefficients
/// `c0 + c1 x + ... + c5 x^5`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Fp12Elem {
    pub(crate) c: [Fp2Elem; 6],
}

impl Zeroize for Fp12Elem {
    fn zeroize(&mut self) {
        for c in &mut self.c {
            c.zeroize();
        }
    }
}

impl Fp12Elem {
    pub fn one() -> Self {
        let mut c = [Fp2Elem::zero(); 6];
        c[0] = Fp2Elem::one();
        Fp12Elem { c }
    }

    pub fn zero() -> Self {
        Fp12Elem { c: [Fp2Elem::zero(); 6] }
    }

    pub(crate) fn is_one(&self) -> bool {
        self.c[0] == Fp2Elem::one() && self.c[1..].iter().all(Fp2Elem::is_zero)
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut out = [Fp2Elem::zero(); 6];
        for i in 0..6 {
            out[i] = self.c[i].add(&other.c[i]);
        }
        Fp12Elem { c: out }
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut wide = [Fp2Elem::zero(); 11];
        for i in 0..6 {
            for j in 0..6 {
                wide[i + j] = wide[i + j].add(&self.c[i].mul(&other.c[j]));
            }
        }
        for i in (6..11).rev() {
            let reduced = wide[i].mul(&xi());
            wide[i - 6] = wide[i - 6].add(&reduced);
        }
        let mut out = [Fp2Elem::zero(); 6];
        out.copy_from_slice(&wide[0..6]);
        Fp12Elem { c: out }
    }

    #[must_use]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// `self^(exponent)` via square-and-multiply over big-endian bytes.
    #[must_use]
    pub fn pow(&self, exponent_be_bytes: &[u8]) -> Self {
        let mut result = Fp12Elem::one();
        for &byte in exponent_be_bytes {
            for bit_idx in (0..8).rev() {
                result = result.square();
                if (byte >> bit_idx) & 1 == 1 {
                    result = result.mul(self);
                }
            }
        }
        result
    }

    /// 384-byte big-endian encoding: six 64-byte `Fp2` coefficients, each
    /// two 32-byte `Fp` limbs.
    pub fn to_bytes(self) -> [u8; 384] {
        let mut out = [0u8; 384];
        for (i, coeff) in self.c.iter().enumerate() {
            out[i * 64..i * 64 + 32].copy_from_slice(&coeff.a.to_bytes());
            out[i * 64 + 32..i * 64 + 64].copy_from_slice(&coeff.b.to_bytes());
        }
        out
    }
}
