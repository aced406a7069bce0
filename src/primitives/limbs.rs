//! 256-bit field arithmetic, shared by every field in the tower (`Fn`,
//! `Fp`). Storage and the modular operations are backed by `crypto_bigint`'s
//! `U256` and its constant-time Montgomery residue type (`DynResidue`)
//! rather than a hand-rolled limb type; `Fp`/`Fn` convert to/from big-endian
//! bytes only at their own byte-codec boundary (`to_be_bytes`/
//! `from_be_bytes`), the same pair `crypto_bigint::Encoding` exposes.

use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::{Encoding, U256};

pub(crate) type Limb4 = U256;

pub(crate) const ZERO: Limb4 = U256::ZERO;

pub(crate) fn one() -> Limb4 {
    U256::ONE
}

pub(crate) fn is_zero(a: &Limb4) -> bool {
    to_be_bytes(a) == [0u8; 32]
}

/// Big-endian lexicographic comparison, which agrees with numeric order.
pub(crate) fn cmp(a: &Limb4, b: &Limb4) -> core::cmp::Ordering {
    to_be_bytes(a).cmp(&to_be_bytes(b))
}

pub(crate) fn from_be_bytes(bytes: &[u8; 32]) -> Limb4 {
    U256::from_be_bytes(*bytes)
}

pub(crate) fn to_be_bytes(a: &Limb4) -> [u8; 32] {
    a.to_be_bytes()
}

pub(crate) fn add_mod(a: &Limb4, b: &Limb4, m: &Limb4) -> Limb4 {
    let params = DynResidueParams::new(m);
    DynResidue::new(a, params).add(&DynResidue::new(b, params)).retrieve()
}

pub(crate) fn sub_mod(a: &Limb4, b: &Limb4, m: &Limb4) -> Limb4 {
    let params = DynResidueParams::new(m);
    DynResidue::new(a, params).sub(&DynResidue::new(b, params)).retrieve()
}

pub(crate) fn neg_mod(a: &Limb4, m: &Limb4) -> Limb4 {
    let params = DynResidueParams::new(m);
    DynResidue::new(a, params).neg().retrieve()
}

pub(crate) fn mul_mod(a: &Limb4, b: &Limb4, m: &Limb4) -> Limb4 {
    let params = DynResidueParams::new(m);
    DynResidue::new(a, params).mul(&DynResidue::new(b, params)).retrieve()
}

/// `a^e mod m` via square-and-multiply in Montgomery form. `e` is
/// big-endian bytes.
pub(crate) fn pow_mod(a: &Limb4, exponent_be_bytes: &[u8], m: &Limb4) -> Limb4 {
    let params = DynResidueParams::new(m);
    let base = DynResidue::new(a, params);
    let mut result = DynResidue::new(&one(), params);
    for &byte in exponent_be_bytes {
        for bit_idx in (0..8).rev() {
            result = result.mul(&result);
            if (byte >> bit_idx) & 1 == 1 {
                result = result.mul(&base);
            }
        }
    }
    result.retrieve()
}

/// Modular inverse via Fermat's little theorem: `a^(m-2) mod m`. Only valid
/// when `m` is prime, which both `N` and `P` are.
pub(crate) fn inv_mod_prime(a: &Limb4, m: &Limb4) -> Limb4 {
    let mut two_bytes = [0u8; 32];
    two_bytes[31] = 2;
    let m_minus_2 = m.wrapping_sub(&from_be_bytes(&two_bytes));
    pow_mod(a, &to_be_bytes(&m_minus_2), m)
}

/// Reduces an arbitrary-length big-endian byte string into `[0, modulus)`
/// via bit-serial Horner reduction: doubles the accumulator and ORs in
/// each input bit, reducing modulo `modulus` after every step.
///
/// Used only by the GM/T 0044 `Hv` hash-to-scalar construction
/// ([`super::scalar::FnElem::from_wide_bytes`]), which needs to reduce a
/// 512-bit hash output modulo `N - 1` — an *even* modulus that
/// `crypto_bigint`'s Montgomery-only [`DynResidueParams`] cannot
/// represent (REDC requires an odd modulus). Every other modular operation
/// in this module reduces modulo the odd, prime `N` or `P` and goes
/// through the `DynResidue`-backed functions above; this one works
/// directly on bytes instead.
pub(crate) fn reduce_wide_bytes(bytes: &[u8], modulus: &Limb4) -> Limb4 {
    let modulus_bytes = to_be_bytes(modulus);
    let mut remainder = [0u8; 32];
    for &byte in bytes {
        for bit_idx in (0..8).rev() {
            let mut carry = (byte >> bit_idx) & 1;
            for b in remainder.iter_mut().rev() {
                let next_carry = *b >> 7;
                *b = (*b << 1) | carry;
                carry = next_carry;
            }
            if carry == 1 || ge(&remainder, &modulus_bytes) {
                sub_assign(&mut remainder, &modulus_bytes);
            }
        }
    }
    from_be_bytes(&remainder)
}

fn ge(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

/// Wrapping (mod 2^256) subtraction on big-endian byte arrays. When called
/// with `carry == 1` in [`reduce_wide_bytes`] the borrow that falls off the
/// top byte is exactly what accounts for the bit the fixed-width shift
/// dropped, so it is intentionally not propagated any further.
fn sub_assign(a: &mut [u8; 32], b: &[u8; 32]) {
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = i32::from(a[i]) - i32::from(b[i]) - borrow;
        if diff < 0 {
            a[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            a[i] = diff as u8;
            borrow = 0;
        }
    }
}
