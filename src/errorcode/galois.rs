//! This module contains the implementation of the GF(256) arithmetic used by
//! the Reed-Solomon codes in QR Code.
//!
//! An element of GF(256) is represented by an u8 value. Its bits are the
//! coefficients of a polynomial of degree at most 7, the least significant
//! bit being the coefficient for 1:
//!
//! > 29 = 0b00011101 = x^4 + x^3 + x^2 + 1.
//!
//! Addition is done coefficient by coefficient, so it is a bitwise XOR.
//!
//! Multiplication is defined modulo the polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11D). Reducing x^8 therefore amounts to
//! XORing the "reduction constant" 0x1D into the lower byte.
//!
//! With this choice x is a generator of the multiplicative group, so every
//! non-zero element is a power x^i with 0 <= i < 255. The lookup tables
//! EXP (power to element) and LOG (element to power) turn a multiplication
//! into an addition of powers modulo 255.
//!
//! Both tables are computed at compile time. They are never rebuilt and can be
//! read from any number of threads.
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

use crate::EncodeError;

/// Lower byte of the field polynomial 0x11D.
pub const REDUCTION: u16 = 0x1D;

/// Compute two lookup tables for GF(256).
const fn compute_exp_log() -> ([u8; 255], [u8; 256]) {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];
    let mut p: u16 = 1; // polynomial representation
    let mut i: usize = 0; // power
    while i < 255 {
        exp[i] = p as u8;
        log[p as usize] = i as u8;

        // multiply by x and fold the carry back in
        p <<= 1;
        if p >= 256 {
            p = (p & 0xFF) ^ REDUCTION;
        }

        i += 1;
    }
    (exp, log)
}

/// Lookup table to convert a power i of the generator x into the element x^i.
const EXP: [u8; 255] = compute_exp_log().0;

/// Lookup table to convert a non-zero element into its power.
///
/// The entry for 0 is meaningless, use [GF::log] which checks for it.
const LOG: [u8; 256] = compute_exp_log().1;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GF(pub u8);

impl GF {
    /// Get x^e. The exponent is taken modulo 255.
    pub fn exp(e: usize) -> Self {
        GF(EXP[e % 255])
    }

    /// Get the power i with x^i = self.
    ///
    /// Zero is no power of x, asking for its logarithm is an error.
    pub fn log(self) -> Result<usize, EncodeError> {
        if self.0 == 0 {
            return Err(EncodeError::LogOfZero);
        }
        Ok(LOG[self.0 as usize] as usize)
    }
}

impl std::fmt::Debug for GF {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{}₂₅₆", self.0))
    }
}

impl Add<GF> for GF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        GF(self.0 ^ rhs.0)
    }
}

impl AddAssign<GF> for GF {
    fn add_assign(&mut self, rhs: GF) {
        *self = *self + rhs;
    }
}

impl Sub<GF> for GF {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl Mul<GF> for GF {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return GF(0);
        }
        let ia = LOG[self.0 as usize] as usize;
        let ib = LOG[rhs.0 as usize] as usize;
        GF(EXP[(ia + ib) % 255])
    }
}

impl MulAssign<GF> for GF {
    fn mul_assign(&mut self, rhs: GF) {
        *self = *self * rhs;
    }
}

impl From<GF> for u8 {
    fn from(a: GF) -> u8 {
        a.0
    }
}

impl From<u8> for GF {
    fn from(i: u8) -> Self {
        GF(i)
    }
}

#[test]
fn sanity_check_tables() {
    use std::collections::HashSet;

    let exp: HashSet<u8> = EXP.iter().cloned().collect();
    assert_eq!(exp.len(), EXP.len());
    assert!(!exp.contains(&0));

    let log: HashSet<u8> = LOG[1..].iter().cloned().collect();
    assert_eq!(log.len(), LOG.len() - 1);
}

#[test]
fn exp_log_round_trip() {
    for a in 1..=255u8 {
        let e = GF(a).log().unwrap();
        assert_eq!(GF::exp(e), GF(a));
    }
    for e in 0..255 {
        assert_eq!(GF::exp(e).log().unwrap(), e);
    }
    assert_eq!(GF::exp(255), GF(1));
}

#[test]
fn log_of_zero() {
    assert_eq!(GF(0).log(), Err(EncodeError::LogOfZero));
}

#[test]
fn known_powers() {
    // first reduction: x^8 = x^4 + x^3 + x^2 + 1
    assert_eq!(GF::exp(7), GF(128));
    assert_eq!(GF::exp(8), GF(29));
    assert_eq!(GF::exp(9), GF(58));
    assert_eq!(GF::exp(25), GF(3));
}

#[test]
fn gf256_mul() {
    assert_eq!(GF(123) * GF(1), GF(123));
    assert_eq!(GF(234) * GF(0), GF(0));
    assert_eq!(GF(0) * GF(23), GF(0));
    assert_eq!(GF(2) * GF(128), GF(29));
    let mut a = GF(1);
    for i in 0..300 {
        assert_eq!(GF::exp(i), a);
        a *= GF(2);
    }
}

#[test]
fn gf256_mul_commutes_and_distributes() {
    for a in (0..=255u8).step_by(3) {
        for b in (0..=255u8).step_by(5) {
            assert_eq!(GF(a) * GF(b), GF(b) * GF(a));
            for c in [0u8, 1, 2, 29, 142, 255] {
                assert_eq!(GF(a) * (GF(b) + GF(c)), GF(a) * GF(b) + GF(a) * GF(c));
            }
        }
    }
}

#[test]
fn test_sub_is_add() {
    for a in 0..=255u8 {
        let a = GF(a);
        assert_eq!(a - a, GF(0));
        assert_eq!(a + a, GF(0));
    }
}
