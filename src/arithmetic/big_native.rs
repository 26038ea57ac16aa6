/*
    Cryptography utilities

    Copyright 2018 by Kzen Networks

    This file is part of Cryptography utilities library
    (https://github.com/KZen-networks/cryptography-utils)

    Cryptography utilities is free software: you can redistribute
    it and/or modify it under the terms of the GNU General Public
    License as published by the Free Software Foundation, either
    version 3 of the License, or (at your option) any later version.

    @license GPL-3.0+ <https://github.com/KZen-networks/cryptography-utils/blob/master/LICENSE>
*/

//! Signed arbitrary precision integer backed by `num-bigint`, wrapped behind
//! our own type so the backend stays swappable and the wire contracts stay
//! under our control.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Shl, Shr, Sub, SubAssign,
};

use num_bigint::{BigInt as BN, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::traits::{
    BitManipulation, Converter, Modulo, NumberTests, Primes, Roots, EGCD,
};
use crate::errors::{CryptoError, Result};

lazy_static::lazy_static! {
    static ref ZERO: BigInt = BigInt(BN::zero());
    static ref ONE: BigInt = BigInt(BN::one());
    static ref TWO: BigInt = BigInt(BN::from(2u64));
    static ref THREE: BigInt = BigInt(BN::from(3u64));
    static ref FOUR: BigInt = BigInt(BN::from(4u64));
    static ref FIVE: BigInt = BigInt(BN::from(5u64));
    static ref MINUS_ONE: BigInt = BigInt(BN::from(-1i64));
}

const SMALL_PRIMES: [u64; 64] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67,
    71, 73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149,
    151, 157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223, 227,
    229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307, 311,
];

/// Signed integer of unbounded magnitude.
///
/// Zero carries no sign (`+0` and `-0` compare equal), there is no redundant
/// leading zero digit, and [`BitManipulation::bit_length`] measures the
/// magnitude only. Values are immutable from the caller's perspective:
/// operations return new values, and the in-place operators are observably
/// equivalent to compute-then-replace. `std::cmp::max`/`min` and
/// `std::mem::swap` apply as to any plain value type.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInt(BN);

impl BigInt {
    pub fn zero() -> BigInt {
        ZERO.clone()
    }

    pub fn one() -> BigInt {
        ONE.clone()
    }

    pub fn two() -> BigInt {
        TWO.clone()
    }

    pub fn three() -> BigInt {
        THREE.clone()
    }

    pub fn four() -> BigInt {
        FOUR.clone()
    }

    pub fn five() -> BigInt {
        FIVE.clone()
    }

    pub fn minus_one() -> BigInt {
        MINUS_ONE.clone()
    }

    pub fn abs(&self) -> BigInt {
        BigInt(self.0.abs())
    }

    /// `self` raised to a small native power (plain, non-modular).
    pub fn pow(&self, exponent: u32) -> BigInt {
        BigInt(Pow::pow(&self.0, exponent))
    }

    /// Truncated (C-style) division: `self = q * divisor + r` where `r` has
    /// the sign of `self` or is zero. The `/` and `%` operators follow the
    /// same convention but panic on a zero divisor; this form surfaces
    /// `DivisionByZero` instead.
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt)> {
        if divisor.0.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        let (q, r) = self.0.div_rem(&divisor.0);
        Ok((BigInt(q), BigInt(r)))
    }
}

impl Converter for BigInt {
    fn to_hex(&self) -> String {
        if self.0.is_zero() {
            return "0".to_string();
        }
        let mag = self.0.magnitude().to_str_radix(16);
        let mut s = String::with_capacity(mag.len() + 2);
        if self.0.is_negative() {
            s.push('-');
        }
        if mag.len() % 2 == 1 {
            s.push('0');
        }
        s.push_str(&mag);
        s
    }

    fn from_hex(value: &str) -> Result<Self> {
        Self::from_str_radix(value, 16)
    }

    fn to_dec_str(&self) -> String {
        self.0.to_str_radix(10)
    }

    fn from_dec_str(value: &str) -> Result<Self> {
        Self::from_str_radix(value, 10)
    }

    fn from_str_radix(value: &str, radix: u32) -> Result<Self> {
        BN::parse_bytes(value.trim().as_bytes(), radix)
            .map(BigInt)
            .ok_or(CryptoError::InvalidEncoding("malformed integer string"))
    }

    fn to_bytes_be(&self) -> Vec<u8> {
        if self.0.is_zero() {
            return Vec::new();
        }
        self.0.magnitude().to_bytes_be()
    }

    fn to_bytes_le(&self) -> Vec<u8> {
        if self.0.is_zero() {
            return Vec::new();
        }
        self.0.magnitude().to_bytes_le()
    }

    fn from_bytes_be(bytes: &[u8]) -> Self {
        BigInt(BN::from_biguint(Sign::Plus, BigUint::from_bytes_be(bytes)))
    }

    fn from_bytes_le(bytes: &[u8]) -> Self {
        BigInt(BN::from_biguint(Sign::Plus, BigUint::from_bytes_le(bytes)))
    }

    fn to_bytes32_be(&self) -> [u8; 32] {
        let bytes = self.to_bytes_be();
        let mut out = [0u8; 32];
        if bytes.len() >= 32 {
            out.copy_from_slice(&bytes[bytes.len() - 32..]);
        } else {
            out[32 - bytes.len()..].copy_from_slice(&bytes);
        }
        out
    }

    fn to_bytes32_le(&self) -> [u8; 32] {
        let bytes = self.to_bytes_le();
        let mut out = [0u8; 32];
        if bytes.len() >= 32 {
            out.copy_from_slice(&bytes[..32]);
        } else {
            out[..bytes.len()].copy_from_slice(&bytes);
        }
        out
    }
}

impl Modulo for BigInt {
    fn modulus(&self, m: &Self) -> Result<Self> {
        if m.0.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        Ok(BigInt(self.0.mod_floor(&m.0.abs())))
    }

    fn mod_add(a: &Self, b: &Self, modulus: &Self) -> Self {
        assert!(!modulus.0.is_zero(), "modulus is zero");
        BigInt((&a.0 + &b.0).mod_floor(&modulus.0.abs()))
    }

    fn mod_sub(a: &Self, b: &Self, modulus: &Self) -> Self {
        assert!(!modulus.0.is_zero(), "modulus is zero");
        BigInt((&a.0 - &b.0).mod_floor(&modulus.0.abs()))
    }

    fn mod_mul(a: &Self, b: &Self, modulus: &Self) -> Self {
        assert!(!modulus.0.is_zero(), "modulus is zero");
        BigInt((&a.0 * &b.0).mod_floor(&modulus.0.abs()))
    }

    fn mod_pow(base: &Self, exponent: &Self, modulus: &Self) -> Result<Self> {
        if modulus.0.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        let m = modulus.0.abs();
        if exponent.0.is_negative() {
            let inv = base.mod_inv(modulus)?;
            Ok(BigInt(inv.0.modpow(&exponent.0.abs(), &m)))
        } else {
            Ok(BigInt(base.0.mod_floor(&m).modpow(&exponent.0, &m)))
        }
    }

    fn mod_inv(&self, m: &Self) -> Result<Self> {
        if m.0.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        let m_abs = BigInt(m.0.abs());
        let (x, _, d) = BigInt::egcd(self, &m_abs);
        if d != *ONE {
            return Err(CryptoError::NoInverseExists);
        }
        x.modulus(&m_abs)
    }
}

impl Roots for BigInt {
    fn sqrt(&self) -> Self {
        assert!(!self.0.is_negative(), "sqrt of a negative value");
        if self.0.is_zero() {
            return BigInt::zero();
        }
        // Digit-by-digit binary method: scan one result bit per step from
        // the highest even bit position downwards.
        let mut num = self.0.clone();
        let mut res = BN::zero();
        let bits = self.0.bits() as usize;
        let mut bit = BN::one() << (2 * ((bits - 1) / 2));
        while !bit.is_zero() {
            let probe = &res + &bit;
            if num >= probe {
                num -= probe;
                res = (&res >> 1usize) + &bit;
            } else {
                res = &res >> 1usize;
            }
            bit = &bit >> 2usize;
        }
        BigInt(res)
    }

    fn exist_mod_sqrt(&self, p: &Self) -> bool {
        assert!(p.0.is_positive(), "modulus must be positive");
        let a = self.0.mod_floor(&p.0);
        if a.is_zero() {
            return true;
        }
        if p.0 == TWO.0 {
            return true;
        }
        let e = (&p.0 - BN::one()) >> 1usize;
        a.modpow(&e, &p.0).is_one()
    }

    fn mod_sqrt(&self, p: &Self) -> Result<Self> {
        assert!(p.0.is_positive(), "modulus must be positive");
        let p_bn = &p.0;
        let a = self.0.mod_floor(p_bn);
        if a.is_zero() {
            return Ok(BigInt::zero());
        }
        if *p_bn == TWO.0 {
            return Ok(BigInt(a));
        }
        if !self.exist_mod_sqrt(p) {
            return Err(CryptoError::NoSquareRootExists);
        }
        let one = BN::one();
        if p_bn.mod_floor(&FOUR.0) == THREE.0 {
            let e = (p_bn + &one) >> 2usize;
            return Ok(BigInt(a.modpow(&e, p_bn)));
        }
        // Tonelli-Shanks. p - 1 = q * 2^s with q odd.
        let mut q = p_bn - &one;
        let mut s = 0usize;
        while q.is_even() {
            q = &q >> 1usize;
            s += 1;
        }
        let mut z = TWO.0.clone();
        while BigInt(z.clone()).exist_mod_sqrt(p) {
            z += &one;
        }
        let mut m = s;
        let mut c = z.modpow(&q, p_bn);
        let mut t = a.modpow(&q, p_bn);
        let mut r = a.modpow(&((&q + &one) >> 1usize), p_bn);
        while !t.is_one() {
            let mut i = 0usize;
            let mut t2 = t.clone();
            while !t2.is_one() {
                t2 = (&t2 * &t2).mod_floor(p_bn);
                i += 1;
            }
            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = (&b * &b).mod_floor(p_bn);
            }
            r = (&r * &b).mod_floor(p_bn);
            c = (&b * &b).mod_floor(p_bn);
            t = (&t * &c).mod_floor(p_bn);
            m = i;
        }
        Ok(BigInt(r))
    }
}

impl EGCD for BigInt {
    fn egcd(a: &Self, b: &Self) -> (Self, Self, Self) {
        let (mut old_r, mut r) = (a.0.clone(), b.0.clone());
        let (mut old_s, mut s) = (BN::one(), BN::zero());
        let (mut old_t, mut t) = (BN::zero(), BN::one());
        while !r.is_zero() {
            let q = &old_r / &r;
            let new_r = &old_r - &q * &r;
            old_r = r;
            r = new_r;
            let new_s = &old_s - &q * &s;
            old_s = s;
            s = new_s;
            let new_t = &old_t - &q * &t;
            old_t = t;
            t = new_t;
        }
        if old_r.is_negative() {
            old_r = -old_r;
            old_s = -old_s;
            old_t = -old_t;
        }
        (BigInt(old_s), BigInt(old_t), BigInt(old_r))
    }

    fn gcd(&self, other: &Self) -> Self {
        BigInt(self.0.gcd(&other.0))
    }

    fn lcm(&self, other: &Self) -> Self {
        BigInt(self.0.lcm(&other.0))
    }
}

impl Primes for BigInt {
    fn is_probable_prime(&self, rounds: u32) -> bool {
        let n = &self.0;
        if n < &TWO.0 {
            return false;
        }
        for &sp in SMALL_PRIMES.iter() {
            let spn = BN::from(sp);
            if *n == spn {
                return true;
            }
            if n.mod_floor(&spn).is_zero() {
                return false;
            }
        }
        // Miller-Rabin over the fixed prime witness set; `rounds` bounds the
        // number of witnesses tried.
        let one = BN::one();
        let n_minus_1 = n - &one;
        let mut d = n_minus_1.clone();
        let mut s = 0usize;
        while d.is_even() {
            d = &d >> 1usize;
            s += 1;
        }
        let witness_count = (rounds as usize).min(SMALL_PRIMES.len()).max(1);
        'witness: for &base in SMALL_PRIMES.iter().take(witness_count) {
            let mut x = BN::from(base).modpow(&d, n);
            if x.is_one() || x == n_minus_1 {
                continue;
            }
            for _ in 0..s - 1 {
                x = (&x * &x).mod_floor(n);
                if x == n_minus_1 {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }

    fn jacobi(a: &Self, n: &Self) -> i8 {
        assert!(
            n.0.is_positive() && n.0.is_odd(),
            "jacobi symbol is defined for odd positive n"
        );
        let eight = BN::from(8u64);
        let mut a = a.0.mod_floor(&n.0);
        let mut n = n.0.clone();
        let mut t = 1i8;
        while !a.is_zero() {
            while a.is_even() {
                a = &a >> 1usize;
                let r = n.mod_floor(&eight);
                if r == THREE.0 || r == FIVE.0 {
                    t = -t;
                }
            }
            std::mem::swap(&mut a, &mut n);
            if a.mod_floor(&FOUR.0) == THREE.0 && n.mod_floor(&FOUR.0) == THREE.0 {
                t = -t;
            }
            a = a.mod_floor(&n);
        }
        if n.is_one() {
            t
        } else {
            0
        }
    }
}

impl BitManipulation for BigInt {
    fn set_bit(&mut self, bit: usize, bit_val: bool) {
        let mask = BigUint::one() << bit;
        let mag = self.0.magnitude().clone();
        let mag = if bit_val {
            mag | mask
        } else if self.test_bit(bit) {
            mag - mask
        } else {
            mag
        };
        let sign = if self.0.is_negative() && !mag.is_zero() {
            Sign::Minus
        } else {
            Sign::Plus
        };
        self.0 = BN::from_biguint(sign, mag);
    }

    fn test_bit(&self, bit: usize) -> bool {
        ((self.0.magnitude() >> bit) & BigUint::one()) == BigUint::one()
    }

    fn bit_length(&self) -> usize {
        self.0.bits() as usize
    }

    fn byte_length(&self) -> usize {
        (self.bit_length() + 7) / 8
    }
}

impl NumberTests for BigInt {
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    fn is_even(&self) -> bool {
        self.0.is_even()
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                BigInt(BN::from(value))
            }
        }
    )*};
}

impl_from_primitive!(u16, u32, u64, usize, i32, i64);

/// Big-endian magnitude, matching [`Converter::from_bytes_be`].
impl From<&[u8]> for BigInt {
    fn from(bytes: &[u8]) -> Self {
        BigInt::from_bytes_be(bytes)
    }
}

impl TryFrom<&BigInt> for u64 {
    type Error = CryptoError;

    fn try_from(value: &BigInt) -> Result<u64> {
        value
            .0
            .to_u64()
            .ok_or(CryptoError::InvalidEncoding("value does not fit in u64"))
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = CryptoError;

    fn try_from(value: &BigInt) -> Result<i64> {
        value
            .0
            .to_i64()
            .ok_or(CryptoError::InvalidEncoding("value does not fit in i64"))
    }
}

macro_rules! impl_binop {
    ($trait:ident, $fn:ident) => {
        impl $trait for BigInt {
            type Output = BigInt;
            fn $fn(self, rhs: BigInt) -> BigInt {
                BigInt((self.0).$fn(rhs.0))
            }
        }
        impl<'a> $trait<&'a BigInt> for BigInt {
            type Output = BigInt;
            fn $fn(self, rhs: &BigInt) -> BigInt {
                BigInt((self.0).$fn(&rhs.0))
            }
        }
        impl<'a> $trait<BigInt> for &'a BigInt {
            type Output = BigInt;
            fn $fn(self, rhs: BigInt) -> BigInt {
                BigInt((&self.0).$fn(rhs.0))
            }
        }
        impl<'a, 'b> $trait<&'b BigInt> for &'a BigInt {
            type Output = BigInt;
            fn $fn(self, rhs: &BigInt) -> BigInt {
                BigInt((&self.0).$fn(&rhs.0))
            }
        }
        impl $trait<u64> for BigInt {
            type Output = BigInt;
            fn $fn(self, rhs: u64) -> BigInt {
                BigInt((self.0).$fn(BN::from(rhs)))
            }
        }
        impl<'a> $trait<u64> for &'a BigInt {
            type Output = BigInt;
            fn $fn(self, rhs: u64) -> BigInt {
                BigInt((&self.0).$fn(BN::from(rhs)))
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);
impl_binop!(Div, div);
impl_binop!(Rem, rem);

macro_rules! impl_assign_op {
    ($trait:ident, $fn:ident) => {
        impl $trait for BigInt {
            fn $fn(&mut self, rhs: BigInt) {
                (self.0).$fn(rhs.0)
            }
        }
        impl<'a> $trait<&'a BigInt> for BigInt {
            fn $fn(&mut self, rhs: &BigInt) {
                (self.0).$fn(&rhs.0)
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign);
impl_assign_op!(SubAssign, sub_assign);
impl_assign_op!(MulAssign, mul_assign);

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt(-self.0)
    }
}

impl<'a> Neg for &'a BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        BigInt(-&self.0)
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;
    fn shl(self, rhs: usize) -> BigInt {
        BigInt(self.0 << rhs)
    }
}

impl<'a> Shl<usize> for &'a BigInt {
    type Output = BigInt;
    fn shl(self, rhs: usize) -> BigInt {
        BigInt(&self.0 << rhs)
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;
    fn shr(self, rhs: usize) -> BigInt {
        BigInt(self.0 >> rhs)
    }
}

impl<'a> Shr<usize> for &'a BigInt {
    type Output = BigInt;
    fn shr(self, rhs: usize) -> BigInt {
        BigInt(&self.0 >> rhs)
    }
}

impl PartialEq<u64> for BigInt {
    fn eq(&self, other: &u64) -> bool {
        self.0 == BN::from(*other)
    }
}

impl PartialEq<i64> for BigInt {
    fn eq(&self, other: &i64) -> bool {
        self.0 == BN::from(*other)
    }
}

impl PartialOrd<u64> for BigInt {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        self.0.partial_cmp(&BN::from(*other))
    }
}

impl PartialOrd<i64> for BigInt {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.0.partial_cmp(&BN::from(*other))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BigIntVisitor;

        impl<'de> Visitor<'de> for BigIntVisitor {
            type Value = BigInt;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a hex encoded integer")
            }

            fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<BigInt, E> {
                BigInt::from_hex(s).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(BigIntVisitor)
    }
}
