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

use crate::errors::Result;

/// Conversions between [`BigInt`](super::BigInt) and the wire formats the
/// protocols depend on. The byte and string forms are bit-for-bit contracts:
/// other parties parse them verbatim.
pub trait Converter: Sized {
    /// Hex form of the signed value. Always an even number of digits for
    /// non-zero values, left zero-padded when needed (`5` -> `"05"`,
    /// `-2` -> `"-02"`). The zero value encodes as `"0"`.
    fn to_hex(&self) -> String;
    fn from_hex(value: &str) -> Result<Self>;

    /// Standard signed decimal, no padding. `"-0"` parses to zero.
    fn to_dec_str(&self) -> String;
    fn from_dec_str(value: &str) -> Result<Self>;

    /// Parses a signed string in the given radix (2, 10 and 16 are the
    /// radices the protocols use).
    fn from_str_radix(value: &str, radix: u32) -> Result<Self>;

    /// Minimal length big-endian encoding of the magnitude. Zero encodes as
    /// the empty buffer.
    fn to_bytes_be(&self) -> Vec<u8>;
    fn to_bytes_le(&self) -> Vec<u8>;
    fn from_bytes_be(bytes: &[u8]) -> Self;
    fn from_bytes_le(bytes: &[u8]) -> Self;

    /// Fixed width form: left zero-padded when the magnitude is shorter than
    /// 32 bytes and silently truncated to the low 32 bytes when it is longer.
    /// The truncation is deliberate wire behaviour, not an error.
    fn to_bytes32_be(&self) -> [u8; 32];
    /// Little-endian counterpart of [`Converter::to_bytes32_be`]: right
    /// zero-padded, truncated to the low 32 bytes.
    fn to_bytes32_le(&self) -> [u8; 32];
}

/// Modular arithmetic. `modulus` follows the Euclidean convention and always
/// returns a value in `[0, |m|)`; this is *not* the same as the truncated
/// remainder of division, and callers depend on both behaviours.
pub trait Modulo: Sized {
    fn modulus(&self, m: &Self) -> Result<Self>;
    fn mod_add(a: &Self, b: &Self, modulus: &Self) -> Self;
    fn mod_sub(a: &Self, b: &Self, modulus: &Self) -> Self;
    fn mod_mul(a: &Self, b: &Self, modulus: &Self) -> Self;
    /// Modular exponentiation. A negative exponent is handled by inverting
    /// the base first, so it fails with `NoInverseExists` when the base is
    /// not invertible.
    fn mod_pow(base: &Self, exponent: &Self, modulus: &Self) -> Result<Self>;
    /// Fails with `NoInverseExists` unless `gcd(self, m) = 1`.
    fn mod_inv(&self, m: &Self) -> Result<Self>;
}

/// Integer and modular square roots.
pub trait Roots: Sized {
    /// Floor square root, exact for all non-negative inputs. Panics on
    /// negative input.
    fn sqrt(&self) -> Self;
    /// Euler's criterion: whether `self` has a square root modulo the odd
    /// prime `p`.
    fn exist_mod_sqrt(&self, p: &Self) -> bool;
    /// A root `r` with `r^2 = self (mod p)`. Callers are expected to check
    /// [`Roots::exist_mod_sqrt`] first; a non-residue fails with
    /// `NoSquareRootExists`.
    fn mod_sqrt(&self, p: &Self) -> Result<Self>;
}

/// Euclidean algorithms.
pub trait EGCD: Sized {
    /// Returns `(x, y, d)` with `a*x + b*y = d = gcd(a, b)` and `d >= 0`,
    /// sign-corrected for negative inputs.
    fn egcd(a: &Self, b: &Self) -> (Self, Self, Self);
    fn gcd(&self, other: &Self) -> Self;
    /// `lcm(a, b) = a * b / gcd(a, b)`.
    fn lcm(&self, other: &Self) -> Self;
}

/// Probabilistic primality and quadratic residue tests.
pub trait Primes: Sized {
    /// Miller-Rabin test preceded by a small prime sieve. `rounds` bounds the
    /// number of witness rounds.
    fn is_probable_prime(&self, rounds: u32) -> bool;
    /// Jacobi symbol `(a/n)` in `{-1, 0, 1}` by the reciprocity-law
    /// iteration. `n` must be odd and positive.
    fn jacobi(a: &Self, n: &Self) -> i8;
}

/// Bit level access. Bit 0 is the least significant bit of the magnitude;
/// the sign is untouched.
pub trait BitManipulation: Sized {
    fn set_bit(&mut self, bit: usize, bit_val: bool);
    fn test_bit(&self, bit: usize) -> bool;
    /// Number of significant bits of the magnitude; 0 for the value zero.
    fn bit_length(&self) -> usize;
    /// Number of significant bytes of the magnitude; 0 for the value zero.
    fn byte_length(&self) -> usize;
}

pub trait NumberTests {
    fn is_zero(&self) -> bool;
    fn is_negative(&self) -> bool;
    fn is_even(&self) -> bool;
}

/// Uniform sampling from the operating system entropy source. Every draw is
/// rejection sampled, so the loops terminate with probability one and there
/// is no retry budget to exhaust; the only surfaced failure is
/// `RandomSourceFailure` from the entropy source itself.
pub trait Samplable: Sized {
    /// Uniform in `[1, 2^bit_size)`: the top byte is masked down to
    /// `bit_size` bits and zero draws are rejected.
    fn sample(bit_size: usize) -> Result<Self>;
    /// Like [`Samplable::sample`] but resamples until the top bit is set, so
    /// the value has exactly `bit_size` significant bits.
    fn strict_sample(bit_size: usize) -> Result<Self>;
    /// Uniform in `[0, max)` by rejection at `max`'s bit length (no modulo
    /// bias).
    fn sample_below(max: &Self) -> Result<Self>;
    /// Uniform in `[min, max)`.
    fn sample_range(min: &Self, max: &Self) -> Result<Self>;
    /// Resamples `sample_below(max)` until the draw is coprime to `max`.
    fn sample_coprime_below(max: &Self) -> Result<Self>;
    /// Uniform magnitude below `limit` with a uniformly random sign.
    fn sample_sym_interval(limit: &Self) -> Result<Self>;
    /// Uniform magnitude of at most `bit_size` bits with a uniformly random
    /// sign.
    fn sample_sym_interval_bits(bit_size: usize) -> Result<Self>;
    /// Probable prime of at most `bit_size` bits.
    fn sample_prime(bit_size: usize) -> Result<Self>;
    /// Probable prime with the top bit set (exactly `bit_size` bits).
    fn strict_sample_prime(bit_size: usize) -> Result<Self>;
    /// Safe probable prime `p` (both `p` and `(p-1)/2` pass the test).
    fn sample_safe_prime(bit_size: usize) -> Result<Self>;
    fn strict_sample_safe_prime(bit_size: usize) -> Result<Self>;
}
