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

//! Uniform sampling over the operating system entropy source. All loops are
//! rejection sampling: they terminate with probability one and carry no retry
//! budget. `OsRng` is safe to use from multiple threads concurrently.

use rand::rngs::OsRng;
use rand::RngCore;

use super::big_native::BigInt;
use super::traits::{BitManipulation, Converter, NumberTests, Primes, Samplable, EGCD};
use crate::errors::{CryptoError, Result};

/// Miller-Rabin witness rounds used by the prime samplers.
const PRIME_TEST_ROUNDS: u32 = 25;

/// `n` cryptographically secure random bytes straight from the OS source.
pub fn random_bytes(n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::RandomSourceFailure(e.to_string()))?;
    Ok(buf)
}

/// One draw of `bit_size` masked bits, zero included.
fn sample_masked(bit_size: usize) -> Result<BigInt> {
    let n_bytes = (bit_size + 7) / 8;
    let mask = 0xffu8 >> (n_bytes * 8 - bit_size);
    let mut buf = random_bytes(n_bytes)?;
    buf[0] &= mask;
    Ok(BigInt::from_bytes_be(&buf))
}

fn random_sign() -> Result<bool> {
    Ok(random_bytes(1)?[0] & 1 == 1)
}

impl Samplable for BigInt {
    fn sample(bit_size: usize) -> Result<Self> {
        assert!(bit_size > 0, "cannot sample zero bits");
        loop {
            let candidate = sample_masked(bit_size)?;
            if !candidate.is_zero() {
                return Ok(candidate);
            }
        }
    }

    fn strict_sample(bit_size: usize) -> Result<Self> {
        assert!(bit_size > 0, "cannot sample zero bits");
        loop {
            let candidate = Self::sample(bit_size)?;
            if candidate.test_bit(bit_size - 1) {
                return Ok(candidate);
            }
        }
    }

    fn sample_below(max: &Self) -> Result<Self> {
        assert!(*max > BigInt::zero(), "sample_below requires a positive bound");
        let bits = max.bit_length();
        loop {
            let candidate = sample_masked(bits)?;
            if candidate < *max {
                return Ok(candidate);
            }
        }
    }

    fn sample_range(min: &Self, max: &Self) -> Result<Self> {
        assert!(max > min, "sample_range requires min < max");
        Ok(min + Self::sample_below(&(max - min))?)
    }

    fn sample_coprime_below(max: &Self) -> Result<Self> {
        assert!(*max > BigInt::one(), "sample_coprime_below requires max > 1");
        loop {
            let candidate = Self::sample_below(max)?;
            if candidate.gcd(max) == BigInt::one() {
                return Ok(candidate);
            }
        }
    }

    fn sample_sym_interval(limit: &Self) -> Result<Self> {
        let magnitude = Self::sample_below(limit)?;
        Ok(if random_sign()? { -magnitude } else { magnitude })
    }

    fn sample_sym_interval_bits(bit_size: usize) -> Result<Self> {
        let magnitude = Self::sample(bit_size)?;
        Ok(if random_sign()? { -magnitude } else { magnitude })
    }

    fn sample_prime(bit_size: usize) -> Result<Self> {
        assert!(bit_size >= 2, "no primes below 2 bits");
        loop {
            let mut candidate = Self::sample(bit_size)?;
            candidate.set_bit(0, true);
            if candidate.is_probable_prime(PRIME_TEST_ROUNDS) {
                return Ok(candidate);
            }
        }
    }

    fn strict_sample_prime(bit_size: usize) -> Result<Self> {
        assert!(bit_size >= 2, "no primes below 2 bits");
        loop {
            let mut candidate = Self::strict_sample(bit_size)?;
            candidate.set_bit(0, true);
            if candidate.is_probable_prime(PRIME_TEST_ROUNDS) {
                return Ok(candidate);
            }
        }
    }

    fn sample_safe_prime(bit_size: usize) -> Result<Self> {
        assert!(bit_size >= 3, "no safe primes below 3 bits");
        loop {
            let candidate = Self::sample_prime(bit_size)?;
            let half = (&candidate - BigInt::one()) >> 1;
            if half.is_probable_prime(PRIME_TEST_ROUNDS) {
                return Ok(candidate);
            }
        }
    }

    fn strict_sample_safe_prime(bit_size: usize) -> Result<Self> {
        assert!(bit_size >= 3, "no safe primes below 3 bits");
        loop {
            let candidate = Self::strict_sample_prime(bit_size)?;
            let half = (&candidate - BigInt::one()) >> 1;
            if half.is_probable_prime(PRIME_TEST_ROUNDS) {
                return Ok(candidate);
            }
        }
    }
}
