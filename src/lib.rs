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

//! Low level cryptographic primitives used by the multi-party ECDSA stack:
//!
//! - [`BigInt`]: signed arbitrary precision integer with full modular
//!   arithmetic (inversion, exponentiation, square roots, Euclidean
//!   algorithms, primality, Jacobi symbol) and the exact byte level
//!   serialization contracts the protocols depend on.
//! - [`arithmetic::traits::Samplable`]: uniformly distributed integers and
//!   probable primes drawn from the operating system entropy source by
//!   rejection sampling.
//! - [`elliptic::curves`]: the fixed curve parameter table and a [`Point`]
//!   type covering both short Weierstrass curves (secp256k1, P-256, and
//!   optionally the Stark curve) and the twisted Edwards curve Ed25519
//!   behind one interface.
//!
//! Everything here is a plain value type. The only process wide state is the
//! set of named [`BigInt`] constants and the curve parameter records, both
//! built once on first use and read-only afterwards.

pub mod arithmetic;
pub mod elliptic;
pub mod errors;

pub use crate::arithmetic::BigInt;
pub use crate::elliptic::curves::{CurveId, Point};
pub use crate::errors::{CryptoError, Result};

#[cfg(test)]
#[macro_export]
macro_rules! test_for_all_curves {
    (#[should_panic] $fn: ident) => {
        crate::test_for_all_curves!([#[should_panic]] $fn);
    };
    ($fn: ident) => {
        crate::test_for_all_curves!([] $fn);
    };
    ([$($attrs:tt)*] $fn: ident) => {
        paste::paste!{
            #[test]
            $($attrs)*
            fn [<$fn _secp256k1>]() {
                $fn($crate::elliptic::curves::CurveId::Secp256k1)
            }
            #[test]
            $($attrs)*
            fn [<$fn _p256>]() {
                $fn($crate::elliptic::curves::CurveId::P256)
            }
            #[cfg(feature = "stark")]
            #[test]
            $($attrs)*
            fn [<$fn _stark>]() {
                $fn($crate::elliptic::curves::CurveId::Stark)
            }
            #[test]
            $($attrs)*
            fn [<$fn _ed25519>]() {
                $fn($crate::elliptic::curves::CurveId::Ed25519)
            }
        }
    };
}
