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

//! Fixed domain parameters for every supported curve. The records are built
//! once on first use from hard coded constants and are read-only afterwards;
//! no external input reaches this table.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::arithmetic::traits::Converter;
use crate::arithmetic::BigInt;
use crate::errors::{CryptoError, Result};

/// Identifier of a supported curve. A closed enumeration: parameter lookup
/// is total, and the fallible boundary is decoding an id from the wire
/// ([`TryFrom<u8>`] / [`CurveId::from_name`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    Secp256k1,
    P256,
    #[cfg(feature = "stark")]
    Stark,
    Ed25519,
}

impl CurveId {
    pub fn name(&self) -> &'static str {
        match self {
            CurveId::Secp256k1 => "secp256k1",
            CurveId::P256 => "p256",
            #[cfg(feature = "stark")]
            CurveId::Stark => "stark",
            CurveId::Ed25519 => "ed25519",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "secp256k1" => Ok(CurveId::Secp256k1),
            "p256" => Ok(CurveId::P256),
            #[cfg(feature = "stark")]
            "stark" => Ok(CurveId::Stark),
            "ed25519" => Ok(CurveId::Ed25519),
            _ => Err(CryptoError::InvalidCurveType),
        }
    }
}

impl TryFrom<u8> for CurveId {
    type Error = CryptoError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(CurveId::Secp256k1),
            2 => Ok(CurveId::P256),
            #[cfg(feature = "stark")]
            3 => Ok(CurveId::Stark),
            4 => Ok(CurveId::Ed25519),
            _ => Err(CryptoError::InvalidCurveType),
        }
    }
}

/// The two point algebras a [`super::Point`] can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveForm {
    /// `y^2 = x^3 + a*x + b` over GF(p).
    ShortWeierstrass,
    /// `a*x^2 + y^2 = 1 + d*x^2*y^2` over GF(p) (the `c` coefficient is 1
    /// for every supported curve and is not stored).
    TwistedEdwards,
}

/// Immutable domain parameters of one curve.
#[derive(Clone, Debug)]
pub struct CurveParams {
    pub curve: CurveId,
    pub form: CurveForm,
    /// Prime modulus of the base field.
    pub p: BigInt,
    /// Weierstrass `a` coefficient, or the Edwards `a` coefficient.
    pub a: BigInt,
    /// Weierstrass `b` coefficient; zero for Edwards curves.
    pub b: BigInt,
    /// Edwards `d` coefficient; zero for Weierstrass curves.
    pub d: BigInt,
    /// Base point.
    pub gx: BigInt,
    pub gy: BigInt,
    /// Order of the prime subgroup generated by the base point.
    pub n: BigInt,
    /// Cofactor.
    pub h: BigInt,
}

fn hx(s: &str) -> BigInt {
    BigInt::from_hex(s).expect("curve constant is valid hex")
}

lazy_static::lazy_static! {
    static ref SECP256K1: CurveParams = CurveParams {
        curve: CurveId::Secp256k1,
        form: CurveForm::ShortWeierstrass,
        p: hx("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        a: BigInt::zero(),
        b: hx("07"),
        d: BigInt::zero(),
        gx: hx("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        gy: hx("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        n: hx("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        h: BigInt::one(),
    };

    static ref P256: CurveParams = CurveParams {
        curve: CurveId::P256,
        form: CurveForm::ShortWeierstrass,
        p: hx("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        a: hx("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
        b: hx("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        d: BigInt::zero(),
        gx: hx("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        gy: hx("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        n: hx("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
        h: BigInt::one(),
    };
}

#[cfg(feature = "stark")]
lazy_static::lazy_static! {
    static ref STARK: CurveParams = CurveParams {
        curve: CurveId::Stark,
        form: CurveForm::ShortWeierstrass,
        p: hx("0800000000000011000000000000000000000000000000000000000000000001"),
        a: BigInt::one(),
        b: hx("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89"),
        d: BigInt::zero(),
        gx: hx("01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca"),
        gy: hx("005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f"),
        n: hx("0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f"),
        h: BigInt::one(),
    };
}

lazy_static::lazy_static! {
    static ref ED25519: CurveParams = CurveParams {
        curve: CurveId::Ed25519,
        form: CurveForm::TwistedEdwards,
        p: hx("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        // a = -1 mod p
        a: hx("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffec"),
        b: BigInt::zero(),
        d: hx("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"),
        gx: hx("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
        gy: hx("6666666666666666666666666666666666666666666666666666666666666658"),
        n: hx("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        h: hx("08"),
    };
}

/// Domain parameters of `curve`. Total over the closed [`CurveId`] enum.
pub fn get_curve_params(curve: CurveId) -> &'static CurveParams {
    match curve {
        CurveId::Secp256k1 => &*SECP256K1,
        CurveId::P256 => &*P256,
        #[cfg(feature = "stark")]
        CurveId::Stark => &*STARK,
        CurveId::Ed25519 => &*ED25519,
    }
}
