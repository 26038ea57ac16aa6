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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Every failure mode of the crate. Nothing is recovered internally: each
/// error is surfaced to the immediate caller, which decides whether to retry.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CryptoError {
    #[error("division or modulo by zero")]
    DivisionByZero,

    #[error("no modular inverse exists: operand and modulus are not coprime")]
    NoInverseExists,

    #[error("no modular square root exists: value is a quadratic non-residue")]
    NoSquareRootExists,

    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    #[error("curve mismatch between operands")]
    CurveMismatch,

    #[error("invalid curve type")]
    InvalidCurveType,

    #[error("random source failure: {0}")]
    RandomSourceFailure(String),
}
