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

//! Elliptic curve point covering both supported algebras behind one
//! interface: affine short Weierstrass points with a distinguished infinity
//! state, and twisted Edwards points kept in their native 32 byte encoding
//! (y little-endian, top bit carrying x's parity) with coordinates derived
//! on demand.

use serde::de;
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::curve_params::{get_curve_params, CurveForm, CurveId, CurveParams};
use crate::arithmetic::traits::{BitManipulation, Converter, Modulo, NumberTests, Roots};
use crate::arithmetic::BigInt;
use crate::errors::{CryptoError, Result};

/// Native encoding of the Edwards identity (x = 0, y = 1).
const EDWARDS_IDENTITY: [u8; 32] = [
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
];

#[derive(Clone, Debug, PartialEq, Eq)]
enum PointData {
    Invalid,
    Weierstrass {
        curve: CurveId,
        x: BigInt,
        y: BigInt,
        infinity: bool,
    },
    Edwards {
        curve: CurveId,
        encoded: [u8; 32],
    },
}

/// A point on one of the supported curves, or the curve-less invalid
/// placeholder produced by [`Point::new`] and [`Point::reset`].
///
/// Every non-invalid point satisfies its curve's defining equation;
/// construction from untrusted coordinates or bytes validates first.
/// Operations between points of different curves fail with `CurveMismatch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    data: PointData,
}

fn edwards_encode(x: &BigInt, y: &BigInt) -> [u8; 32] {
    let mut out = y.to_bytes32_le();
    out[31] |= (x.test_bit(0) as u8) << 7;
    out
}

fn edwards_decode(encoded: &[u8; 32], cp: &CurveParams) -> Result<(BigInt, BigInt)> {
    let x_is_odd = encoded[31] >> 7 == 1;
    let mut y_bytes = *encoded;
    y_bytes[31] &= 0x7f;
    let y = BigInt::from_bytes_le(&y_bytes);
    if y >= cp.p {
        return Err(CryptoError::InvalidEncoding("edwards y coordinate out of range"));
    }
    let x = edwards_recover_x(&y, x_is_odd, cp)?;
    if x.is_zero() && x_is_odd {
        return Err(CryptoError::InvalidEncoding("edwards sign bit set for x = 0"));
    }
    Ok((x, y))
}

/// Solves `x^2 = (1 - y^2) / (a - d*y^2) mod p` and picks the root with the
/// requested parity.
fn edwards_recover_x(y: &BigInt, x_is_odd: bool, cp: &CurveParams) -> Result<BigInt> {
    let y2 = BigInt::mod_mul(y, y, &cp.p);
    let num = BigInt::mod_sub(&BigInt::one(), &y2, &cp.p);
    let den = BigInt::mod_sub(&cp.a, &BigInt::mod_mul(&cp.d, &y2, &cp.p), &cp.p);
    let den_inv = den
        .mod_inv(&cp.p)
        .map_err(|_| CryptoError::NoSquareRootExists)?;
    let x2 = BigInt::mod_mul(&num, &den_inv, &cp.p);
    if !x2.exist_mod_sqrt(&cp.p) {
        return Err(CryptoError::NoSquareRootExists);
    }
    let mut x = x2.mod_sqrt(&cp.p)?;
    if x.test_bit(0) != x_is_odd {
        x = BigInt::mod_sub(&BigInt::zero(), &x, &cp.p);
    }
    Ok(x)
}

/// Solves `y^2 = (1 - a*x^2) / (1 - d*x^2) mod p`.
fn edwards_recover_y(x: &BigInt, y_is_odd: bool, cp: &CurveParams) -> Result<BigInt> {
    let x2 = BigInt::mod_mul(x, x, &cp.p);
    let num = BigInt::mod_sub(&BigInt::one(), &BigInt::mod_mul(&cp.a, &x2, &cp.p), &cp.p);
    let den = BigInt::mod_sub(&BigInt::one(), &BigInt::mod_mul(&cp.d, &x2, &cp.p), &cp.p);
    let den_inv = den
        .mod_inv(&cp.p)
        .map_err(|_| CryptoError::NoSquareRootExists)?;
    let y2 = BigInt::mod_mul(&num, &den_inv, &cp.p);
    if !y2.exist_mod_sqrt(&cp.p) {
        return Err(CryptoError::NoSquareRootExists);
    }
    let mut y = y2.mod_sqrt(&cp.p)?;
    if y.test_bit(0) != y_is_odd {
        y = BigInt::mod_sub(&BigInt::zero(), &y, &cp.p);
    }
    Ok(y)
}

/// Solves `y^2 = x^3 + a*x + b mod p`.
fn weierstrass_recover_y(x: &BigInt, y_is_odd: bool, cp: &CurveParams) -> Result<BigInt> {
    let x2 = BigInt::mod_mul(x, x, &cp.p);
    let x3 = BigInt::mod_mul(&x2, x, &cp.p);
    let rhs = BigInt::mod_add(
        &BigInt::mod_add(&x3, &BigInt::mod_mul(&cp.a, x, &cp.p), &cp.p),
        &cp.b,
        &cp.p,
    );
    if !rhs.exist_mod_sqrt(&cp.p) {
        return Err(CryptoError::NoSquareRootExists);
    }
    let mut y = rhs.mod_sqrt(&cp.p)?;
    if y.test_bit(0) != y_is_odd {
        y = BigInt::mod_sub(&BigInt::zero(), &y, &cp.p);
    }
    Ok(y)
}

fn on_curve(x: &BigInt, y: &BigInt, cp: &CurveParams) -> bool {
    match cp.form {
        CurveForm::ShortWeierstrass => {
            let lhs = BigInt::mod_mul(y, y, &cp.p);
            let x3 = BigInt::mod_mul(&BigInt::mod_mul(x, x, &cp.p), x, &cp.p);
            let rhs = BigInt::mod_add(
                &BigInt::mod_add(&x3, &BigInt::mod_mul(&cp.a, x, &cp.p), &cp.p),
                &cp.b,
                &cp.p,
            );
            lhs == rhs
        }
        CurveForm::TwistedEdwards => {
            let x2 = BigInt::mod_mul(x, x, &cp.p);
            let y2 = BigInt::mod_mul(y, y, &cp.p);
            let lhs = BigInt::mod_add(&BigInt::mod_mul(&cp.a, &x2, &cp.p), &y2, &cp.p);
            let rhs = BigInt::mod_add(
                &BigInt::one(),
                &BigInt::mod_mul(&cp.d, &BigInt::mod_mul(&x2, &y2, &cp.p), &cp.p),
                &cp.p,
            );
            lhs == rhs
        }
    }
}

/// Affine chord-and-tangent addition with the infinity cases handled
/// explicitly. `x1 == x2` with `y1 != -y2` only happens when doubling.
fn weierstrass_add(
    x1: &BigInt,
    y1: &BigInt,
    inf1: bool,
    x2: &BigInt,
    y2: &BigInt,
    inf2: bool,
    cp: &CurveParams,
) -> Result<(BigInt, BigInt, bool)> {
    if inf1 {
        return Ok((x2.clone(), y2.clone(), inf2));
    }
    if inf2 {
        return Ok((x1.clone(), y1.clone(), inf1));
    }
    let p = &cp.p;
    let slope = if x1 == x2 {
        if BigInt::mod_add(y1, y2, p).is_zero() {
            return Ok((BigInt::zero(), BigInt::zero(), true));
        }
        let num = BigInt::mod_add(
            &BigInt::mod_mul(&BigInt::three(), &BigInt::mod_mul(x1, x1, p), p),
            &cp.a,
            p,
        );
        let den = BigInt::mod_add(y1, y1, p);
        BigInt::mod_mul(&num, &den.mod_inv(p)?, p)
    } else {
        let num = BigInt::mod_sub(y2, y1, p);
        let den = BigInt::mod_sub(x2, x1, p);
        BigInt::mod_mul(&num, &den.mod_inv(p)?, p)
    };
    let x3 = BigInt::mod_sub(&BigInt::mod_sub(&BigInt::mod_mul(&slope, &slope, p), x1, p), x2, p);
    let y3 = BigInt::mod_sub(&BigInt::mod_mul(&slope, &BigInt::mod_sub(x1, &x3, p), p), y1, p);
    Ok((x3, y3, false))
}

/// Complete affine addition on the twisted Edwards curve. The denominators
/// `1 +- d*x1*x2*y1*y2` are never zero for on-curve points when `d` is a
/// non-square and `-1` is a square, which holds for Ed25519.
fn edwards_add(
    x1: &BigInt,
    y1: &BigInt,
    x2: &BigInt,
    y2: &BigInt,
    cp: &CurveParams,
) -> Result<(BigInt, BigInt)> {
    let p = &cp.p;
    let x1x2 = BigInt::mod_mul(x1, x2, p);
    let y1y2 = BigInt::mod_mul(y1, y2, p);
    let x1y2 = BigInt::mod_mul(x1, y2, p);
    let y1x2 = BigInt::mod_mul(y1, x2, p);
    let t = BigInt::mod_mul(&cp.d, &BigInt::mod_mul(&x1x2, &y1y2, p), p);
    let x3 = BigInt::mod_mul(
        &BigInt::mod_add(&x1y2, &y1x2, p),
        &BigInt::mod_add(&BigInt::one(), &t, p).mod_inv(p)?,
        p,
    );
    let y3 = BigInt::mod_mul(
        &BigInt::mod_sub(&y1y2, &BigInt::mod_mul(&cp.a, &x1x2, p), p),
        &BigInt::mod_sub(&BigInt::one(), &t, p).mod_inv(p)?,
        p,
    );
    Ok((x3, y3))
}

lazy_static::lazy_static! {
    /// `2^i * G` for the Ed25519 base point, `i` in `0..256`. Built once and
    /// shared; backs the generator fast path in scalar multiplication.
    static ref ED25519_BASE_POWERS: Vec<(BigInt, BigInt)> = {
        let cp = get_curve_params(CurveId::Ed25519);
        let mut table = Vec::with_capacity(256);
        let mut acc = (cp.gx.clone(), cp.gy.clone());
        for _ in 0..256 {
            table.push(acc.clone());
            acc = edwards_add(&acc.0, &acc.1, &acc.0, &acc.1, cp)
                .expect("doubling an on-curve point cannot fail");
        }
        table
    };
}

fn edwards_base_mul(k: &BigInt, cp: &CurveParams) -> Result<Point> {
    let (mut rx, mut ry) = (BigInt::zero(), BigInt::one());
    for (i, (gx, gy)) in ED25519_BASE_POWERS.iter().enumerate() {
        if k.test_bit(i) {
            let (sx, sy) = edwards_add(&rx, &ry, gx, gy, cp)?;
            rx = sx;
            ry = sy;
        }
    }
    Ok(Point {
        data: PointData::Edwards {
            curve: cp.curve,
            encoded: edwards_encode(&rx, &ry),
        },
    })
}

impl Default for Point {
    fn default() -> Self {
        Point {
            data: PointData::Invalid,
        }
    }
}

impl Point {
    /// The invalid placeholder: no curve binding, usable only as a slot to
    /// assign into.
    pub fn new() -> Point {
        Point::default()
    }

    /// The group identity of `curve`.
    pub fn infinity(curve: CurveId) -> Point {
        let cp = get_curve_params(curve);
        match cp.form {
            CurveForm::ShortWeierstrass => Point {
                data: PointData::Weierstrass {
                    curve,
                    x: BigInt::zero(),
                    y: BigInt::zero(),
                    infinity: true,
                },
            },
            CurveForm::TwistedEdwards => Point {
                data: PointData::Edwards {
                    curve,
                    encoded: EDWARDS_IDENTITY,
                },
            },
        }
    }

    pub fn generator(curve: CurveId) -> Point {
        let cp = get_curve_params(curve);
        match cp.form {
            CurveForm::ShortWeierstrass => Point {
                data: PointData::Weierstrass {
                    curve,
                    x: cp.gx.clone(),
                    y: cp.gy.clone(),
                    infinity: false,
                },
            },
            CurveForm::TwistedEdwards => Point {
                data: PointData::Edwards {
                    curve,
                    encoded: edwards_encode(&cp.gx, &cp.gy),
                },
            },
        }
    }

    /// Builds a point from explicit affine coordinates, validating the curve
    /// equation first.
    pub fn from_coords(x: &BigInt, y: &BigInt, curve: CurveId) -> Result<Point> {
        let cp = get_curve_params(curve);
        let x = x.modulus(&cp.p)?;
        let y = y.modulus(&cp.p)?;
        if !on_curve(&x, &y, cp) {
            return Err(CryptoError::InvalidEncoding("coordinates are not on the curve"));
        }
        Ok(match cp.form {
            CurveForm::ShortWeierstrass => Point {
                data: PointData::Weierstrass {
                    curve,
                    x,
                    y,
                    infinity: false,
                },
            },
            CurveForm::TwistedEdwards => Point {
                data: PointData::Edwards {
                    curve,
                    encoded: edwards_encode(&x, &y),
                },
            },
        })
    }

    /// Recovers `y` from `x` by solving the curve equation via a modular
    /// square root, picking the root whose parity matches `y_is_odd`.
    pub fn from_x(x: &BigInt, y_is_odd: bool, curve: CurveId) -> Result<Point> {
        let cp = get_curve_params(curve);
        let x = x.modulus(&cp.p)?;
        let y = match cp.form {
            CurveForm::ShortWeierstrass => weierstrass_recover_y(&x, y_is_odd, cp)?,
            CurveForm::TwistedEdwards => edwards_recover_y(&x, y_is_odd, cp)?,
        };
        Self::from_coords(&x, &y, curve)
    }

    /// Recovers `x` from `y`. Only the Edwards family supports this:
    /// recovering x from y on a Weierstrass curve is a cube root problem,
    /// outside the modular square root contract.
    pub fn from_y(y: &BigInt, x_is_odd: bool, curve: CurveId) -> Result<Point> {
        let cp = get_curve_params(curve);
        match cp.form {
            CurveForm::ShortWeierstrass => Err(CryptoError::CurveMismatch),
            CurveForm::TwistedEdwards => {
                let y = y.modulus(&cp.p)?;
                let x = edwards_recover_x(&y, x_is_odd, cp)?;
                Self::from_coords(&x, &y, curve)
            }
        }
    }

    pub fn curve(&self) -> Option<CurveId> {
        match &self.data {
            PointData::Invalid => None,
            PointData::Weierstrass { curve, .. } => Some(*curve),
            PointData::Edwards { curve, .. } => Some(*curve),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.data, PointData::Invalid)
    }

    pub fn is_infinity(&self) -> bool {
        match &self.data {
            PointData::Invalid => false,
            PointData::Weierstrass { infinity, .. } => *infinity,
            PointData::Edwards { encoded, .. } => *encoded == EDWARDS_IDENTITY,
        }
    }

    /// Affine x coordinate. `None` for the invalid point and for the
    /// Weierstrass infinity. Edwards coordinates are derived on demand from
    /// the stored 32 byte encoding.
    pub fn x(&self) -> Option<BigInt> {
        match &self.data {
            PointData::Invalid => None,
            PointData::Weierstrass { x, infinity, .. } => {
                if *infinity {
                    None
                } else {
                    Some(x.clone())
                }
            }
            PointData::Edwards { curve, encoded } => {
                let cp = get_curve_params(*curve);
                edwards_decode(encoded, cp).ok().map(|(x, _)| x)
            }
        }
    }

    pub fn y(&self) -> Option<BigInt> {
        match &self.data {
            PointData::Invalid => None,
            PointData::Weierstrass { y, infinity, .. } => {
                if *infinity {
                    None
                } else {
                    Some(y.clone())
                }
            }
            PointData::Edwards { curve, encoded } => {
                let cp = get_curve_params(*curve);
                edwards_decode(encoded, cp).ok().map(|(_, y)| y)
            }
        }
    }

    /// Back to the invalid state, releasing the curve binding.
    pub fn reset(&mut self) {
        self.data = PointData::Invalid;
    }

    fn expect_same_curve(&self, other: &Point) -> Result<CurveId> {
        match (self.curve(), other.curve()) {
            (Some(a), Some(b)) if a == b => Ok(a),
            _ => Err(CryptoError::CurveMismatch),
        }
    }

    pub fn add_point(&self, other: &Point) -> Result<Point> {
        let curve = self.expect_same_curve(other)?;
        let cp = get_curve_params(curve);
        match (&self.data, &other.data) {
            (
                PointData::Weierstrass {
                    x: x1,
                    y: y1,
                    infinity: i1,
                    ..
                },
                PointData::Weierstrass {
                    x: x2,
                    y: y2,
                    infinity: i2,
                    ..
                },
            ) => {
                let (x, y, infinity) = weierstrass_add(x1, y1, *i1, x2, y2, *i2, cp)?;
                Ok(Point {
                    data: PointData::Weierstrass {
                        curve,
                        x,
                        y,
                        infinity,
                    },
                })
            }
            (
                PointData::Edwards { encoded: e1, .. },
                PointData::Edwards { encoded: e2, .. },
            ) => {
                let (x1, y1) = edwards_decode(e1, cp)?;
                let (x2, y2) = edwards_decode(e2, cp)?;
                let (x3, y3) = edwards_add(&x1, &y1, &x2, &y2, cp)?;
                Ok(Point {
                    data: PointData::Edwards {
                        curve,
                        encoded: edwards_encode(&x3, &y3),
                    },
                })
            }
            _ => Err(CryptoError::CurveMismatch),
        }
    }

    pub fn sub_point(&self, other: &Point) -> Result<Point> {
        self.add_point(&other.neg_point()?)
    }

    pub fn neg_point(&self) -> Result<Point> {
        match &self.data {
            PointData::Invalid => Err(CryptoError::CurveMismatch),
            PointData::Weierstrass {
                curve,
                x,
                y,
                infinity,
            } => {
                if *infinity {
                    return Ok(self.clone());
                }
                let cp = get_curve_params(*curve);
                Ok(Point {
                    data: PointData::Weierstrass {
                        curve: *curve,
                        x: x.clone(),
                        y: BigInt::mod_sub(&BigInt::zero(), y, &cp.p),
                        infinity: false,
                    },
                })
            }
            PointData::Edwards { curve, encoded } => {
                let cp = get_curve_params(*curve);
                let (x, y) = edwards_decode(encoded, cp)?;
                let neg_x = BigInt::mod_sub(&BigInt::zero(), &x, &cp.p);
                Ok(Point {
                    data: PointData::Edwards {
                        curve: *curve,
                        encoded: edwards_encode(&neg_x, &y),
                    },
                })
            }
        }
    }

    /// In-place forms, observably identical to compute-then-replace.
    pub fn add_assign_point(&mut self, other: &Point) -> Result<()> {
        *self = self.add_point(other)?;
        Ok(())
    }

    pub fn sub_assign_point(&mut self, other: &Point) -> Result<()> {
        *self = self.sub_point(other)?;
        Ok(())
    }

    /// Scalar multiplication. Weierstrass scalars are reduced mod the group
    /// order first. Edwards scalars are reduced only when they need more
    /// than 32 bytes, then consumed as the 32 byte little-endian magnitude
    /// (wire behaviour kept as-is: a 32 byte scalar >= n goes through
    /// unreduced).
    pub fn scalar_mul(&self, k: &BigInt) -> Result<Point> {
        let curve = self.curve().ok_or(CryptoError::CurveMismatch)?;
        let cp = get_curve_params(curve);
        match cp.form {
            CurveForm::ShortWeierstrass => {
                let k = k.modulus(&cp.n)?;
                self.weierstrass_scalar_mul(&k, cp)
            }
            CurveForm::TwistedEdwards => {
                let k = if k.byte_length() > 32 {
                    k.modulus(&cp.n)?
                } else {
                    k.clone()
                };
                let k = BigInt::from_bytes_le(&k.to_bytes32_le());
                self.edwards_scalar_mul(&k, cp)
            }
        }
    }

    fn weierstrass_scalar_mul(&self, k: &BigInt, cp: &CurveParams) -> Result<Point> {
        let mut acc = Point::infinity(cp.curve);
        for i in (0..k.bit_length()).rev() {
            acc = acc.add_point(&acc)?;
            if k.test_bit(i) {
                acc = acc.add_point(self)?;
            }
        }
        Ok(acc)
    }

    fn edwards_scalar_mul(&self, k: &BigInt, cp: &CurveParams) -> Result<Point> {
        if cp.curve == CurveId::Ed25519 && *self == Point::generator(cp.curve) {
            return edwards_base_mul(k, cp);
        }
        let (px, py) = match &self.data {
            PointData::Edwards { encoded, .. } => edwards_decode(encoded, cp)?,
            _ => return Err(CryptoError::CurveMismatch),
        };
        let (mut rx, mut ry) = (BigInt::zero(), BigInt::one());
        for i in (0..k.bit_length()).rev() {
            let (dx, dy) = edwards_add(&rx, &ry, &rx, &ry, cp)?;
            rx = dx;
            ry = dy;
            if k.test_bit(i) {
                let (sx, sy) = edwards_add(&rx, &ry, &px, &py, cp)?;
                rx = sx;
                ry = sy;
            }
        }
        Ok(Point {
            data: PointData::Edwards {
                curve: cp.curve,
                encoded: edwards_encode(&rx, &ry),
            },
        })
    }

    /// 33 bytes: a `0x02`/`0x03` y-parity tag followed by the 32 byte
    /// big-endian x coordinate, for both curve families.
    pub fn encode_compressed(&self) -> Result<[u8; 33]> {
        let x = self
            .x()
            .ok_or(CryptoError::InvalidEncoding("cannot encode the point at infinity"))?;
        let y = self
            .y()
            .ok_or(CryptoError::InvalidEncoding("cannot encode the point at infinity"))?;
        let mut out = [0u8; 33];
        out[0] = if y.test_bit(0) { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&x.to_bytes32_be());
        Ok(out)
    }

    pub fn decode_compressed(bytes: &[u8], curve: CurveId) -> Result<Point> {
        if bytes.len() != 33 {
            return Err(CryptoError::InvalidEncoding("compressed point must be 33 bytes"));
        }
        let y_is_odd = match bytes[0] {
            0x02 => false,
            0x03 => true,
            _ => return Err(CryptoError::InvalidEncoding("bad compressed point tag")),
        };
        let x = BigInt::from_bytes_be(&bytes[1..]);
        Point::from_x(&x, y_is_odd, curve)
    }

    /// 65 bytes: `0x04` followed by the 32 byte big-endian x and y
    /// coordinates.
    pub fn encode_full(&self) -> Result<[u8; 65]> {
        let x = self
            .x()
            .ok_or(CryptoError::InvalidEncoding("cannot encode the point at infinity"))?;
        let y = self
            .y()
            .ok_or(CryptoError::InvalidEncoding("cannot encode the point at infinity"))?;
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&x.to_bytes32_be());
        out[33..].copy_from_slice(&y.to_bytes32_be());
        Ok(out)
    }

    pub fn decode_full(bytes: &[u8], curve: CurveId) -> Result<Point> {
        if bytes.len() != 65 {
            return Err(CryptoError::InvalidEncoding("full point must be 65 bytes"));
        }
        if bytes[0] != 0x04 {
            return Err(CryptoError::InvalidEncoding("bad full point tag"));
        }
        let x = BigInt::from_bytes_be(&bytes[1..33]);
        let y = BigInt::from_bytes_be(&bytes[33..65]);
        Point::from_coords(&x, &y, curve)
    }

    /// Native 32 byte Edwards form. Fails with `CurveMismatch` for any other
    /// curve family.
    pub fn encode_edwards(&self) -> Result<[u8; 32]> {
        match &self.data {
            PointData::Edwards { encoded, .. } => Ok(*encoded),
            _ => Err(CryptoError::CurveMismatch),
        }
    }

    pub fn decode_edwards(bytes: &[u8], curve: CurveId) -> Result<Point> {
        let cp = get_curve_params(curve);
        if cp.form != CurveForm::TwistedEdwards {
            return Err(CryptoError::CurveMismatch);
        }
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidEncoding("edwards point must be 32 bytes"));
        }
        let mut encoded = [0u8; 32];
        encoded.copy_from_slice(bytes);
        let (x, y) = edwards_decode(&encoded, cp)?;
        Ok(Point {
            data: PointData::Edwards {
                curve,
                encoded: edwards_encode(&x, &y),
            },
        })
    }
}

#[derive(Serialize, Deserialize)]
struct PointWire {
    curve: CurveId,
    point: String,
}

impl Serialize for Point {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let curve = self
            .curve()
            .ok_or_else(|| ser::Error::custom("cannot serialize an uninitialized point"))?;
        let point = if self.is_infinity() && self.x().is_none() {
            "00".to_string()
        } else {
            hex::encode(self.encode_compressed().map_err(ser::Error::custom)?)
        };
        PointWire { curve, point }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = PointWire::deserialize(deserializer)?;
        if wire.point == "00" {
            return Ok(Point::infinity(wire.curve));
        }
        let bytes = hex::decode(&wire.point).map_err(de::Error::custom)?;
        Point::decode_compressed(&bytes, wire.curve).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::traits::Samplable;
    use crate::test_for_all_curves;

    fn order(curve: CurveId) -> BigInt {
        get_curve_params(curve).n.clone()
    }

    fn generator_is_on_curve(curve: CurveId) {
        let cp = get_curve_params(curve);
        let g = Point::generator(curve);
        assert!(g.is_valid());
        assert!(!g.is_infinity());
        assert_eq!(g, Point::from_coords(&cp.gx, &cp.gy, curve).unwrap());
        assert_eq!(g.x().unwrap(), cp.gx);
        assert_eq!(g.y().unwrap(), cp.gy);
    }
    test_for_all_curves!(generator_is_on_curve);

    fn identity_laws(curve: CurveId) {
        let g = Point::generator(curve);
        let inf = Point::infinity(curve);
        assert!(inf.is_infinity());
        assert_eq!(g.add_point(&inf).unwrap(), g);
        assert_eq!(inf.add_point(&g).unwrap(), g);
        assert_eq!(inf.add_point(&inf).unwrap(), inf);
        assert!(g.add_point(&g.neg_point().unwrap()).unwrap().is_infinity());
        assert!(g.sub_point(&g).unwrap().is_infinity());
    }
    test_for_all_curves!(identity_laws);

    fn small_multiples_match_addition(curve: CurveId) {
        let g = Point::generator(curve);
        let g2 = g.add_point(&g).unwrap();
        let g3 = g2.add_point(&g).unwrap();
        assert_eq!(g.scalar_mul(&BigInt::two()).unwrap(), g2);
        assert_eq!(g.scalar_mul(&BigInt::three()).unwrap(), g3);
        assert_eq!(g.scalar_mul(&BigInt::one()).unwrap(), g);
        assert!(g.scalar_mul(&BigInt::zero()).unwrap().is_infinity());
    }
    test_for_all_curves!(small_multiples_match_addition);

    fn order_times_generator_is_infinity(curve: CurveId) {
        let g = Point::generator(curve);
        assert!(g.scalar_mul(&order(curve)).unwrap().is_infinity());
    }
    test_for_all_curves!(order_times_generator_is_infinity);

    fn scalar_mul_distributes(curve: CurveId) {
        let n = order(curve);
        let g = Point::generator(curve);
        let k1 = BigInt::sample_below(&n).unwrap();
        let k2 = BigInt::sample_below(&n).unwrap();
        let lhs = g.scalar_mul(&BigInt::mod_add(&k1, &k2, &n)).unwrap();
        let rhs = g
            .scalar_mul(&k1)
            .unwrap()
            .add_point(&g.scalar_mul(&k2).unwrap())
            .unwrap();
        assert_eq!(lhs, rhs);
    }
    test_for_all_curves!(scalar_mul_distributes);

    fn negative_scalar_matches_negated_point(curve: CurveId) {
        let g = Point::generator(curve);
        let minus_g = g.scalar_mul(&BigInt::minus_one()).unwrap();
        match get_curve_params(curve).form {
            // the scalar is reduced mod n, so -1 acts as n - 1
            CurveForm::ShortWeierstrass => assert_eq!(minus_g, g.neg_point().unwrap()),
            // a scalar of at most 32 bytes keeps only its magnitude, so -1
            // acts as 1
            CurveForm::TwistedEdwards => assert_eq!(minus_g, g),
        }
    }
    test_for_all_curves!(negative_scalar_matches_negated_point);

    fn compressed_round_trip(curve: CurveId) {
        let g = Point::generator(curve);
        let k = BigInt::sample_below(&order(curve)).unwrap();
        let point = g.scalar_mul(&k).unwrap();
        if point.is_infinity() {
            return; // probability ~ 2^-256
        }
        let encoded = point.encode_compressed().unwrap();
        assert!(encoded[0] == 0x02 || encoded[0] == 0x03);
        assert_eq!(Point::decode_compressed(&encoded, curve).unwrap(), point);
    }
    test_for_all_curves!(compressed_round_trip);

    fn full_round_trip(curve: CurveId) {
        let g = Point::generator(curve);
        let point = g.scalar_mul(&BigInt::from(7u64)).unwrap();
        let encoded = point.encode_full().unwrap();
        assert_eq!(encoded[0], 0x04);
        assert_eq!(Point::decode_full(&encoded, curve).unwrap(), point);
    }
    test_for_all_curves!(full_round_trip);

    fn from_x_recovers_both_parities(curve: CurveId) {
        let cp = get_curve_params(curve);
        let g = Point::generator(curve);
        let point = g.scalar_mul(&BigInt::from(5u64)).unwrap();
        let x = point.x().unwrap();
        let y = point.y().unwrap();
        let recovered = Point::from_x(&x, y.test_bit(0), curve).unwrap();
        assert_eq!(recovered, point);
        // the opposite parity picks the other root, (x, p - y)
        let flipped = Point::from_x(&x, !y.test_bit(0), curve).unwrap();
        let other_root = BigInt::mod_sub(&BigInt::zero(), &y, &cp.p);
        assert_eq!(flipped, Point::from_coords(&x, &other_root, curve).unwrap());
        // on weierstrass curves negation flips y, so the other root is the
        // negated point; edwards negation flips x instead
        if cp.form == CurveForm::ShortWeierstrass {
            assert_eq!(flipped, point.neg_point().unwrap());
        } else {
            assert_ne!(flipped, point.neg_point().unwrap());
        }
    }
    test_for_all_curves!(from_x_recovers_both_parities);

    fn off_curve_coordinates_are_rejected(curve: CurveId) {
        let cp = get_curve_params(curve);
        let bad = Point::from_coords(&cp.gx, &BigInt::mod_add(&cp.gy, &BigInt::one(), &cp.p), curve);
        assert!(matches!(bad, Err(CryptoError::InvalidEncoding(_))));
    }
    test_for_all_curves!(off_curve_coordinates_are_rejected);

    fn add_assign_matches_add(curve: CurveId) {
        let g = Point::generator(curve);
        let mut acc = Point::infinity(curve);
        for _ in 0..4 {
            acc.add_assign_point(&g).unwrap();
        }
        assert_eq!(acc, g.scalar_mul(&BigInt::four()).unwrap());
        acc.sub_assign_point(&g).unwrap();
        assert_eq!(acc, g.scalar_mul(&BigInt::three()).unwrap());
    }
    test_for_all_curves!(add_assign_matches_add);

    fn serde_round_trip(curve: CurveId) {
        let point = Point::generator(curve).scalar_mul(&BigInt::from(9u64)).unwrap();
        let json = serde_json::to_string(&point).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
        let inf = Point::infinity(curve);
        let json = serde_json::to_string(&inf).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inf);
    }
    test_for_all_curves!(serde_round_trip);

    #[test]
    fn default_point_is_invalid() {
        let mut p = Point::new();
        assert!(!p.is_valid());
        assert!(p.curve().is_none());
        assert!(p.x().is_none());
        assert_eq!(p.add_point(&p), Err(CryptoError::CurveMismatch));
        p = Point::generator(CurveId::Secp256k1);
        assert!(p.is_valid());
        p.reset();
        assert!(!p.is_valid());
    }

    #[test]
    fn mixed_curves_are_rejected() {
        let a = Point::generator(CurveId::Secp256k1);
        let b = Point::generator(CurveId::P256);
        assert_eq!(a.add_point(&b), Err(CryptoError::CurveMismatch));
        assert_eq!(a.sub_point(&b), Err(CryptoError::CurveMismatch));
    }

    #[test]
    fn from_y_is_edwards_only() {
        let ed = Point::generator(CurveId::Ed25519);
        let y = ed.y().unwrap();
        let x = ed.x().unwrap();
        let recovered = Point::from_y(&y, x.test_bit(0), CurveId::Ed25519).unwrap();
        assert_eq!(recovered, ed);
        assert_eq!(
            Point::from_y(&y, false, CurveId::Secp256k1),
            Err(CryptoError::CurveMismatch)
        );
    }

    #[test]
    fn weierstrass_known_multiples() {
        let vectors: [(CurveId, u64, &str, &str); 4] = [
            (
                CurveId::Secp256k1,
                2,
                "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
                "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a",
            ),
            (
                CurveId::Secp256k1,
                1000,
                "4a5169f673aa632f538aaa128b6348536db2b637fd89073d49b6a23879cdb3ad",
                "baf1e702eb2a8badae14ba09a26a8ca7cb1127b64b2c39a1c7ba61f4a3c62601",
            ),
            (
                CurveId::P256,
                2,
                "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978",
                "07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1",
            ),
            (
                CurveId::P256,
                1000,
                "b8fa1a4acbd900b788ff1f8524ccfff1dd2a3d6c917e4009af604fbd406db702",
                "9a5cc32d14fc837266844527481f7f06cb4fb34733b24ca92e861f72cc7cae37",
            ),
        ];
        for (curve, k, x_hex, y_hex) in vectors.iter() {
            let point = Point::generator(*curve)
                .scalar_mul(&BigInt::from(*k))
                .unwrap();
            assert_eq!(point.x().unwrap(), BigInt::from_hex(x_hex).unwrap());
            assert_eq!(point.y().unwrap(), BigInt::from_hex(y_hex).unwrap());
        }
    }

    #[cfg(feature = "stark")]
    #[test]
    fn stark_known_multiples() {
        let point = Point::generator(CurveId::Stark)
            .scalar_mul(&BigInt::from(10u64))
            .unwrap();
        assert_eq!(
            point.x().unwrap(),
            BigInt::from_hex("0320ceae3120e56f6006f7d626760f12fc276a3c7683e9b0b87c097d7be8dbde")
                .unwrap()
        );
        assert_eq!(
            point.y().unwrap(),
            BigInt::from_hex("0760d1688317be9e2cf74eaa8b2d39e886a6c18a223a9ccc9b19429f2a174377")
                .unwrap()
        );
    }

    #[test]
    fn edwards_known_encodings() {
        let g = Point::generator(CurveId::Ed25519);
        let vectors: [(u64, &str); 4] = [
            (1, "5866666666666666666666666666666666666666666666666666666666666666"),
            (2, "c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022"),
            (10, "2c7be86ab07488ba43e8e03d85a67625cfbf98c8544de4c877241b7aaafc7fe3"),
            (1000, "e7caaa83373a94afae43fec59b447c99ba282b19a7616c24c785ad8966a1e10e"),
        ];
        for (k, expected_hex) in vectors.iter() {
            let point = g.scalar_mul(&BigInt::from(*k)).unwrap();
            assert_eq!(hex::encode(point.encode_edwards().unwrap()), *expected_hex);
            let back =
                Point::decode_edwards(&hex::decode(expected_hex).unwrap(), CurveId::Ed25519)
                    .unwrap();
            assert_eq!(back, point);
        }
    }

    #[test]
    fn edwards_identity_is_fixed_encoding() {
        let inf = Point::infinity(CurveId::Ed25519);
        assert!(inf.is_infinity());
        assert_eq!(inf.encode_edwards().unwrap(), EDWARDS_IDENTITY);
        assert_eq!(inf.x().unwrap(), BigInt::zero());
        assert_eq!(inf.y().unwrap(), BigInt::one());
        // the identity still has affine coordinates, so it compresses too
        let compressed = inf.encode_compressed().unwrap();
        assert_eq!(
            Point::decode_compressed(&compressed, CurveId::Ed25519).unwrap(),
            inf
        );
    }

    #[test]
    fn edwards_native_encoding_is_curve_bound() {
        let g = Point::generator(CurveId::Secp256k1);
        assert_eq!(g.encode_edwards(), Err(CryptoError::CurveMismatch));
        assert_eq!(
            Point::decode_edwards(&[0u8; 32], CurveId::Secp256k1),
            Err(CryptoError::CurveMismatch)
        );
    }

    #[test]
    fn edwards_rejects_out_of_range_y() {
        // y = p is non canonical
        let cp = get_curve_params(CurveId::Ed25519);
        let mut bytes = cp.p.to_bytes32_le();
        assert!(matches!(
            Point::decode_edwards(&bytes, CurveId::Ed25519),
            Err(CryptoError::InvalidEncoding(_))
        ));
        // x = 0 with the sign bit set is non canonical
        bytes = EDWARDS_IDENTITY;
        bytes[31] |= 0x80;
        assert!(matches!(
            Point::decode_edwards(&bytes, CurveId::Ed25519),
            Err(CryptoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn edwards_scalar_reduction_boundary() {
        // scalars longer than 32 bytes are reduced mod n before the ladder
        let g = Point::generator(CurveId::Ed25519);
        let n = order(CurveId::Ed25519);
        let k_large = (BigInt::one() << 300) + BigInt::from(17u64);
        let reduced = k_large.modulus(&n).unwrap();
        assert_eq!(
            g.scalar_mul(&k_large).unwrap(),
            g.scalar_mul(&reduced).unwrap()
        );
    }

    #[test]
    fn edwards_generator_fast_path_matches_ladder() {
        // g2 is not the generator, so k * g2 runs the generic ladder; the
        // table-backed path computes (2k) * g. Both must agree.
        let g = Point::generator(CurveId::Ed25519);
        let g2 = g.add_point(&g).unwrap();
        let k = BigInt::from(123456789u64);
        let via_ladder = g2.scalar_mul(&k).unwrap();
        let via_table = g.scalar_mul(&(&k + &k)).unwrap();
        assert_eq!(via_ladder, via_table);
    }
}
