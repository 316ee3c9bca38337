//! SEC1 point encoding (SEC 1 v2, sections 2.3.3 and 2.3.4).
//!
//! | tag    | body      | meaning                       |
//! |--------|-----------|-------------------------------|
//! | `0x00` | none      | point at infinity             |
//! | `0x02` | `X`       | compressed, affine `y` even   |
//! | `0x03` | `X`       | compressed, affine `y` odd    |
//! | `0x04` | `X ‖ Y`   | uncompressed                  |
//!
//! Coordinates are big-endian and exactly [`Curve::byte_length`] bytes wide.

use crate::{Curve, CurveError, Point};

use num_bigint::BigUint;

pub const TAG_INFINITY: u8 = 0x00;
pub const TAG_EVEN: u8 = 0x02;
pub const TAG_ODD: u8 = 0x03;
pub const TAG_UNCOMPRESSED: u8 = 0x04;

/// Encodes `point`. Infinity, in any of its `(X : Y : 0)` forms, is the
/// single byte `0x00`.
pub fn encode(point: &Point<'_>, compressed: bool) -> Vec<u8> {
    let (x, y) = match point.affine() {
        Ok(xy) => xy,
        Err(_) => return vec![TAG_INFINITY],
    };
    let len = point.curve().byte_length();

    let mut encoded = Vec::with_capacity(1 + 2 * len);
    if compressed {
        encoded.push(if y.is_odd() { TAG_ODD } else { TAG_EVEN });
        encoded.extend_from_slice(&x.to_be_bytes(len));
    } else {
        encoded.push(TAG_UNCOMPRESSED);
        encoded.extend_from_slice(&x.to_be_bytes(len));
        encoded.extend_from_slice(&y.to_be_bytes(len));
    }
    encoded
}

/// Decodes a point without checking that it lies on the curve (compressed
/// inputs are on the curve by construction). Use [`Curve::validate`] on
/// untrusted input.
pub fn decode<'c>(curve: &'c Curve, bytes: &[u8]) -> Result<Point<'c>, CurveError> {
    let (&tag, body) = bytes
        .split_first()
        .ok_or(CurveError::InvalidEncodingLength {
            expected: 1,
            actual: 0,
        })?;
    let len = curve.byte_length();

    match tag {
        TAG_INFINITY => {
            expect_length(bytes, 1)?;
            Ok(curve.infinity())
        }
        TAG_EVEN | TAG_ODD => {
            expect_length(bytes, 1 + len)?;
            let x = read_coordinate(curve, body)?;
            Ok(curve
                .point_from_x(tag == TAG_ODD, &x)?
                .with_compression(true))
        }
        TAG_UNCOMPRESSED => {
            expect_length(bytes, 1 + 2 * len)?;
            let (x, y) = body.split_at(len);
            let x = BigUint::from_bytes_be(x);
            let y = BigUint::from_bytes_be(y);
            Ok(Point::from_affine(curve, &x, &y)?.with_compression(false))
        }
        _ => Err(CurveError::InvalidEncodingTag(tag)),
    }
}

fn expect_length(bytes: &[u8], expected: usize) -> Result<(), CurveError> {
    if bytes.len() != expected {
        return Err(CurveError::InvalidEncodingLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn read_coordinate(curve: &Curve, bytes: &[u8]) -> Result<BigUint, CurveError> {
    let coordinate = BigUint::from_bytes_be(bytes);
    if &coordinate >= curve.p() {
        return Err(CurveError::CoordinateOutOfRange);
    }
    Ok(coordinate)
}

impl<'c> Point<'c> {
    pub fn decode(curve: &'c Curve, bytes: &[u8]) -> Result<Self, CurveError> {
        decode(curve, bytes)
    }

    pub fn to_encoded(&self, compressed: bool) -> Vec<u8> {
        encode(self, compressed)
    }

    /// Encodes with the point's own compression preference.
    pub fn encoded(&self) -> Vec<u8> {
        encode(self, self.is_compressed())
    }
}
