use crate::arithmetic::{FieldElement, Point};
use crate::params::{parse_hex, CurveParams};
use crate::CurveError;

use num_bigint::BigUint;
use num_integer::Integer;
use tracing::{debug, warn};

use std::sync::Arc;

/// A short Weierstrass curve `y^2 = x^3 + a*x + b` over `F_p` together with
/// a base point `G` of order `n` and cofactor `h`.
///
/// The generator is trusted as given and not re-derived. Curve identity is
/// determined by `(p, a, b)` alone.
#[derive(Debug)]
pub struct Curve {
    p: Arc<BigUint>,
    a: FieldElement,
    b: FieldElement,
    gx: FieldElement,
    gy: FieldElement,
    n: BigUint,
    h: BigUint,
    // (p + 1) / 4, present only when p = 3 mod 4
    sqrt_exponent: Option<BigUint>,
    byte_length: usize,
}

impl Curve {
    pub fn new(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
        n: BigUint,
        h: BigUint,
    ) -> Result<Self, CurveError> {
        if p < BigUint::from(3u32) || p.is_even() {
            return Err(CurveError::InvalidModulus);
        }

        let sqrt_exponent = if &p % 4u32 == BigUint::from(3u32) {
            Some((&p + 1u32) >> 2)
        } else {
            None
        };
        let byte_length = ((p.bits() + 7) / 8) as usize;
        let p = Arc::new(p);

        Ok(Self {
            a: FieldElement::new(a, Arc::clone(&p)),
            b: FieldElement::new(b, Arc::clone(&p)),
            gx: FieldElement::new(gx, Arc::clone(&p)),
            gy: FieldElement::new(gy, Arc::clone(&p)),
            p,
            n,
            h,
            sqrt_exponent,
            byte_length,
        })
    }

    pub fn from_params(params: &CurveParams) -> Result<Self, CurveError> {
        Self::new(
            parse_hex("p", &params.p)?,
            parse_hex("a", &params.a)?,
            parse_hex("b", &params.b)?,
            parse_hex("Gx", &params.gx)?,
            parse_hex("Gy", &params.gy)?,
            parse_hex("n", &params.n)?,
            parse_hex("h", &params.h)?,
        )
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn h(&self) -> &BigUint {
        &self.h
    }

    /// Width of one encoded coordinate, `ceil(bits(p) / 8)`.
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Reduces `number` into the base field of this curve.
    pub fn field_element(&self, number: BigUint) -> FieldElement {
        FieldElement::new(number, Arc::clone(&self.p))
    }

    pub fn generator(&self) -> Point<'_> {
        Point::new(
            self,
            self.gx.clone(),
            self.gy.clone(),
            self.field_element(BigUint::from(1u8)),
        )
    }

    pub fn infinity(&self) -> Point<'_> {
        Point::identity(self)
    }

    pub fn is_infinity(&self, q: &Point<'_>) -> bool {
        q.is_infinity()
    }

    /// Infinity is on every curve. Otherwise checks the affine projection
    /// against the curve equation. Coordinates are in `[0, p)` by
    /// construction: [`Point::from_affine`] refuses anything larger.
    pub fn is_on_curve(&self, q: &Point<'_>) -> bool {
        if q.curve() != self {
            return false;
        }
        if q.is_infinity() {
            return true;
        }
        let (x, y) = match q.affine() {
            Ok(xy) => xy,
            Err(_) => return false,
        };

        let lhs = y.square();
        let rhs = x.square() * x + &self.a * x + &self.b;
        lhs == rhs
    }

    /// Recovers the point with abscissa `x` whose ordinate has the requested
    /// parity.
    ///
    /// The square root is taken as `alpha^((p + 1) / 4)`, which only works
    /// for `p = 3 mod 4`; other moduli fail with
    /// [`CurveError::UnsupportedField`] since Tonelli-Shanks is not
    /// implemented.
    pub fn point_from_x(&self, is_odd: bool, x: &BigUint) -> Result<Point<'_>, CurveError> {
        let exponent = match &self.sqrt_exponent {
            Some(exponent) => exponent,
            None => {
                warn!(p = %self.p, "square root requested for a modulus p != 3 mod 4");
                return Err(CurveError::UnsupportedField);
            }
        };

        let x = self.field_element(x.clone());
        let alpha = x.square() * &x + &self.a * &x + &self.b;
        let beta = alpha.pow(exponent);
        if beta.square() != alpha {
            return Err(CurveError::PointNotOnCurve);
        }

        let y = if beta.is_odd() == is_odd { beta } else { -beta };
        Ok(Point::new(
            self,
            x,
            y,
            self.field_element(BigUint::from(1u8)),
        ))
    }

    /// Elliptic curve public key validation, SEC 1 section 3.2.2.1.
    pub fn validate(&self, q: &Point<'_>) -> Result<(), CurveError> {
        self.check_public_point(q).map_err(|err| {
            debug!(%err, point = %q, "point failed validation");
            err
        })
    }

    fn check_public_point(&self, q: &Point<'_>) -> Result<(), CurveError> {
        if q.is_infinity() {
            return Err(CurveError::PointAtInfinity);
        }
        if !self.is_on_curve(q) {
            return Err(CurveError::PointNotOnCurve);
        }
        if !q.multiply(&self.n).is_infinity() {
            return Err(CurveError::PointNotInSubgroup);
        }
        Ok(())
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.a == other.a && self.b == other.b
    }
}

impl Eq for Curve {}

impl From<&Curve> for CurveParams {
    fn from(curve: &Curve) -> Self {
        Self {
            p: format!("{:x}", curve.p.as_ref()),
            a: format!("{:x}", curve.a.inner()),
            b: format!("{:x}", curve.b.inner()),
            gx: format!("{:x}", curve.gx.inner()),
            gy: format!("{:x}", curve.gy.inner()),
            n: format!("{:x}", curve.n),
            h: format!("{:x}", curve.h),
        }
    }
}
