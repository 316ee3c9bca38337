use super::field::FieldElement;
use crate::{Curve, CurveError};

use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::OnceCell;

use std::fmt;

/// A point in projective coordinates `(X, Y, Z)` representing the affine
/// point `(X/Z, Y/Z)`.
///
/// `Z = 0` with `Y != 0` is the point at infinity. Points borrow the curve
/// they were created on and are immutable; the affine projection is computed
/// at most once and cached.
#[derive(Debug, Clone)]
pub struct Point<'c> {
    curve: &'c Curve,
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    compressed: bool,
    affine: OnceCell<(FieldElement, FieldElement)>,
}

impl<'c> Point<'c> {
    /// Builds a point from projective coordinates over `curve`'s field.
    ///
    /// # Panics
    ///
    /// Panics on `Y = Z = 0`, which is not a projective point.
    pub fn new(curve: &'c Curve, x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        debug_assert!(x.modulus() == curve.p() && y.modulus() == curve.p());
        assert!(
            !(y.is_zero() && z.is_zero()),
            "(X : 0 : 0) is not a projective point"
        );
        Self {
            curve,
            x,
            y,
            z,
            compressed: true,
            affine: OnceCell::new(),
        }
    }

    /// Lifts affine coordinates onto `curve`.
    ///
    /// Coordinates outside `[0, p)` are rejected with
    /// [`CurveError::CoordinateOutOfRange`]. No on-curve check is performed,
    /// see [`Curve::validate`].
    pub fn from_affine(curve: &'c Curve, x: &BigUint, y: &BigUint) -> Result<Self, CurveError> {
        if x >= curve.p() || y >= curve.p() {
            return Err(CurveError::CoordinateOutOfRange);
        }
        Ok(Self::new(
            curve,
            curve.field_element(x.clone()),
            curve.field_element(y.clone()),
            curve.field_element(BigUint::from(1u8)),
        ))
    }

    pub(crate) fn identity(curve: &'c Curve) -> Self {
        Self::new(
            curve,
            curve.field_element(BigUint::zero()),
            curve.field_element(BigUint::from(1u8)),
            curve.field_element(BigUint::zero()),
        )
    }

    pub fn curve(&self) -> &'c Curve {
        self.curve
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    pub fn z(&self) -> &FieldElement {
        &self.z
    }

    /// Preferred encoding when none is given explicitly.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn with_compression(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn is_infinity(&self) -> bool {
        self.z.is_zero() && !self.y.is_zero()
    }

    /// Affine `(x, y)`, computing `Z⁻¹` on first use.
    pub fn affine(&self) -> Result<&(FieldElement, FieldElement), CurveError> {
        if self.is_infinity() {
            return Err(CurveError::PointAtInfinity);
        }
        self.affine.get_or_try_init(|| {
            let z_inv = self.z.invert()?;
            Ok((&self.x * &z_inv, &self.y * &z_inv))
        })
    }

    pub fn affine_x(&self) -> Result<&FieldElement, CurveError> {
        Ok(&self.affine()?.0)
    }

    pub fn affine_y(&self) -> Result<&FieldElement, CurveError> {
        Ok(&self.affine()?.1)
    }

    /// Same point with `Z = 1`, or the canonical identity.
    pub fn to_affine(&self) -> Self {
        match self.affine() {
            Ok((x, y)) => Self::new(
                self.curve,
                x.clone(),
                y.clone(),
                self.curve.field_element(BigUint::from(1u8)),
            )
            .with_compression(self.compressed),
            Err(_) => self.curve.infinity(),
        }
    }

    pub fn negate(&self) -> Self {
        Self {
            curve: self.curve,
            x: self.x.clone(),
            y: -&self.y,
            z: self.z.clone(),
            compressed: self.compressed,
            affine: OnceCell::new(),
        }
    }

    pub fn geometric_add(&self, rhs: &Self) -> Self {
        if self.is_infinity() {
            return rhs.clone();
        }
        if rhs.is_infinity() {
            return self.clone();
        }

        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let (x2, y2, z2) = (&rhs.x, &rhs.y, &rhs.z);

        // u = Y2 * Z1 - Y1 * Z2
        let u = y2 * z1 - y1 * z2;
        // v = X2 * Z1 - X1 * Z2
        let v = x2 * z1 - x1 * z2;

        if v.is_zero() {
            if u.is_zero() {
                return self.twice();
            }
            return self.curve.infinity();
        }

        let v2 = v.square();
        let v3 = &v2 * &v;
        let x1v2 = x1 * &v2;
        let zu2 = u.square() * z1;

        // x3 = v * (z2 * (z1 * u^2 - 2 * x1 * v^2) - v^3)
        let x3 = (z2 * (&zu2 - x1v2.scale(2)) - &v3) * &v;
        // y3 = z2 * (3 * x1 * u * v^2 - y1 * v^3 - z1 * u^3) + u * v^3
        let y3 = z2 * (x1v2.scale(3) * &u - y1 * &v3 - &zu2 * &u) + &u * &v3;
        // z3 = v^3 * z1 * z2
        let z3 = &v3 * z1 * z2;

        Self::new(self.curve, x3, y3, z3)
    }

    pub fn twice(&self) -> Self {
        if self.is_infinity() {
            return self.clone();
        }
        if self.y.is_zero() {
            return self.curve.infinity();
        }

        let (x1, y1, z1) = (&self.x, &self.y, &self.z);
        let a = self.curve.a();

        let y1z1 = y1 * z1;
        let y1sqz1 = &y1z1 * y1;

        // w = 3 * x1^2 + a * z1^2
        let mut w = x1.square().scale(3);
        if !a.is_zero() {
            w += a * &z1.square();
        }

        // x3 = 2 * y1 * z1 * (w^2 - 8 * x1 * y1^2 * z1)
        let x3 = (w.square() - x1.scale(8) * &y1sqz1).scale(2) * &y1z1;
        // y3 = 4 * y1^2 * z1 * (3 * w * x1 - 2 * y1^2 * z1) - w^3
        let y3 = (w.scale(3) * x1 - y1sqz1.scale(2)).scale(4) * &y1sqz1 - w.square() * &w;
        // z3 = 8 * (y1 * z1)^3
        let z3 = (y1z1.square() * &y1z1).scale(8);

        Self::new(self.curve, x3, y3, z3)
    }

    /// Scalar multiplication over the non-adjacent form of `k`.
    ///
    /// The signed digits are read off `h = 3k`: wherever a bit of `h`
    /// differs from the same bit of `k` the running sum gets `±self`.
    pub fn multiply(&self, k: &BigUint) -> Self {
        if self.is_infinity() {
            return self.clone();
        }
        if k.is_zero() {
            return self.curve.infinity();
        }

        let h = k * 3u32;
        let neg = self.negate();
        let mut r = self.clone();

        for i in (1..h.bits() - 1).rev() {
            r = r.twice();

            let h_bit = h.bit(i);
            if h_bit != k.bit(i) {
                r = r.geometric_add(if h_bit { self } else { &neg });
            }
        }

        r
    }

    /// Computes `j * self + k * other` in a single double-and-add pass.
    pub fn multiply_two(&self, j: &BigUint, other: &Self, k: &BigUint) -> Self {
        debug_assert!(self.curve == other.curve);
        let both = self.geometric_add(other);
        let mut r = self.curve.infinity();

        for i in (0..j.bits().max(k.bits())).rev() {
            r = r.twice();
            match (j.bit(i), k.bit(i)) {
                (true, true) => r = r.geometric_add(&both),
                (true, false) => r = r.geometric_add(self),
                (false, true) => r = r.geometric_add(other),
                (false, false) => {}
            }
        }

        r
    }

    /// Montgomery ladder over the lowest `bits` bits of `k`.
    ///
    /// Every iteration performs exactly one addition and one doubling. The
    /// big integer arithmetic underneath is still variable time.
    pub fn multiply_ladder(&self, k: &BigUint, bits: u64) -> Self {
        let mut r0 = self.curve.infinity();
        let mut r1 = self.clone();

        for i in (0..bits).rev() {
            if k.bit(i) {
                r0 = r0.geometric_add(&r1);
                r1 = r1.twice();
            } else {
                r1 = r0.geometric_add(&r1);
                r0 = r0.twice();
            }
        }

        r0
    }
}

impl PartialEq for Point<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.curve, other.curve) && self.curve != other.curve {
            return false;
        }
        if self.is_infinity() {
            return other.is_infinity();
        }
        if other.is_infinity() {
            return false;
        }

        let y0z1 = &self.y * &other.z;
        let y1z0 = &other.y * &self.z;
        if y0z1 != y1z0 {
            return false;
        }

        let x0z1 = &self.x * &other.z;
        let x1z0 = &other.x * &self.z;
        x0z1 == x1z0
    }
}

impl fmt::Display for Point<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "(INFINITY)");
        }
        match self.affine() {
            Ok((x, y)) => write!(f, "({},{})", x, y),
            Err(_) => write!(f, "({}:{}:{})", self.x, self.y, self.z),
        }
    }
}

impl<'c> std::ops::Neg for &Point<'c> {
    type Output = Point<'c>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'c> std::ops::Neg for Point<'c> {
    type Output = Point<'c>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<'a, 'c> std::ops::Add<&'a Point<'c>> for &'a Point<'c> {
    type Output = Point<'c>;
    fn add(self, rhs: &'a Point<'c>) -> Self::Output {
        self.geometric_add(rhs)
    }
}

impl<'c> std::ops::Add for Point<'c> {
    type Output = Point<'c>;
    fn add(self, rhs: Self) -> Self::Output {
        self.geometric_add(&rhs)
    }
}

impl<'c> std::ops::AddAssign<&Point<'c>> for Point<'c> {
    fn add_assign(&mut self, rhs: &Point<'c>) {
        *self = self.geometric_add(rhs)
    }
}

impl<'a, 'c> std::ops::Sub<&'a Point<'c>> for &'a Point<'c> {
    type Output = Point<'c>;
    fn sub(self, rhs: &'a Point<'c>) -> Self::Output {
        self.geometric_add(&rhs.negate())
    }
}

impl<'a, 'c> std::ops::Mul<&'a BigUint> for &'a Point<'c> {
    type Output = Point<'c>;
    fn mul(self, rhs: &'a BigUint) -> Self::Output {
        self.multiply(rhs)
    }
}
