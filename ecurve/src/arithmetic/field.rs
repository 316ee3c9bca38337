use crate::CurveError;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use std::fmt;
use std::sync::Arc;

/// An element of the prime field `F_p`.
///
/// The value is always fully reduced. Elements of the same curve share the
/// modulus through an [`Arc`], and two elements are only equal when both
/// their values and their moduli agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

impl FieldElement {
    /// Reduces `number` modulo `modulus`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero. [`Curve::new`](crate::Curve::new)
    /// rejects such moduli before any element is built.
    pub fn new(number: BigUint, modulus: Arc<BigUint>) -> Self {
        assert!(!modulus.is_zero(), "field modulus must be non-zero");
        let value = if number < *modulus {
            number
        } else {
            number % modulus.as_ref()
        };

        Self { value, modulus }
    }

    pub fn zero(modulus: Arc<BigUint>) -> Self {
        Self {
            value: BigUint::zero(),
            modulus,
        }
    }

    pub fn one(modulus: Arc<BigUint>) -> Self {
        Self::new(BigUint::one(), modulus)
    }

    /// Creates an element in the same field as `self`.
    pub fn lift(&self, number: BigUint) -> Self {
        Self::new(number, Arc::clone(&self.modulus))
    }

    pub fn inner(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_odd(&self) -> bool {
        self.value.is_odd()
    }

    pub fn square(&self) -> Self {
        self * self
    }

    /// Multiplies by a small integer constant.
    pub fn scale(&self, k: u32) -> Self {
        self.lift(&self.value * k)
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self {
            value: self.value.modpow(exponent, &self.modulus),
            modulus: Arc::clone(&self.modulus),
        }
    }

    /// Multiplicative inverse via Fermat's little theorem, `x^(p - 2)`.
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::InvalidOperand);
        }
        let exponent = self.modulus.as_ref() - 2u32;
        Ok(self.pow(&exponent))
    }

    pub fn divide(&self, rhs: &Self) -> Result<Self, CurveError> {
        Ok(self * &rhs.invert()?)
    }

    /// Big-endian bytes left-padded (or truncated from the front) to `len`.
    pub fn to_be_bytes(&self, len: usize) -> Vec<u8> {
        let bytes = self.value.to_bytes_be();
        let mut out = vec![0u8; len.saturating_sub(bytes.len())];
        out.extend_from_slice(&bytes[bytes.len().saturating_sub(len)..]);
        out
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<'a, 'b> std::ops::Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> Self::Output {
        debug_assert_eq!(self.modulus, rhs.modulus);
        self.lift(&self.value + &rhs.value)
    }
}

impl<'a, 'b> std::ops::Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> Self::Output {
        debug_assert_eq!(self.modulus, rhs.modulus);
        if self.value >= rhs.value {
            self.lift(&self.value - &rhs.value)
        } else {
            self.lift(self.modulus.as_ref() - &rhs.value + &self.value)
        }
    }
}

impl<'a, 'b> std::ops::Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> Self::Output {
        debug_assert_eq!(self.modulus, rhs.modulus);
        self.lift(&self.value * &rhs.value)
    }
}

impl std::ops::Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        if self.is_zero() {
            self.clone()
        } else {
            self.lift(self.modulus.as_ref() - &self.value)
        }
    }
}

impl std::ops::Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        -&self
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident) => {
        impl std::ops::$imp for FieldElement {
            type Output = FieldElement;
            fn $method(self, rhs: FieldElement) -> Self::Output {
                std::ops::$imp::$method(&self, &rhs)
            }
        }

        impl<'b> std::ops::$imp<&'b FieldElement> for FieldElement {
            type Output = FieldElement;
            fn $method(self, rhs: &'b FieldElement) -> Self::Output {
                std::ops::$imp::$method(&self, rhs)
            }
        }

        impl<'a> std::ops::$imp<FieldElement> for &'a FieldElement {
            type Output = FieldElement;
            fn $method(self, rhs: FieldElement) -> Self::Output {
                std::ops::$imp::$method(self, &rhs)
            }
        }

        impl std::ops::$imp_assign for FieldElement {
            fn $method_assign(&mut self, rhs: FieldElement) {
                *self = std::ops::$imp::$method(&*self, &rhs);
            }
        }

        impl std::ops::$imp_assign<&FieldElement> for FieldElement {
            fn $method_assign(&mut self, rhs: &FieldElement) {
                *self = std::ops::$imp::$method(&*self, rhs);
            }
        }
    };
}

forward_owned_binop!(Add, add, AddAssign, add_assign);
forward_owned_binop!(Sub, sub, SubAssign, sub_assign);
forward_owned_binop!(Mul, mul, MulAssign, mul_assign);

#[cfg(test)]
mod test {
    use super::*;

    fn small(number: u32) -> FieldElement {
        FieldElement::new(BigUint::from(number), Arc::new(BigUint::from(17u32)))
    }

    fn secp256k1_modulus() -> Arc<BigUint> {
        Arc::new(
            BigUint::parse_bytes(
                b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
                16,
            )
            .unwrap(),
        )
    }

    fn large(hex: &str) -> FieldElement {
        FieldElement::new(
            BigUint::parse_bytes(hex.as_bytes(), 16).unwrap(),
            secp256k1_modulus(),
        )
    }

    #[test]
    fn operations_with_small_modulus() {
        let a = small(15);
        let b = small(9);
        assert_eq!(&a + &b, small(7));
        assert_eq!(&a * &b, small(16));
        assert_eq!(a.clone() + b.clone(), small(7));
        assert_eq!(&a - &b, small(6));
        assert_eq!(&b - &a, small(11));
        assert_eq!(a.square(), small(4));
        assert_eq!(b.scale(3), small(10));
        assert_eq!(small(40), small(6));
    }

    #[test]
    fn negation_and_inversion() {
        assert_eq!(-small(0), small(0));
        assert_eq!(-small(5), small(12));
        for i in 1..17 {
            let x = small(i);
            assert!((&x + &(-&x)).is_zero());
            assert_eq!(&x * &x.invert().unwrap(), small(1));
        }
        assert_eq!(small(15).invert().unwrap(), small(8));
        assert_eq!(small(9).divide(&small(15)).unwrap(), small(4));
        assert_eq!(small(0).invert(), Err(CurveError::InvalidOperand));
        assert_eq!(
            small(3).divide(&small(0)),
            Err(CurveError::InvalidOperand)
        );
    }

    #[test]
    fn assign_operators() {
        let mut x = small(10);
        x += small(10);
        assert_eq!(x, small(3));
        x -= &small(4);
        assert_eq!(x, small(16));
        x *= small(2);
        assert_eq!(x, small(15));
    }

    #[test]
    fn equality_requires_same_modulus() {
        let a = FieldElement::new(BigUint::from(3u32), Arc::new(BigUint::from(11u32)));
        let b = FieldElement::new(BigUint::from(3u32), Arc::new(BigUint::from(13u32)));
        assert_ne!(a, b);
    }

    #[test]
    fn operations_with_large_modulus() {
        let a = large("000000000000000000000000000000000000000ffffaaaabbbb123456789eeee");
        let b = large("000000000000000000000000000012345678901234567890ffffddddeeee7890");
        assert_eq!(
            &a + &b,
            large("00000000000000000000000000001234567890223451233cbbb101235678677e")
        );
        assert_eq!(
            &a * &b,
            large("000123450671f20a8b0a93d71f37ba2ec0d166be8a54889e735d97664ad9f5e0")
        );

        let a = large("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
        let b = large("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
        assert_eq!(
            &a + &b,
            large("c1f940f620808011b3455e91dc9813afffb3b123d4537cf2f63a51eb1208ec50")
        );
        assert_eq!(
            &a * &b,
            large("fd3dc529c6eb60fb9d166034cf3c1a5a72324aa9dfd3428a56d7e1ce0179fd9b")
        );

        let a_min_b = &a - &b;
        let b_min_a = &b - &a;
        assert_eq!(a_min_b, -b_min_a);
        assert_eq!(&a * &a.invert().unwrap(), FieldElement::one(secp256k1_modulus()));
    }

    #[test]
    #[should_panic(expected = "field modulus must be non-zero")]
    fn zero_modulus_is_refused() {
        FieldElement::new(BigUint::from(3u32), Arc::new(BigUint::zero()));
    }

    #[test]
    fn padded_bytes() {
        assert_eq!(small(0).to_be_bytes(2), vec![0, 0]);
        assert_eq!(small(16).to_be_bytes(3), vec![0, 0, 16]);
        let x = large("0000000000000000000000000000000000000000000000000000000000000102");
        assert_eq!(x.to_be_bytes(32)[30..], [1, 2]);
        assert_eq!(x.to_be_bytes(32).len(), 32);
    }
}
