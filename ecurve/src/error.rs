use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CurveError {
    #[error("attempted to invert the zero field element")]
    InvalidOperand,
    #[error("point is at infinity")]
    PointAtInfinity,
    #[error("point is not on the curve")]
    PointNotOnCurve,
    #[error("point is not a scalar multiple of the generator")]
    PointNotInSubgroup,
    #[error("invalid sequence length: expected {expected} bytes, got {actual}")]
    InvalidEncodingLength { expected: usize, actual: usize },
    #[error("invalid sequence tag: {0:#04x}")]
    InvalidEncodingTag(u8),
    #[error("square root extraction requires a modulus p = 3 mod 4")]
    UnsupportedField,
    #[error("coordinate is not smaller than the field modulus")]
    CoordinateOutOfRange,
    #[error("field modulus must be an odd integer greater than two")]
    InvalidModulus,
    #[error("invalid curve parameter `{0}`")]
    InvalidParameter(String),
}
