#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod arithmetic;
pub mod curve;
pub mod encoding;
mod error;
pub mod names;
pub mod params;

pub use arithmetic::{FieldElement, Point};
pub use curve::Curve;
pub use error::CurveError;
pub use names::curve_by_name;
pub use num_bigint::BigUint;
pub use params::CurveParams;
