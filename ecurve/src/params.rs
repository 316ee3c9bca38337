use crate::CurveError;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Domain parameters of a named curve as big-endian hex strings, in the
/// layout of the embedded `curves.json` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    pub p: String,
    pub a: String,
    pub b: String,
    #[serde(rename = "Gx")]
    pub gx: String,
    #[serde(rename = "Gy")]
    pub gy: String,
    pub n: String,
    #[serde(default = "default_cofactor")]
    pub h: String,
}

fn default_cofactor() -> String {
    "01".to_string()
}

pub(crate) fn parse_hex(name: &str, value: &str) -> Result<BigUint, CurveError> {
    let digits = value.trim_start_matches("0x");
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| CurveError::InvalidParameter(name.to_string()))
}
