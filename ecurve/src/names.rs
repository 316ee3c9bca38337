//! Process-wide table of named curves, built once on first use.

use crate::{Curve, CurveError, CurveParams};

use once_cell::sync::Lazy;
use tracing::debug;

use std::collections::{BTreeMap, HashMap};

static NAMED_CURVES: Lazy<HashMap<String, Curve>> = Lazy::new(|| {
    parse_curve_table(include_str!("curves.json")).expect("embedded curve table is well formed")
});

/// Builds curves from a JSON object mapping names to [`CurveParams`].
pub fn parse_curve_table(json: &str) -> Result<HashMap<String, Curve>, CurveError> {
    let table: BTreeMap<String, CurveParams> =
        serde_json::from_str(json).map_err(|e| CurveError::InvalidParameter(e.to_string()))?;

    let curves = table
        .iter()
        .map(|(name, params)| Ok((name.clone(), Curve::from_params(params)?)))
        .collect::<Result<HashMap<_, _>, CurveError>>()?;

    debug!(count = curves.len(), "loaded named curve table");
    Ok(curves)
}

pub fn curve_by_name(name: &str) -> Option<&'static Curve> {
    NAMED_CURVES.get(name)
}

pub fn curve_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = NAMED_CURVES.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
