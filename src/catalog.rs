//! Fleet catalog: satellite name to NORAD catalog number.

use crate::{AnalysisError, Result};

/// The fleet's name → NORAD catalog number table.
pub const FLEET: [(&str, u32); 18] = [
    ("x2", 43800),
    ("x4", 44390),
    ("x6", 46497),
    ("x7", 46496),
    ("x8", 47510),
    ("x9", 47506),
    ("xr1", 47507),
    ("x11", 48918),
    ("x12", 48914),
    ("x13", 48916),
    ("x14", 51070),
    ("x15", 48917),
    ("x16", 51008),
    ("x17", 52762),
    ("x18", 52749),
    ("x19", 52758),
    ("x20", 52759),
    ("x24", 52755),
];

/// Resolve a satellite name to its catalog number. Case-insensitive.
pub fn lookup(name: &str) -> Result<u32> {
    FLEET
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, catnr)| catnr)
        .ok_or_else(|| AnalysisError::UnknownSatellite(name.to_string()))
}

/// Known satellite names, in table order. The CLI appends these to
/// the unknown-satellite error so the caller sees what is accepted.
pub fn known_names() -> Vec<&'static str> {
    FLEET.iter().map(|&(n, _)| n).collect()
}
