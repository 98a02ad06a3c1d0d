//! Element-set acquisition from the GP service.
//!
//! Fetches the most recent two-line element set for a catalog number.
//! The element text is opaque to the analysis core; only the ephemeris
//! provider parses it.

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

const GP_SERVICE_URL: &str = "https://celestrak.org/NORAD/elements/gp.php?CATNR=";

/// A raw two-line element set as served: object name plus the two
/// element lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    /// Parse the three-line GP response body.
    pub fn from_gp_response(body: &str) -> Result<Self> {
        let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
        if lines.len() < 3 || !lines[1].starts_with('1') || !lines[2].starts_with('2') {
            return Err(AnalysisError::ElementsUnavailable(format!(
                "expected 3-line GP response, got {} line(s)",
                lines.len()
            )));
        }
        Ok(Self {
            name: lines[0].trim().to_string(),
            line1: lines[1].to_string(),
            line2: lines[2].to_string(),
        })
    }
}

/// Fetch the current element set for a catalog number.
pub fn fetch_elements(catnr: u32) -> Result<ElementSet> {
    let url = format!("{}{}", GP_SERVICE_URL, catnr);
    tracing::info!("Fetching element set for catalog number {}", catnr);

    let response = reqwest::blocking::get(&url)
        .map_err(|e| AnalysisError::ElementsUnavailable(e.to_string()))?;
    if !response.status().is_success() {
        return Err(AnalysisError::ElementsUnavailable(format!(
            "GP service returned {}",
            response.status()
        )));
    }
    let body = response
        .text()
        .map_err(|e| AnalysisError::ElementsUnavailable(e.to_string()))?;

    ElementSet::from_gp_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gp_response() {
        let body = "ISS (ZARYA)\n\
                    1 25544U 98067A   24001.50000000  .00016717  00000-0  10270-3 0  9000\n\
                    2 25544  51.6400 208.9163 0006317  69.9862 290.2001 15.49560000    06\n";
        let set = ElementSet::from_gp_response(body).unwrap();
        assert_eq!(set.name, "ISS (ZARYA)");
        assert!(set.line1.starts_with("1 25544"));
        assert!(set.line2.starts_with("2 25544"));
    }

    #[test]
    fn test_parse_not_found_body() {
        let err = ElementSet::from_gp_response("No GP data found\n").unwrap_err();
        assert!(matches!(err, AnalysisError::ElementsUnavailable(_)));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(ElementSet::from_gp_response("").is_err());
    }
}
