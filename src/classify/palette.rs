use std::path::Path;

use anyhow::Context as _;

use crate::classify::filter::DEFAULT_TOLERANCE;
use crate::classify::matcher::ColorMatcher;
use crate::foundation::error::PlanviewResult;

/// Ordered obstacle color set plus the shared match tolerance.
///
/// Callers typically load this from JSON; the default palette is the two
/// brown terrain tones of the reference map plus the standard tolerance.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObstaclePalette {
    /// Reference obstacle colors, checked in order.
    pub colors: Vec<ColorMatcher>,
    /// Per-channel tolerance shared by all colors.
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
}

fn default_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

impl Default for ObstaclePalette {
    fn default() -> Self {
        Self {
            colors: vec![ColorMatcher::new(126, 106, 61), ColorMatcher::new(61, 53, 6)],
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ObstaclePalette {
    /// Parse a palette from JSON text.
    pub fn from_json(json: &str) -> PlanviewResult<Self> {
        let palette = serde_json::from_str(json).context("parse obstacle palette JSON")?;
        Ok(palette)
    }

    /// Load a palette from a JSON file.
    pub fn from_json_path(path: &Path) -> PlanviewResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read palette file '{}'", path.display()))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_preserves_order() {
        let palette = ObstaclePalette::default();
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(ObstaclePalette::from_json(&json).unwrap(), palette);
    }

    #[test]
    fn tolerance_defaults_when_omitted() {
        let palette =
            ObstaclePalette::from_json(r#"{"colors":[{"red":1,"green":2,"blue":3}]}"#).unwrap();
        assert_eq!(palette.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(palette.colors, vec![ColorMatcher::new(1, 2, 3)]);
    }
}
