/// One reference obstacle color.
///
/// Channels are `u8`, so the [0, 255] contract is enforced by the type
/// rather than a runtime check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorMatcher {
    /// Red channel of the reference color.
    pub red: u8,
    /// Green channel of the reference color.
    pub green: u8,
    /// Blue channel of the reference color.
    pub blue: u8,
}

impl ColorMatcher {
    /// Create a matcher for the given reference color.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// True when every channel of the sampled pixel is within `tolerance`
    /// of the reference. Pure, no failure modes.
    pub fn matches(&self, red: u8, green: u8, blue: u8, tolerance: u8) -> bool {
        self.red.abs_diff(red) <= tolerance
            && self.green.abs_diff(green) <= tolerance
            && self.blue.abs_diff(blue) <= tolerance
    }
}
