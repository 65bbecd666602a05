//! Static page copy.
//!
//! The overlay has no glyph rasterizer; copy renders as skeleton bars whose
//! widths derive from the text they stand in for, so the layout still reads
//! like the original page.

/// Header wordmark.
pub const BRAND: &str = "KICKSHOW";

/// Hero headline.
pub const HEADLINE: &str = "AIRFLOW 2089";

/// New-drop card label.
pub const NEW_DROP: &str = "NEW DROP";

/// Body copy for the content sections, one paragraph per line.
pub const SECTIONS: [&[&str]; 2] = [
    &[
        "Engineered mesh upper with a heat-bonded cage",
        "Full-length responsive foam midsole",
        "Carbon plate tuned for forward roll",
    ],
    &[
        "Recycled rubber outsole, zonal traction",
        "Reflective lacing system for night runs",
        "Drops 08.30, members get early access",
    ],
];

/// Bar width fraction a copy line occupies, derived from its length.
///
/// Longest expected line maps to ~0.9 of the column; everything else scales
/// proportionally with a floor so short lines stay visible.
pub fn line_width_fraction(line: &str) -> f32 {
    const FULL_LINE_CHARS: f32 = 52.0;
    (line.len() as f32 / FULL_LINE_CHARS).clamp(0.2, 0.9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_widths_are_clamped_fractions() {
        for section in SECTIONS {
            for line in section {
                let w = line_width_fraction(line);
                assert!((0.2..=0.9).contains(&w), "{line}: {w}");
            }
        }
        assert_eq!(line_width_fraction(""), 0.2);
        assert_eq!(line_width_fraction(&"x".repeat(200)), 0.9);
    }
}
