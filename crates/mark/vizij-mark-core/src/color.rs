//! RGBA colors and HTML color literal parsing.

use serde::{Deserialize, Serialize};

use crate::error::MarkError;

/// Straight (non-premultiplied) RGBA, components in `0..=1`, sRGB by convention.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

/// Result of parsing a color literal. `alpha` is only present when the literal
/// spells it out (`#RGBA`, `#RRGGBBAA`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParsedColor {
    pub rgb: [f32; 3],
    pub alpha: Option<f32>,
}

impl ParsedColor {
    /// Combine with an existing color, keeping its alpha when the literal had none.
    pub fn over(self, current: Rgba) -> Rgba {
        Rgba::new(
            self.rgb[0],
            self.rgb[1],
            self.rgb[2],
            self.alpha.unwrap_or(current.a),
        )
    }
}

const NAMED: &[(&str, [u8; 3])] = &[
    ("red", [255, 0, 0]),
    ("cyan", [0, 255, 255]),
    ("blue", [0, 0, 255]),
    ("darkblue", [0, 0, 160]),
    ("lightblue", [173, 216, 230]),
    ("purple", [128, 0, 128]),
    ("yellow", [255, 255, 0]),
    ("lime", [0, 255, 0]),
    ("fuchsia", [255, 0, 255]),
    ("white", [255, 255, 255]),
    ("silver", [192, 192, 192]),
    ("grey", [128, 128, 128]),
    ("gray", [128, 128, 128]),
    ("black", [0, 0, 0]),
    ("orange", [255, 165, 0]),
    ("brown", [165, 42, 42]),
    ("maroon", [128, 0, 0]),
    ("green", [0, 128, 0]),
    ("olive", [128, 128, 0]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
];

/// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` or a named color.
pub fn parse_html_color(input: &str) -> Result<ParsedColor, MarkError> {
    let s = input.trim();
    let invalid = || MarkError::InvalidColor(input.to_string());

    let Some(hex) = s.strip_prefix('#') else {
        let lower = s.to_ascii_lowercase();
        return NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| ParsedColor {
                rgb: rgb.map(|c| f32::from(c) / 255.0),
                alpha: None,
            })
            .ok_or_else(invalid);
    };

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let digits: Vec<u8> = hex
        .bytes()
        .map(|b| (b as char).to_digit(16).unwrap_or(0) as u8)
        .collect();

    let channels: Vec<f32> = match digits.len() {
        3 | 4 => digits.iter().map(|d| f32::from(d * 17) / 255.0).collect(),
        6 | 8 => digits
            .chunks(2)
            .map(|pair| f32::from(pair[0] * 16 + pair[1]) / 255.0)
            .collect(),
        _ => return Err(invalid()),
    };

    Ok(ParsedColor {
        rgb: [channels[0], channels[1], channels[2]],
        alpha: channels.get(3).copied(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        let c = parse_html_color("#FF0000").unwrap();
        assert_eq!(c.rgb, [1.0, 0.0, 0.0]);
        assert_eq!(c.alpha, None);

        let c = parse_html_color("#0f08").unwrap();
        assert_eq!(c.rgb, [0.0, 1.0, 0.0]);
        assert!((c.alpha.unwrap() - 136.0 / 255.0).abs() < 1e-6);

        let c = parse_html_color("#336699cc").unwrap();
        assert!((c.rgb[1] - 0.4).abs() < 1e-6);
        assert!((c.alpha.unwrap() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn named_is_case_insensitive() {
        assert_eq!(parse_html_color("Navy").unwrap().rgb[2], 128.0 / 255.0);
        assert_eq!(
            parse_html_color("gray").unwrap(),
            parse_html_color("grey").unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#", "#12", "#12345", "#ggg", "rouge", "FF0000"] {
            assert_eq!(
                parse_html_color(bad),
                Err(MarkError::InvalidColor(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn literal_without_alpha_keeps_current() {
        let current = Rgba::new(0.1, 0.2, 0.3, 0.25);
        let red = parse_html_color("red").unwrap().over(current);
        assert_eq!(red, Rgba::new(1.0, 0.0, 0.0, 0.25));
    }
}
