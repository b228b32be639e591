//! RGB color values parsed from CSS-style hex attribute strings

use std::fmt;
use std::str::FromStr;

use crate::error::ViewerError;

/// An RGB color with components in `[0, 1]`.
///
/// Declarative attributes carry colors as hex strings (`#rrggbb` or the
/// shorthand `#rgb`, case-insensitive); [`Color::from_str`] parses them and
/// [`fmt::Display`] writes them back in lowercase long form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    fn channel_u8(value: f32) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl FromStr for Color {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ViewerError::invalid_configuration(format!("color `{s}` must start with `#`")))?;

        let parse = |chunk: &str| {
            u8::from_str_radix(chunk, 16).map_err(|_| {
                ViewerError::invalid_configuration(format!("color `{s}` contains a non-hex digit"))
            })
        };

        match digits.len() {
            // Shorthand: each nibble doubles (#1af -> #11aaff).
            3 => {
                let mut channels = [0u8; 3];
                for (slot, ch) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = parse(&ch.to_string())?;
                    *slot = nibble * 0x11;
                }
                Ok(Color::from_u8(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Color::from_u8(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
            )),
            _ => Err(ViewerError::invalid_configuration(format!(
                "color `{s}` must be `#rgb` or `#rrggbb`"
            ))),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            Self::channel_u8(self.r),
            Self::channel_u8(self.g),
            Self::channel_u8(self.b)
        )
    }
}
