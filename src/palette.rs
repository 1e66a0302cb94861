//! Colors used to draw each theme

use crate::state::Theme;
use anyhow::anyhow;
use serde::Deserialize;
use std::str::FromStr;

/// 24-bit RGB color. Deserializes from HTML format (#rrggbb), so palettes can
/// be written by hand in the config file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

// Anything above 24 bits is dropped
impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self {
            red: (value >> 16) as u8,
            green: (value >> 8) as u8,
            blue: value as u8,
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('#') {
            // from_str_radix alone would let a sign through
            Some(hex)
                if hex.len() == 6
                    && hex.bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                Ok(u32::from_str_radix(hex, 16)?.into())
            }
            _ => Err(anyhow!("Invalid color `{s}`, expected #rrggbb")),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = <Color as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The colors for a single theme
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Palette {
    /// Body text
    pub text: Color,
    /// Headings and the city name
    pub accent: Color,
    /// Labels, history chips, status lines
    pub muted: Color,
    pub error: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            text: 0x1f2933.into(),
            accent: 0x2563eb.into(),
            muted: 0x6b7280.into(),
            error: 0xb91c1c.into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            text: 0xe5e7eb.into(),
            accent: 0x60a5fa.into(),
            muted: 0x9ca3af.into(),
            error: 0xf87171.into(),
        }
    }
}

/// One palette per theme
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palettes {
    pub light: Palette,
    pub dark: Palette,
}

impl Palettes {
    pub fn get(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self {
            light: Palette::light(),
            dark: Palette::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let color: Color = "#2563eb".parse().unwrap();
        assert_eq!(
            color,
            Color {
                red: 0x25,
                green: 0x63,
                blue: 0xeb
            }
        );
        assert_eq!(color, Color::from(0x2563eb));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("2563eb".parse::<Color>().is_err());
        assert!("#2563e".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("#+12345".parse::<Color>().is_err());
        assert!("#-12345".parse::<Color>().is_err());
    }

    #[test]
    fn test_deserialize() {
        let palette: Palette = serde_json::from_str(
            r##"{
                "text": "#000000",
                "accent": "#0000ff",
                "muted": "#808080",
                "error": "#ff0000"
            }"##,
        )
        .unwrap();
        assert_eq!(palette.accent, Color::from(0x0000ff));

        let result = serde_json::from_str::<Color>(r##""#+12345""##);
        assert!(result.is_err());
    }

    #[test]
    fn test_palette_by_theme() {
        let palettes = Palettes::default();
        assert_eq!(palettes.get(Theme::Light), &Palette::light());
        assert_eq!(palettes.get(Theme::Dark), &Palette::dark());
    }
}
