use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// RGB color with 16-bit channels, the width the toolkit colormap works in.
///
/// An 8-bit channel value `v` is stored as `v * 0x101`, so `#ff0000`
/// becomes `red = 0xffff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    pub const BLACK: Color = Color::rgb8(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb8(0xff, 0xff, 0xff);

    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            red: r as u16 * 0x101,
            green: g as u16 * 0x101,
            blue: b as u16 * 0x101,
        }
    }

    /// Builds a color from a packed `0xRRGGBB` literal.
    pub const fn from_rgb24(value: u32) -> Self {
        Self::rgb8(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Parses a color specification: `#RGB`, `#RRGGBB`, `#RRRGGGBBB`,
    /// `#RRRRGGGGBBBB` or a color name such as `navy` or `dark gray`.
    pub fn parse(spec: &str) -> Result<Self, ColorParseError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ColorParseError::Empty);
        }
        match spec.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => {
                lookup_named(spec).ok_or_else(|| ColorParseError::UnknownName(spec.to_string()))
            }
        }
    }

    /// The high byte of each channel, i.e. the 8-bit view of the color.
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        ((self.red >> 8) as u8, (self.green >> 8) as u8, (self.blue >> 8) as u8)
    }

    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Perceived brightness on a 0..=255 scale, `(R*299 + G*587 + B*114) / 1000`
    /// over the 8-bit channels.
    pub fn brightness(self) -> u32 {
        let (r, g, b) = self.to_rgb8();
        (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000
    }

    pub fn is_dark(self) -> bool {
        self.brightness() < 128
    }

    pub fn is_black(self) -> bool {
        self == Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color specification")]
    Empty,
    #[error("expected 3, 6, 9 or 12 hexadecimal digits, found {0}")]
    InvalidLength(usize),
    #[error("contains non-hexadecimal digits")]
    InvalidHex,
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex);
    }
    let len = hex.len();
    if !matches!(len, 3 | 6 | 9 | 12) {
        return Err(ColorParseError::InvalidLength(len));
    }
    let width = len / 3;
    let channel = |index: usize| -> Result<u16, ColorParseError> {
        let digits = &hex[index * width..(index + 1) * width];
        let value = u16::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidHex)?;
        Ok(widen(value, width as u32 * 4))
    };
    Ok(Color::new(channel(0)?, channel(1)?, channel(2)?))
}

// Left-aligns a `bits`-wide value in 16 bits and repeats it into the low
// bits, so `f` becomes `ffff` and `ab` becomes `abab`.
fn widen(value: u16, bits: u32) -> u16 {
    let mut widened = u32::from(value) << (16 - bits);
    let mut filled = bits;
    while filled < 16 {
        widened |= widened >> filled;
        filled *= 2;
    }
    (widened & 0xffff) as u16
}

fn lookup_named(name: &str) -> Option<Color> {
    let key: String = name
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    let key = key.replace("grey", "gray");
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, rgb)| Color::from_rgb24(*rgb))
}

// X11 rgb.txt values for the names theme authors commonly reach for.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x00ff00),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("gray", 0xbebebe),
    ("darkgray", 0xa9a9a9),
    ("lightgray", 0xd3d3d3),
    ("dimgray", 0x696969),
    ("slategray", 0x708090),
    ("orange", 0xffa500),
    ("darkorange", 0xff8c00),
    ("purple", 0xa020f0),
    ("navy", 0x000080),
    ("navyblue", 0x000080),
    ("maroon", 0xb03060),
    ("brown", 0xa52a2a),
    ("pink", 0xffc0cb),
    ("darkred", 0x8b0000),
    ("darkgreen", 0x006400),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkmagenta", 0x8b008b),
    ("teal", 0x008080),
    ("olive", 0x808000),
    ("silver", 0xc0c0c0),
    ("gold", 0xffd700),
    ("violet", 0xee82ee),
    ("indigo", 0x4b0082),
    ("coral", 0xff7f50),
    ("salmon", 0xfa8072),
    ("turquoise", 0x40e0d0),
    ("lime", 0x00ff00),
    ("aqua", 0x00ffff),
    ("fuchsia", 0xff00ff),
    ("steelblue", 0x4682b4),
    ("skyblue", 0x87ceeb),
    ("royalblue", 0x4169e1),
    ("forestgreen", 0x228b22),
    ("khaki", 0xf0e68c),
    ("beige", 0xf5f5dc),
    ("ivory", 0xfffff0),
    ("snow", 0xfffafa),
    ("crimson", 0xdc143c),
    ("tomato", 0xff6347),
    ("chocolate", 0xd2691e),
    ("tan", 0xd2b48c),
    ("orchid", 0xda70d6),
    ("plum", 0xdda0dd),
    ("lavender", 0xe6e6fa),
];
