use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use maplit::hashmap;

use crate::error::PlotError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const CORNFLOWER_BLUE: Color = Color::rgb(100, 149, 237);
    /// Default colour cycle of the usual plotting libraries (`tab:blue`, `tab:orange`).
    pub const TAB_BLUE: Color = Color::rgb(31, 119, 180);
    pub const TAB_ORANGE: Color = Color::rgb(255, 127, 14);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

static NAMED_COLORS: LazyLock<HashMap<&str, Color>> = LazyLock::new(|| {
    hashmap! {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "cornflowerblue" => Color::CORNFLOWER_BLUE,
        "tab:blue" => Color::TAB_BLUE,
        "tab:orange" => Color::TAB_ORANGE,
        "gray" => Color::rgb(128, 128, 128),
        "grey" => Color::rgb(128, 128, 128),
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "orange" => Color::rgb(255, 165, 0),
        "gold" => Color::rgb(255, 215, 0),
        "salmon" => Color::rgb(250, 128, 114),
        "lightgreen" => Color::rgb(144, 238, 144),
        "lightblue" => Color::rgb(173, 216, 230),
        "steelblue" => Color::rgb(70, 130, 180),
    }
});

impl FromStr for Color {
    type Err = PlotError;

    /// Accepts `#rrggbb` or one of a handful of CSS colour names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#')
            .and_then(Self::from_hex)
            .or_else(|| NAMED_COLORS.get(s.to_ascii_lowercase().as_str()).copied())
            .ok_or_else(|| PlotError::InvalidColor(s.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
