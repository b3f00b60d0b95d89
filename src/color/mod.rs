pub mod colormap;
pub mod contrast;
mod named;
pub mod resolve;

pub use colormap::{Colormap, ColormapRegistry};
pub use contrast::{select_ink, Ink};
pub use resolve::{ColorResolver, ColorSources, ResolvedColors};

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::{all_consuming, map, map_res, opt};
use nom::sequence::{preceded, tuple};
use nom::IResult;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};
use named::NAMED_COLORS;

/// Channel intensities of an opaque color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Scales unit intensities to 8 bit, rounding halves away from zero.
    pub fn from_unit(channels: [f64; 3]) -> Self {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(scale(channels[0]), scale(channels[1]), scale(channels[2]))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color either as given by name or hex code, or as raw channels.
#[derive(Debug, Clone, PartialEq, Eq, DeserializeFromStr)]
pub enum Color {
    Named(String),
    Hex(String),
    Rgb(Rgb),
}

impl Color {
    pub fn to_rgb(&self) -> Result<Rgb> {
        match self {
            Color::Named(name) => NAMED_COLORS
                .get(name.to_ascii_lowercase().as_str())
                .map(|channels| Rgb::from(*channels))
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::InvalidColor,
                        &format!("'{}' is not a known color name", name),
                    )
                }),
            Color::Hex(code) => parse_hex(code),
            Color::Rgb(rgb) => Ok(*rgb),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(channels: (u8, u8, u8)) -> Self {
        Color::Rgb(Rgb::from(channels))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let color = if s.starts_with('#') {
            Color::Hex(s.to_owned())
        } else {
            Color::Named(s.to_owned())
        };

        // Only validated colors leave here
        color.to_rgb()?;
        Ok(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{}", name),
            Color::Hex(code) => write!(f, "{}", code),
            Color::Rgb(rgb) => write!(f, "{}", rgb),
        }
    }
}

/// Parses a comma separated list of colors, e.g. `red,#00ff00,#00f`.
pub fn parse_color_list(list: &str) -> Result<Vec<Color>> {
    list.split(',').map(str::parse).collect()
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits| u8::from_str_radix(digits, 16),
    )(input)
}

fn hex_single(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()),
        |digit| u8::from_str_radix(digit, 16).map(|v| v * 17),
    )(input)
}

// #RRGGBB, #RRGGBBAA or #RGB; alpha is dropped.
fn hex_color(input: &str) -> IResult<&str, Rgb> {
    preceded(
        tag("#"),
        alt((
            map(
                tuple((hex_pair, hex_pair, hex_pair, opt(hex_pair))),
                |(r, g, b, _)| Rgb::new(r, g, b),
            ),
            map(tuple((hex_single, hex_single, hex_single)), |(r, g, b)| {
                Rgb::new(r, g, b)
            }),
        )),
    )(input)
}

fn parse_hex(code: &str) -> Result<Rgb> {
    all_consuming(hex_color)(code)
        .map(|(_, rgb)| rgb)
        .map_err(|_| {
            Error::new(
                ErrorKind::InvalidColor,
                &format!(
                    "'{}' is not a hex color, expected #RGB, #RRGGBB or #RRGGBBAA",
                    code
                ),
            )
        })
}
