use derive_more::Display;

use super::{Color, Rgb};
use crate::error::Result;

/// Text color that stays legible on a given background.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    #[display(fmt = "dark")]
    Dark,
    #[display(fmt = "light")]
    Light,
}

impl Ink {
    pub const DARK: Rgb = Rgb::new(17, 17, 17);
    pub const LIGHT: Rgb = Rgb::new(240, 240, 240);

    pub fn rgb(self) -> Rgb {
        match self {
            Ink::Dark => Self::DARK,
            Ink::Light => Self::LIGHT,
        }
    }
}

// Luminance weights in per mille, so the threshold compares exactly.
const WEIGHTS: [u32; 3] = [299, 587, 114];
const THRESHOLD: u32 = 186_000;

/// `0.299 R + 0.587 G + 0.114 B`
pub fn luminance(rgb: Rgb) -> f64 {
    f64::from(luminance_milli(rgb)) / 1000.0
}

fn luminance_milli(rgb: Rgb) -> u32 {
    rgb.channels()
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(channel, weight)| u32::from(*channel) * weight)
        .sum()
}

pub fn ink_for(rgb: Rgb) -> Ink {
    if luminance_milli(rgb) > THRESHOLD {
        Ink::Dark
    } else {
        Ink::Light
    }
}

pub fn select_ink(background: &Color) -> Result<Ink> {
    background.to_rgb().map(ink_for)
}
