pub mod font;
mod image_canvas;

pub use font::{load_font, FontProvider, SystemFonts};
pub use image_canvas::ImageCanvas;

use std::path::Path;

use crate::color::Rgb;
use crate::error::Result;
use crate::layout::{Rect, RenderPlan, TextPlacement};

/// The text roles of a month plot, each drawn at its own size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Title,
    Header,
    Annotation,
    DayNumber,
}

impl FontSize {
    pub fn px(self) -> f32 {
        match self {
            FontSize::Title => 48.0,
            FontSize::Header => 28.0,
            FontSize::Annotation => 32.0,
            FontSize::DayNumber => 18.0,
        }
    }
}

pub trait Measure {
    /// Width and height in pixels of `text` when drawn at `size`.
    fn measure(&self, text: &str, size: FontSize) -> (u32, u32);
}

pub trait Canvas: Measure {
    fn fill_rect(&mut self, rect: &Rect, color: Rgb);
    /// Draws with the top left corner of the text box at the given position.
    fn draw_text(&mut self, text: &TextPlacement);
    fn save(&self, path: &Path) -> Result<()>;
}

/// Draws a plan in order: background, cells, then all text on top.
pub fn paint<C: Canvas + ?Sized>(plan: &RenderPlan, canvas: &mut C) {
    canvas.fill_rect(
        &Rect::new(0, 0, plan.width, plan.height),
        plan.background,
    );

    for (rect, fill) in plan.cells.iter() {
        canvas.fill_rect(rect, *fill);
    }

    for text in plan.texts.iter() {
        canvas.draw_text(text);
    }
}
