use crate::annotation::format_value;
use crate::calendar::MonthSpec;
use crate::color::contrast::ink_for;
use crate::color::Rgb;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::grid::{GridSlots, COLUMNS, ROWS};
use crate::raster::{FontSize, Measure};
use crate::week::WeekAlignment;

pub const CELL_SIZE: u32 = 100;
pub const CELL_GAP: u32 = 10;
pub const MARGIN: u32 = 20;
pub const TITLE_HEIGHT: u32 = 60;
pub const HEADER_HEIGHT: u32 = 40;
pub const DAY_NUMBER_INSET: u32 = 6;
/// Assumed advance of one title character, used instead of measuring.
pub const TITLE_CHAR_WIDTH: u32 = 24;

const PITCH: u32 = CELL_SIZE + CELL_GAP;

pub const GRID_ORIGIN: (u32, u32) = (MARGIN, MARGIN + TITLE_HEIGHT + HEADER_HEIGHT);
pub const CANVAS_WIDTH: u32 = 2 * MARGIN + COLUMNS as u32 * PITCH - CELL_GAP;
pub const CANVAS_HEIGHT: u32 = GRID_ORIGIN.1 + ROWS as u32 * PITCH - CELL_GAP + MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// A piece of text and the top left corner of its box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPlacement {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: FontSize,
    pub color: Rgb,
}

/// Everything that ends up on the canvas, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub cells: Vec<(Rect, Rgb)>,
    pub texts: Vec<TextPlacement>,
}

pub fn slot_rect(idx: usize) -> Rect {
    let (origin_x, origin_y) = GRID_ORIGIN;
    Rect::new(
        origin_x + (idx % COLUMNS) as u32 * PITCH,
        origin_y + (idx / COLUMNS) as u32 * PITCH,
        CELL_SIZE,
        CELL_SIZE,
    )
}

pub fn header_rect(column: usize) -> Rect {
    Rect::new(
        GRID_ORIGIN.0 + column as u32 * PITCH,
        MARGIN + TITLE_HEIGHT,
        CELL_SIZE,
        HEADER_HEIGHT,
    )
}

/// Position that centers a box of `size` in `area`. A box larger than the
/// area starts at its origin on that axis.
pub fn center_in(size: (u32, u32), area: &Rect) -> (i32, i32) {
    let (width, height) = size;

    (
        (area.x + area.width.saturating_sub(width) / 2) as i32,
        (area.y + area.height.saturating_sub(height) / 2) as i32,
    )
}

/// The title is not measured; its offset only accounts for the length of
/// the month name (plus a space and four year digits).
pub fn title_position(month_name: &str) -> (i32, i32) {
    let chars = month_name.chars().count() as i32 + 5;
    (
        (CANVAS_WIDTH as i32 - TITLE_CHAR_WIDTH as i32 * chars) / 2,
        MARGIN as i32,
    )
}

pub fn layout(
    spec: &MonthSpec,
    alignment: &WeekAlignment,
    grid: &GridSlots,
    config: &RenderConfig,
    measure: &dyn Measure,
) -> Result<RenderPlan> {
    let background = config.background_color.to_rgb()?;
    let neutral = config.neutral_color.to_rgb()?;
    let text_color = config.text_color.to_rgb()?;

    let mut texts = Vec::new();

    let (title_x, title_y) = title_position(spec.name());
    texts.push(TextPlacement {
        text: spec.title(),
        x: title_x,
        y: title_y,
        size: FontSize::Title,
        color: text_color,
    });

    for (column, label) in alignment.day_labels.iter().enumerate() {
        let (x, y) = center_in(measure.measure(label, FontSize::Header), &header_rect(column));
        texts.push(TextPlacement {
            text: (*label).to_owned(),
            x,
            y,
            size: FontSize::Header,
            color: text_color,
        });
    }

    let mut cells = Vec::with_capacity(grid.slots().len());

    for (idx, slot) in grid.slots().iter().enumerate() {
        let rect = slot_rect(idx);
        let fill = match &slot.color {
            Some(color) => color.to_rgb()?,
            None => neutral,
        };
        cells.push((rect, fill));

        let day = match slot.day {
            Some(day) => day,
            None => continue,
        };
        let ink = ink_for(fill).rgb();

        if config.show_day_numbers {
            texts.push(TextPlacement {
                text: day.to_string(),
                x: (rect.x + DAY_NUMBER_INSET) as i32,
                y: (rect.y + DAY_NUMBER_INSET) as i32,
                size: FontSize::DayNumber,
                color: ink,
            });
        }

        if !config.show_annotation {
            continue;
        }

        if let Some(text) = format_value(slot.value, config.annotation_precision) {
            let (x, y) = center_in(measure.measure(&text, FontSize::Annotation), &rect);
            texts.push(TextPlacement {
                text,
                x,
                y,
                size: FontSize::Annotation,
                color: ink,
            });
        }
    }

    log::debug!(
        "laid out {} cells and {} texts for {}",
        cells.len(),
        texts.len(),
        spec
    );

    Ok(RenderPlan {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        background,
        cells,
        texts,
    })
}
