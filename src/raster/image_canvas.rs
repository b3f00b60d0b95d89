use fontdue::Font;
use image::{Rgb as Pixel, RgbImage};
use std::path::Path;

use super::{Canvas, FontSize, Measure};
use crate::color::Rgb;
use crate::error::Result;
use crate::layout::{Rect, TextPlacement};

/// In-memory RGB canvas. Text is only drawn once a font is attached;
/// without one, measuring falls back to an average glyph width.
pub struct ImageCanvas {
    image: RgbImage,
    font: Option<Font>,
}

impl ImageCanvas {
    const FALLBACK_ADVANCE: f32 = 0.6;

    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        ImageCanvas {
            image: RgbImage::from_pixel(width, height, Pixel(background.channels())),
            font: None,
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    fn ascent(font: &Font, px: f32) -> f32 {
        font.horizontal_line_metrics(px)
            .map_or(px, |metrics| metrics.ascent)
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgb, coverage: u8) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }

        let alpha = coverage as u32;
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, src) in pixel.0.iter_mut().zip(color.channels().iter()) {
            *dst = ((*src as u32 * alpha + *dst as u32 * (255 - alpha) + 127) / 255) as u8;
        }
    }
}

impl Measure for ImageCanvas {
    fn measure(&self, text: &str, size: FontSize) -> (u32, u32) {
        let px = size.px();

        match &self.font {
            Some(font) => {
                let width: f32 = text
                    .chars()
                    .map(|c| font.metrics(c, px).advance_width)
                    .sum();
                (width.round() as u32, Self::ascent(font, px).round() as u32)
            }
            None => {
                let width = text.chars().count() as f32 * px * Self::FALLBACK_ADVANCE;
                (width.round() as u32, px.round() as u32)
            }
        }
    }
}

impl Canvas for ImageCanvas {
    fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let x_end = rect.x.saturating_add(rect.width).min(self.image.width());
        let y_end = rect.y.saturating_add(rect.height).min(self.image.height());
        let pixel = Pixel(color.channels());

        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.image.put_pixel(x, y, pixel);
            }
        }
    }

    fn draw_text(&mut self, text: &TextPlacement) {
        let font = match self.font.take() {
            Some(font) => font,
            None => return,
        };

        let px = text.size.px();
        let baseline = text.y as f32 + Self::ascent(&font, px);
        let mut pen_x = text.x as f32;

        for c in text.text.chars() {
            let (metrics, coverage) = font.rasterize(c, px);
            let left = pen_x.round() as i32 + metrics.xmin;
            let top = baseline.round() as i32 - metrics.height as i32 - metrics.ymin;

            for (idx, alpha) in coverage.iter().enumerate().filter(|(_, a)| **a > 0) {
                let dx = (idx % metrics.width) as i32;
                let dy = (idx / metrics.width) as i32;
                self.blend(left + dx, top + dy, text.color, *alpha);
            }

            pen_x += metrics.advance_width;
        }

        self.font = Some(font);
    }

    fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path)?;
        log::info!(
            "wrote {}x{} image to {}",
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn fallback_measure() {
        let canvas = ImageCanvas::new(10, 10, Rgb::new(0, 0, 0));
        assert_eq!(canvas.measure("12", FontSize::Annotation), (38, 32));
        assert_eq!(canvas.measure("", FontSize::Title), (0, 48));
    }

    #[test]
    fn fill_is_clipped() {
        let mut canvas = ImageCanvas::new(10, 10, Rgb::new(255, 255, 255));
        canvas.fill_rect(&Rect::new(5, 5, 100, 100), Rgb::new(255, 0, 0));

        assert_eq!(canvas.image().get_pixel(4, 4).0, [255, 255, 255]);
        assert_eq!(canvas.image().get_pixel(5, 5).0, [255, 0, 0]);
        assert_eq!(canvas.image().get_pixel(9, 9).0, [255, 0, 0]);
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut canvas = ImageCanvas::new(20, 20, Rgb::new(255, 255, 255));
        canvas.draw_text(&TextPlacement {
            text: "7".to_owned(),
            x: 0,
            y: 0,
            size: FontSize::DayNumber,
            color: Rgb::new(0, 0, 0),
        });
        assert!(canvas.image().pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("month.png");

        let mut canvas = ImageCanvas::new(4, 3, Rgb::new(0, 0, 255));
        canvas.fill_rect(&Rect::new(0, 0, 2, 3), Rgb::new(0, 128, 0));
        canvas.save(&path).unwrap();

        let read = image::open(&path).unwrap().to_rgb8();
        assert_eq!(read.dimensions(), (4, 3));
        assert_eq!(read.get_pixel(0, 0).0, [0, 128, 0]);
        assert_eq!(read.get_pixel(3, 2).0, [0, 0, 255]);
    }

    #[test]
    fn save_into_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = ImageCanvas::new(1, 1, Rgb::new(0, 0, 0));
        let err = canvas.save(&dir.path().join("nope/month.png")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
