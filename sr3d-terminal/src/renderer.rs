/// Canvas output for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use sr3d_core::{color, Canvas, Rgb};
use std::io::Write;

/// Character luminosity ramp for monochrome output (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

/// How canvas pixels become terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Two pixels per cell in 24-bit colour
    TrueColor,
    /// One luminance character per cell, for terminals without RGB support
    Ascii,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::TrueColor => ColorMode::Ascii,
            ColorMode::Ascii => ColorMode::TrueColor,
        }
    }
}

/// Writes rendered frames to a terminal of `columns × rows` cells
pub struct CanvasPrinter {
    columns: usize,
    rows: usize,
    mode: ColorMode,
}

impl CanvasPrinter {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            mode: ColorMode::TrueColor,
        }
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Canvas resolution that fills the terminal in the current mode
    pub fn frame_size(&self) -> (usize, usize) {
        match self.mode {
            ColorMode::TrueColor => (self.columns, self.rows * 2),
            ColorMode::Ascii => (self.columns, self.rows),
        }
    }

    pub fn draw<W: Write>(&self, canvas: &Canvas, writer: &mut W) -> std::io::Result<()> {
        match self.mode {
            ColorMode::TrueColor => self.draw_blocks(canvas, writer)?,
            ColorMode::Ascii => self.draw_ascii(canvas, writer)?,
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn draw_blocks<W: Write>(&self, canvas: &Canvas, writer: &mut W) -> std::io::Result<()> {
        let rows = self.rows.min(canvas.height().div_ceil(2));
        let columns = self.columns.min(canvas.width());
        let mut last: Option<(Color, Color)> = None;

        for row in 0..rows {
            for x in 0..columns {
                let top = to_color(&canvas.pixel(x, row * 2));
                let bottom = if row * 2 + 1 < canvas.height() {
                    to_color(&canvas.pixel(x, row * 2 + 1))
                } else {
                    Color::Reset
                };

                // Only emit colour changes
                if last != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(top))?;
                    writer.queue(SetBackgroundColor(bottom))?;
                    last = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
            if row + 1 < rows {
                writer.queue(ResetColor)?;
                writer.queue(Print("\r\n"))?;
                last = None;
            }
        }
        Ok(())
    }

    fn draw_ascii<W: Write>(&self, canvas: &Canvas, writer: &mut W) -> std::io::Result<()> {
        let rows = self.rows.min(canvas.height());
        let columns = self.columns.min(canvas.width());

        for y in 0..rows {
            let line: String = (0..columns).map(|x| ramp_char(&canvas.pixel(x, y))).collect();
            writer.queue(Print(line))?;
            if y + 1 < rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        Ok(())
    }
}

fn to_color(pixel: &Rgb) -> Color {
    let [r, g, b] = color::to_rgb8(pixel);
    Color::Rgb { r, g, b }
}

/// Map a pixel to the luminosity ramp.
///
/// Only the white background maps to blank; model pixels start at `.` so
/// black surfaces stay visible.
fn ramp_char(pixel: &Rgb) -> char {
    if *pixel == color::WHITE {
        return LUMINOSITY_RAMP[0];
    }
    let steps = LUMINOSITY_RAMP.len() - 2;
    let luma = 0.2126 * pixel.x + 0.7152 * pixel.y + 0.0722 * pixel.z;
    let index = 1 + (luma.clamp(0.0, 1.0) * steps as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_frame_size() {
        let mut printer = CanvasPrinter::new(80, 24);
        assert_eq!(printer.frame_size(), (80, 48));
        printer.set_mode(ColorMode::Ascii);
        assert_eq!(printer.frame_size(), (80, 24));
    }

    #[test]
    fn test_ramp_char() {
        assert_eq!(ramp_char(&color::WHITE), ' ');
        // black must not vanish into the background
        assert_eq!(ramp_char(&Vector3::zeros()), '.');
        assert_eq!(ramp_char(&Vector3::new(0.5, 0.5, 0.5)), '+');
        assert_eq!(ramp_char(&Vector3::new(0.99, 0.99, 0.99)), '@');
    }

    #[test]
    fn test_draw_blocks() {
        let printer = CanvasPrinter::new(3, 2);
        let mut canvas = Canvas::new(3, 4);
        canvas.set_pixel(0, 0, Vector3::new(1.0, 0.0, 0.0));
        let mut out = Vec::new();
        printer.draw(&canvas, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
        // 24-bit foreground escape for the red pixel
        assert!(text.contains("38;2;255;0;0"));
    }

    #[test]
    fn test_draw_ascii() {
        let mut printer = CanvasPrinter::new(2, 2);
        printer.set_mode(ColorMode::Ascii);
        let mut canvas = Canvas::new(2, 2);
        canvas.set_pixel(1, 1, Vector3::new(0.5, 0.5, 0.5));
        let mut out = Vec::new();
        printer.draw(&canvas, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("  \r\n +"));
    }
}
