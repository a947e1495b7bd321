//! Rasterizer: executes paint commands into an RGBA bitmap and encodes PNG.
//!
//! Text is drawn with a built-in 5x7 bitmap font scaled to the requested
//! size; glyphs outside the font's coverage (emoji icons and the like)
//! render as a filled block. Everything is integer math plus a fixed
//! gradient interpolation, so output is byte-for-byte deterministic.

use std::io::Cursor;

use image::{ImageFormat, Rgba as ImgRgba, RgbaImage};

use crate::error::{Error, Result};
use crate::rendering::layout::{char_width, Rect};
use crate::rendering::paint::{PaintCommand, Rgba};
use crate::rendering::Screenshot;

/// Execute paint commands onto a transparent canvas of `width` x `height`
/// logical pixels, rasterized at `scale`, and encode the result as PNG.
pub fn rasterize(
    commands: &[PaintCommand],
    width: u32,
    height: u32,
    scale: u32,
) -> Result<Screenshot> {
    if scale == 0 {
        return Err(Error::RenderError("output scale must be non-zero".into()));
    }
    let out_w = width * scale;
    let out_h = height * scale;
    let mut img = RgbaImage::new(out_w, out_h);

    for command in commands {
        match command {
            PaintCommand::SolidRect { rect, rgba, radius } => {
                fill_rect(&mut img, rect, *radius, scale, |_, _| *rgba);
            }
            PaintCommand::GradientRect {
                rect,
                stops,
                radius,
            } => {
                let rw = rect.width * scale;
                let rh = rect.height * scale;
                let denom = (rw + rh).saturating_sub(2).max(1) as f32;
                fill_rect(&mut img, rect, *radius, scale, |dx, dy| {
                    sample_gradient(stops, (dx + dy) as f32 * 100.0 / denom)
                });
            }
            PaintCommand::Text {
                rect,
                content,
                size,
                rgba,
                bold,
                letter_spacing,
            } => {
                draw_text(&mut img, rect, content, *size, *rgba, *bold, *letter_spacing, scale);
            }
        }
    }

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    Ok(Screenshot {
        width: out_w,
        height: out_h,
        png_data: png,
    })
}

fn fill_rect<F: Fn(u32, u32) -> Rgba>(
    img: &mut RgbaImage,
    rect: &Rect,
    radius: u32,
    scale: u32,
    color_at: F,
) {
    let rw = rect.width * scale;
    let rh = rect.height * scale;
    let rad = (radius * scale).min(rw / 2).min(rh / 2);
    let x0 = rect.x * scale as i32;
    let y0 = rect.y * scale as i32;
    for dy in 0..rh {
        for dx in 0..rw {
            if !inside_rounded(dx, dy, rw, rh, rad) {
                continue;
            }
            let px = x0 + dx as i32;
            let py = y0 + dy as i32;
            if px < 0 || py < 0 || px >= img.width() as i32 || py >= img.height() as i32 {
                continue;
            }
            blend_px(img, px as u32, py as u32, color_at(dx, dy));
        }
    }
}

fn inside_rounded(dx: u32, dy: u32, w: u32, h: u32, rad: u32) -> bool {
    if rad == 0 {
        return true;
    }
    let cx = if dx < rad {
        rad - dx
    } else if dx >= w - rad {
        dx - (w - rad - 1)
    } else {
        0
    };
    let cy = if dy < rad {
        rad - dy
    } else if dy >= h - rad {
        dy - (h - rad - 1)
    } else {
        0
    };
    cx * cx + cy * cy <= rad * rad
}

fn sample_gradient(stops: &[(Rgba, u8)], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::new(255, 255, 255, 255);
    };
    let t = t.clamp(0.0, 100.0);
    if t <= first.1 as f32 {
        return first.0;
    }
    for pair in stops.windows(2) {
        let (c0, p0) = pair[0];
        let (c1, p1) = pair[1];
        if t <= p1 as f32 {
            let span = (p1 - p0) as f32;
            let k = if span <= 0.0 { 0.0 } else { (t - p0 as f32) / span };
            return lerp(c0, c1, k);
        }
    }
    stops[stops.len() - 1].0
}

fn lerp(a: Rgba, b: Rgba, k: f32) -> Rgba {
    let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * k).round() as u8;
    Rgba::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b), ch(a.a, b.a))
}

fn blend_px(img: &mut RgbaImage, x: u32, y: u32, c: Rgba) {
    if c.a == 255 {
        img.put_pixel(x, y, ImgRgba([c.r, c.g, c.b, 255]));
        return;
    }
    if c.a == 0 {
        return;
    }
    let d = img.get_pixel(x, y).0;
    let a = c.a as u32;
    let ia = 255 - a;
    let da = d[3] as u32;
    let out_a = a + da * ia / 255;
    if out_a == 0 {
        return;
    }
    let ch = |s: u8, dst: u8| (((s as u32 * a) + (dst as u32 * da * ia / 255)) / out_a) as u8;
    img.put_pixel(
        x,
        y,
        ImgRgba([ch(c.r, d[0]), ch(c.g, d[1]), ch(c.b, d[2]), out_a as u8]),
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    img: &mut RgbaImage,
    rect: &Rect,
    content: &str,
    size: u32,
    rgba: Rgba,
    bold: bool,
    letter_spacing: u32,
    scale: u32,
) {
    let cell_w = char_width(size) * scale;
    let cell_h = size * scale;
    if cell_w == 0 || cell_h == 0 {
        return;
    }
    // Glyphs are vertically centered in the line box.
    let ty = rect.y + (rect.height.saturating_sub(size) / 2) as i32;
    let y0 = ty * scale as i32;
    let advance = (char_width(size) + letter_spacing) * scale;
    let mut x = rect.x * scale as i32;

    for ch in content.chars() {
        let bits = glyph(ch);
        let passes = if bold { 2 } else { 1 };
        for pass in 0..passes {
            let x0 = x + pass;
            for dy in 0..cell_h {
                let row = bits[(dy * 7 / cell_h) as usize];
                for dx in 0..cell_w {
                    let col = dx * 5 / cell_w;
                    if row >> (4 - col) & 1 == 0 {
                        continue;
                    }
                    let px = x0 + dx as i32;
                    let py = y0 + dy as i32;
                    if px < 0 || py < 0 || px >= img.width() as i32 || py >= img.height() as i32 {
                        continue;
                    }
                    blend_px(img, px as u32, py as u32, rgba);
                }
            }
        }
        x += advance as i32;
    }
}

/// 5x7 glyph rows, bit 4 leftmost. Lowercase maps to uppercase; anything
/// outside the table renders as a filled block.
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0, 0, 0, 0, 0, 0, 0],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x0A, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ';' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x0A, 0x0A, 0x14, 0x00, 0x00, 0x00, 0x00],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        _ => [0x0E, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x0E],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_empty_is_transparent_png() {
        let shot = rasterize(&[], 8, 8, 2).expect("rasterize");
        assert_eq!(shot.width, 16);
        assert_eq!(shot.height, 16);
        assert_eq!(&shot.png_data[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn zero_scale_is_rejected() {
        assert!(rasterize(&[], 8, 8, 0).is_err());
    }

    #[test]
    fn gradient_endpoints_match_stops() {
        let red = Rgba::new(255, 0, 0, 255);
        let blue = Rgba::new(0, 0, 255, 255);
        let stops = vec![(red, 0), (blue, 100)];
        assert_eq!(sample_gradient(&stops, 0.0), red);
        assert_eq!(sample_gradient(&stops, 100.0), blue);
        let mid = sample_gradient(&stops, 50.0);
        assert!(mid.r > 0 && mid.b > 0);
    }

    #[test]
    fn rounded_corners_are_clipped() {
        let rect = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 20,
        };
        let mut img = RgbaImage::new(20, 20);
        fill_rect(&mut img, &rect, 8, 1, |_, _| Rgba::new(255, 255, 255, 255));
        // corner pixel stays transparent, center is filled
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(10, 10).0[3], 255);
    }

    #[test]
    fn unknown_glyph_renders_as_block() {
        let block = glyph('\u{2694}');
        assert!(block.iter().any(|row| *row != 0));
    }
}
