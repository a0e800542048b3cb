// raster.rs - Replay a frame plan into an RGBA image
//
// Software stand-in for the browser canvas. Glyphs come from the bitmap font,
// tilted by rotating each cell center; the grain is multiplied in last.

use image::{Rgba, RgbaImage};

use glyph_rain::grain::Grain;
use glyph_rain::render::{
    ADVANCE, Align, DrawCmd, INK, INK_DARK, INK_SPAN, Rgb, TAIL_ALPHA, TAIL_HALF_WIDTH,
    TAIL_START,
};

use crate::glyphs::{self, COLS, ROWS};

pub fn paint(cmds: &[DrawCmd], grain: &Grain, w: u32, h: u32) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);

    for cmd in cmds {
        match *cmd {
            DrawCmd::Clear { color } => {
                for px in img.pixels_mut() {
                    *px = Rgba([color.0, color.1, color.2, 255]);
                }
            }
            DrawCmd::Glyph { ch, x, y, size, align, angle, alpha } => {
                glyph(&mut img, ch, x, y, size, align, angle, alpha);
            }
            DrawCmd::Tail { x, y, length } => tail(&mut img, x, y, length),
            DrawCmd::Grain { dx, dy, w: gw, h: gh } => multiply_grain(&mut img, grain, dx, dy, gw, gh),
        }
    }

    img
}

/// Source-over blend of `color` at `alpha` (0..1)
fn blend(img: &mut RgbaImage, x: i32, y: i32, color: Rgb, alpha: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    let mix = |dst: u8, src: u8| (dst as f32 + (src as f32 - dst as f32) * alpha).round() as u8;
    px.0 = [mix(px.0[0], color.0), mix(px.0[1], color.1), mix(px.0[2], color.2), 255];
}

#[allow(clippy::too_many_arguments)]
fn glyph(img: &mut RgbaImage, ch: char, x: f32, y: f32, size: f32, align: Align, angle: f32, alpha: f32) {
    let rows = glyphs::bitmap(ch);
    let width = size * ADVANCE;
    // Cell pitch: font fills 0.6 of the em horizontally, 0.7 vertically
    let cell_w = width / COLS as f32;
    let cell_h = size * 0.7 / ROWS as f32;
    let cell = cell_w.max(cell_h).ceil() as i32;

    // Rotation pivot is the glyph's anchor, like ctx.translate + ctx.rotate
    let left = match align {
        Align::Left => 0.0,
        Align::Center => -width / 2.0,
    };
    let top = -(ROWS as f32 * cell_h) / 2.0;
    let (sin, cos) = angle.sin_cos();

    for row in 0..ROWS {
        // Ink gradient runs top to bottom across the glyph's span
        let local_y = top + (row as f32 + 0.5) * cell_h;
        let t = ((local_y + INK_SPAN) / (2.0 * INK_SPAN)).clamp(0.0, 1.0);
        let color = INK.lerp(INK_DARK, t);

        for col in 0..COLS {
            if !glyphs::lit(&rows, col, row) {
                continue;
            }
            let local_x = left + (col as f32 + 0.5) * cell_w;
            let cx = x + local_x * cos - local_y * sin;
            let cy = y + local_x * sin + local_y * cos;

            let x0 = (cx - cell as f32 / 2.0).round() as i32;
            let y0 = (cy - cell as f32 / 2.0).round() as i32;
            for py in y0..y0 + cell {
                for px in x0..x0 + cell {
                    blend(img, px, py, color, alpha);
                }
            }
        }
    }
}

/// Triangle from a 3-unit base just above the glyph up to the tail tip
fn tail(img: &mut RgbaImage, x: f32, y: f32, length: f32) {
    let base = y - TAIL_START;
    let tip = y - length;
    if tip >= base {
        return;
    }

    let fade_from = y - INK_SPAN;
    let fade_span = (fade_from - tip).max(1.0);

    for py in tip.floor() as i32..=base.ceil() as i32 {
        let fy = py as f32;
        if fy < tip || fy > base {
            continue;
        }
        let half = TAIL_HALF_WIDTH * (fy - tip) / (base - tip);
        let alpha = TAIL_ALPHA * ((fy - tip) / fade_span).clamp(0.0, 1.0);
        for px in (x - half).floor() as i32..=(x + half).ceil() as i32 {
            if (px as f32 - x).abs() <= half.max(0.5) {
                blend(img, px, py, INK, alpha);
            }
        }
    }
}

/// Multiply blend of the grain stretched over (dx, dy, gw, gh)
fn multiply_grain(img: &mut RgbaImage, grain: &Grain, dx: f32, dy: f32, gw: f32, gh: f32) {
    if grain.width() == 0 || grain.height() == 0 || gw <= 0.0 || gh <= 0.0 {
        return;
    }
    let sx = grain.width() as f32 / gw;
    let sy = grain.height() as f32 / gh;

    for (x, y, px) in img.enumerate_pixels_mut() {
        let gx = (x as f32 - dx) * sx;
        let gy = (y as f32 - dy) * sy;
        if gx < 0.0 || gy < 0.0 {
            continue;
        }
        let (gray, a) = grain.sample(gx as u32, gy as u32);
        let a = a as f32 / 255.0;
        let g = gray as f32 / 255.0;
        for c in &mut px.0[..3] {
            let dst = *c as f32;
            *c = (dst * (1.0 - a) + dst * g * a).round() as u8;
        }
    }
}
