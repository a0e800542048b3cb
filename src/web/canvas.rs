// canvas.rs - Replay a frame plan onto a 2D canvas

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use crate::grain::Grain;
use crate::render::{
    Align, DrawCmd, INK, INK_DARK, INK_SPAN, TAIL_ALPHA, TAIL_HALF_WIDTH, TAIL_START,
};

const FONT_FAMILY: &str = "'Courier Prime', 'Courier New', monospace";

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    grain: HtmlCanvasElement,
    ink: String,
    ink_dark: String,
}

impl CanvasPainter {
    pub fn new(document: &Document, canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        let grain = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
        Ok(Self { canvas, ctx, grain, ink: INK.css(), ink_dark: INK_DARK.css() })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the drawing buffer to the window and upload fresh grain
    pub fn resize(&mut self, w: u32, h: u32, grain: &Grain) -> Result<(), JsValue> {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.upload_grain(grain)
    }

    fn upload_grain(&mut self, grain: &Grain) -> Result<(), JsValue> {
        self.grain.set_width(grain.width());
        self.grain.set_height(grain.height());
        if grain.width() == 0 || grain.height() == 0 {
            return Ok(());
        }
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(grain.pixels()),
            grain.width(),
            grain.height(),
        )?;
        context_2d(&self.grain)?.put_image_data(&data, 0.0, 0.0)
    }

    pub fn paint(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        for cmd in cmds {
            match *cmd {
                DrawCmd::Clear { color } => {
                    self.ctx.set_fill_style_str(&color.css());
                    self.ctx.fill_rect(
                        0.0,
                        0.0,
                        self.canvas.width() as f64,
                        self.canvas.height() as f64,
                    );
                }
                DrawCmd::Glyph { ch, x, y, size, align, angle, alpha } => {
                    self.glyph(ch, x as f64, y as f64, size, align, angle as f64, alpha as f64)?;
                }
                DrawCmd::Tail { x, y, length } => {
                    self.tail(x as f64, y as f64, length as f64)?;
                }
                DrawCmd::Grain { dx, dy, w, h } => {
                    self.ctx.set_global_composite_operation("multiply")?;
                    self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                        &self.grain,
                        dx as f64,
                        dy as f64,
                        w as f64,
                        h as f64,
                    )?;
                    self.ctx.set_global_composite_operation("source-over")?;
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn glyph(
        &self,
        ch: char,
        x: f64,
        y: f64,
        size: f32,
        align: Align,
        angle: f64,
        alpha: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(x, y)?;
        if angle != 0.0 {
            ctx.rotate(angle)?;
        }

        let span = INK_SPAN as f64;
        let grad = ctx.create_linear_gradient(0.0, -span, 0.0, span);
        grad.add_color_stop(0.0, &self.ink)?;
        grad.add_color_stop(1.0, &self.ink_dark)?;
        ctx.set_fill_style_canvas_gradient(&grad);

        ctx.set_global_alpha(alpha);
        ctx.set_font(&format!("{size}px {FONT_FAMILY}"));
        ctx.set_text_align(match align {
            Align::Left => "left",
            Align::Center => "center",
        });
        ctx.set_text_baseline("middle");

        let mut buf = [0u8; 4];
        ctx.fill_text(ch.encode_utf8(&mut buf), 0.0, 0.0)?;

        ctx.restore();
        Ok(())
    }

    fn tail(&self, x: f64, y: f64, length: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let top = y - length;
        let grad = ctx.create_linear_gradient(x, y - INK_SPAN as f64, x, top);
        grad.add_color_stop(0.0, &INK.css_alpha(TAIL_ALPHA))?;
        grad.add_color_stop(1.0, &INK.css_alpha(0.0))?;
        ctx.set_fill_style_canvas_gradient(&grad);

        let base = y - TAIL_START as f64;
        let half = TAIL_HALF_WIDTH as f64;
        ctx.begin_path();
        ctx.move_to(x - half, base);
        ctx.line_to(x + half, base);
        ctx.line_to(x, top);
        ctx.close_path();
        ctx.fill();
        Ok(())
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}
