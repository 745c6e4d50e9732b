//! Half-block terminal renderer
//!
//! Each terminal cell shows two stacked pixels: the top one as the
//! foreground of `▀`, the bottom one as the background. The world is fitted
//! into that pixel grid by a `Viewport`.

pub mod font;
pub mod scene;
pub mod scenery;

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::sim::Rect;

pub use scene::draw_frame;
pub use scenery::Scenery;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend from `a` to `b`; `t_256` runs 0..=256.
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    /// `self` painted over `under` with `alpha` in 0.0..=1.0
    pub fn over(self, under: Rgb, alpha: f64) -> Rgb {
        let t = (alpha.clamp(0.0, 1.0) * 256.0) as u16;
        Rgb::lerp(under, self, t)
    }

    pub fn darken(self, factor: f64) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        Rgb(
            (self.0 as f64 * f) as u8,
            (self.1 as f64 * f) as u8,
            (self.2 as f64 * f) as u8,
        )
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

pub const SKY_TOP: Rgb = Rgb(255, 183, 197);
pub const SKY_BOTTOM: Rgb = Rgb(255, 218, 185);
pub const GROUND_TOP: Rgb = Rgb(186, 220, 88);
pub const GROUND_BOTTOM: Rgb = Rgb(123, 179, 91);
pub const GRASS_BLADE: Rgb = Rgb(100, 150, 50);
pub const GROUND_EDGE: Rgb = Rgb(80, 140, 60);
pub const PIPE_BODY: Rgb = Rgb(255, 182, 193);
pub const PIPE_OUTLINE: Rgb = Rgb(255, 105, 180);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const SHADOW: Rgb = Rgb(30, 30, 30);
pub const CRIMSON: Rgb = Rgb(220, 20, 60);
pub const GOLD: Rgb = Rgb(255, 215, 0);
pub const LETTERBOX: Rgb = Rgb(40, 28, 40);
pub const PASTELS: [Rgb; 4] = [
    Rgb(255, 182, 193),
    Rgb(173, 216, 230),
    Rgb(221, 160, 221),
    Rgb(255, 218, 185),
];

// ── Pixel buffer ────────────────────────────────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
        }
    }

    /// Buffer covering a terminal of `cols` x `rows` cells
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, LETTERBOX);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.px[i] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Paint `c` over what is there with `alpha` in 0.0..=1.0
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, alpha: f64) {
        if let Some(i) = self.index(x, y) {
            self.px[i] = c.over(self.px[i], alpha);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Halve every pixel, for the game-over dim
    pub fn dim(&mut self) {
        for p in &mut self.px {
            *p = Rgb(p.0 / 2, p.1 / 2, p.2 / 2);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            Some(y as usize * self.w + x as usize)
        } else {
            None
        }
    }

    /// Queue the whole buffer to the terminal and flush.
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.term()))?;
                    bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top.term()))?;
                    fg = Some(top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                fg = None;
                bg = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── World to pixel mapping ──────────────────────────────────────────────────

/// Uniform scale plus centring offset from world units to buffer pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
    /// World size in pixels
    pub w: f64,
    pub h: f64,
}

impl Viewport {
    /// Largest uniform fit of a `world_w` x `world_h` world into the buffer
    pub fn fit(buf_w: usize, buf_h: usize, world_w: f64, world_h: f64) -> Self {
        let scale = (buf_w as f64 / world_w).min(buf_h as f64 / world_h);
        let w = world_w * scale;
        let h = world_h * scale;
        Self {
            scale,
            ox: ((buf_w as f64 - w) / 2.0).floor(),
            oy: ((buf_h as f64 - h) / 2.0).floor(),
            w,
            h,
        }
    }

    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        (self.ox + x * self.scale, self.oy + y * self.scale)
    }

    /// World position of the centre of pixel (px, py)
    pub fn to_world(&self, px: i32, py: i32) -> (f64, f64) {
        (
            (px as f64 + 0.5 - self.ox) / self.scale,
            (py as f64 + 0.5 - self.oy) / self.scale,
        )
    }

    pub fn scaled(&self, world: f64) -> f64 {
        world * self.scale
    }

    /// Pixel span `(x0, y0, x1, y1)` of a world rect, end exclusive
    pub fn rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let (x0, y0) = self.to_px(r.x, r.y);
        let (x1, y1) = self.to_px(r.right(), r.bottom());
        (
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
        )
    }
}
