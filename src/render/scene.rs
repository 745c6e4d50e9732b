//! Draws one frame from a game snapshot

use super::font::{draw_number, draw_text, text_height};
use super::scenery::Scenery;
use super::{
    CRIMSON, GOLD, GRASS_BLADE, GROUND_BOTTOM, GROUND_EDGE, GROUND_TOP, LETTERBOX, PASTELS,
    PIPE_BODY, PIPE_OUTLINE, PixelBuf, Rgb, SKY_BOTTOM, SKY_TOP, Viewport, WHITE,
};
use crate::assets::{Assets, Sprite};
use crate::sim::{Bird, Physics, Pipe, Rect, RunState, Snapshot};

const CLOUD_ALPHA: f64 = 180.0 / 255.0;
const CAP_HEIGHT: f64 = 20.0;
const CAP_OVERHANG: f64 = 5.0;

/// Paint everything for `snap` into `buf`.
pub fn draw_frame(buf: &mut PixelBuf, snap: &Snapshot<'_>, scenery: &Scenery, assets: &Assets) {
    let physics = snap.physics;
    let view = Viewport::fit(
        buf.width(),
        buf.height(),
        physics.screen_width,
        physics.screen_height,
    );
    buf.fill(LETTERBOX);

    draw_sky(buf, &view, physics);
    draw_stars(buf, &view, scenery);
    draw_clouds(buf, &view, scenery);
    draw_ground(buf, &view, physics, snap.tick);
    for pipe in snap.pipes {
        draw_pipe(buf, &view, pipe, assets.obstacle.as_ref());
    }
    draw_particles(buf, &view, scenery);
    draw_trail(buf, &view, snap.bird);
    draw_bird(buf, &view, snap.bird, assets.character.as_ref());

    let cx = view.to_px(physics.screen_width / 2.0, 0.0).0 as i32;
    let big = text_size(&view, 40.0);
    draw_number(buf, cx, world_y(&view, 30.0), snap.score, big, WHITE);

    match snap.state {
        RunState::Idle => draw_title(buf, &view, physics, snap.best),
        RunState::Ended => draw_game_over(buf, &view, physics, snap.score, snap.best),
        RunState::Running => {}
    }

    draw_letterbox(buf, &view);
}

/// Font block size that makes text roughly `world_h` units tall
fn text_size(view: &Viewport, world_h: f64) -> i32 {
    ((view.scaled(world_h) / text_height(1) as f64).round() as i32).max(1)
}

fn world_y(view: &Viewport, y: f64) -> i32 {
    view.to_px(0.0, y).1.round() as i32
}

// ── Primitives in world units ──────────────────────────────────────────────

/// Pixels whose centres fall inside `r`, as (px, py, wx, wy)
fn covered(view: Viewport, r: Rect) -> impl Iterator<Item = (i32, i32, f64, f64)> {
    let (x0, y0, x1, y1) = view.rect(&r);
    (y0..y1).flat_map(move |py| {
        (x0..x1).map(move |px| {
            let (wx, wy) = view.to_world(px, py);
            (px, py, wx, wy)
        })
    })
}

fn fill_rect(buf: &mut PixelBuf, view: &Viewport, r: &Rect, c: Rgb) {
    let (x0, y0, x1, y1) = view.rect(r);
    buf.fill_rect(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0), c);
}

/// Rectangle outline `thickness` world units wide, at least one pixel
fn stroke_rect(buf: &mut PixelBuf, view: &Viewport, r: &Rect, thickness: f64, c: Rgb) {
    let (x0, y0, x1, y1) = view.rect(r);
    let t = (view.scaled(thickness).round() as i32).max(1);
    let (w, h) = (x1 - x0, y1 - y0);
    if w <= 0 || h <= 0 {
        return;
    }
    buf.fill_rect(x0, y0, w, t.min(h), c);
    buf.fill_rect(x0, y1 - t.min(h), w, t.min(h), c);
    buf.fill_rect(x0, y0, t.min(w), h, c);
    buf.fill_rect(x1 - t.min(w), y0, t.min(w), h, c);
}

fn fill_circle(buf: &mut PixelBuf, view: &Viewport, cx: f64, cy: f64, r: f64, c: Rgb, alpha: f64) {
    if view.scaled(r) < 0.5 {
        let (px, py) = view.to_px(cx, cy);
        buf.blend(px.floor() as i32, py.floor() as i32, c, alpha);
        return;
    }
    let bounds = Rect::new(cx - r, cy - r, r * 2.0, r * 2.0);
    for (px, py, wx, wy) in covered(*view, bounds) {
        let (dx, dy) = (wx - cx, wy - cy);
        if dx * dx + dy * dy <= r * r {
            buf.blend(px, py, c, alpha);
        }
    }
}

fn draw_line(buf: &mut PixelBuf, view: &Viewport, from: (f64, f64), to: (f64, f64), c: Rgb) {
    let (ax, ay) = view.to_px(from.0, from.1);
    let (bx, by) = view.to_px(to.0, to.1);
    let steps = (bx - ax).abs().max((by - ay).abs()).ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = ax + (bx - ax) * t;
        let y = ay + (by - ay) * t;
        buf.set(x.floor() as i32, y.floor() as i32, c);
    }
}

// ── Background ──────────────────────────────────────────────────────────────

fn draw_gradient(buf: &mut PixelBuf, view: &Viewport, band: &Rect, top: Rgb, bottom: Rgb) {
    let (x0, y0, x1, y1) = view.rect(band);
    let rows = (y1 - y0).max(1);
    for py in y0..y1 {
        let t = ((py - y0) * 256 / rows) as u16;
        buf.fill_rect(x0, py, x1 - x0, 1, Rgb::lerp(top, bottom, t));
    }
}

fn draw_sky(buf: &mut PixelBuf, view: &Viewport, physics: &Physics) {
    let sky = Rect::new(0.0, 0.0, physics.screen_width, physics.ground_line());
    draw_gradient(buf, view, &sky, SKY_TOP, SKY_BOTTOM);
}

fn draw_stars(buf: &mut PixelBuf, view: &Viewport, scenery: &Scenery) {
    for star in &scenery.stars {
        let alpha = star.alpha();
        if alpha > 0.0 {
            fill_circle(buf, view, star.x, star.y, star.size, star.color, alpha);
        }
    }
}

fn draw_clouds(buf: &mut PixelBuf, view: &Viewport, scenery: &Scenery) {
    for cloud in &scenery.clouds {
        let s = cloud.size;
        let r = s / 2.0;
        fill_circle(buf, view, cloud.x + s, cloud.y + r, r, WHITE, CLOUD_ALPHA);
        fill_circle(buf, view, cloud.x + s * 2.0, cloud.y + r, r, WHITE, CLOUD_ALPHA);
        fill_circle(buf, view, cloud.x + s * 1.5, cloud.y, r, WHITE, CLOUD_ALPHA);
    }
}

fn draw_ground(buf: &mut PixelBuf, view: &Viewport, physics: &Physics, tick: u64) {
    let ground_y = physics.ground_line();
    let band = Rect::new(0.0, ground_y, physics.screen_width, physics.ground_height);
    draw_gradient(buf, view, &band, GROUND_TOP, GROUND_BOTTOM);

    let offset = (tick % 30) as f64 - 15.0;
    let mut x = 0.0;
    while x < physics.screen_width {
        let gx = x + offset;
        if (0.0..physics.screen_width).contains(&gx) {
            draw_line(buf, view, (gx, ground_y), (gx + 2.0, ground_y - 10.0), GRASS_BLADE);
        }
        x += 15.0;
    }

    let edge = Rect::new(0.0, ground_y - 2.0, physics.screen_width, 4.0);
    fill_rect(buf, view, &edge, GROUND_EDGE);
}

// ── Pipes ───────────────────────────────────────────────────────────────────

fn draw_pipe(buf: &mut PixelBuf, view: &Viewport, pipe: &Pipe, skin: Option<&Sprite>) {
    let [top, bottom] = pipe.segments();
    match skin {
        Some(sprite) => {
            draw_skinned(buf, view, &top, sprite, true);
            draw_skinned(buf, view, &bottom, sprite, false);
        }
        None => {
            draw_pipe_body(buf, view, &top);
            draw_pipe_body(buf, view, &bottom);
            let caps = [
                Rect::new(
                    pipe.x - CAP_OVERHANG,
                    pipe.top_height - CAP_HEIGHT,
                    pipe.width + CAP_OVERHANG * 2.0,
                    CAP_HEIGHT,
                ),
                Rect::new(
                    pipe.x - CAP_OVERHANG,
                    pipe.bottom_y,
                    pipe.width + CAP_OVERHANG * 2.0,
                    CAP_HEIGHT,
                ),
            ];
            for cap in &caps {
                fill_rect(buf, view, cap, PIPE_OUTLINE);
                stroke_rect(buf, view, cap, 3.0, PIPE_BODY);
            }
        }
    }
}

/// Body shaded darker toward the far end, with an outline
fn draw_pipe_body(buf: &mut PixelBuf, view: &Viewport, seg: &Rect) {
    if seg.is_empty() {
        return;
    }
    for (px, py, _, wy) in covered(*view, *seg) {
        let t = ((wy - seg.y) / seg.h).clamp(0.0, 1.0);
        buf.set(px, py, PIPE_BODY.darken(1.0 - t * 0.3));
    }
    stroke_rect(buf, view, seg, 3.0, PIPE_OUTLINE);
}

/// Stretch `sprite` over `seg`; the top segment is mirrored vertically.
fn draw_skinned(buf: &mut PixelBuf, view: &Viewport, seg: &Rect, sprite: &Sprite, flip: bool) {
    if seg.is_empty() {
        return;
    }
    for (px, py, wx, wy) in covered(*view, *seg) {
        let u = (wx - seg.x) / seg.w;
        let v = (wy - seg.y) / seg.h;
        let v = if flip { 1.0 - v } else { v };
        if let Some(c) = sprite.sample(u, v.min(0.999_999)) {
            buf.set(px, py, c);
        }
    }
}

// ── Bird and effects ────────────────────────────────────────────────────────

fn draw_particles(buf: &mut PixelBuf, view: &Viewport, scenery: &Scenery) {
    for p in scenery.particles.iter().filter(|p| !p.is_dead()) {
        fill_circle(buf, view, p.x, p.y, p.size, p.color, p.alpha());
    }
}

fn draw_trail(buf: &mut PixelBuf, view: &Viewport, bird: &Bird) {
    let len = bird.trail().len();
    for (i, point) in bird.trail().enumerate() {
        if point.life <= 0 {
            continue;
        }
        let size = bird.width * 0.3 * (i as f64 / len as f64);
        let alpha = (point.life * 25).min(255) as f64 / 255.0;
        fill_circle(buf, view, point.x, point.y, size, PASTELS[i % PASTELS.len()], alpha);
    }
}

fn draw_bird(buf: &mut PixelBuf, view: &Viewport, bird: &Bird, sprite: Option<&Sprite>) {
    let (cx, cy) = bird.center();
    match sprite {
        Some(sprite) => {
            fill_circle(buf, view, cx, cy, bird.width, WHITE, 30.0 / 255.0);
            draw_rotated(buf, view, bird, sprite);
        }
        None => {
            fill_circle(buf, view, cx, cy, bird.width, GOLD, 50.0 / 255.0);
            fill_circle(buf, view, cx, cy, bird.width / 2.0, GOLD, 1.0);
        }
    }
}

/// Sprite turned by the bird's rotation about its centre (positive turns
/// the nose down).
fn draw_rotated(buf: &mut PixelBuf, view: &Viewport, bird: &Bird, sprite: &Sprite) {
    let (cx, cy) = bird.center();
    let (sin, cos) = bird.rotation.to_radians().sin_cos();
    let reach = bird.width.hypot(bird.height) / 2.0;
    let bounds = Rect::new(cx - reach, cy - reach, reach * 2.0, reach * 2.0);
    for (px, py, wx, wy) in covered(*view, bounds) {
        let (dx, dy) = (wx - cx, wy - cy);
        let lx = dx * cos + dy * sin;
        let ly = -dx * sin + dy * cos;
        let u = lx / bird.width + 0.5;
        let v = ly / bird.height + 0.5;
        if let Some(c) = sprite.sample(u, v) {
            buf.set(px, py, c);
        }
    }
}

// ── Overlays ────────────────────────────────────────────────────────────────

fn draw_title(buf: &mut PixelBuf, view: &Viewport, physics: &Physics, best: u32) {
    let cx = view.to_px(physics.screen_width / 2.0, 0.0).0 as i32;
    let mid = physics.screen_height / 2.0;
    draw_text(buf, cx, world_y(view, mid - 70.0), "FLAPPY", text_size(view, 36.0), GOLD);
    draw_text(buf, cx, world_y(view, mid - 5.0), "PRESS SPACE", text_size(view, 18.0), WHITE);
    let best_line = format!("BEST {best}");
    draw_text(buf, cx, world_y(view, mid + 35.0), &best_line, text_size(view, 20.0), WHITE);
}

fn draw_game_over(buf: &mut PixelBuf, view: &Viewport, physics: &Physics, score: u32, best: u32) {
    buf.dim();
    let cx = view.to_px(physics.screen_width / 2.0, 0.0).0 as i32;
    let mid = physics.screen_height / 2.0;
    draw_text(buf, cx, world_y(view, mid - 70.0), "GAME OVER!", text_size(view, 36.0), CRIMSON);
    let score_line = format!("SCORE {score}");
    draw_text(buf, cx, world_y(view, mid - 5.0), &score_line, text_size(view, 24.0), WHITE);
    let best_line = format!("BEST {best}");
    draw_text(buf, cx, world_y(view, mid + 35.0), &best_line, text_size(view, 22.0), GOLD);
    draw_text(buf, cx, world_y(view, mid + 75.0), "PRESS R", text_size(view, 18.0), WHITE);
}

/// Blank everything outside the world so off-screen pipes and glows vanish
fn draw_letterbox(buf: &mut PixelBuf, view: &Viewport) {
    let x0 = view.ox as i32;
    let y0 = view.oy as i32;
    let x1 = (view.ox + view.w).round() as i32;
    let y1 = (view.oy + view.h).round() as i32;
    let (w, h) = (buf.width() as i32, buf.height() as i32);
    buf.fill_rect(0, 0, x0, h, LETTERBOX);
    buf.fill_rect(x1, 0, w - x1, h, LETTERBOX);
    buf.fill_rect(0, 0, w, y0, LETTERBOX);
    buf.fill_rect(0, y1, w, h - y1, LETTERBOX);
}
