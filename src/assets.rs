//! Optional sprites dropped next to the game
//!
//! Every slot is resolved once before the loop. A missing or broken file
//! leaves the slot empty and the renderer draws a placeholder instead.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use image::RgbaImage;
use image::imageops::FilterType;

use crate::render::Rgb;

pub const CHARACTER_FILE: &str = "character.png";
pub const OBSTACLE_FILE: &str = "obstacle.png";
pub const JUMP_FILES: &[&str] = &["jump.wav", "jump.mp3", "jump.ogg"];
pub const HIT_FILES: &[&str] = &["hit.wav", "hit.mp3", "crash.wav", "crash.mp3"];
pub const POINT_FILES: &[&str] = &["point.wav", "point.mp3", "point.ogg"];

/// Pixels at or above this alpha are drawn
const OPAQUE_ALPHA: u8 = 128;

/// A decoded image, `None` where transparent
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: u32,
    height: u32,
    px: Vec<Option<Rgb>>,
}

impl Sprite {
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let px = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (a >= OPAQUE_ALPHA).then_some(Rgb(r, g, b))
            })
            .collect();
        Self {
            width: img.width(),
            height: img.height(),
            px,
        }
    }

    /// Decode `path`, optionally resampling to `size`.
    pub fn load(path: &Path, size: Option<(u32, u32)>) -> Result<Self> {
        let img = image::open(path).wrap_err_with(|| format!("decoding {}", path.display()))?;
        let img = match size {
            Some((w, h)) => img.resize_exact(w.max(1), h.max(1), FilterType::Triangle),
            None => img,
        };
        Ok(Self::from_rgba(&img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest pixel at normalised (u, v); `None` outside or transparent.
    pub fn sample(&self, u: f64, v: f64) -> Option<Rgb> {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        let x = ((u * self.width as f64) as u32).min(self.width.saturating_sub(1));
        let y = ((v * self.height as f64) as u32).min(self.height.saturating_sub(1));
        self.px
            .get((y * self.width + x) as usize)
            .copied()
            .flatten()
    }
}

/// Image slots, each present only if its file loaded
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub character: Option<Sprite>,
    pub obstacle: Option<Sprite>,
}

impl Assets {
    /// Resolve both sprites under `dir`. The character is scaled to
    /// `character_size` world units; the obstacle skin keeps its size and is
    /// stretched at draw time.
    pub fn load(dir: &Path, character_size: (u32, u32)) -> Self {
        Self {
            character: load_slot(dir, "character image", CHARACTER_FILE, Some(character_size)),
            obstacle: load_slot(dir, "obstacle image", OBSTACLE_FILE, None),
        }
    }
}

fn load_slot(dir: &Path, what: &str, name: &str, size: Option<(u32, u32)>) -> Option<Sprite> {
    let path = dir.join(name);
    if !path.is_file() {
        log::debug!("no {what} at {}, using placeholder", path.display());
        return None;
    }
    match Sprite::load(&path, size) {
        Ok(sprite) => {
            log::info!("{what} loaded: {}", path.display());
            Some(sprite)
        }
        Err(err) => {
            log::warn!("failed to load {what}: {err:#}");
            None
        }
    }
}

/// First of `names` that exists as a file under `dir`
pub fn find_first(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|n| dir.join(n)).find(|p| p.is_file())
}
