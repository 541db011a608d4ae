//! Procedural backdrop: a sky of horizontal stripes getting lighter towards
//! the horizon, over a grass field speckled with randomly darkened patches.

use rand::Rng;

pub const SKY_STRIPES: u16 = 8;
const SKY_RGB: (u8, u8, u8) = (80, 80, 200);
const HORIZON_RGB: (u8, u8, u8) = (175, 175, 235);
const GRASS_RGB: (u8, u8, u8) = (70, 200, 70);
/// Each darkening step keeps this fraction of the previous brightness.
const DARKEN_FACTOR: f32 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    /// Sky stripe index, 0 at the top.
    Sky(u16),
    /// Number of successive darkening steps applied to the grass colour.
    Grass(u8),
}

impl Shade {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Shade::Sky(stripe) => {
                let t = stripe.min(SKY_STRIPES - 1) as f32 / (SKY_STRIPES - 1) as f32;
                lerp_rgb(SKY_RGB, HORIZON_RGB, t)
            }
            Shade::Grass(steps) => {
                let k = DARKEN_FACTOR.powi(steps as i32);
                scale_rgb(GRASS_RGB, k)
            }
        }
    }
}

fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn scale_rgb(c: (u8, u8, u8), k: f32) -> (u8, u8, u8) {
    let s = |x: u8| (x as f32 * k).round() as u8;
    (s(c.0), s(c.1), s(c.2))
}

/// Whether the next grass cell keeps darkening. The longer the current run
/// of dark cells, the more likely it resets to plain grass.
fn keeps_darkening(run: u8, rng: &mut impl Rng) -> bool {
    let odds = 15 + run as u32;
    rng.gen_range(0..=odds) + 17 >= odds
}

/// Grid of shades sized to the terminal, built once per screen size.
#[derive(Clone, Debug)]
pub struct Backdrop {
    pub width: u16,
    pub height: u16,
    cells: Vec<Shade>,
}

impl Backdrop {
    pub fn generate(width: u16, height: u16, rng: &mut impl Rng) -> Self {
        let horizon = height / 2;
        let stripe_rows = (horizon / SKY_STRIPES).max(1);
        let mut cells = vec![Shade::Sky(0); width as usize * height as usize];

        for row in 0..horizon {
            let stripe = (row / stripe_rows).min(SKY_STRIPES - 1);
            for col in 0..width {
                cells[row as usize * width as usize + col as usize] = Shade::Sky(stripe);
            }
        }

        // Column-major like a falling brush stroke, so dark runs are vertical.
        let mut run = 0u8;
        for col in 0..width {
            for row in horizon..height {
                run = if keeps_darkening(run, rng) { run.saturating_add(1) } else { 0 };
                cells[row as usize * width as usize + col as usize] = Shade::Grass(run);
            }
        }

        Backdrop { width, height, cells }
    }

    pub fn shade(&self, col: u16, row: u16) -> Option<Shade> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row as usize * self.width as usize + col as usize).copied()
    }

    pub fn row(&self, row: u16) -> &[Shade] {
        let start = (row.min(self.height) as usize) * self.width as usize;
        let end = (start + self.width as usize).min(self.cells.len());
        &self.cells[start..end]
    }
}
