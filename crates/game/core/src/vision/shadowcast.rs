//! Recursive shadowcasting with linear light falloff.
//!
//! Each of the eight octants is swept row by row away from the origin. A row is
//! a run of cells between two slopes; an opaque cell splits the run, the lit
//! part recurses into the next row and the sweep resumes on the far side of the
//! obstruction.

use super::light::LightField;
use crate::env::{GridOracle, MapDimensions};
use crate::state::Position;

/// Diagonal directions; each expands into the two octants on either side.
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Maps canonical `(dx, dy)` row offsets into grid offsets for one octant.
#[derive(Clone, Copy, Debug)]
struct Octant {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

impl Octant {
    #[inline]
    fn apply(self, origin: Position, dx: i32, dy: i32) -> Position {
        Position::new(
            origin.x + dx * self.xx + dy * self.xy,
            origin.y + dx * self.yx + dy * self.yy,
        )
    }
}

/// Visibility engine owning a reusable light buffer.
///
/// The buffer is cleared at the start of every [`compute`](Self::compute) and
/// the returned field borrows it, so a second query cannot start while the
/// previous result is still in use. One caster per thread if this is ever run
/// in parallel.
#[derive(Clone, Debug)]
pub struct Shadowcaster {
    light: LightField,
}

impl Default for Shadowcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Shadowcaster {
    pub fn new() -> Self {
        Self {
            light: LightField::dark(MapDimensions::new(0, 0)),
        }
    }

    /// Light field from the most recent query.
    pub fn light(&self) -> &LightField {
        &self.light
    }

    /// Recomputes the light field around `origin`.
    ///
    /// The origin is lit at `darkness_factor`. A non-positive radius lights only
    /// the origin; an out-of-bounds origin yields a fully dark field. Negative
    /// or NaN darkness factors are treated as 0.
    pub fn compute<G>(
        &mut self,
        grid: &G,
        origin: Position,
        radius: i32,
        darkness_factor: f64,
    ) -> &LightField
    where
        G: GridOracle + ?Sized,
    {
        let dimensions = grid.dimensions();
        self.light.reset(dimensions);

        if !dimensions.contains(origin) {
            return &self.light;
        }

        let darkness = darkness_factor.max(0.0);
        self.light.set(origin, darkness);

        if radius <= 0 {
            return &self.light;
        }

        let mut pass = CastPass {
            grid,
            dimensions,
            origin,
            radius,
            darkness,
            light: &mut self.light,
        };

        for (dx, dy) in DIAGONALS {
            pass.cast(1, 1.0, 0.0, Octant { xx: 0, xy: dx, yx: dy, yy: 0 });
            pass.cast(1, 1.0, 0.0, Octant { xx: dx, xy: 0, yx: 0, yy: dy });
        }

        &self.light
    }
}

/// State shared by every recursive call of one query.
struct CastPass<'a, G: GridOracle + ?Sized> {
    grid: &'a G,
    dimensions: MapDimensions,
    origin: Position,
    radius: i32,
    darkness: f64,
    light: &'a mut LightField,
}

impl<G: GridOracle + ?Sized> CastPass<'_, G> {
    fn cast(&mut self, row: i32, mut start: f64, end: f64, octant: Octant) {
        if start < end {
            return;
        }

        let radius = f64::from(self.radius);
        let mut new_start = 0.0;
        let mut blocked = false;
        let mut distance = row;

        while distance <= self.radius && !blocked {
            let dy = -distance;

            for dx in -distance..=0 {
                let cell = octant.apply(self.origin, dx, dy);
                let left_slope = (f64::from(dx) - 0.5) / (f64::from(dy) + 0.5);
                let right_slope = (f64::from(dx) + 0.5) / (f64::from(dy) - 0.5);

                if !self.dimensions.contains(cell) || start < right_slope {
                    continue;
                } else if end > left_slope {
                    break;
                }

                let reach = f64::from(dx * dx + dy * dy).sqrt();
                if reach <= radius {
                    self.light.set(cell, (1.0 - reach / radius) * self.darkness);
                }

                let opaque = self.grid.blocks_sight(cell);
                if blocked {
                    if opaque {
                        new_start = right_slope;
                        continue;
                    }
                    blocked = false;
                    start = new_start;
                } else if opaque && distance < self.radius {
                    blocked = true;
                    self.cast(distance + 1, start, left_slope, octant);
                    new_start = right_slope;
                }
            }

            distance += 1;
        }
    }
}

/// Computes a fresh light field around `(origin_x, origin_y)`.
///
/// Allocates a new buffer per call. Hot loops should keep a [`Shadowcaster`]
/// instead.
pub fn compute_lighting<G>(
    grid: &G,
    origin_x: i32,
    origin_y: i32,
    radius: i32,
    darkness_factor: f64,
) -> LightField
where
    G: GridOracle + ?Sized,
{
    let mut caster = Shadowcaster::new();
    caster.compute(grid, Position::new(origin_x, origin_y), radius, darkness_factor);
    caster.light
}
