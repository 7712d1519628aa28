//! Geometry of a single target: centre dot and merged code-ring arcs.

use std::f32::consts::TAU;

use coded_targets_core::sector_is_set;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A run of adjacent set sectors drawn as one annular arc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorArc {
    /// First sector of the run.
    pub first_sector: usize,
    /// Number of sectors in the run (may wrap past sector `n - 1`).
    pub sector_count: usize,
    /// Start angle in radians, clockwise on the page from +x.
    pub start_angle: f32,
    /// End angle in radians, `> start_angle`.
    pub end_angle: f32,
}

impl SectorArc {
    /// True if the arc covers more than half of the ring.
    #[inline]
    pub fn is_large(&self) -> bool {
        self.end_angle - self.start_angle > std::f32::consts::PI
    }
}

/// Drawable description of one coded target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetGeometry {
    pub center: Point2<f32>,
    pub ring_length: usize,
    pub dot_radius: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub arcs: Vec<SectorArc>,
}

impl TargetGeometry {
    /// Geometry for `pattern` centred at `center`. The ring spans
    /// `2 * dot_radius ..= 3 * dot_radius`.
    pub fn new(pattern: u32, ring_length: usize, center: Point2<f32>, dot_radius: f32) -> Self {
        let step = TAU / ring_length.max(1) as f32;
        let arcs = sector_runs(pattern, ring_length)
            .into_iter()
            .map(|(first, count)| SectorArc {
                first_sector: first,
                sector_count: count,
                start_angle: first as f32 * step,
                end_angle: (first + count) as f32 * step,
            })
            .collect();
        Self {
            center,
            ring_length,
            dot_radius,
            ring_inner: 2.0 * dot_radius,
            ring_outer: 3.0 * dot_radius,
            arcs,
        }
    }

    /// Point at `angle` (clockwise from +x, y pointing down) and `radius`.
    #[inline]
    pub fn point_at(&self, angle: f32, radius: f32) -> Point2<f32> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * radius
    }

    /// True if `p` falls on a white part of the target.
    pub fn is_white(&self, p: Point2<f32>) -> bool {
        let d = p - self.center;
        let r = d.norm();
        if r <= self.dot_radius {
            return true;
        }
        if r < self.ring_inner || r > self.ring_outer {
            return false;
        }
        let angle = d.y.atan2(d.x).rem_euclid(TAU);
        self.arcs.iter().any(|arc| {
            // Wrapped arcs extend past TAU.
            (arc.start_angle..arc.end_angle).contains(&angle)
                || (arc.start_angle..arc.end_angle).contains(&(angle + TAU))
        })
    }
}

/// Maximal circular runs of set sectors as `(first_sector, count)`, sorted
/// by first sector.
fn sector_runs(pattern: u32, n: usize) -> Vec<(usize, usize)> {
    let set = |i: usize| sector_is_set(pattern, n, i % n);
    // Start scanning just after a clear sector so no run is split.
    let Some(origin) = (0..n).find(|&i| !set(i)) else {
        return if n == 0 { Vec::new() } else { vec![(0, n)] };
    };

    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for k in 1..=n {
        let i = (origin + k) % n;
        if set(i) {
            current = match current {
                Some((first, count)) => Some((first, count + 1)),
                None => Some((i, 1)),
            };
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    runs.sort_unstable_by_key(|&(first, _)| first);
    runs
}
