//! Roof geometry solver.
//!
//! Resolves a roof configuration against the frame footprint into the
//! numbers every downstream builder shares: slope pitch, ridge rise and
//! position, and wall-top heights along each wall. Solving once here keeps
//! walls, cladding, roof framing, and skylights agreeing on the same
//! roofline.
//!
//! For apex and hipped roofs the configured crest is the *visible* crest —
//! the top of the sheathing at the ridge. The frame ridge rise is therefore
//! solved so that `rise + cos(pitch) · sheathing = crest − eaves`, with
//! pitch itself a function of the rise. A short bisection nails this to
//! well under a millimetre.

use shedwright_config::{RoofConfig, Wall};

use crate::consts::OSB_THICKNESS_MM;
use crate::dims::DimPair;

/// Style-specific solved roof data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoofKind {
    /// Symmetric dual pitch, ridge along Z at `x = frame_w / 2`.
    Apex {
        /// Ground-referenced eaves (wall-top) height.
        eaves_y: f64,
        /// Frame ridge rise above the eaves.
        rise: f64,
    },
    /// Single plane between two wall-top heights.
    Pent {
        /// Low-side wall-top height.
        min_y: f64,
        /// High-side wall-top height.
        max_y: f64,
        /// Side toward which the roof rises.
        high_side: Wall,
    },
    /// Apex main slopes with triangular hip faces at both gable ends.
    Hipped {
        /// Ground-referenced eaves (wall-top) height.
        eaves_y: f64,
        /// Frame ridge rise above the eaves.
        rise: f64,
        /// Ridge length along Z (shortened by one half-span per hip end).
        ridge_len: f64,
    },
}

/// Solved roof geometry for one building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofSolver {
    /// Frame width (X extent).
    pub frame_w: f64,
    /// Frame depth (Z extent).
    pub frame_d: f64,
    /// Style-specific data.
    pub kind: RoofKind,
}

/// Solve the apex frame ridge rise for a target visible crest delta.
///
/// Finds `r` with `r + cos(atan2(r, half_span)) · sheathing = delta` by
/// bisection. The residual is monotonic in `r`, so 32 halvings of the
/// `[0, delta]` bracket converge far below 1mm.
pub fn solve_apex_rise(delta: f64, half_span: f64) -> f64 {
    let delta = delta.max(OSB_THICKNESS_MM);
    let residual = |r: f64| r + (r.atan2(half_span)).cos() * OSB_THICKNESS_MM - delta;
    let mut lo = 0.0_f64;
    let mut hi = delta;
    for _ in 0..32 {
        let mid = 0.5 * (lo + hi);
        if residual(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

impl RoofSolver {
    /// Solve a roof configuration against the frame footprint.
    ///
    /// `wall_height_mm` backstops degenerate pent inputs. Apex/hipped
    /// crests are clamped to at least one sheathing thickness above the
    /// eaves so the solved rise is never negative.
    pub fn new(roof: &RoofConfig, frame: DimPair, wall_height_mm: f64) -> Self {
        let half_span = frame.width_mm / 2.0;
        let kind = match *roof {
            RoofConfig::Apex { eaves_mm, crest_mm } => {
                let crest = crest_mm.max(eaves_mm + OSB_THICKNESS_MM);
                RoofKind::Apex {
                    eaves_y: eaves_mm,
                    rise: solve_apex_rise(crest - eaves_mm, half_span),
                }
            }
            RoofConfig::Pent {
                min_height_mm,
                max_height_mm,
                high_side,
            } => {
                let min_y = if min_height_mm.is_finite() && min_height_mm > 0.0 {
                    min_height_mm
                } else {
                    wall_height_mm
                };
                RoofKind::Pent {
                    min_y,
                    max_y: max_height_mm.max(min_y),
                    high_side,
                }
            }
            RoofConfig::Hipped { eaves_mm, crest_mm } => {
                let crest = crest_mm.max(eaves_mm + OSB_THICKNESS_MM);
                RoofKind::Hipped {
                    eaves_y: eaves_mm,
                    rise: solve_apex_rise(crest - eaves_mm, half_span),
                    ridge_len: (frame.depth_mm - frame.width_mm).max(0.0),
                }
            }
        };
        Self {
            frame_w: frame.width_mm,
            frame_d: frame.depth_mm,
            kind,
        }
    }

    /// Half the frame span across the main slope direction.
    pub fn half_span(&self) -> f64 {
        match self.kind {
            RoofKind::Apex { .. } | RoofKind::Hipped { .. } => self.frame_w / 2.0,
            RoofKind::Pent { high_side, .. } => {
                if high_side.runs_along_x() {
                    self.frame_d
                } else {
                    self.frame_w
                }
            }
        }
    }

    /// World X of the ridge (apex/hipped).
    pub fn ridge_x(&self) -> f64 {
        self.frame_w / 2.0
    }

    /// Main slope pitch in radians.
    pub fn pitch(&self) -> f64 {
        match self.kind {
            RoofKind::Apex { rise, .. } | RoofKind::Hipped { rise, .. } => {
                rise.atan2(self.frame_w / 2.0)
            }
            RoofKind::Pent {
                min_y,
                max_y,
                high_side,
            } => {
                let span = if high_side.runs_along_x() {
                    self.frame_d
                } else {
                    self.frame_w
                };
                (max_y - min_y).atan2(span)
            }
        }
    }

    /// Hip-face pitch in radians (hipped only; 0 otherwise).
    pub fn hip_pitch(&self) -> f64 {
        match self.kind {
            RoofKind::Hipped { rise, .. } => rise.atan2(self.frame_w / 2.0),
            _ => 0.0,
        }
    }

    /// Ground-referenced eaves (lowest wall-top) height.
    pub fn eaves_y(&self) -> f64 {
        match self.kind {
            RoofKind::Apex { eaves_y, .. } | RoofKind::Hipped { eaves_y, .. } => eaves_y,
            RoofKind::Pent { min_y, .. } => min_y,
        }
    }

    /// Ground-referenced frame ridge height (top of the rafter line).
    pub fn ridge_y(&self) -> f64 {
        match self.kind {
            RoofKind::Apex { eaves_y, rise } | RoofKind::Hipped { eaves_y, rise, .. } => {
                eaves_y + rise
            }
            RoofKind::Pent { max_y, .. } => max_y,
        }
    }

    /// Ground-referenced roof underside at world X.
    ///
    /// For apex/hipped this is the tent profile used by gable-end studs and
    /// cladding trims; for a pent roof sloping along X it is the plane
    /// height; for a pent sloping along Z it is the high-side height.
    pub fn y_under_at(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, self.frame_w);
        match self.kind {
            RoofKind::Apex { eaves_y, rise } | RoofKind::Hipped { eaves_y, rise, .. } => {
                let half = self.frame_w / 2.0;
                let from_ridge = (x - half).abs();
                eaves_y + rise * (1.0 - from_ridge / half)
            }
            RoofKind::Pent {
                min_y,
                max_y,
                high_side,
            } => match high_side {
                Wall::Left => max_y + (min_y - max_y) * x / self.frame_w,
                Wall::Right => min_y + (max_y - min_y) * x / self.frame_w,
                Wall::Front | Wall::Back => max_y,
            },
        }
    }

    /// Ground-referenced roof underside at an interior point.
    ///
    /// Unlike [`RoofSolver::y_under_at`] this accounts for slopes along
    /// both axes: pent planes sloping along Z and hipped end faces both
    /// lower the result.
    pub fn underside_at(&self, x: f64, z: f64) -> f64 {
        let z = z.clamp(0.0, self.frame_d);
        match self.kind {
            RoofKind::Apex { .. } => self.y_under_at(x),
            RoofKind::Hipped { eaves_y, rise, .. } => {
                let half = self.frame_w / 2.0;
                let tent = self.y_under_at(x);
                let near_end = z.min(self.frame_d - z);
                let hip = eaves_y + rise * (near_end / half).min(1.0);
                tent.min(hip)
            }
            RoofKind::Pent {
                min_y,
                max_y,
                high_side,
            } => match high_side {
                Wall::Left | Wall::Right => self.y_under_at(x),
                Wall::Front => max_y + (min_y - max_y) * z / self.frame_d,
                Wall::Back => min_y + (max_y - min_y) * z / self.frame_d,
            },
        }
    }

    /// Wall-top height at distance `u` along a wall's run (from its start
    /// corner: front/back start at X = 0, left/right at Z = 0).
    ///
    /// Apex and hipped walls are flat at the eaves; gable infill above the
    /// plate belongs to the roof structure. Pent walls perpendicular to the
    /// slope follow the plane linearly.
    pub fn wall_top_at(&self, wall: Wall, u: f64) -> f64 {
        match self.kind {
            RoofKind::Apex { eaves_y, .. } | RoofKind::Hipped { eaves_y, .. } => eaves_y,
            RoofKind::Pent {
                min_y,
                max_y,
                high_side,
            } => {
                let along_x = wall.runs_along_x();
                let slope_along_x = !high_side.runs_along_x();
                if along_x == slope_along_x {
                    // wall runs along the slope axis; interpolate
                    let span = if slope_along_x {
                        self.frame_w
                    } else {
                        self.frame_d
                    };
                    let t = (u / span).clamp(0.0, 1.0);
                    let (start, end) = match high_side {
                        Wall::Left | Wall::Front => (max_y, min_y),
                        Wall::Right | Wall::Back => (min_y, max_y),
                    };
                    start + (end - start) * t
                } else if wall == high_side {
                    max_y
                } else if wall == opposite(high_side) {
                    min_y
                } else {
                    // unreachable by the axis test above, but total anyway
                    min_y
                }
            }
        }
    }

    /// Whether a wall is a gable end (apex only: the walls the tent profile
    /// rises over).
    pub fn is_gable_wall(&self, wall: Wall) -> bool {
        matches!(self.kind, RoofKind::Apex { .. }) && wall.runs_along_x()
    }
}

fn opposite(wall: Wall) -> Wall {
    match wall {
        Wall::Front => Wall::Back,
        Wall::Back => Wall::Front,
        Wall::Left => Wall::Right,
        Wall::Right => Wall::Left,
    }
}
