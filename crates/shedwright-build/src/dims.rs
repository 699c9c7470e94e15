//! Dimension resolver.
//!
//! Derives the three dimension tiers (base, frame, roof) and per-side
//! overhangs from mode-specific sizing input. The frame footprint is the
//! canonical tier: `frame = base + gap` and `roof = frame + overhangs`
//! hold exactly for every entry mode.
//!
//! Malformed numeric input (non-finite, negative) is never an error here —
//! values are silently clamped/floored to a safe minimum.

use shedwright_config::{Overhangs, SizeInput, SizingMode};

use crate::consts::{BASE_FRAME_GAP_MM, FLOOR_STACK_MM};

/// A width × depth pair in integer millimetres (stored as f64).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimPair {
    /// Extent along X.
    pub width_mm: f64,
    /// Extent along Z.
    pub depth_mm: f64,
}

/// Resolved per-side values in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidesMm {
    /// X = 0 side.
    pub left: f64,
    /// X = width side.
    pub right: f64,
    /// Z = 0 side.
    pub front: f64,
    /// Z = depth side.
    pub back: f64,
}

impl SidesMm {
    /// Sum of the opposing X-axis sides.
    pub fn x_total(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the opposing Z-axis sides.
    pub fn z_total(&self) -> f64 {
        self.front + self.back
    }
}

/// The three dimension tiers plus resolved overhangs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDims {
    /// Floor/base footprint.
    pub base: DimPair,
    /// Wall frame footprint (canonical).
    pub frame: DimPair,
    /// Roof outer extents.
    pub roof: DimPair,
    /// Per-side roof overhangs.
    pub overhangs: SidesMm,
}

/// Shared world placement data threaded to every builder.
///
/// The frame footprint occupies `[0, frame_w] × [0, frame_d]` in world X/Z;
/// Y is up with ground at 0 and wall bases at `floor_stack_mm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldFrame {
    /// Frame width (X extent).
    pub frame_w: f64,
    /// Frame depth (Z extent).
    pub frame_d: f64,
    /// Per-side roof overhangs.
    pub overhangs: SidesMm,
    /// Height of the floor stack: wall bottom plates sit at this Y.
    pub floor_stack_mm: f64,
}

impl WorldFrame {
    /// Build from resolved dimensions.
    pub fn new(dims: &ResolvedDims) -> Self {
        Self {
            frame_w: dims.frame.width_mm,
            frame_d: dims.frame.depth_mm,
            overhangs: dims.overhangs,
            floor_stack_mm: FLOOR_STACK_MM,
        }
    }

    /// World Y of the wall base (top of the floor stack).
    pub fn wall_base_y(&self) -> f64 {
        self.floor_stack_mm
    }
}

/// Clamp a configured length: non-finite falls back to `fallback`, then
/// floored to integer mm with a 1mm minimum.
fn sane_mm(v: f64, fallback: f64) -> f64 {
    let v = if v.is_finite() { v } else { fallback };
    v.floor().max(1.0)
}

/// Resolve a single overhang side.
fn side_mm(explicit: Option<f64>, uniform: f64) -> f64 {
    let v = explicit.unwrap_or(uniform);
    let v = if v.is_finite() { 0.0_f64.max(v) } else { 0.0 };
    v.floor()
}

/// Resolve the three dimension tiers from mode-specific input.
///
/// The canonical dimension is always the frame footprint:
/// - `frame` mode: frame = input,
/// - `base` mode: frame = input + gap,
/// - `roof` mode: frame = input − (sum of opposing overhangs).
///
/// Base and roof then derive symmetrically. All results are floored to
/// integer mm with a 1mm minimum; there are no error conditions.
pub fn resolve_dims(size: &SizeInput, overhangs: &Overhangs) -> ResolvedDims {
    let uniform = if overhangs.uniform_mm.is_finite() {
        overhangs.uniform_mm.max(0.0)
    } else {
        0.0
    };
    let sides = SidesMm {
        left: side_mm(overhangs.left_mm, uniform),
        right: side_mm(overhangs.right_mm, uniform),
        front: side_mm(overhangs.front_mm, uniform),
        back: side_mm(overhangs.back_mm, uniform),
    };

    let w_in = sane_mm(size.width_mm, 2400.0);
    let d_in = sane_mm(size.depth_mm, 1800.0);

    let (frame_w, frame_d) = match size.mode {
        SizingMode::Frame => (w_in, d_in),
        SizingMode::Base => (w_in + BASE_FRAME_GAP_MM, d_in + BASE_FRAME_GAP_MM),
        SizingMode::Roof => (w_in - sides.x_total(), d_in - sides.z_total()),
    };
    let frame = DimPair {
        width_mm: frame_w.floor().max(1.0),
        depth_mm: frame_d.floor().max(1.0),
    };
    let base = DimPair {
        width_mm: (frame.width_mm - BASE_FRAME_GAP_MM).floor().max(1.0),
        depth_mm: (frame.depth_mm - BASE_FRAME_GAP_MM).floor().max(1.0),
    };
    let roof = DimPair {
        width_mm: (frame.width_mm + sides.x_total()).floor().max(1.0),
        depth_mm: (frame.depth_mm + sides.z_total()).floor().max(1.0),
    };

    ResolvedDims {
        base,
        frame,
        roof,
        overhangs: sides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shedwright_config::{Overhangs, SizeInput, SizingMode};

    fn overhangs_uniform(v: f64) -> Overhangs {
        Overhangs {
            uniform_mm: v,
            ..Overhangs::default()
        }
    }

    #[test]
    fn frame_mode_round_trip() {
        let size = SizeInput {
            mode: SizingMode::Frame,
            width_mm: 2400.0,
            depth_mm: 1800.0,
        };
        let d = resolve_dims(&size, &overhangs_uniform(150.0));
        assert_eq!(d.frame.width_mm, 2400.0);
        assert_eq!(d.base.width_mm, 2400.0 - BASE_FRAME_GAP_MM);
        assert_eq!(d.roof.width_mm, 2400.0 + 300.0);
        assert_eq!(d.roof.depth_mm, 1800.0 + 300.0);
    }

    #[test]
    fn base_mode_round_trip() {
        let size = SizeInput {
            mode: SizingMode::Base,
            width_mm: 2350.0,
            depth_mm: 1750.0,
        };
        let d = resolve_dims(&size, &overhangs_uniform(150.0));
        // frame = base + gap, and re-deriving base gets the input back
        assert_eq!(d.frame.width_mm, 2400.0);
        assert_eq!(d.base.width_mm, 2350.0);
        assert_eq!(d.base.depth_mm, 1750.0);
    }

    #[test]
    fn roof_mode_round_trip() {
        let size = SizeInput {
            mode: SizingMode::Roof,
            width_mm: 2700.0,
            depth_mm: 2100.0,
        };
        let d = resolve_dims(&size, &overhangs_uniform(150.0));
        // frame = roof − overhangs, and re-deriving roof gets the input back
        assert_eq!(d.frame.width_mm, 2400.0);
        assert_eq!(d.roof.width_mm, 2700.0);
        assert_eq!(d.roof.depth_mm, 2100.0);
    }

    #[test]
    fn all_modes_satisfy_tier_identities() {
        for mode in [SizingMode::Base, SizingMode::Frame, SizingMode::Roof] {
            let size = SizeInput {
                mode,
                width_mm: 3123.0,
                depth_mm: 2517.0,
            };
            let oh = Overhangs {
                uniform_mm: 150.0,
                front_mm: Some(250.0),
                ..Overhangs::default()
            };
            let d = resolve_dims(&size, &oh);
            assert_eq!(
                d.frame.width_mm,
                d.base.width_mm + BASE_FRAME_GAP_MM,
                "mode {mode:?}: frame = base + gap"
            );
            assert_eq!(
                d.roof.width_mm,
                d.frame.width_mm + d.overhangs.x_total(),
                "mode {mode:?}: roof = frame + overhangs (X)"
            );
            assert_eq!(
                d.roof.depth_mm,
                d.frame.depth_mm + d.overhangs.z_total(),
                "mode {mode:?}: roof = frame + overhangs (Z)"
            );
        }
    }

    #[test]
    fn per_side_overrides_resolve() {
        let oh = Overhangs {
            uniform_mm: 150.0,
            left_mm: Some(300.0),
            back_mm: Some(0.0),
            ..Overhangs::default()
        };
        let size = SizeInput::default();
        let d = resolve_dims(&size, &oh);
        assert_eq!(d.overhangs.left, 300.0);
        assert_eq!(d.overhangs.right, 150.0);
        assert_eq!(d.overhangs.front, 150.0);
        assert_eq!(d.overhangs.back, 0.0);
    }

    #[test]
    fn malformed_input_clamps_not_errors() {
        let size = SizeInput {
            mode: SizingMode::Frame,
            width_mm: f64::NAN,
            depth_mm: -500.0,
        };
        let d = resolve_dims(&size, &overhangs_uniform(f64::INFINITY));
        assert!(d.frame.width_mm >= 1.0);
        assert_eq!(d.frame.depth_mm, 1.0);
        assert_eq!(d.overhangs.left, 0.0);
    }

    #[test]
    fn tiny_roof_mode_floors_to_minimum() {
        let size = SizeInput {
            mode: SizingMode::Roof,
            width_mm: 100.0,
            depth_mm: 100.0,
        };
        let d = resolve_dims(&size, &overhangs_uniform(150.0));
        // roof − overhangs would go negative; frame floors at 1mm
        assert_eq!(d.frame.width_mm, 1.0);
        assert_eq!(d.frame.depth_mm, 1.0);
    }

    #[test]
    fn world_frame_wall_base() {
        let size = SizeInput::default();
        let d = resolve_dims(&size, &Overhangs::default());
        let wf = WorldFrame::new(&d);
        assert_eq!(wf.wall_base_y(), FLOOR_STACK_MM);
        assert_eq!(wf.frame_w, d.frame.width_mm);
    }
}
