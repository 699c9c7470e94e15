//! Stud profile resolver.
//!
//! Maps the wall variant (plus an optional explicit gauge override) to the
//! stud section and spacing policy every framing builder consumes.

use shedwright_config::{FrameGauge, WallVariant};

/// Resolved stud section and spacing policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudProfile {
    /// Stud width along the wall run, mm.
    pub stud_width_mm: f64,
    /// Stud depth through the wall, mm. Also the wall frame thickness.
    pub stud_depth_mm: f64,
    /// Fixed stud pitch. `None` selects the minimal three-stud layout
    /// (start, centre, end) used by the basic variant.
    pub spacing_mm: Option<f64>,
}

impl StudProfile {
    /// Wall frame thickness (the stud depth).
    pub fn wall_thickness(&self) -> f64 {
        self.stud_depth_mm
    }

    /// Section label used in quantity reports, e.g. `50x75`.
    pub fn section_label(&self) -> String {
        format!(
            "{}x{}",
            self.stud_width_mm.round() as i64,
            self.stud_depth_mm.round() as i64
        )
    }
}

/// Resolve the stud profile for a wall variant.
///
/// A gauge override replaces the section but keeps the variant's spacing
/// policy; override values that are not finite and positive are ignored.
pub fn resolve_profile(variant: WallVariant, gauge: Option<&FrameGauge>) -> StudProfile {
    let mut profile = match variant {
        WallVariant::Basic => StudProfile {
            stud_width_mm: 50.0,
            stud_depth_mm: 75.0,
            spacing_mm: None,
        },
        WallVariant::Insulated => StudProfile {
            stud_width_mm: 50.0,
            stud_depth_mm: 100.0,
            spacing_mm: Some(400.0),
        },
    };
    if let Some(g) = gauge {
        if g.width_mm.is_finite() && g.width_mm > 0.0 {
            profile.stud_width_mm = g.width_mm;
        }
        if g.depth_mm.is_finite() && g.depth_mm > 0.0 {
            profile.stud_depth_mm = g.depth_mm;
        }
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_profile() {
        let p = resolve_profile(WallVariant::Basic, None);
        assert_eq!(p.stud_width_mm, 50.0);
        assert_eq!(p.stud_depth_mm, 75.0);
        assert_eq!(p.spacing_mm, None);
        assert_eq!(p.section_label(), "50x75");
    }

    #[test]
    fn insulated_profile() {
        let p = resolve_profile(WallVariant::Insulated, None);
        assert_eq!(p.stud_depth_mm, 100.0);
        assert_eq!(p.spacing_mm, Some(400.0));
        assert_eq!(p.wall_thickness(), 100.0);
    }

    #[test]
    fn gauge_override_keeps_spacing_policy() {
        let g = FrameGauge {
            width_mm: 63.0,
            depth_mm: 89.0,
        };
        let p = resolve_profile(WallVariant::Insulated, Some(&g));
        assert_eq!(p.stud_width_mm, 63.0);
        assert_eq!(p.stud_depth_mm, 89.0);
        assert_eq!(p.spacing_mm, Some(400.0));
    }

    #[test]
    fn bad_gauge_values_ignored() {
        let g = FrameGauge {
            width_mm: f64::NAN,
            depth_mm: -10.0,
        };
        let p = resolve_profile(WallVariant::Basic, Some(&g));
        assert_eq!(p.stud_width_mm, 50.0);
        assert_eq!(p.stud_depth_mm, 75.0);
    }
}
