//! Default material database.
//!
//! The builder tags every piece with a material key; hosts map keys to
//! render properties through these definitions (or their own overrides).

use serde::{Deserialize, Serialize};

/// Render properties for one material key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Key the builder tags pieces with (e.g. `"timber"`).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Base colour as `[r, g, b]` in 0.0..1.0.
    pub color: [f64; 3],
    /// Metallic factor (0.0 = dielectric, 1.0 = metal).
    pub metallic: f64,
    /// Roughness factor (0.0 = mirror, 1.0 = diffuse).
    pub roughness: f64,
    /// Alpha (1.0 = opaque); glazing renders translucent.
    pub alpha: f64,
}

fn def(
    key: &str,
    name: &str,
    color: [f64; 3],
    metallic: f64,
    roughness: f64,
    alpha: f64,
) -> MaterialDef {
    MaterialDef {
        key: key.to_string(),
        name: name.to_string(),
        color,
        metallic,
        roughness,
        alpha,
    }
}

/// Definitions for every key the builder emits.
pub fn default_materials() -> Vec<MaterialDef> {
    vec![
        def("timber", "Treated carcassing timber", [0.72, 0.58, 0.40], 0.0, 0.9, 1.0),
        def("joinery", "Planed joinery timber", [0.82, 0.68, 0.48], 0.0, 0.7, 1.0),
        def("osb", "OSB3 sheet", [0.78, 0.66, 0.42], 0.0, 0.95, 1.0),
        def("cladding", "Treated shiplap cladding", [0.55, 0.42, 0.28], 0.0, 0.85, 1.0),
        def("felt", "Roofing felt", [0.18, 0.18, 0.20], 0.0, 1.0, 1.0),
        def("glass", "Glazing", [0.62, 0.78, 0.82], 0.0, 0.05, 0.35),
        def("steel", "Galvanised steel fittings", [0.62, 0.64, 0.67], 1.0, 0.4, 1.0),
        def("insulation", "PIR insulation slab", [0.92, 0.88, 0.62], 0.0, 1.0, 1.0),
        def("ground", "Ground grid tile", [0.35, 0.38, 0.33], 0.0, 1.0, 1.0),
        def("alert", "Invalid-opening alert", [0.95, 0.20, 0.15], 0.0, 0.6, 0.8),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let defs = default_materials();
        for (i, a) in defs.iter().enumerate() {
            for b in defs.iter().skip(i + 1) {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn round_trips_through_json() {
        let defs = default_materials();
        let json = serde_json::to_string(&defs).expect("serialize");
        let back: Vec<MaterialDef> = serde_json::from_str(&json).expect("parse");
        assert_eq!(defs, back);
    }
}
