#![warn(missing_docs)]

//! Parametric 3D generator for timber-framed garden buildings.
//!
//! This is the facade crate: it ties the declarative configuration
//! ([`shedwright_config`]), the construction engine ([`shedwright_build`]),
//! and the export/material layers into one entry point. A single call to
//! [`build_model`] turns a [`BuildingConfig`] into a [`Model`]: a flat list
//! of named, material-tagged timber pieces plus an aggregated quantity
//! report.
//!
//! ```no_run
//! use shedwright::{build_model, BuildOptions};
//! use shedwright_config::BuildingConfig;
//!
//! let cfg = BuildingConfig::example();
//! let model = build_model(&cfg, &BuildOptions::default());
//! let stl = shedwright::export::model_stl_bytes(&model);
//! std::fs::write("shed.stl", stl).unwrap();
//! ```
//!
//! Hosts that render incrementally can instead drive the two-phase
//! cladding API re-exported from [`shedwright_build::cladding`], feeding
//! measured plate bounds back into `execute_cladding` under the same
//! generation token.

pub mod export;
pub mod materials;

use std::collections::BTreeSet;

use shedwright_build::attachments::build_attachments;
use shedwright_build::base::build_base;
use shedwright_build::cladding::{execute_cladding, plan_cladding, MeasuredBounds};
use shedwright_build::dividers::build_dividers;
use shedwright_build::openings::build_openings;
use shedwright_build::quantities::{quantities, QuantityReport};
use shedwright_build::roof_frame::build_roof;
use shedwright_build::walls::build_walls;
use shedwright_build::{
    resolve_dims, resolve_profile, BuildContext, Piece, ResolvedDims, RoofSolver, WorldFrame,
};
use shedwright_config::{BuildingConfig, Wall};

pub use materials::{default_materials, MaterialDef};
pub use shedwright_build::{Component, PieceKind};

/// Caller-side build switches.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Build generation token, carried into deferred cladding jobs.
    pub generation: u64,
    /// Pose door leaves swung open.
    pub open_doors: bool,
    /// Extra opening ids to render in the alert material, in addition to
    /// the ones [`validate_openings`] finds.
    pub flag_invalid: BTreeSet<String>,
}

/// A fully built model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Every piece, across all components.
    pub pieces: Vec<Piece>,
    /// Aggregated material quantities.
    pub quantities: QuantityReport,
    /// Resolved dimension tiers the build used.
    pub dims: ResolvedDims,
    /// Generation token the model was built under.
    pub generation: u64,
    /// Opening ids rendered in the alert material.
    pub invalid_openings: BTreeSet<String>,
}

/// Find opening ids that do not fit their wall.
///
/// Checks degenerate sizes, run overflow, and overlap with a neighbour on
/// the same wall. Offending openings are not rejected — the builder
/// renders them in the alert material so the problem stays visible.
pub fn validate_openings(cfg: &BuildingConfig) -> BTreeSet<String> {
    let dims = resolve_dims(&cfg.size, &cfg.overhangs);
    let profile = resolve_profile(cfg.wall_variant, cfg.frame_gauge.as_ref());
    let t = profile.wall_thickness();
    let mut invalid = BTreeSet::new();
    for wall in Wall::ALL {
        let run = if wall.runs_along_x() {
            dims.frame.width_mm
        } else {
            dims.frame.depth_mm - 2.0 * t
        };
        let on_wall: Vec<_> = cfg.openings_on(wall).collect();
        for (i, o) in on_wall.iter().enumerate() {
            if o.width_mm <= 0.0
                || o.height_mm <= 0.0
                || o.position_mm < 0.0
                || o.position_mm + o.width_mm > run
            {
                invalid.insert(o.id.clone());
                continue;
            }
            let overlaps = on_wall.iter().enumerate().any(|(j, other)| {
                i != j
                    && o.position_mm < other.position_mm + other.width_mm
                    && other.position_mm < o.position_mm + o.width_mm
            });
            if overlaps {
                invalid.insert(o.id.clone());
            }
        }
    }
    invalid
}

/// Build the complete model for a configuration.
///
/// Components are built in dependency order: dimensions and solvers first,
/// then base, walls, cladding (planned and executed in the same pass),
/// roof, openings, dividers, and attachments. Everything is rebuilt from
/// scratch; nothing is retained between calls.
pub fn build_model(cfg: &BuildingConfig, opts: &BuildOptions) -> Model {
    let mut invalid = validate_openings(cfg);
    invalid.extend(opts.flag_invalid.iter().cloned());
    let ctx = BuildContext {
        invalid_openings: invalid.clone(),
        generation: opts.generation,
        open_doors: opts.open_doors,
    };

    let dims = resolve_dims(&cfg.size, &cfg.overhangs);
    let wf = WorldFrame::new(&dims);
    let profile = resolve_profile(cfg.wall_variant, cfg.frame_gauge.as_ref());
    let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
    log::info!(
        "building model: frame {:.0}x{:.0}mm, {} openings, {} dividers, {} attachments",
        dims.frame.width_mm,
        dims.frame.depth_mm,
        cfg.openings.len(),
        cfg.dividers.len(),
        cfg.attachments.len()
    );

    let mut pieces = build_base(&dims, cfg.wall_variant);
    let walls = build_walls(cfg, &wf, &profile, &solver, &ctx);
    pieces.extend(walls.pieces);
    let jobs = plan_cladding(cfg, &wf, &profile, &solver, &walls.plates, &ctx);
    pieces.extend(execute_cladding(&jobs, &wf, &MeasuredBounds::none(), opts.generation));
    pieces.extend(build_roof(cfg, &wf, &solver));
    pieces.extend(build_openings(cfg, &wf, &profile, &solver, &ctx));
    pieces.extend(build_dividers(cfg, &wf, &profile, &solver));
    pieces.extend(build_attachments(cfg, &wf, &solver, &ctx));

    let quantities = quantities(&pieces);
    Model {
        pieces,
        quantities,
        dims,
        generation: opts.generation,
        invalid_openings: invalid,
    }
}
