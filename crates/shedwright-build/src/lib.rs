#![warn(missing_docs)]

//! Parametric construction engine for timber-framed garden buildings.
//!
//! Converts a declarative [`shedwright_config::BuildingConfig`] into
//! dimensionally consistent 3D timber assemblies: base and floor, wall
//! frames with cladding, roof structure, doors/windows/skylights, internal
//! dividers, and attached secondary structures — each down to individual
//! framing members.
//!
//! The build is a pure synchronous pass in a fixed dependency order:
//! dimensions → stud profile → roof solver → base / walls / cladding /
//! roof / openings / dividers / attachments. Every component is rebuilt
//! from scratch on every pass; nothing persists between passes except the
//! caller's material definitions.
//!
//! The cladding trim step is split into an explicit two-phase API
//! ([`cladding::plan_cladding`] / [`cladding::execute_cladding`]) so hosts
//! that measure rendered plate bounds can defer phase two; a build
//! generation token makes stale deferred executions no-op.

pub mod attachments;
pub mod base;
pub mod cladding;
pub mod consts;
pub mod context;
pub mod dims;
pub mod dividers;
pub mod openings;
pub mod profile;
pub mod quantities;
pub mod roof;
pub mod roof_frame;
pub mod walls;

pub use context::{BuildContext, Component, Piece, PieceKind};
pub use dims::{resolve_dims, DimPair, ResolvedDims, SidesMm, WorldFrame};
pub use profile::{resolve_profile, StudProfile};
pub use roof::RoofSolver;
