//! Construction constants shared by every builder.
//!
//! All values are millimetres. These are the single source of truth —
//! builders never re-derive or shadow them locally.

/// Gap between the base (floor) footprint and the wall frame footprint,
/// per dimension: `frame = base + gap`.
pub const BASE_FRAME_GAP_MM: f64 = 50.0;

/// Sheathing (OSB) thickness. Also the apex crest correction term and the
/// minimum crest-above-eaves clamp.
pub const OSB_THICKNESS_MM: f64 = 18.0;

/// Decking sheet short edge.
pub const DECK_SHEET_SHORT_MM: f64 = 1220.0;
/// Decking sheet long edge.
pub const DECK_SHEET_LONG_MM: f64 = 2440.0;

/// Ground grid tile pitch.
pub const GROUND_CELL_MM: f64 = 500.0;
/// Ground grid tile thickness.
pub const GROUND_TILE_THICKNESS_MM: f64 = 40.0;

/// Floor joist section, width (horizontal) × depth (vertical).
pub const JOIST_WIDTH_MM: f64 = 50.0;
/// Floor joist vertical depth.
pub const JOIST_DEPTH_MM: f64 = 100.0;
/// Inner joist pitch.
pub const JOIST_SPACING_MM: f64 = 400.0;

/// Insulation bay chunk length along the long axis.
pub const INSULATION_CHUNK_MM: f64 = 2400.0;
/// Insulation slab thickness (sits inside the joist depth).
pub const INSULATION_THICKNESS_MM: f64 = 75.0;

/// Height of the floor stack above ground: joist depth + decking. Wall
/// bottom plates sit at this world Y.
pub const FLOOR_STACK_MM: f64 = JOIST_DEPTH_MM + OSB_THICKNESS_MM;

/// Maximum basic-variant wall panel length before splitting.
pub const PANEL_MAX_MM: f64 = 2400.0;

/// Plate thickness (plates laid flat: vertical extent of a wall plate).
pub const PLATE_MM: f64 = 50.0;

/// Cladding course pitch (board bottom to next board bottom).
pub const BOARD_PITCH_MM: f64 = 140.0;
/// Full-thickness drip lip at each course bottom.
pub const BOARD_LIP_MM: f64 = 20.0;
/// Recessed face strip above the lip.
pub const BOARD_FACE_MM: f64 = 120.0;
/// Full cladding board thickness (the lip).
pub const CLAD_THICKNESS_MM: f64 = 18.0;
/// Recessed face-strip thickness.
pub const CLAD_FACE_THICKNESS_MM: f64 = 12.0;
/// Drip-edge drop of the first course below the wall base.
pub const CLAD_DROP_MM: f64 = 30.0;

/// Rafter section: width (along ridge) × depth (perpendicular to slope).
pub const RAFTER_WIDTH_MM: f64 = 50.0;
/// Rafter depth perpendicular to the slope plane.
pub const RAFTER_DEPTH_MM: f64 = 100.0;
/// Truss pitch along the ridge.
pub const TRUSS_SPACING_MM: f64 = 600.0;
/// Purlin square section.
pub const PURLIN_MM: f64 = 50.0;
/// Purlin station pitch measured along the slope.
pub const PURLIN_SPACING_MM: f64 = 600.0;
/// Fascia board thickness.
pub const FASCIA_THICKNESS_MM: f64 = 18.0;
/// Fascia board height.
pub const FASCIA_HEIGHT_MM: f64 = 145.0;
/// Roof covering (felt/EPDM) thickness.
pub const COVERING_THICKNESS_MM: f64 = 6.0;

/// Minimum skylight clearance from ridge and eaves edges.
pub const SKYLIGHT_EDGE_GAP_MM: f64 = 150.0;

/// Divider stud pitch.
pub const DIVIDER_STUD_SPACING_MM: f64 = 400.0;

/// Door/window frame member section.
pub const OPENING_FRAME_MM: f64 = 45.0;
/// Glass pane thickness.
pub const GLASS_MM: f64 = 4.0;

/// Door face board width.
pub const DOOR_BOARD_WIDTH_MM: f64 = 100.0;
/// Door face board thickness.
pub const DOOR_BOARD_THICKNESS_MM: f64 = 18.0;
/// Ledge/brace/rail member height.
pub const DOOR_RAIL_MM: f64 = 95.0;
/// Ledge/brace/rail member thickness.
pub const DOOR_RAIL_THICKNESS_MM: f64 = 22.0;
/// Stile/rail thickness of framed (French / mortise-and-tenon) doors.
pub const DOOR_FRAME_THICKNESS_MM: f64 = 44.0;
/// Clearance between a door leaf and its liner, per side.
pub const DOOR_GAP_MM: f64 = 3.0;
