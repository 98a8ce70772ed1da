// Creation defaults
pub const DEFAULT_CIRCLE_RADIUS: f32 = 50.0;
pub const DEFAULT_POLYGON_SIZE: f32 = 100.0;
pub const DEFAULT_BRACE_SIZE: f32 = 100.0;
pub const DEFAULT_BRACE_WIDTH: f32 = 30.0;

// Floors applied while dragging handles; a drag never produces a degenerate shape
pub const MIN_CIRCLE_RADIUS: f32 = 5.0;
pub const MIN_POLYGON_SIZE: f32 = 10.0;
pub const MIN_BRACE_SIZE: f32 = 20.0;
pub const MIN_BRACE_WIDTH: f32 = 10.0;

// Hit-test tolerances, in surface pixels
pub const LINE_HIT_TOLERANCE: f32 = 6.0;
pub const CIRCLE_RING_TOLERANCE: f32 = 8.0;
pub const CIRCLE_CENTER_TOLERANCE: f32 = 10.0;
pub const BRACE_HIT_PADDING: f32 = 8.0;
pub const POLYGON_HIT_PADDING: f32 = 6.0;

/// Handles are drawn with this radius...
pub const HANDLE_RADIUS: f32 = 5.0;
/// ...but can be grabbed from a bit further away.
pub const HANDLE_GRAB_RADIUS: f32 = 10.0;

/// Half-length of the perpendicular ticks at the ends of a segment.
pub const SEGMENT_TICK_HALF_LENGTH: f32 = 6.0;
