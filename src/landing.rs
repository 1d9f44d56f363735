// ============================================================================
// LANDING RESOLUTION
// ============================================================================

use std::f64::consts::PI;

/// Number of wedges painted on the stock wheel face.
pub const SLICE_COUNT: usize = 8;

/// Pointer sits on the right of the wheel rather than the top.
pub const POINTER_OFFSET_DEG: f64 = 270.0;

/// Maps a resting wheel angle onto the wedge under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingResolver {
    slice_count: usize,
    pointer_offset_deg: f64,
}

impl Default for LandingResolver {
    fn default() -> Self {
        Self::new(SLICE_COUNT, POINTER_OFFSET_DEG)
    }
}

impl LandingResolver {
    pub fn new(slice_count: usize, pointer_offset_deg: f64) -> Self {
        Self {
            slice_count: slice_count.max(1),
            pointer_offset_deg: pointer_offset_deg.rem_euclid(360.0),
        }
    }

    /// Angular width of one wedge, in degrees.
    pub fn slice_degrees(&self) -> f64 {
        360.0 / self.slice_count as f64
    }

    /// Resolves `angle` (radians, any accumulated value) to a wedge index in
    /// `0..slice_count`. Exact wedge boundaries floor to the lower index.
    pub fn resolve(&self, angle: f64) -> usize {
        let deg = (angle * 180.0 / PI).rem_euclid(360.0);
        let adjusted = (deg + self.pointer_offset_deg) % 360.0;
        let from_pointer = (360.0 - adjusted) % 360.0;
        let index = (from_pointer / self.slice_degrees()).floor() as usize;
        // float rounding in the division can reach slice_count for uneven wedge counts
        index.min(self.slice_count - 1)
    }
}

/// Resolves with the stock 8-wedge, right-hand pointer geometry.
pub fn resolve_slice(angle: f64) -> usize {
    LandingResolver::default().resolve(angle)
}
