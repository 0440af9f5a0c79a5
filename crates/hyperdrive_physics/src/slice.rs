//! W-slice computation
//!
//! Every solid in the world occupies `[w_center - w_extent, w_center + w_extent]`
//! along W. The player only sees (and only collides with) the 3D cross-section
//! at its own W coordinate. The size of that cross-section is summarised as a
//! single `scale` in [0, 1] which drives both rendering (size and opacity) and
//! collision (solidity threshold), so "mostly out of view" is also "mostly not
//! solid".

use serde::{Deserialize, Serialize};

/// Shape of the scale falloff as the player moves away from `w_center`
///
/// `Spherical` is the shipped behaviour and is applied to every solid,
/// boxes included. It is not the true cross-section of a hyper-rectangular
/// prism (that would not shrink at all until the edge), but it gives the
/// smooth fade the game is tuned around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSectionProfile {
    /// `sqrt(1 - n²)`
    #[default]
    Spherical,
    /// `1 - n`
    Linear,
}

impl CrossSectionProfile {
    /// Map a normalized W distance in [0, 1] to a cross-section scale in [0, 1]
    #[inline]
    pub fn scale(self, normalized: f64) -> f64 {
        let n = normalized.clamp(0.0, 1.0);
        let s = match self {
            CrossSectionProfile::Spherical => (1.0 - n * n).sqrt(),
            CrossSectionProfile::Linear => 1.0 - n,
        };
        s.clamp(0.0, 1.0)
    }
}

/// The cross-section of one solid at the player's W
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceResult {
    /// Whether the player's W lies inside the solid's W range
    pub visible: bool,
    /// Cross-section scale in [0, 1]; 0 whenever not visible
    pub scale: f64,
    /// Signed W distance from the solid's centre to the player (`player_w - w_center`)
    pub offset: f64,
}

impl SliceResult {
    /// A slice that misses the solid
    #[inline]
    pub fn hidden(offset: f64) -> Self {
        Self {
            visible: false,
            scale: 0.0,
            offset,
        }
    }

    /// Visible and at least `threshold` solid
    #[inline]
    pub fn is_solid(&self, threshold: f64) -> bool {
        self.visible && self.scale >= threshold
    }
}

/// Slice a solid with the default spherical profile
#[inline]
pub fn slice(w_center: f64, w_extent: f64, player_w: f64) -> SliceResult {
    slice_with_profile(w_center, w_extent, player_w, CrossSectionProfile::Spherical)
}

/// Slice a solid with an explicit profile
///
/// A solid with zero (or negative, or non-finite) W extent has no thickness
/// along W and is never visible, even when the player sits exactly on its
/// `w_center`.
pub fn slice_with_profile(
    w_center: f64,
    w_extent: f64,
    player_w: f64,
    profile: CrossSectionProfile,
) -> SliceResult {
    let rel_w = player_w - w_center;

    if !(w_extent > 0.0) || !w_extent.is_finite() {
        return SliceResult::hidden(rel_w);
    }

    let dist = rel_w.abs();
    if dist > w_extent {
        return SliceResult::hidden(rel_w);
    }

    // Clamp before the sqrt: dist / w_extent can overshoot 1 by an ulp
    let normalized = (dist / w_extent).clamp(0.0, 1.0);
    SliceResult {
        visible: true,
        scale: profile.scale(normalized),
        offset: rel_w,
    }
}
