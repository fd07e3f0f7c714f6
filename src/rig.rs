//! Scroll-progress animator.
//!
//! Maps one scalar scroll offset to independent motion for each visual
//! group, producing the layered fly-through effect: the hero recedes over
//! the opening section, the gates slide past the camera, the lanterns
//! descend into view. Every pose is a pure function of `(offset, time)`,
//! with no accumulated state, so scrolling back restores earlier frames
//! exactly.

use serde::{Deserialize, Serialize};

use crate::ease::Easing;
use crate::scene::{GroupId, SceneGraph, Sway, Transform};
use crate::scroll::ScrollState;

/// A window over the scroll offset domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollRange {
    pub start: f32,
    pub length: f32,
}

impl ScrollRange {
    pub fn new(start: f32, length: f32) -> Self {
        Self { start, length }
    }

    /// Clamped progress through this window.
    pub fn fraction(&self, scroll: ScrollState) -> f32 {
        scroll.range(self.start, self.length)
    }
}

/// Motion policy for one visual group.
///
/// `Lift` is keyed to a clamped range fraction. `Approach` and `Descend`
/// are keyed to the raw offset and extrapolate linearly outside [0, 1]:
/// overscroll just carries the glide a little further, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Motion {
    /// Rise, recede from the camera and turn as the window is scrolled
    /// through. Used by the hero group.
    Lift {
        range: ScrollRange,
        /// World units moved up at full range fraction.
        rise: f32,
        /// World units moved away from the camera at full range fraction.
        recede: f32,
        /// Radians of yaw at full range fraction.
        turn: f32,
        #[serde(default)]
        easing: Easing,
    },
    /// Slide toward the camera proportionally to the raw offset, starting
    /// `lead` units behind the resting depth. Used by the gate sequence.
    Approach { lead: f32, rate: f32 },
    /// Drop from the resting height proportionally to the raw offset.
    /// Used by the lantern cluster.
    Descend { rate: f32 },
    /// Hold the base transform. Used by the backdrop.
    Still,
}

impl Motion {
    /// Pose for `base` at the given scroll position.
    pub fn pose(&self, base: &Transform, scroll: ScrollState) -> Transform {
        let mut out = *base;
        match *self {
            Motion::Lift {
                range,
                rise,
                recede,
                turn,
                easing,
            } => {
                let r = easing.apply(range.fraction(scroll));
                out.position.y += rise * r;
                out.position.z -= recede * r;
                out.rotation.y += turn * r;
            }
            Motion::Approach { lead, rate } => {
                out.position.z += lead - rate * scroll.offset();
            }
            Motion::Descend { rate } => {
                out.position.y -= rate * scroll.offset();
            }
            Motion::Still => {}
        }
        out
    }
}

/// Binds a group to its motion policy plus an optional idle float layer.
#[derive(Debug, Clone)]
pub struct MotionTrack {
    pub group: GroupId,
    pub motion: Motion,
    /// Additive idle bob/tilt, phased by the group's base position.
    pub float: Option<Sway>,
}

impl MotionTrack {
    pub fn new(group: GroupId, motion: Motion) -> Self {
        Self {
            group,
            motion,
            float: None,
        }
    }

    pub fn with_float(mut self, sway: Sway) -> Self {
        self.float = Some(sway);
        self
    }

    /// Full pose (motion plus float) for `base` at `(scroll, time)`.
    pub fn pose(&self, base: &Transform, scroll: ScrollState, time: f32) -> Transform {
        let mut pose = self.motion.pose(base, scroll);
        if let Some(sway) = &self.float {
            let (bob, tilt) = sway.offsets(time, base.position);
            pose.position.y += bob;
            pose.rotation.z += tilt;
        }
        pose
    }
}

/// The frame driver for scroll-derived motion: applies every track's pose
/// to its owning group. Tracks are independent; application order is
/// irrelevant.
#[derive(Debug, Default)]
pub struct ScrollRig {
    tracks: Vec<MotionTrack>,
}

impl ScrollRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&mut self, track: MotionTrack) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[MotionTrack] {
        &self.tracks
    }

    /// Recompute every tracked group's pose for this frame. Groups without
    /// a track keep their base pose untouched.
    pub fn apply(&self, scene: &mut SceneGraph, scroll: ScrollState, time: f32) {
        for track in &self.tracks {
            if let Some(group) = scene.get_mut(track.group) {
                group.pose = track.pose(&group.base, scroll, time);
            }
        }
    }
}

/// Hero motion with the stage's stock tuning: rise 5, recede 5, quarter-ish
/// turn over the opening third of the page stack.
pub fn hero_motion(range: ScrollRange) -> Motion {
    Motion::Lift {
        range,
        rise: 5.0,
        recede: 5.0,
        turn: 0.5,
        easing: Easing::Linear,
    }
}
