//! Scene graph of independently transformable visual groups.
//!
//! The promo stage is a handful of named groups (hero figure, gate sequence,
//! lantern cluster, backdrop), each holding a base transform, the pose
//! computed for the current frame, and the props that render inside it.
//! Groups share no state; the rig repositions each one on its own.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for a visual group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

/// Role of a group on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKind {
    /// Static textured plane behind everything.
    Backdrop,
    /// Portrait and katana prop shown in the opening section.
    Hero,
    /// The torii gates the camera flies through.
    GateSequence,
    /// Paper lanterns that descend over the menu section.
    LanternCluster,
}

/// Position, rotation (Euler radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Idle sinusoidal bob/tilt layered on top of a prop's local transform.
///
/// The phase terms come from the prop's resting position, so siblings with
/// the same tuning drift out of step instead of bobbing in unison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sway {
    /// Vertical bob frequency in radians per second.
    pub bob_speed: f32,
    /// Vertical bob amplitude in world units.
    pub bob_amplitude: f32,
    /// Tilt frequency in radians per second.
    pub tilt_speed: f32,
    /// Tilt amplitude in radians (applied to rotation.z).
    pub tilt_amplitude: f32,
}

impl Sway {
    /// Lantern-style drift: slow bob, slight roll.
    pub fn lantern() -> Self {
        Self {
            bob_speed: 1.5,
            bob_amplitude: 0.1,
            tilt_speed: 2.0,
            tilt_amplitude: 0.05,
        }
    }

    /// Hero-style float: bob only, no roll.
    pub fn float() -> Self {
        Self {
            bob_speed: 1.0,
            bob_amplitude: 0.1,
            tilt_speed: 0.0,
            tilt_amplitude: 0.0,
        }
    }

    /// Bob/tilt displacement at `time` seconds, phased by `seed` (normally
    /// the resting position of whatever is swaying). Pure in `time`: nothing
    /// accumulates, so identical times produce identical offsets.
    pub fn offsets(&self, time: f32, seed: Vec3) -> (f32, f32) {
        let bob = (time * self.bob_speed + seed.z).sin() * self.bob_amplitude;
        let tilt = (time * self.tilt_speed + seed.x).sin() * self.tilt_amplitude;
        (bob, tilt)
    }

    /// Displace `base` at `time` seconds, phased by the base position.
    pub fn apply(&self, base: &Transform, time: f32) -> Transform {
        let (bob, tilt) = self.offsets(time, base.position);
        let mut out = *base;
        out.position.y += bob;
        out.rotation.z += tilt;
        out
    }
}

/// A renderable prop inside a group: its local transform plus optional sway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
    pub local: Transform,
    #[serde(default)]
    pub sway: Option<Sway>,
}

impl Prop {
    pub fn new(name: impl Into<String>, local: Transform) -> Self {
        Self {
            name: name.into(),
            local,
            sway: None,
        }
    }

    pub fn with_sway(mut self, sway: Sway) -> Self {
        self.sway = Some(sway);
        self
    }

    /// Local transform at `time`, with sway applied if configured.
    pub fn posed(&self, time: f32) -> Transform {
        match &self.sway {
            Some(sway) => sway.apply(&self.local, time),
            None => self.local,
        }
    }
}

/// An independently animated cluster of props.
#[derive(Debug, Clone)]
pub struct VisualGroup {
    pub kind: GroupKind,
    /// Resting transform; the rig derives each frame's pose from this.
    pub base: Transform,
    /// Pose computed for the current frame.
    pub pose: Transform,
    pub visible: bool,
    pub props: Vec<Prop>,
}

impl VisualGroup {
    pub fn new(kind: GroupKind, base: Transform) -> Self {
        Self {
            kind,
            base,
            pose: base,
            visible: true,
            props: Vec::new(),
        }
    }
}

/// Registry of the stage's visual groups, iterated in creation order.
#[derive(Debug, Default)]
pub struct SceneGraph {
    groups: HashMap<GroupId, VisualGroup>,
    order: Vec<GroupId>,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group and return its ID.
    pub fn create_group(&mut self, kind: GroupKind, base: Transform) -> GroupId {
        self.next_id += 1;
        let id = GroupId(self.next_id);
        self.groups.insert(id, VisualGroup::new(kind, base));
        self.order.push(id);
        id
    }

    pub fn get(&self, id: GroupId) -> Option<&VisualGroup> {
        self.groups.get(&id)
    }

    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut VisualGroup> {
        self.groups.get_mut(&id)
    }

    /// First group of the given kind, if any.
    pub fn find(&self, kind: GroupKind) -> Option<GroupId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.groups.get(id).map(|g| g.kind) == Some(kind))
    }

    pub fn set_visible(&mut self, id: GroupId, visible: bool) -> bool {
        match self.groups.get_mut(&id) {
            Some(group) => {
                group.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Groups in creation order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &VisualGroup)> {
        self.order
            .iter()
            .filter_map(|id| self.groups.get(id).map(|g| (*id, g)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
