//! Page director: the composition root for one page view.
//!
//! Owns every animated part (intro sequencer, scroll tracker, scene graph,
//! motion rig, petal field, cursor, click cue) and advances them from a
//! single `update` per rendered frame. The intro gates the content: until it
//! completes, scroll input is ignored and the groups hold their resting
//! poses (plus idle float). Once it reports completion the sequencer is
//! unmounted and the scroll rig becomes the active driver for the rest of
//! the page view.
//!
//! Pointer and scroll input only reach components through the director, and
//! the director owns them outright, so dropping it tears down every timer
//! and subscription at once; nothing can fire across mounts.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::audio::ClickCue;
use crate::config::PageConfig;
use crate::cursor::{Cursor, CursorSnapshot};
use crate::intro::{IntroPhase, IntroSequencer};
use crate::petals::{PetalField, PetalInstance};
use crate::rig::{MotionTrack, ScrollRig};
use crate::scene::{GroupKind, Prop, SceneGraph, Sway, Transform};
use crate::scroll::{ScrollState, ScrollTracker};

/// Pointer input as reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { position: Vec2 },
    HoverChanged { hovering: bool },
    Clicked,
}

/// Overlay state for the host to draw during the intro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroOverlay {
    pub phase: IntroPhase,
    pub title_visible: bool,
    pub flash_active: bool,
    pub wipe_open: bool,
    pub fading_out: bool,
}

/// One prop, posed for this frame in group-local space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSnapshot {
    pub name: String,
    pub transform: Transform,
}

/// One visual group, posed for this frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub kind: GroupKind,
    pub pose: Transform,
    pub visible: bool,
    pub props: Vec<PropSnapshot>,
}

/// Everything the host renderer needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub time: f32,
    pub scroll_offset: f32,
    pub content_revealed: bool,
    /// Present while the intro overlay is mounted.
    pub intro: Option<IntroOverlay>,
    pub groups: Vec<GroupSnapshot>,
    pub petals: Vec<PetalInstance>,
    pub cursor: CursorSnapshot,
}

/// Drives one mounted page view.
pub struct PageDirector {
    time: f32,
    intro: Option<IntroSequencer>,
    content_revealed: bool,
    tracker: ScrollTracker,
    scene: SceneGraph,
    rig: ScrollRig,
    petals: PetalField,
    cursor: Cursor,
    clicks: ClickCue,
}

impl PageDirector {
    pub fn new(config: PageConfig) -> Self {
        let mut scene = SceneGraph::new();
        let mut rig = ScrollRig::new();
        build_stage(&mut scene, &mut rig, &config);

        Self {
            time: 0.0,
            intro: Some(IntroSequencer::new(config.intro)),
            content_revealed: false,
            tracker: ScrollTracker::new(config.scroll_damping),
            scene,
            rig,
            petals: PetalField::new(config.petals),
            cursor: Cursor::new(config.cursor_spring),
            clicks: ClickCue::new(config.click_clip.clone()),
        }
    }

    pub fn content_revealed(&self) -> bool {
        self.content_revealed
    }

    /// Phase of the intro overlay, or None once it has been unmounted.
    pub fn intro_phase(&self) -> Option<IntroPhase> {
        self.intro.as_ref().map(|intro| intro.phase())
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Route one pointer event to the mounted components. Clicks cue the
    /// sound in every phase; they never advance the intro.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { position } => self.cursor.set_pointer(position),
            PointerEvent::HoverChanged { hovering } => self.cursor.set_hover(hovering),
            PointerEvent::Clicked => self.clicks.trigger(),
        }
    }

    /// New raw scroll offset from the viewport. Buffered; takes effect on
    /// the next update, and only once the content is revealed.
    pub fn set_scroll_target(&mut self, offset: f32) {
        self.tracker.set_target(offset);
    }

    /// Queued click playbacks for the host audio collaborator.
    pub fn take_pending_clicks(&mut self) -> Vec<crate::audio::PlayRequest> {
        self.clicks.take_pending()
    }

    /// Advance the whole page by `dt` seconds and return the frame state.
    pub fn update(&mut self, dt: f32) -> FrameSnapshot {
        self.time += dt.max(0.0);

        let intro_done = match &mut self.intro {
            Some(intro) => {
                intro.update(dt);
                intro.is_complete()
            }
            None => false,
        };
        if intro_done {
            // Unmount: the sequencer and its timers go away for good.
            self.intro = None;
            self.content_revealed = true;
            log::info!("intro complete, revealing page content");
        }

        let scroll = if self.content_revealed {
            self.tracker.advance(dt)
        } else {
            ScrollState::new(0.0)
        };

        self.rig.apply(&mut self.scene, scroll, self.time);
        self.petals.update(dt);
        self.cursor.update(dt);

        self.snapshot(scroll)
    }

    fn snapshot(&self, scroll: ScrollState) -> FrameSnapshot {
        let groups = self
            .scene
            .groups()
            .map(|(_, group)| GroupSnapshot {
                kind: group.kind,
                pose: group.pose,
                visible: group.visible,
                props: group
                    .props
                    .iter()
                    .map(|prop| PropSnapshot {
                        name: prop.name.clone(),
                        transform: prop.posed(self.time),
                    })
                    .collect(),
            })
            .collect();

        FrameSnapshot {
            time: self.time,
            scroll_offset: scroll.offset(),
            content_revealed: self.content_revealed,
            intro: self.intro.as_ref().map(|intro| IntroOverlay {
                phase: intro.phase(),
                title_visible: intro.title_visible(),
                flash_active: intro.flash_active(),
                wipe_open: intro.wipe_open(),
                fading_out: intro.fading_out(),
            }),
            groups,
            petals: self.petals.instances(),
            cursor: self.cursor.snapshot(),
        }
    }
}

impl Default for PageDirector {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

/// Build the stock stage: backdrop, hero portrait with floating katana,
/// three receding torii gates, four swaying lanterns.
fn build_stage(scene: &mut SceneGraph, rig: &mut ScrollRig, config: &PageConfig) {
    let backdrop = scene.create_group(GroupKind::Backdrop, Transform::at(Vec3::new(0.0, 0.0, -8.0)));
    if let Some(group) = scene.get_mut(backdrop) {
        group.props.push(Prop::new(
            "backdrop",
            Transform {
                scale: Vec3::new(30.0, 20.0, 1.0),
                ..Transform::default()
            },
        ));
    }

    let hero = scene.create_group(GroupKind::Hero, Transform::default());
    if let Some(group) = scene.get_mut(hero) {
        group.props.push(Prop::new(
            "portrait",
            Transform::at(Vec3::new(0.0, 0.0, -2.0)),
        ));
        group.props.push(
            Prop::new(
                "katana",
                Transform {
                    position: Vec3::new(2.5, -1.0, 0.0),
                    rotation: Vec3::new(0.0, 0.0, -std::f32::consts::FRAC_PI_4),
                    scale: Vec3::ONE,
                },
            )
            .with_sway(Sway::float()),
        );
    }
    rig.add_track(MotionTrack::new(hero, config.hero_motion).with_float(Sway::float()));

    let gates = scene.create_group(GroupKind::GateSequence, Transform::default());
    if let Some(group) = scene.get_mut(gates) {
        for (index, z) in [-5.0_f32, -15.0, -25.0].into_iter().enumerate() {
            group.props.push(Prop::new(
                format!("gate-{}", index + 1),
                Transform::at(Vec3::new(0.0, -2.0, z)).with_scale(1.5),
            ));
        }
    }
    rig.add_track(MotionTrack::new(gates, config.gate_motion));

    let lanterns = scene.create_group(GroupKind::LanternCluster, Transform::at(Vec3::new(0.0, 10.0, -3.0)));
    if let Some(group) = scene.get_mut(lanterns) {
        let spots = [
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, -1.0),
            Vec3::new(-2.0, -2.0, -2.0),
            Vec3::new(4.0, -1.0, 1.0),
        ];
        for (index, spot) in spots.into_iter().enumerate() {
            group.props.push(
                Prop::new(format!("lantern-{}", index + 1), Transform::at(spot))
                    .with_sway(Sway::lantern()),
            );
        }
    }
    rig.add_track(MotionTrack::new(lanterns, config.lantern_motion));
}
