//! Intro cinematic sequencer.
//!
//! A one-shot, non-interactive opening: a dark atmospheric hold, then a
//! four-beat title reveal (staging, flash, split-screen wipe, fade-out),
//! then done. Phases advance strictly forward on fixed delays and are never
//! revisited; input never accelerates them. The host is notified exactly
//! once on completion, and tearing the sequencer down early guarantees the
//! notification never arrives late.

use serde::{Deserialize, Serialize};

use crate::timer::{TimerId, TimerPool};

/// Stage of the intro cinematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "phase")]
pub enum IntroPhase {
    /// Dark hold before anything appears.
    Atmosphere,
    /// The title sequence, four beats (0..=3).
    TitleReveal { step: u8 },
    /// Terminal; the page content takes over.
    Complete,
}

fn default_hold() -> f32 {
    0.5
}
fn default_flash() -> f32 {
    1.0
}
fn default_wipe() -> f32 {
    1.0
}
// Beat delays are picked to be exactly representable in binary so the
// cumulative deadlines (0.5, 1.5, 2.5, 2.75, 3.5) land on the clock with
// no rounding slack.
fn default_fade() -> f32 {
    0.25
}
fn default_finish() -> f32 {
    0.75
}

/// Delays between consecutive intro beats, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroTimings {
    /// Atmosphere -> TitleReveal(0).
    #[serde(default = "default_hold")]
    pub hold: f32,
    /// TitleReveal(0) -> (1): the flash lands and the title fades in.
    #[serde(default = "default_flash")]
    pub flash: f32,
    /// TitleReveal(1) -> (2): the split screen wipes open.
    #[serde(default = "default_wipe")]
    pub wipe: f32,
    /// TitleReveal(2) -> (3): the overlay starts fading out.
    #[serde(default = "default_fade")]
    pub fade: f32,
    /// TitleReveal(3) -> Complete.
    #[serde(default = "default_finish")]
    pub finish: f32,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            hold: default_hold(),
            flash: default_flash(),
            wipe: default_wipe(),
            fade: default_fade(),
            finish: default_finish(),
        }
    }
}

/// Plays the intro. One pending timer at a time drives the next transition;
/// the pool owns it, so dropping or tearing down the sequencer cancels
/// everything outstanding.
pub struct IntroSequencer {
    phase: IntroPhase,
    timings: IntroTimings,
    timers: TimerPool,
    pending: Option<TimerId>,
    /// Cumulative deadline of the pending transition. Successive beats are
    /// scheduled against this, not the frame clock, so coarse frames do not
    /// stretch the sequence.
    next_deadline: f64,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl IntroSequencer {
    pub fn new(timings: IntroTimings) -> Self {
        let mut timers = TimerPool::new();
        let next_deadline = f64::from(timings.hold.max(0.0));
        let pending = Some(timers.schedule_at(next_deadline));
        Self {
            phase: IntroPhase::Atmosphere,
            timings,
            timers,
            pending,
            next_deadline,
            on_complete: None,
        }
    }

    /// Register the completion callback. Called at most once, only after
    /// the final delay elapses.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == IntroPhase::Complete
    }

    /// Pending transition timers (0 or 1; 0 once complete or torn down).
    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    /// Advance the sequence by `dt` seconds of simulated or real time.
    ///
    /// A `dt` spanning several beats catches up within the one call, still
    /// visiting every phase in order.
    pub fn update(&mut self, dt: f32) {
        if self.is_complete() {
            return;
        }
        let mut fired = self.timers.advance(dt);
        loop {
            let mut progressed = false;
            for id in fired.drain(..) {
                if self.pending == Some(id) {
                    self.pending = None;
                    self.advance_phase();
                    progressed = true;
                }
            }
            if !progressed || self.is_complete() {
                break;
            }
            // A freshly scheduled beat may already be past due.
            fired = self.timers.advance(0.0);
        }
    }

    /// Cancel every outstanding transition and drop the completion
    /// callback. After this the sequencer is inert: no phase will ever
    /// change and no notification will ever be delivered.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.pending = None;
        self.on_complete = None;
    }

    fn advance_phase(&mut self) {
        let (next, delay) = match self.phase {
            IntroPhase::Atmosphere => (IntroPhase::TitleReveal { step: 0 }, Some(self.timings.flash)),
            IntroPhase::TitleReveal { step: 0 } => {
                (IntroPhase::TitleReveal { step: 1 }, Some(self.timings.wipe))
            }
            IntroPhase::TitleReveal { step: 1 } => {
                (IntroPhase::TitleReveal { step: 2 }, Some(self.timings.fade))
            }
            IntroPhase::TitleReveal { step: 2 } => {
                (IntroPhase::TitleReveal { step: 3 }, Some(self.timings.finish))
            }
            IntroPhase::TitleReveal { step: _ } => (IntroPhase::Complete, None),
            IntroPhase::Complete => return,
        };

        self.phase = next;
        log::debug!("intro phase -> {:?}", self.phase);

        match delay {
            Some(delay) => {
                self.next_deadline += f64::from(delay.max(0.0));
                self.pending = Some(self.timers.schedule_at(self.next_deadline));
            }
            None => {
                self.timers.clear();
                if let Some(callback) = self.on_complete.take() {
                    callback();
                }
            }
        }
    }

    // Overlay read-outs for the host renderer. All derived from the phase,
    // nothing to keep in sync.

    /// The black overlay is mounted until the sequence completes.
    pub fn overlay_visible(&self) -> bool {
        !self.is_complete()
    }

    /// Title text is shown from the flash beat onward.
    pub fn title_visible(&self) -> bool {
        matches!(self.phase, IntroPhase::TitleReveal { step } if step >= 1)
    }

    /// The horizontal flash line is only live on its own beat.
    pub fn flash_active(&self) -> bool {
        self.phase == IntroPhase::TitleReveal { step: 1 }
    }

    /// The split-screen halves have wiped open.
    pub fn wipe_open(&self) -> bool {
        matches!(self.phase, IntroPhase::TitleReveal { step } if step >= 2)
    }

    /// The overlay is in its final fade-out beat.
    pub fn fading_out(&self) -> bool {
        self.phase == IntroPhase::TitleReveal { step: 3 }
    }
}
