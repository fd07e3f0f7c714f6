//! Click sound cue.
//!
//! A single short clip played fire-and-forget on pointer clicks. This crate
//! does not own an audio device; it loads the clip bytes once, queues play
//! requests, and a host audio collaborator drains them. Sound is decorative:
//! a missing or unreadable clip downgrades every trigger to a logged no-op
//! and never disturbs the visual sequence.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Default playback volume, 0..1.
pub const DEFAULT_VOLUME: f32 = 0.5;

enum ClipState {
    /// Not attempted yet; loaded on first trigger.
    Unloaded,
    Loaded(Arc<Vec<u8>>),
    /// Load failed; stays failed for the lifetime of the cue.
    Unavailable,
}

/// One queued fire-and-forget playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRequest {
    pub volume: f32,
}

/// Owns the cached clip and the pending play queue. Dropping the cue
/// releases the clip; nothing is shared across mounts.
pub struct ClickCue {
    path: Option<PathBuf>,
    volume: f32,
    clip: ClipState,
    pending: Vec<PlayRequest>,
}

impl ClickCue {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            volume: DEFAULT_VOLUME,
            clip: ClipState::Unloaded,
            pending: Vec::new(),
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Request one playback. Loads the clip on first use; a cue with no
    /// path or a failed load absorbs the request silently.
    pub fn trigger(&mut self) {
        self.ensure_loaded();
        match self.clip {
            ClipState::Loaded(_) => self.pending.push(PlayRequest {
                volume: self.volume,
            }),
            _ => log::debug!("click cue unavailable, ignoring trigger"),
        }
    }

    /// Clip bytes for the host's decoder, if the load succeeded.
    pub fn clip(&self) -> Option<Arc<Vec<u8>>> {
        match &self.clip {
            ClipState::Loaded(bytes) => Some(Arc::clone(bytes)),
            _ => None,
        }
    }

    /// Drain the queued play requests for the host audio collaborator.
    pub fn take_pending(&mut self) -> Vec<PlayRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn ensure_loaded(&mut self) {
        if !matches!(self.clip, ClipState::Unloaded) {
            return;
        }
        self.clip = match &self.path {
            Some(path) => match fs::read(path) {
                Ok(bytes) => ClipState::Loaded(Arc::new(bytes)),
                Err(err) => {
                    log::warn!("failed to load click clip {:?}: {}", path, err);
                    ClipState::Unavailable
                }
            },
            None => ClipState::Unavailable,
        };
    }
}
