//! Frame-driven one-shot timers.
//!
//! The page runs on a single cooperative frame clock; the only suspension
//! anywhere is "do X after a fixed delay". This pool owns every pending
//! delay as plain data: timers only fire from [`TimerPool::advance`], so a
//! cleared or dropped pool can never deliver a late callback. Deadlines are
//! tracked against an accumulated clock in `f64` seconds.

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TimerId,
    deadline: f64,
}

/// Owned collection of pending one-shot timers.
#[derive(Debug, Default)]
pub struct TimerPool {
    now: f64,
    pending: Vec<Pending>,
    next_id: u64,
}

impl TimerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed pool time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule a timer `delay` seconds from now. Negative delays are
    /// treated as zero and fire on the next advance.
    pub fn schedule(&mut self, delay: f32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            deadline: self.now + f64::from(delay.max(0.0)),
        });
        id
    }

    /// Schedule a timer at an absolute pool time. A deadline at or before
    /// the current clock fires on the next advance, including an advance of
    /// zero seconds. Chained sequences schedule this way so that a coarse
    /// frame step does not stretch the cumulative schedule.
    pub fn schedule_at(&mut self, deadline: f64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending { id, deadline });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel everything. After this call no previously scheduled timer can
    /// ever fire.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock by `dt` seconds and return the timers whose
    /// deadline has been reached (deadline <= now), in deadline order.
    pub fn advance(&mut self, dt: f32) -> Vec<TimerId> {
        self.now += f64::from(dt.max(0.0));

        let now = self.now;
        let mut fired: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.deadline <= now {
                fired.push(*p);
                false
            } else {
                true
            }
        });

        fired.sort_by(|a, b| {
            a.deadline
                .partial_cmp(&b.deadline)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.0.cmp(&b.id.0))
        });
        fired.into_iter().map(|p| p.id).collect()
    }
}
