//! Single-writer motion state for the strip offset
//!
//! Exactly one driver may write the offset at a time. `Motion` owns that
//! decision: the marquee runs only in [`MotionState::Marquee`], a tween
//! only in [`MotionState::Tween`], a drag only in
//! [`MotionState::Dragging`]. Entering a driver always leaves the previous
//! one first, and the marquee is re-entered only from `Idle` after the
//! caller confirms no video is playing.

use log::{debug, trace};

use crate::drag::DragSession;
use crate::geometry::LayoutState;
use crate::host::PointerId;
use crate::marquee::{self, MarqueeClock};
use crate::tween::Tween;

#[derive(Debug, Clone, PartialEq)]
pub enum MotionState {
    Idle,
    Marquee,
    Tween(Tween),
    Dragging(DragSession),
}

impl MotionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Marquee => "marquee",
            Self::Tween(_) => "tween",
            Self::Dragging(_) => "dragging",
        }
    }
}

/// What a frame did to the offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutcome {
    /// The offset was written this frame.
    pub moved: bool,
    /// A tween reached its target this frame.
    pub tween_finished: bool,
}

#[derive(Debug, Clone)]
pub struct Motion {
    state: MotionState,
    clock: MarqueeClock,
    reduced_motion: bool,
    speed: f64,
    max_frame_dt: f64,
}

impl Motion {
    pub fn new(reduced_motion: bool, speed: f64, max_frame_dt: f64) -> Self {
        let state = if reduced_motion {
            MotionState::Idle
        } else {
            MotionState::Marquee
        };
        Self {
            state,
            clock: MarqueeClock::new(),
            reduced_motion,
            speed,
            max_frame_dt,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn is_marquee_running(&self) -> bool {
        matches!(self.state, MotionState::Marquee)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MotionState::Dragging(_))
    }

    pub fn tween(&self) -> Option<&Tween> {
        match &self.state {
            MotionState::Tween(tween) => Some(tween),
            _ => None,
        }
    }

    fn transition(&mut self, next: MotionState) {
        if self.state.name() != next.name() {
            debug!("motion: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }

    /// Stop the marquee. Other drivers are left alone.
    pub fn suspend_marquee(&mut self) {
        if self.is_marquee_running() {
            self.transition(MotionState::Idle);
        }
    }

    /// Re-enter the marquee if nothing else owns the offset. Returns whether
    /// the marquee is running afterwards.
    pub fn try_resume_marquee(&mut self, video_playing: bool) -> bool {
        if self.reduced_motion || video_playing {
            return self.is_marquee_running();
        }
        if matches!(self.state, MotionState::Idle) {
            self.clock.reset();
            self.transition(MotionState::Marquee);
        }
        self.is_marquee_running()
    }

    /// Replace any in-flight tween (and the marquee) with `tween`, anchored
    /// at the latest frame seen. Refused while a drag owns the offset.
    pub fn start_tween(&mut self, tween: Tween) -> bool {
        if self.is_dragging() {
            debug!("motion: tween refused while dragging");
            return false;
        }
        let tween = match self.clock.last() {
            Some(ts) => tween.anchored_at(ts),
            None => tween,
        };
        self.transition(MotionState::Tween(tween));
        true
    }

    /// Take the offset for a drag. Cancels the tween and suspends the
    /// marquee. Refused if a drag is already active.
    pub fn begin_drag(&mut self, session: DragSession) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.transition(MotionState::Dragging(session));
        true
    }

    pub fn drag(&self) -> Option<&DragSession> {
        match &self.state {
            MotionState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Leave the drag started by `pointer`. Returns the finished session.
    pub fn end_drag(&mut self, pointer: PointerId) -> Option<DragSession> {
        let session = self.drag().copied().filter(|s| s.owns(pointer))?;
        self.transition(MotionState::Idle);
        Some(session)
    }

    /// Drop whatever driver is active.
    pub fn halt(&mut self) {
        self.transition(MotionState::Idle);
    }

    /// Run the active time-based driver for the frame at `ts`.
    pub fn tick(&mut self, ts: f64, layout: &mut LayoutState) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        match &mut self.state {
            MotionState::Marquee if layout.is_ready() => {
                let dt = self.clock.delta(ts, self.max_frame_dt);
                layout.set_offset(marquee::advance(
                    layout.offset,
                    self.speed,
                    dt,
                ));
                trace!("marquee dt={dt:.4}s offset={:.2}", layout.offset);
                outcome.moved = true;
            }
            MotionState::Tween(tween) => {
                self.clock.mark(ts);
                if layout.is_ready() {
                    let (raw, done) = tween.sample(ts);
                    layout.set_offset(raw);
                    outcome.moved = true;
                    outcome.tween_finished = done;
                }
            }
            _ => self.clock.mark(ts),
        }
        if outcome.tween_finished {
            self.transition(MotionState::Idle);
        }
        outcome
    }
}
