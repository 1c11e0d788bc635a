//! Drag-to-dismiss tracking for the invite bottom sheet.
//!
//! The tracker is fed raw pointer positions (pixels, downward positive) and
//! timestamps in milliseconds. It owns no timers; the view decides how to
//! animate based on [`DragTracker::offset`] and [`DragTracker::animating`].
//!
//! A drag dismisses the sheet when it travelled far enough OR was released
//! fast enough. Either heuristic alone is sufficient.

/// Tuning for [`DragTracker`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Travel after which further movement is damped
    pub max_drag: f64,
    /// Fraction of travel beyond `max_drag` that still moves the sheet
    pub damping: f64,
    /// Offset (px) beyond which release closes the sheet
    pub close_distance: f64,
    /// Release velocity (px/ms) beyond which the sheet closes
    pub close_velocity: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            max_drag: 240.0,
            damping: 0.3,
            close_distance: 60.0,
            close_velocity: 0.5,
        }
    }
}

/// Tracker phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    /// Release crossed a threshold; the sheet is dismissing
    Closing,
}

/// What a release decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Close,
    SnapBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    y: f64,
    t: f64,
}

/// One pointer-down → pointer-up cycle
#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    start_y: f64,
    last: Sample,
    previous: Sample,
    current_offset: f64,
}

/// State machine deciding whether a drag dismisses the sheet.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    config: DragConfig,
    phase: DragPhase,
    session: Option<DragSession>,
    settled_offset: f64,
}

impl DragTracker {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Current sheet offset in pixels (never negative).
    pub fn offset(&self) -> f64 {
        match &self.session {
            Some(session) => session.current_offset,
            None => self.settled_offset,
        }
    }

    /// Whether the view should run its transition animation.
    ///
    /// Suspended while a finger is down so the sheet tracks it directly.
    pub fn animating(&self) -> bool {
        self.phase != DragPhase::Dragging
    }

    /// Pointer pressed on the sheet handle.
    pub fn pointer_down(&mut self, y: f64, t_ms: f64) {
        if self.phase == DragPhase::Closing {
            return;
        }
        let sample = Sample { y, t: t_ms };
        self.session = Some(DragSession {
            start_y: y,
            last: sample,
            previous: sample,
            current_offset: 0.0,
        });
        self.phase = DragPhase::Dragging;
    }

    /// Pointer moved; returns the new sheet offset.
    pub fn pointer_move(&mut self, y: f64, t_ms: f64) -> f64 {
        let config = self.config;
        let Some(session) = self.session.as_mut() else {
            return self.settled_offset;
        };

        let delta = y - session.start_y;
        session.current_offset = damped_offset(delta, &config);
        session.previous = session.last;
        session.last = Sample { y, t: t_ms };
        session.current_offset
    }

    /// Pointer released or cancelled.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn pointer_up(&mut self) -> Option<DragOutcome> {
        let session = self.session.take()?;
        let velocity = velocity(session.previous, session.last);

        let closes = session.current_offset > self.config.close_distance
            || velocity > self.config.close_velocity;

        if closes {
            tracing::debug!(
                offset = session.current_offset,
                velocity,
                "drag dismissed sheet"
            );
            self.phase = DragPhase::Closing;
            self.settled_offset = session.current_offset;
            Some(DragOutcome::Close)
        } else {
            self.phase = DragPhase::Idle;
            self.settled_offset = 0.0;
            Some(DragOutcome::SnapBack)
        }
    }

    /// Same as release; browsers deliver this when the gesture is stolen.
    pub fn pointer_cancel(&mut self) -> Option<DragOutcome> {
        self.pointer_up()
    }

    /// Return to Idle after the sheet finished closing (or was reopened).
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.session = None;
        self.settled_offset = 0.0;
    }
}

fn damped_offset(delta: f64, config: &DragConfig) -> f64 {
    if delta <= 0.0 {
        return 0.0;
    }
    if delta <= config.max_drag {
        delta
    } else {
        config.max_drag + (delta - config.max_drag) * config.damping
    }
}

fn velocity(previous: Sample, last: Sample) -> f64 {
    let dt = last.t - previous.t;
    if dt <= 0.0 {
        return 0.0;
    }
    (last.y - previous.y) / dt
}
