use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// What a scheduled event refers to.
///
/// Participants are indices into the engine's particle and wall arrays, never
/// references; the particle list is owned by the engine alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Contact between particles `i` and `j`.
    Collision { i: usize, j: usize },
    /// Contact between particle `i` and wall `wall`.
    WallCollision { i: usize, wall: usize },
    /// End-of-run sentinel; carries no participants.
    Termination,
}

impl EventKind {
    /// Tie-break rank for events at exactly equal times:
    /// `Collision` < `WallCollision` < `Termination`.
    #[inline]
    fn order_key(&self) -> (u8, usize, usize) {
        match *self {
            EventKind::Collision { i, j } => (0, i, j),
            EventKind::WallCollision { i, wall } => (1, i, wall),
            EventKind::Termination => (2, 0, 0),
        }
    }
}

/// A predicted contact (or the termination sentinel) awaiting its turn in
/// the queue.
///
/// Events are immutable once created and consumed exactly once when popped:
/// either executed or discarded as stale. `created` is the clock value at
/// prediction time and drives the staleness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: NotNan<f64>,
    pub created: NotNan<f64>,
    pub kind: EventKind,
}

impl Event {
    /// Create a new event, rejecting NaN or non-finite times.
    pub fn new(time: f64, created: f64, kind: EventKind) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidState(format!(
                "event time {time} for {kind:?} must be finite"
            )));
        }
        let time = NotNan::new(time)
            .map_err(|_| Error::InvalidState("event time cannot be NaN".into()))?;
        let created = NotNan::new(created)
            .map_err(|_| Error::InvalidState("event creation time cannot be NaN".into()))?;
        Ok(Self {
            time,
            created,
            kind,
        })
    }

    /// Raw f64 occurrence time.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }

    /// Raw f64 creation time.
    #[inline]
    pub fn created_f64(&self) -> f64 {
        self.created.into_inner()
    }

    /// A prediction is stale once any participant was deflected by a real
    /// collision after it was made. Pass the participants' current
    /// `last_update_time` values (`None` for the second slot of wall events).
    #[inline]
    pub fn is_stale(&self, last_i: f64, last_j: Option<f64>) -> bool {
        let created = self.created.into_inner();
        last_i > created || last_j.is_some_and(|t| t > created)
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.kind.order_key().cmp(&other.kind.order_key()))
            .then_with(|| self.created.cmp(&other.created))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
