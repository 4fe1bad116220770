use crate::core::event::{Event, EventKind};
use crate::core::heap::MinHeap;
use crate::core::particle::Particle;
use crate::core::wall::{Orientation, Wall};
use crate::error::{Error, Result};
use tracing::{debug, info, trace};

/// Event-driven simulation of hard discs in a fixed square box.
///
/// Owns the particle list, the four walls, the event queue, and the clock
/// for the whole run. `run` drives the seed → pop → validate → resolve →
/// re-predict loop until the termination sentinel fires; the particle states
/// at that point are the authoritative result.
///
/// Stale predictions are never removed from the queue eagerly. Each event
/// records the clock value it was created at, and resolving a collision
/// stamps the touched particles with the current time; a popped event whose
/// participant was stamped after its creation is discarded unexecuted.
#[derive(Debug)]
pub struct Simulation {
    now: f64,
    width: u32,
    duration: f64,
    walls: [Wall; 4],
    particles: Vec<Particle>,
    events: MinHeap<Event>,
    processed: u64,
    discarded: u64,
}

impl Simulation {
    /// Create a simulation over a square box of side `width` with the given
    /// initial discs, to be run until `duration`.
    ///
    /// Precondition checks happen here, not mid-run: every disc must fit
    /// inside the box and no two discs may overlap.
    pub fn new(width: u32, duration: f64, particles: Vec<Particle>) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidParam("box width must be > 0".into()));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::InvalidParam(
                "duration must be finite and > 0".into(),
            ));
        }
        let w = width as f64;
        for (i, p) in particles.iter().enumerate() {
            let inside = p.r[0] - p.radius >= 0.0
                && p.r[0] + p.radius <= w
                && p.r[1] - p.radius >= 0.0
                && p.r[1] + p.radius <= w;
            if !inside {
                return Err(Error::InvalidParam(format!(
                    "particle {i} does not fit inside the box"
                )));
            }
        }
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let dx = particles[j].r[0] - particles[i].r[0];
                let dy = particles[j].r[1] - particles[i].r[1];
                let sigma = particles[i].radius + particles[j].radius;
                if dx * dx + dy * dy < sigma * sigma {
                    return Err(Error::InvalidParam(format!(
                        "particles {i} and {j} overlap"
                    )));
                }
            }
        }

        let walls = [
            Wall::new(Orientation::Top, 0.0),
            Wall::new(Orientation::Bottom, w),
            Wall::new(Orientation::Left, 0.0),
            Wall::new(Orientation::Right, w),
        ];
        Ok(Self {
            now: 0.0,
            width,
            duration,
            walls,
            particles,
            events: MinHeap::new(),
            processed: 0,
            discarded: 0,
        })
    }

    /// Box side length as given at construction.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Configured end time of the run.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.now
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view of the discs, in input order. The engine alone
    /// mutates them; the construction-time invariants (containment,
    /// non-overlap) would not survive outside writes.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Collision events executed so far.
    pub fn events_processed(&self) -> u64 {
        self.processed
    }

    /// Stale events discarded at pop so far.
    pub fn events_discarded(&self) -> u64 {
        self.discarded
    }

    /// Total kinetic energy (diagnostic; conserved across the run).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum vector (diagnostic; walls exchange momentum with the
    /// box, so only particle collisions leave this unchanged).
    pub fn momentum(&self) -> [f64; 2] {
        let mut out = [0.0, 0.0];
        for p in &self.particles {
            let m = p.momentum();
            out[0] += m[0];
            out[1] += m[1];
        }
        out
    }

    /// Run the simulation from t = 0 to `duration`, resolving every
    /// collision in chronological order.
    pub fn run(&mut self) -> Result<()> {
        self.seed_events()?;
        self.events
            .insert(Event::new(self.duration, self.now, EventKind::Termination)?);

        loop {
            let ev = self.events.extract_min()?;
            let delta = ev.time_f64() - self.now;

            match ev.kind {
                EventKind::Termination => {
                    self.advance_all(delta);
                    self.now = ev.time_f64();
                    break;
                }
                EventKind::Collision { i, j } => {
                    if ev.is_stale(
                        self.particles[i].last_update_time,
                        Some(self.particles[j].last_update_time),
                    ) {
                        self.discarded += 1;
                        debug!(time = ev.time_f64(), i, j, "discarding stale pair event");
                        continue;
                    }
                    self.advance_all(delta);
                    self.now = ev.time_f64();
                    trace!(time = self.now, i, j, "pair collision");

                    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                    let (head, tail) = self.particles.split_at_mut(hi);
                    head[lo].resolve_collision(&mut tail[0], self.now);
                    self.processed += 1;

                    self.schedule_for(i)?;
                    self.schedule_for(j)?;
                }
                EventKind::WallCollision { i, wall } => {
                    if ev.is_stale(self.particles[i].last_update_time, None) {
                        self.discarded += 1;
                        debug!(time = ev.time_f64(), i, wall, "discarding stale wall event");
                        continue;
                    }
                    self.advance_all(delta);
                    self.now = ev.time_f64();
                    trace!(time = self.now, i, wall, "wall collision");

                    self.walls[wall].resolve_collision(self.now, &mut self.particles[i]);
                    self.processed += 1;

                    self.schedule_for(i)?;
                }
            }
        }

        info!(
            time = self.now,
            processed = self.processed,
            discarded = self.discarded,
            queued = self.events.len(),
            "simulation complete"
        );
        Ok(())
    }

    /// Initial predictions: every unordered pair once, plus every particle
    /// against every wall. Zero-delta contacts are admitted here, so an
    /// input state already touching something resolves that contact first.
    fn seed_events(&mut self) -> Result<()> {
        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                self.push_pair(i, j, false)?;
            }
            self.push_walls(i, false)?;
        }
        Ok(())
    }

    /// Fresh predictions for particle `i` against every other particle and
    /// every wall. Pushing these is what invalidates the stale events still
    /// queued for `i`: they fail the staleness check when popped.
    ///
    /// Only strictly positive deltas are admitted here. A disc spanning the
    /// whole box touches the opposite wall the instant it reflects, and a
    /// zero-delta re-prediction of that contact would be popped, resolved,
    /// and re-predicted forever without the clock ever advancing.
    fn schedule_for(&mut self, i: usize) -> Result<()> {
        for j in 0..self.particles.len() {
            if j != i {
                self.push_pair(i.min(j), i.max(j), true)?;
            }
        }
        self.push_walls(i, true)
    }

    fn push_pair(&mut self, i: usize, j: usize, strictly_positive: bool) -> Result<()> {
        let dt = self.particles[i].time_to_collision(&self.particles[j]);
        self.push_prediction(dt, EventKind::Collision { i, j }, strictly_positive)
    }

    fn push_walls(&mut self, i: usize, strictly_positive: bool) -> Result<()> {
        for wall in 0..self.walls.len() {
            let dt = self.walls[wall].time_to_collision(&self.particles[i]);
            self.push_prediction(dt, EventKind::WallCollision { i, wall }, strictly_positive)?;
        }
        Ok(())
    }

    /// Queue a relative-time prediction if it is finite and non-negative
    /// (strictly positive when `strictly_positive` is set). A NaN prediction
    /// means a particle's state was corrupted and aborts the run.
    fn push_prediction(&mut self, dt: f64, kind: EventKind, strictly_positive: bool) -> Result<()> {
        if dt.is_nan() {
            return Err(Error::InvalidState(format!(
                "NaN collision prediction for {kind:?} at t = {}",
                self.now
            )));
        }
        let admissible = if strictly_positive { dt > 0.0 } else { dt >= 0.0 };
        if !dt.is_finite() || !admissible {
            return Ok(());
        }
        self.events
            .insert(Event::new(self.now + dt, self.now, kind)?);
        Ok(())
    }

    /// Free flight for every disc since the last processed event.
    fn advance_all(&mut self, delta: f64) {
        for p in &mut self.particles {
            p.advance(delta);
        }
    }
}
