use crate::core::particle::Particle;

/// Which side of the box a wall closes off.
///
/// Coordinates are screen-style (y grows downward): `Top` and `Left` sit at
/// offset 0, `Bottom` and `Right` at offset = box width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Top,
    Bottom,
    Left,
    Right,
}

/// One of the four fixed planar boundaries of the box. Immutable for the
/// whole run.
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    orientation: Orientation,
    offset: f64,
}

impl Wall {
    pub fn new(orientation: Orientation, offset: f64) -> Self {
        Self {
            orientation,
            offset,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Time until `particle` touches this wall under free flight.
    ///
    /// Only the velocity component perpendicular to the wall matters; when it
    /// points away from (or parallel to) the wall the particle never reaches
    /// it and the result is `f64::INFINITY`.
    pub fn time_to_collision(&self, particle: &Particle) -> f64 {
        let [x, y] = particle.r;
        let [vx, vy] = particle.v;
        let radius = particle.radius;

        match self.orientation {
            Orientation::Left if vx < 0.0 => ((x - radius) / vx).abs(),
            Orientation::Right if vx > 0.0 => ((self.offset - (x + radius)) / vx).abs(),
            Orientation::Top if vy < 0.0 => ((y - radius) / vy).abs(),
            Orientation::Bottom if vy > 0.0 => ((self.offset - (y + radius)) / vy).abs(),
            _ => f64::INFINITY,
        }
    }

    /// Perfectly elastic reflection: inverts the perpendicular velocity
    /// component, leaves the parallel one untouched, and stamps the particle
    /// with `now`. Speed magnitude is preserved.
    pub fn resolve_collision(&self, now: f64, particle: &mut Particle) {
        match self.orientation {
            Orientation::Top | Orientation::Bottom => particle.v[1] = -particle.v[1],
            Orientation::Left | Orientation::Right => particle.v[0] = -particle.v[0],
        }
        particle.last_update_time = now;
    }
}
