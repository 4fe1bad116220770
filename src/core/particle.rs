use crate::error::{Error, Result};
use std::fmt;

/// A rigid disc in the box plane.
///
/// Fields:
/// - `r`: position [x, y]
/// - `v`: velocity [vx, vy]
/// - `radius`: disc radius (> 0)
/// - `mass`: disc mass (> 0)
/// - `last_update_time`: time of the last collision that changed this disc's
///   trajectory; predictions made before that moment are stale
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; 2],
    /// Velocity (vx, vy).
    pub v: [f64; 2],
    /// Disc radius (> 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
    /// Monotonically non-decreasing; starts at 0.
    pub last_update_time: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any
    ///   component is NaN/inf.
    pub fn new(r: [f64; 2], v: [f64; 2], radius: f64, mass: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            r,
            v,
            radius,
            mass,
            last_update_time: 0.0,
        })
    }

    /// Uniform linear motion for `dt` (engine invariant: `dt >= 0`).
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.r[0] += self.v[0] * dt;
        self.r[1] += self.v[1] * dt;
    }

    /// The disc's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq = self.v[0] * self.v[0] + self.v[1] * self.v[1];
        0.5 * self.mass * vsq
    }

    /// The disc's momentum vector (m vx, m vy).
    #[inline]
    pub fn momentum(&self) -> [f64; 2] {
        [self.mass * self.v[0], self.mass * self.v[1]]
    }

    /// Time until this disc first touches `other` under free flight, or
    /// `f64::INFINITY` when their paths never come within contact distance.
    ///
    /// Solves |Δp + Δv t| = σ for the smallest positive root, where σ is the
    /// sum of radii. A non-negative Δp·Δv means the discs are separating (or
    /// moving in parallel) and can never make contact.
    pub fn time_to_collision(&self, other: &Particle) -> f64 {
        let dp = [other.r[0] - self.r[0], other.r[1] - self.r[1]];
        let dv = [other.v[0] - self.v[0], other.v[1] - self.v[1]];

        let dvdr = dp[0] * dv[0] + dp[1] * dv[1];
        if dvdr >= 0.0 {
            return f64::INFINITY;
        }
        let dvdv = dv[0] * dv[0] + dv[1] * dv[1];
        if dvdv == 0.0 {
            // Identical velocities with dvdr < 0 would require overlap,
            // which the engine's invariants exclude.
            return f64::INFINITY;
        }
        let drdr = dp[0] * dp[0] + dp[1] * dp[1];
        let sigma = self.radius + other.radius;
        let d = dvdr * dvdr - dvdv * (drdr - sigma * sigma);
        if d < 0.0 {
            return f64::INFINITY;
        }
        // First contact time; positive under the dvdr < 0 branch.
        -(dvdr + d.sqrt()) / dvdv
    }

    /// Perfectly elastic, frictionless impulse along the line of centers.
    ///
    /// Conserves total momentum and kinetic energy up to floating-point
    /// error, and stamps `last_update_time = now` on both discs. Caller
    /// guarantees the discs are in contact (|Δp| = σ) and approaching.
    pub fn resolve_collision(&mut self, other: &mut Particle, now: f64) {
        let dp = [other.r[0] - self.r[0], other.r[1] - self.r[1]];
        let dv = [other.v[0] - self.v[0], other.v[1] - self.v[1]];
        let dvdr = dp[0] * dv[0] + dp[1] * dv[1];
        let sigma = self.radius + other.radius;

        let j = 2.0 * self.mass * other.mass * dvdr / (sigma * (self.mass + other.mass));
        let jx = j * dp[0] / sigma;
        let jy = j * dp[1] / sigma;

        self.v[0] += jx / self.mass;
        self.v[1] += jy / self.mass;
        other.v[0] -= jx / other.mass;
        other.v[1] -= jy / other.mass;

        self.last_update_time = now;
        other.last_update_time = now;
    }
}

impl fmt::Display for Particle {
    /// The report line format: `x y vx vy radius mass`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.r[0], self.r[1], self.v[0], self.v[1], self.radius, self.mass
        )
    }
}
