//! Scenario loading and final-state reporting.
//!
//! The textual format: the first two whitespace-separated tokens are the box
//! width (positive integer) and the run duration (positive real); anything
//! else on the duration's line is discarded. Every following non-blank line
//! is one particle record, `x y vx vy radius mass`, optionally followed by
//! presentation-only fields (e.g. a display colour) which the engine ignores.

use std::fs;
use std::path::Path;

use crate::core::{Particle, Simulation};
use crate::error::{Error, Result};

/// A parsed scenario: box width, run duration, and the initial discs in
/// input order.
#[derive(Debug)]
pub struct Scenario {
    pub width: u32,
    pub duration: f64,
    pub particles: Vec<Particle>,
}

/// Read and parse a scenario description file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)?;
    parse_scenario(&text)
}

/// Parse a scenario from text.
pub fn parse_scenario(input: &str) -> Result<Scenario> {
    let lines: Vec<&str> = input.lines().collect();

    // The width and duration tokens may share a line or span several.
    let mut header: Vec<&str> = Vec::new();
    let mut body_start = lines.len();
    for (idx, line) in lines.iter().enumerate() {
        header.extend(line.split_whitespace());
        if header.len() >= 2 {
            body_start = idx + 1;
            break;
        }
    }
    if header.len() < 2 {
        return Err(Error::Load(
            "expected a box width and a duration before any particle records".into(),
        ));
    }

    let width: u32 = header[0]
        .parse()
        .map_err(|_| Error::Load(format!("invalid box width {:?}", header[0])))?;
    if width == 0 {
        return Err(Error::Load("box width must be a positive integer".into()));
    }
    let duration: f64 = header[1]
        .parse()
        .map_err(|_| Error::Load(format!("invalid duration {:?}", header[1])))?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::Load("duration must be finite and > 0".into()));
    }

    let mut particles = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(body_start) {
        if line.trim().is_empty() {
            continue;
        }
        particles.push(parse_particle(line, idx + 1)?);
    }

    Ok(Scenario {
        width,
        duration,
        particles,
    })
}

fn parse_particle(line: &str, lineno: usize) -> Result<Particle> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return Err(Error::Load(format!(
            "line {lineno}: expected at least 6 fields (x y vx vy radius mass), got {}",
            fields.len()
        )));
    }
    let mut vals = [0.0_f64; 6];
    for (slot, raw) in vals.iter_mut().zip(&fields) {
        *slot = raw
            .parse()
            .map_err(|_| Error::Load(format!("line {lineno}: invalid number {raw:?}")))?;
    }
    Particle::new([vals[0], vals[1]], [vals[2], vals[3]], vals[4], vals[5])
        .map_err(|e| Error::Load(format!("line {lineno}: {e}")))
}

/// Format the final-state report: width line, duration line, then one line
/// per particle in input order with the same field order as the input.
/// Byte-stable for identical inputs.
pub fn format_report(sim: &Simulation) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", sim.width()));
    out.push_str(&format!("{}\n", sim.duration()));
    for p in sim.particles() {
        out.push_str(&format!("{p}\n"));
    }
    out
}
