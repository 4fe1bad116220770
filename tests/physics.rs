use boxsim::core::{Orientation, Particle, Simulation, Wall};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Prediction soundness: whenever the relative position and velocity are not
/// approaching (Δp·Δv >= 0), the predicted collision time is infinite, for
/// randomized non-overlapping disc states.
#[test]
fn separating_states_never_predict_contact() -> boxsim::error::Result<()> {
    let mut rng = StdRng::seed_from_u64(0xB0C5);
    let mut checked = 0usize;
    while checked < 500 {
        let a = Particle::new(
            [rng.random_range(2.0..18.0), rng.random_range(2.0..18.0)],
            [rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)],
            rng.random_range(0.1..0.8),
            rng.random_range(0.5..4.0),
        )?;
        let b = Particle::new(
            [rng.random_range(22.0..38.0), rng.random_range(2.0..18.0)],
            [rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0)],
            rng.random_range(0.1..0.8),
            rng.random_range(0.5..4.0),
        )?;
        let dp = [b.r[0] - a.r[0], b.r[1] - a.r[1]];
        let dv = [b.v[0] - a.v[0], b.v[1] - a.v[1]];
        let dvdr = dp[0] * dv[0] + dp[1] * dv[1];
        if dvdr >= 0.0 {
            assert_eq!(a.time_to_collision(&b), f64::INFINITY);
            checked += 1;
        }
    }
    Ok(())
}

/// Conservation: resolving a randomized in-contact collision leaves total
/// momentum and total kinetic energy unchanged to 1e-9 relative tolerance.
#[test]
fn randomized_collisions_conserve_momentum_and_energy() -> boxsim::error::Result<()> {
    let mut rng = StdRng::seed_from_u64(0xE1A5);
    let mut resolved = 0usize;
    while resolved < 500 {
        let ra = rng.random_range(0.2..1.5);
        let rb = rng.random_range(0.2..1.5);
        let theta: f64 = rng.random_range(0.0..std::f64::consts::TAU);
        let center = [rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)];
        let sigma = ra + rb;

        let mut a = Particle::new(
            center,
            [rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)],
            ra,
            rng.random_range(0.5..5.0),
        )?;
        let mut b = Particle::new(
            [center[0] + sigma * theta.cos(), center[1] + sigma * theta.sin()],
            [rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)],
            rb,
            rng.random_range(0.5..5.0),
        )?;

        // Only resolve approaching pairs; the engine never resolves others.
        let dp = [b.r[0] - a.r[0], b.r[1] - a.r[1]];
        let dv = [b.v[0] - a.v[0], b.v[1] - a.v[1]];
        if dp[0] * dv[0] + dp[1] * dv[1] >= 0.0 {
            continue;
        }

        let px = a.momentum()[0] + b.momentum()[0];
        let py = a.momentum()[1] + b.momentum()[1];
        let e = a.kinetic_energy() + b.kinetic_energy();

        a.resolve_collision(&mut b, 1.0);
        resolved += 1;

        let px2 = a.momentum()[0] + b.momentum()[0];
        let py2 = a.momentum()[1] + b.momentum()[1];
        let e2 = a.kinetic_energy() + b.kinetic_energy();
        assert!((px2 - px).abs() <= 1e-9 * px.abs().max(1.0));
        assert!((py2 - py).abs() <= 1e-9 * py.abs().max(1.0));
        assert!(((e2 - e) / e).abs() <= 1e-9);
        // Both discs must be stamped with the collision time.
        assert_eq!(a.last_update_time, 1.0);
        assert_eq!(b.last_update_time, 1.0);
    }
    Ok(())
}

/// Elastic wall reflection preserves speed magnitude for randomized states.
#[test]
fn wall_reflection_preserves_speed() -> boxsim::error::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x4A11);
    let walls = [
        Wall::new(Orientation::Top, 0.0),
        Wall::new(Orientation::Bottom, 20.0),
        Wall::new(Orientation::Left, 0.0),
        Wall::new(Orientation::Right, 20.0),
    ];
    for _ in 0..500 {
        let mut p = Particle::new(
            [rng.random_range(1.0..19.0), rng.random_range(1.0..19.0)],
            [rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)],
            rng.random_range(0.1..1.0),
            rng.random_range(0.5..5.0),
        )?;
        let wall = walls[rng.random_range(0..walls.len())];
        let speed = (p.v[0] * p.v[0] + p.v[1] * p.v[1]).sqrt();
        wall.resolve_collision(0.5, &mut p);
        let speed_after = (p.v[0] * p.v[0] + p.v[1] * p.v[1]).sqrt();
        assert!((speed_after - speed).abs() < 1e-12);
    }
    Ok(())
}

/// Invalidation: a prediction made before a disc's latest collision must be
/// discarded when popped, never applied. Disc a's wall prediction (created
/// at t = 0) is outrun by its collision with the stationary blocker b.
#[test]
fn earlier_created_prediction_is_discarded_after_collision() -> boxsim::error::Result<()> {
    let a = Particle::new([5.0, 10.0], [1.0, 0.0], 1.0, 1.0)?;
    let b = Particle::new([12.0, 10.0], [0.0, 0.0], 1.0, 1.0)?;
    let mut sim = Simulation::new(20, 30.0, vec![a, b])?;
    sim.run()?;

    // a hits b at t = 5 (gap 7, contact distance 2, closing at 1) and, with
    // equal masses, stops dead at x = 10, making its t = 14 right-wall
    // prediction (created at t = 0) stale. b carries the velocity: bounces
    // off the right wall at t = 12, returns, and hands the velocity back to
    // a at t = 19; a then bounces off the left wall at t = 28. Applying the
    // stale wall event instead would have teleported a's reflection.
    assert!(sim.events_discarded() >= 1);
    assert!((sim.particles()[0].r[0] - 3.0).abs() < 1e-9);
    assert!((sim.particles()[0].v[0] - 1.0).abs() < 1e-9);
    assert!((sim.particles()[1].r[0] - 12.0).abs() < 1e-9);
    assert!((sim.particles()[1].v[0]).abs() < 1e-9);
    Ok(())
}

/// A dense randomized gas stays energy-conserving and inside the box over a
/// long run, regardless of how many stale events pile up.
#[test]
fn randomized_gas_long_run_is_stable() -> boxsim::error::Result<()> {
    let mut rng = StdRng::seed_from_u64(0x6A55);
    let width = 40u32;
    let radius = 0.5;
    let mut particles: Vec<Particle> = Vec::new();
    // Grid placement avoids initial overlap; velocities are random.
    for gx in 0..6 {
        for gy in 0..6 {
            particles.push(Particle::new(
                [4.0 + 5.5 * gx as f64, 4.0 + 5.5 * gy as f64],
                [rng.random_range(-1.5..1.5), rng.random_range(-1.5..1.5)],
                radius,
                rng.random_range(0.5..2.0),
            )?);
        }
    }

    let mut sim = Simulation::new(width, 100.0, particles)?;
    let e0 = sim.kinetic_energy();
    sim.run()?;

    assert!(((sim.kinetic_energy() - e0) / e0).abs() < 1e-9);
    assert!(sim.events_processed() > 0);
    let w = width as f64;
    for p in sim.particles() {
        assert!(p.r[0] >= p.radius - 1e-6 && p.r[0] <= w - p.radius + 1e-6);
        assert!(p.r[1] >= p.radius - 1e-6 && p.r[1] <= w - p.radius + 1e-6);
    }
    Ok(())
}
