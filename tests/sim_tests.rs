// Host-side integration tests for the celebration simulation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod sim {
    include!("../src/core/sim.rs");
}

use constants::*;
use glam::Vec2;
use sim::*;

fn make_sim(seed: u64) -> Simulation {
    Simulation::new_seeded(800.0, 600.0, seed)
}

#[test]
fn confetti_burst_spawns_with_confetti_regime() {
    let mut s = make_sim(1);
    s.spawn_confetti_burst(400.0, 400.0, 150);
    assert_eq!(s.particles().len(), 150);
    for p in s.particles() {
        assert_eq!(p.kind, ParticleKind::Confetti);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.decay, CONFETTI_DECAY);
        assert!(p.vel.x.abs() <= CONFETTI_SPREAD_VX);
        assert!(p.vel.y >= CONFETTI_BURST_VY_MIN && p.vel.y < CONFETTI_BURST_VY_MAX);
        assert!(p.radius >= CONFETTI_RADIUS_MIN && p.radius < CONFETTI_RADIUS_MAX);
        assert!((0.0..360.0).contains(&p.hue));
    }
}

#[test]
fn particle_alpha_is_monotonic_and_removal_happens_at_zero() {
    let mut s = make_sim(2);
    s.spawn_confetti_burst(400.0, 300.0, 20);
    let mut events = SimEvents::new();
    let mut prev: Vec<f32> = s.particles().iter().map(|p| p.alpha).collect();
    for _ in 0..400 {
        s.step(0.0, &mut events);
        // Survivors are strictly dimmer than anything from the previous
        // frame, and nothing with alpha <= 0 is ever retained.
        let max_prev = prev.iter().cloned().fold(f32::MIN, f32::max);
        for p in s.particles() {
            assert!(p.alpha > 0.0);
            assert!(p.alpha < max_prev);
        }
        if s.particles().is_empty() {
            break;
        }
        prev = s.particles().iter().map(|p| p.alpha).collect();
    }
    assert!(s.particles().is_empty(), "confetti should fully decay");
}

#[test]
fn rocket_velocity_increases_until_asymmetric_apex() {
    let mut s = make_sim(3);
    s.spawn_rocket();
    let mut events = SimEvents::new();
    let mut prev_vy = s.rockets()[0].vy;
    assert!(prev_vy >= ROCKET_LAUNCH_VY_MIN && prev_vy < ROCKET_LAUNCH_VY_MAX);
    let mut exploded = 0;
    for _ in 0..200 {
        events.clear();
        // Intensity 0 => spawn chance 0, so the only rocket is ours
        s.step(0.0, &mut events);
        if events.contains(&SimEvent::RocketExploded) {
            exploded += 1;
            // Detonation fires as soon as vy crosses the -1 threshold,
            // before the true zero-velocity apex
            assert!(prev_vy + ROCKET_GRAVITY >= ROCKET_APEX_VY);
            assert!(prev_vy + ROCKET_GRAVITY < 0.0);
            assert!(s.rockets().is_empty());
            break;
        }
        let r = &s.rockets()[0];
        assert!(r.vy > prev_vy, "gravity must increase vy every frame");
        assert!(r.vy < ROCKET_APEX_VY, "rocket past apex must have exploded");
        prev_vy = r.vy;
    }
    assert_eq!(exploded, 1);
}

#[test]
fn explosion_yield_matches_intensity_formula() {
    assert_eq!(explosion_yield(0.0), 50);
    assert_eq!(explosion_yield(0.5), 60);
    assert_eq!(explosion_yield(1.0), 70);
    assert_eq!(explosion_yield(3.0), 110);
}

#[test]
fn explosion_converts_rocket_into_spark_burst() {
    let mut s = make_sim(4);
    s.spawn_rocket();
    let mut events = SimEvents::new();
    for _ in 0..200 {
        events.clear();
        s.step(0.0, &mut events);
        if events.contains(&SimEvent::RocketExploded) {
            break;
        }
    }
    // Intensity 0 both suppresses extra spawns and fixes the yield at 50
    assert_eq!(s.particles().len(), explosion_yield(0.0));
    assert!(s.rockets().is_empty());
    for p in s.particles() {
        assert_eq!(p.kind, ParticleKind::Spark);
        // Sparks born at detonation take the same-frame gravity kick
        // before the step returns; undo it to recover the launch speed.
        let speed = Vec2::new(p.vel.x, p.vel.y - PARTICLE_GRAVITY).length();
        assert!(speed >= SPARK_SPEED_MIN && speed <= SPARK_SPEED_MAX + 1e-3);
        assert!(p.radius >= SPARK_RADIUS_MIN && p.radius < SPARK_RADIUS_MAX);
        assert!(p.decay >= SPARK_DECAY_MIN && p.decay < SPARK_DECAY_MAX);
    }
}

#[test]
fn dud_rocket_below_bottom_edge_is_removed_silently() {
    let mut s = make_sim(5);
    // A falling, already-below-threshold shell never detonates (the
    // exploded flag is set) and drops off the surface
    s.push_rocket(Rocket {
        pos: Vec2::new(100.0, 595.0),
        vy: 3.0,
        hue: 120.0,
        exploded: true,
    });
    let mut events = SimEvents::new();
    for _ in 0..10 {
        s.step(0.0, &mut events);
        if s.rockets().is_empty() {
            break;
        }
    }
    assert!(s.rockets().is_empty());
    assert!(events.is_empty(), "duds make no sound");
    assert!(s.particles().is_empty());
}

#[test]
fn medallions_stay_in_bounds_and_bounce_inward() {
    let mut s = make_sim(6);
    assert_eq!(s.medallions().len(), MEDALLION_COUNT);
    let mut events = SimEvents::new();
    for _ in 0..2000 {
        s.step(0.0, &mut events);
        for m in s.medallions() {
            assert!(m.pos.x >= 0.0 && m.pos.x <= s.width() - m.size);
            assert!(m.pos.y >= 0.0 && m.pos.y <= s.height() - m.size);
            // On contact the velocity must point back into the surface
            if m.pos.x == 0.0 {
                assert!(m.vel.x >= 0.0);
            }
            if m.pos.x == s.width() - m.size {
                assert!(m.vel.x <= 0.0);
            }
            if m.pos.y == 0.0 {
                assert!(m.vel.y >= 0.0);
            }
            if m.pos.y == s.height() - m.size {
                assert!(m.vel.y <= 0.0);
            }
        }
    }
}

#[test]
fn tiny_viewport_pins_oversized_medallions_in_bounds() {
    // 100x80 is smaller than the largest medallions, so some spans
    // degenerate to zero. Positions must stay clamped, never negative.
    let mut s = make_sim(11);
    s.resize(100.0, 80.0);
    let mut events = SimEvents::new();
    for _ in 0..600 {
        s.step(0.0, &mut events);
        for m in s.medallions() {
            let max_x = (100.0 - m.size).max(0.0);
            let max_y = (80.0 - m.size).max(0.0);
            assert!(m.pos.x >= 0.0 && m.pos.x <= max_x);
            assert!(m.pos.y >= 0.0 && m.pos.y <= max_y);
        }
    }
}

#[test]
fn resize_regenerates_full_pool_within_new_bounds() {
    let mut s = make_sim(7);
    let mut events = SimEvents::new();
    for _ in 0..60 {
        s.step(1.0, &mut events);
    }
    s.resize(400.0, 300.0);
    assert_eq!(s.medallions().len(), MEDALLION_COUNT);
    for m in s.medallions() {
        assert!(m.pos.x >= 0.0 && m.pos.x <= 400.0 - m.size);
        assert!(m.pos.y >= 0.0 && m.pos.y <= 300.0 - m.size);
    }
}

#[test]
fn reset_fires_activation_burst_and_clears_effects() {
    let mut s = make_sim(8);
    let mut events = SimEvents::new();
    for _ in 0..120 {
        s.step(3.0, &mut events);
    }
    s.reset();
    assert_eq!(s.particles().len(), ACTIVATION_BURST_COUNT);
    assert!(s.rockets().is_empty());
    assert_eq!(s.medallions().len(), MEDALLION_COUNT);
    for p in s.particles() {
        assert_eq!(p.pos, Vec2::new(400.0, 300.0 + ACTIVATION_BURST_Y_OFFSET));
    }
}

#[test]
fn launch_rate_over_ten_seconds_matches_spawn_policy() {
    // 10 simulated seconds at 60 fps, intensity 1.0 => expected
    // 600 * 0.05 = 30 launches; allow a wide statistical band.
    let mut s = make_sim(9);
    let mut events = SimEvents::new();
    let mut launches = 0;
    let mut audible = 0;
    for _ in 0..600 {
        events.clear();
        s.step(1.0, &mut events);
        for ev in &events {
            if let SimEvent::RocketLaunched { audible: a } = ev {
                launches += 1;
                if *a {
                    audible += 1;
                }
            }
        }
    }
    assert!(launches > 10 && launches < 60, "got {launches} launches");
    // Roughly half the launches carry the whistle
    assert!(audible > 0 && audible < launches);
}

#[test]
fn populations_respect_caps_under_extreme_intensity() {
    let mut s = make_sim(10);
    let mut events = SimEvents::new();
    for _ in 0..300 {
        events.clear();
        s.step(1000.0, &mut events);
        assert!(s.rockets().len() <= MAX_ROCKETS);
        assert!(s.particles().len() <= MAX_PARTICLES);
    }
    s.spawn_confetti_burst(10.0, 10.0, MAX_PARTICLES * 2);
    assert!(s.particles().len() <= MAX_PARTICLES);
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut a = make_sim(42);
    let mut b = make_sim(42);
    let mut ev_a = SimEvents::new();
    let mut ev_b = SimEvents::new();
    for _ in 0..300 {
        ev_a.clear();
        ev_b.clear();
        a.step(1.5, &mut ev_a);
        b.step(1.5, &mut ev_b);
        assert_eq!(ev_a, ev_b);
        assert_eq!(a.particles().len(), b.particles().len());
        assert_eq!(a.rockets().len(), b.rockets().len());
    }
}
