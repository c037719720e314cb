// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn physics_constants_are_within_reasonable_bounds() {
    assert!(PARTICLE_GRAVITY > 0.0);
    assert!(ROCKET_GRAVITY > 0.0);
    // The apex trigger is deliberately below zero (fires before the true apex)
    assert!(ROCKET_APEX_VY < 0.0);
    assert!(ROCKET_LAUNCH_VY_MIN < ROCKET_LAUNCH_VY_MAX);
    assert!(ROCKET_LAUNCH_VY_MAX < ROCKET_APEX_VY);

    assert!(CONFETTI_DECAY > 0.0 && CONFETTI_DECAY < 1.0);
    assert!(SPARK_DECAY_MIN > 0.0 && SPARK_DECAY_MIN < SPARK_DECAY_MAX);
    // Sparks burn out faster than confetti
    assert!(SPARK_DECAY_MIN > CONFETTI_DECAY);
    assert!(CONFETTI_RADIUS_MIN < CONFETTI_RADIUS_MAX);
    assert!(SPARK_RADIUS_MIN < SPARK_RADIUS_MAX);
    assert!(SPARK_SPEED_MIN < SPARK_SPEED_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn spawn_policy_stays_a_probability_at_ui_range() {
    // The UI exposes intensity up to 3.0; the per-frame chance must still
    // be a valid probability there.
    assert!(SPAWN_CHANCE_PER_INTENSITY * 3.0 <= 1.0);
    assert!(LAUNCH_SOUND_CHANCE >= 0.0 && LAUNCH_SOUND_CHANCE <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn population_caps_cover_expected_load() {
    assert!(MAX_ROCKETS > 0);
    assert!(MAX_PARTICLES > 0);
    // One maximum-intensity explosion plus the activation burst must fit
    let burst = EXPLOSION_BASE_COUNT + 3.0 * EXPLOSION_INTENSITY_COUNT;
    assert!((burst as usize) + ACTIVATION_BURST_COUNT < MAX_PARTICLES);
    assert!(MEDALLION_COUNT == 15);
    assert!(MEDALLION_SIZE_MIN < MEDALLION_SIZE_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambient_fade_times_are_ordered() {
    // Fade out completes before oscillators stop, which happens before
    // bookkeeping is cleared
    assert!(DRONE_FADE_OUT_SEC < DRONE_STOP_AFTER_SEC);
    assert!(DRONE_STOP_AFTER_SEC * 1000.0 < DRONE_TEARDOWN_MS as f64);
    assert!(DRONE_TARGET_GAIN > 0.0 && DRONE_TARGET_GAIN < 0.1);
    assert!(DRONE_LFO_FREQ_MIN_HZ < DRONE_LFO_FREQ_MAX_HZ);
    // LFO depth must not push a faded-in voice gain negative
    assert!(DRONE_LFO_DEPTH < DRONE_TARGET_GAIN);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn drone_chord_is_ascending_major_ninth() {
    for pair in DRONE_FREQS_HZ.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    // Root is C3, top is G4, spread just under two octaves
    assert!(DRONE_FREQS_HZ[4] / DRONE_FREQS_HZ[0] < 4.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn one_shot_envelopes_are_sane() {
    assert!(EXP_RAMP_FLOOR > 0.0, "exponential ramps cannot target zero");
    assert!(LAUNCH_START_HZ < LAUNCH_END_HZ);
    assert!(UNWRAP_POP_END_HZ < UNWRAP_POP_START_HZ);
    assert!(SWELL_FILTER_START_HZ < SWELL_FILTER_END_HZ);
    assert!(SWELL_RISE_SEC < SWELL_DECAY_SEC);
    assert!(SWELL_FILTER_SWEEP_SEC < SWELL_DECAY_SEC);
    assert!(EXPLOSION_GAIN > 0.0 && EXPLOSION_GAIN <= 1.0);
    assert!(LAUNCH_GAIN > 0.0 && LAUNCH_GAIN < EXPLOSION_GAIN);
}
