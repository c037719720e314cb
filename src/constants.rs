/// Audio and render tuning constants for the wasm frontend.
///
/// These express intended behavior (fade lengths, envelope times, filter
/// cutoffs) and keep magic numbers out of the code.

// Master gain smoothing time constant for volume/mute retargets (seconds)
pub const MASTER_GAIN_TAU_SEC: f64 = 0.1;
pub const DEFAULT_VOLUME: f32 = 0.5;

// Ambient drone: C major ninth spread low for warmth (C3 G3 B3 E4 G4)
pub const DRONE_FREQS_HZ: [f32; 5] = [130.81, 196.00, 246.94, 329.63, 392.00];
pub const DRONE_TARGET_GAIN: f32 = 0.03;
pub const DRONE_DETUNE_CENTS: f32 = 2.0; // detune is +/- this
pub const DRONE_FADE_IN_BASE_SEC: f64 = 3.0;
pub const DRONE_FADE_IN_STAGGER_SEC: f64 = 0.5;
pub const DRONE_LFO_FREQ_MIN_HZ: f32 = 0.1;
pub const DRONE_LFO_FREQ_MAX_HZ: f32 = 0.3;
pub const DRONE_LFO_DEPTH: f32 = 0.01;
pub const DRONE_FADE_OUT_SEC: f64 = 2.0;
pub const DRONE_STOP_AFTER_SEC: f64 = 2.1;
pub const DRONE_TEARDOWN_MS: i32 = 2200;

// Unwrap: highpassed noise slide plus a pitch-dropping pop
pub const UNWRAP_NOISE_SEC: f32 = 0.5;
pub const UNWRAP_NOISE_AMP: f32 = 0.5;
pub const UNWRAP_HIGHPASS_HZ: f32 = 800.0;
pub const UNWRAP_POP_START_HZ: f32 = 300.0;
pub const UNWRAP_POP_END_HZ: f32 = 50.0;

// Firework launch: rising whistle
pub const LAUNCH_START_HZ: f32 = 200.0;
pub const LAUNCH_END_HZ: f32 = 800.0;
pub const LAUNCH_DURATION_SEC: f64 = 0.4;
pub const LAUNCH_GAIN: f32 = 0.05;

// Explosion: lowpassed noise thump
pub const EXPLOSION_NOISE_SEC: f32 = 1.0;
pub const EXPLOSION_LOWPASS_HZ: f32 = 400.0;
pub const EXPLOSION_GAIN: f32 = 0.3;
pub const EXPLOSION_DECAY_SEC: f64 = 1.0;

// Celebration swell: pink-noise crowd cheer through an opening filter
pub const SWELL_NOISE_SEC: f32 = 4.0;
pub const SWELL_FILTER_START_HZ: f32 = 500.0;
pub const SWELL_FILTER_END_HZ: f32 = 3000.0;
pub const SWELL_FILTER_SWEEP_SEC: f64 = 2.0;
pub const SWELL_GAIN: f32 = 0.5;
pub const SWELL_RISE_SEC: f64 = 0.5;
pub const SWELL_DECAY_SEC: f64 = 4.0;

// Exponential ramps cannot reach zero; this is the conventional floor.
pub const EXP_RAMP_FLOOR: f32 = 0.01;

// Trail overlay painted over the previous frame instead of a clear
pub const TRAIL_FILL: &str = "rgba(15, 23, 42, 0.2)";
pub const ROCKET_RADIUS: f64 = 3.0;
pub const ROCKET_TRAIL_FILL: &str = "rgba(255, 255, 255, 0.3)";
pub const MEDALLION_RING_WIDTH: f64 = 3.0;
pub const MEDALLION_RING_STROKE: &str = "rgba(255, 255, 255, 0.8)";
