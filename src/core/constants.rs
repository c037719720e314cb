// Simulation tuning constants shared between the wasm frontend and the
// host-side tests.

// Per-frame downward acceleration applied to particles
pub const PARTICLE_GRAVITY: f32 = 0.1;
// Per-frame deceleration applied to a rising rocket
pub const ROCKET_GRAVITY: f32 = 0.15;
// A rocket detonates once its vertical velocity reaches this threshold.
// Deliberately asymmetric (fires slightly before the true apex) to match
// the original visual timing.
pub const ROCKET_APEX_VY: f32 = -1.0;

// Rocket launch speed range (upward, so negative)
pub const ROCKET_LAUNCH_VY_MIN: f32 = -15.0;
pub const ROCKET_LAUNCH_VY_MAX: f32 = -10.0;

// Confetti regime
pub const CONFETTI_SPREAD_VX: f32 = 4.0; // lateral velocity is +/- this
pub const CONFETTI_BURST_VY_MIN: f32 = -15.0;
pub const CONFETTI_BURST_VY_MAX: f32 = -5.0;
pub const CONFETTI_RADIUS_MIN: f32 = 4.0;
pub const CONFETTI_RADIUS_MAX: f32 = 12.0;
pub const CONFETTI_DECAY: f32 = 0.005;

// Spark regime (explosion debris)
pub const SPARK_SPEED_MIN: f32 = 2.0;
pub const SPARK_SPEED_MAX: f32 = 6.0;
pub const SPARK_RADIUS_MIN: f32 = 1.0;
pub const SPARK_RADIUS_MAX: f32 = 4.0;
pub const SPARK_DECAY_MIN: f32 = 0.015;
pub const SPARK_DECAY_MAX: f32 = 0.025;

// Explosion yield: floor(EXPLOSION_BASE_COUNT + intensity * EXPLOSION_INTENSITY_COUNT)
pub const EXPLOSION_BASE_COUNT: f32 = 50.0;
pub const EXPLOSION_INTENSITY_COUNT: f32 = 20.0;

// Rocket spawn probability per frame is SPAWN_CHANCE_PER_INTENSITY * intensity
pub const SPAWN_CHANCE_PER_INTENSITY: f32 = 0.05;
// Half of launches are audible
pub const LAUNCH_SOUND_CHANCE: f32 = 0.5;

// Activation confetti burst
pub const ACTIVATION_BURST_COUNT: usize = 150;
pub const ACTIVATION_BURST_Y_OFFSET: f32 = 100.0;

// Medallion pool
pub const MEDALLION_COUNT: usize = 15;
pub const MEDALLION_SIZE_MIN: f32 = 50.0;
pub const MEDALLION_SIZE_MAX: f32 = 120.0;
pub const MEDALLION_SPEED: f32 = 1.5; // velocity components are +/- this
pub const MEDALLION_SPIN: f32 = 0.01; // rotation speed is +/- this

// Population caps. Spawns beyond a cap are dropped; attrition from decay
// keeps steady-state populations far below these even at maximum intensity.
pub const MAX_ROCKETS: usize = 64;
pub const MAX_PARTICLES: usize = 4096;
