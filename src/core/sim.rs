use super::constants::*;
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

/// Which update regime a particle follows. Confetti drifts up and falls
/// slowly; sparks fly radially and burn out fast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Confetti,
    Spark,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hue: f32,
    pub lightness: f32,
    pub radius: f32,
    pub alpha: f32,
    pub decay: f32,
    pub kind: ParticleKind,
}

#[derive(Clone, Debug)]
pub struct Rocket {
    pub pos: Vec2,
    pub vy: f32,
    pub hue: f32,
    pub exploded: bool,
}

#[derive(Clone, Debug)]
pub struct Medallion {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

/// Audible transitions produced while stepping a frame. The frontend maps
/// these onto one-shot synth effects in the same frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    RocketLaunched { audible: bool },
    RocketExploded,
}

pub type SimEvents = SmallVec<[SimEvent; 8]>;

/// Number of sparks a rocket detonation emits at a given intensity.
pub fn explosion_yield(intensity: f32) -> usize {
    (EXPLOSION_BASE_COUNT + intensity * EXPLOSION_INTENSITY_COUNT).floor() as usize
}

/// Pure per-frame state for the celebration overlay: confetti and spark
/// particles, ascending rockets, and the bouncing medallion pool. No
/// rendering and no audio; the frontend drives `step` once per animation
/// frame and draws the populations afterwards.
pub struct Simulation {
    particles: Vec<Particle>,
    rockets: Vec<Rocket>,
    medallions: Vec<Medallion>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl Simulation {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Deterministic constructor for tests.
    pub fn new_seeded(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f32, height: f32, rng: StdRng) -> Self {
        let mut sim = Self {
            particles: Vec::new(),
            rockets: Vec::new(),
            medallions: Vec::new(),
            width,
            height,
            rng,
        };
        sim.regen_medallions();
        sim
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn medallions(&self) -> &[Medallion] {
        &self.medallions
    }

    /// Update surface dimensions and rebuild the medallion pool from
    /// scratch so every medallion is inside the new bounds. Particles and
    /// rockets are left alone; they decay out on their own.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.regen_medallions();
    }

    /// Activation reset: clear effect populations, reseed medallions and
    /// fire the opening confetti burst slightly below screen centre.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.rockets.clear();
        self.regen_medallions();
        let x = self.width / 2.0;
        let y = self.height / 2.0 + ACTIVATION_BURST_Y_OFFSET;
        self.spawn_confetti_burst(x, y, ACTIVATION_BURST_COUNT);
    }

    fn regen_medallions(&mut self) {
        self.medallions.clear();
        for _ in 0..MEDALLION_COUNT {
            let size = self
                .rng
                .gen_range(MEDALLION_SIZE_MIN..MEDALLION_SIZE_MAX);
            let x = self.rng.gen::<f32>() * (self.width - size).max(0.0);
            let y = self.rng.gen::<f32>() * (self.height - size).max(0.0);
            self.medallions.push(Medallion {
                pos: Vec2::new(x, y),
                vel: Vec2::new(
                    (self.rng.gen::<f32>() - 0.5) * 2.0 * MEDALLION_SPEED,
                    (self.rng.gen::<f32>() - 0.5) * 2.0 * MEDALLION_SPEED,
                ),
                size,
                rotation: self.rng.gen_range(0.0..std::f32::consts::TAU),
                rotation_speed: (self.rng.gen::<f32>() - 0.5) * 2.0 * MEDALLION_SPIN,
            });
        }
    }

    pub fn spawn_confetti_burst(&mut self, x: f32, y: f32, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let p = Particle {
                pos: Vec2::new(x, y),
                vel: Vec2::new(
                    (self.rng.gen::<f32>() - 0.5) * 2.0 * CONFETTI_SPREAD_VX,
                    self.rng.gen_range(CONFETTI_BURST_VY_MIN..CONFETTI_BURST_VY_MAX),
                ),
                hue: self.rng.gen_range(0.0..360.0),
                lightness: 50.0,
                radius: self.rng.gen_range(CONFETTI_RADIUS_MIN..CONFETTI_RADIUS_MAX),
                alpha: 1.0,
                decay: CONFETTI_DECAY,
                kind: ParticleKind::Confetti,
            };
            self.particles.push(p);
        }
    }

    fn spawn_sparks(&mut self, origin: Vec2, hue: f32, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.gen_range(SPARK_SPEED_MIN..SPARK_SPEED_MAX);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
                hue,
                lightness: 60.0,
                radius: self.rng.gen_range(SPARK_RADIUS_MIN..SPARK_RADIUS_MAX),
                alpha: 1.0,
                decay: self.rng.gen_range(SPARK_DECAY_MIN..SPARK_DECAY_MAX),
                kind: ParticleKind::Spark,
            });
        }
    }

    pub fn spawn_rocket(&mut self) {
        if self.rockets.len() >= MAX_ROCKETS {
            return;
        }
        let x = self.rng.gen::<f32>() * self.width;
        self.rockets.push(Rocket {
            pos: Vec2::new(x, self.height),
            vy: self.rng.gen_range(ROCKET_LAUNCH_VY_MIN..ROCKET_LAUNCH_VY_MAX),
            hue: self.rng.gen_range(0.0..360.0),
            exploded: false,
        });
    }

    #[cfg(test)]
    pub fn push_rocket(&mut self, rocket: Rocket) {
        self.rockets.push(rocket);
    }

    /// Advance one frame. Order is fixed: medallions, rocket spawn, rockets
    /// (with apex detonation), particles. Emitted events belong to this
    /// frame and must be dispatched before the next step.
    pub fn step(&mut self, intensity: f32, events: &mut SimEvents) {
        self.step_medallions();
        self.maybe_spawn_rocket(intensity, events);
        self.step_rockets(intensity, events);
        self.step_particles();
    }

    fn step_medallions(&mut self) {
        let (w, h) = (self.width, self.height);
        for m in &mut self.medallions {
            m.pos += m.vel;
            m.rotation += m.rotation_speed;

            // Directed reflection; the target is clamped so a viewport
            // smaller than the medallion pins it at zero instead of
            // bouncing it into negative coordinates.
            let max_x = (w - m.size).max(0.0);
            let max_y = (h - m.size).max(0.0);
            if m.pos.x <= 0.0 {
                m.pos.x = 0.0;
                m.vel.x = m.vel.x.abs();
            } else if m.pos.x >= max_x {
                m.pos.x = max_x;
                m.vel.x = -m.vel.x.abs();
            }
            if m.pos.y <= 0.0 {
                m.pos.y = 0.0;
                m.vel.y = m.vel.y.abs();
            } else if m.pos.y >= max_y {
                m.pos.y = max_y;
                m.vel.y = -m.vel.y.abs();
            }
        }
    }

    fn maybe_spawn_rocket(&mut self, intensity: f32, events: &mut SimEvents) {
        let chance = SPAWN_CHANCE_PER_INTENSITY * intensity;
        if self.rng.gen::<f32>() < chance && self.rockets.len() < MAX_ROCKETS {
            self.spawn_rocket();
            let audible = self.rng.gen::<f32>() < LAUNCH_SOUND_CHANCE;
            events.push(SimEvent::RocketLaunched { audible });
        }
    }

    fn step_rockets(&mut self, intensity: f32, events: &mut SimEvents) {
        let mut i = 0;
        while i < self.rockets.len() {
            let (pos, hue, vy) = {
                let r = &mut self.rockets[i];
                r.pos.y += r.vy;
                r.vy += ROCKET_GRAVITY;
                (r.pos, r.hue, r.vy)
            };
            if vy >= ROCKET_APEX_VY && !self.rockets[i].exploded {
                self.rockets[i].exploded = true;
                self.rockets.swap_remove(i);
                events.push(SimEvent::RocketExploded);
                self.spawn_sparks(pos, hue, explosion_yield(intensity));
            } else if pos.y > self.height {
                // Dud: left the surface without detonating
                self.rockets.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn step_particles(&mut self) {
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.alpha -= p.decay;
            p.alpha > 0.0
        });
    }
}
