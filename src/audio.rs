use crate::constants::*;
use crate::core::noise;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// One drone voice: tone, its envelope gain, and a sub-audio LFO that
/// breathes the gain for organic movement.
struct AmbientVoice {
    osc: web::OscillatorNode,
    gain: web::GainNode,
    lfo: web::OscillatorNode,
}

#[derive(Default)]
struct AmbientState {
    voices: Vec<AmbientVoice>,
    playing: bool,
    // JS timeout id for the pending fade-out cleanup, kept so a restart
    // during the fade window can cancel it deterministically.
    teardown_timer: Option<i32>,
}

/// Procedural sound engine: one lazily created `AudioContext` with a single
/// master gain, an idempotent ambient drone, and self-terminating one-shot
/// effects. Every operation degrades to a silent no-op if the audio
/// subsystem is unavailable; sound is a non-critical enhancement.
pub struct AudioEngine {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
    volume: f32,
    muted: bool,
    ambient: Rc<RefCell<AmbientState>>,
    rng: StdRng,
}

impl AudioEngine {
    pub fn new() -> Self {
        Self {
            ctx: None,
            master: None,
            volume: DEFAULT_VOLUME,
            muted: false,
            ambient: Rc::new(RefCell::new(AmbientState::default())),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create the context and master gain on first use. Later calls are
    /// no-ops; the context lives for the page's lifetime.
    pub fn ensure_context(&mut self) {
        if self.ctx.is_some() {
            return;
        }
        let ctx = match web::AudioContext::new() {
            Ok(c) => c,
            Err(e) => {
                log::error!("AudioContext error: {:?}", e);
                return;
            }
        };
        match web::GainNode::new(&ctx) {
            Ok(master) => {
                master
                    .gain()
                    .set_value(if self.muted { 0.0 } else { self.volume });
                _ = master.connect_with_audio_node(&ctx.destination());
                self.master = Some(master);
                self.ctx = Some(ctx);
            }
            Err(e) => log::error!("master GainNode error: {:?}", e),
        }
    }

    /// Cloned handles to the context and master gain, or `None` when the
    /// audio subsystem is unavailable.
    fn output(&mut self) -> Option<(web::AudioContext, web::GainNode)> {
        self.ensure_context();
        match (&self.ctx, &self.master) {
            (Some(c), Some(m)) => Some((c.clone(), m.clone())),
            _ => None,
        }
    }

    /// Lift autoplay suspension. Only effective from within a user-gesture
    /// handler; a rejection is logged and the caller is expected to retry
    /// on the next gesture.
    pub fn resume(&mut self) {
        let Some((ctx, _)) = self.output() else {
            return;
        };
        if ctx.state() != web::AudioContextState::Suspended {
            return;
        }
        match ctx.resume() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("audio resume rejected (no user gesture yet): {:?}", e);
                }
            }),
            Err(e) => log::warn!("audio resume failed: {:?}", e),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if !self.muted {
            self.retarget_master(volume);
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let target = if muted { 0.0 } else { self.volume };
        self.retarget_master(target);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    // Smooth retarget; a stepped gain change is an audible click.
    fn retarget_master(&mut self, target: f32) {
        if let (Some(ctx), Some(master)) = (&self.ctx, &self.master) {
            _ = master
                .gain()
                .set_target_at_time(target, ctx.current_time(), MASTER_GAIN_TAU_SEC);
        }
    }

    /// Start the background drone. No-op while already playing; calling
    /// during a pending fade-out cancels the fade's cleanup and builds a
    /// fresh voice set.
    pub fn start_ambient(&mut self) {
        let Some((ctx, output)) = self.output() else {
            return;
        };
        let ambient = self.ambient.clone();
        let mut amb = ambient.borrow_mut();
        if amb.playing && amb.teardown_timer.is_none() {
            return;
        }
        if let Some(id) = amb.teardown_timer.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
            // Old voices are already ramped to zero and scheduled to stop
            // on the audio clock; just drop the handles.
            amb.voices.clear();
        }
        let now = ctx.current_time();
        for (i, &freq) in DRONE_FREQS_HZ.iter().enumerate() {
            if let Some(voice) = self.build_drone_voice(&ctx, &output, i, freq, now) {
                amb.voices.push(voice);
            }
        }
        amb.playing = true;
    }

    fn build_drone_voice(
        &mut self,
        ctx: &web::AudioContext,
        output: &web::GainNode,
        index: usize,
        freq_hz: f32,
        now: f64,
    ) -> Option<AmbientVoice> {
        let osc = web::OscillatorNode::new(ctx).ok()?;
        let gain = web::GainNode::new(ctx).ok()?;
        let lfo = web::OscillatorNode::new(ctx).ok()?;
        let lfo_gain = web::GainNode::new(ctx).ok()?;

        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(freq_hz);
        // Slight random detune per voice for a chorus-like thickness
        osc.detune()
            .set_value(self.rng.gen_range(-DRONE_DETUNE_CENTS..DRONE_DETUNE_CENTS));

        // Voices enter progressively, not all at once
        let fade_end = now + DRONE_FADE_IN_BASE_SEC + DRONE_FADE_IN_STAGGER_SEC * index as f64;
        _ = gain.gain().set_value_at_time(0.0, now);
        _ = gain
            .gain()
            .linear_ramp_to_value_at_time(DRONE_TARGET_GAIN, fade_end);

        lfo.frequency()
            .set_value(self.rng.gen_range(DRONE_LFO_FREQ_MIN_HZ..DRONE_LFO_FREQ_MAX_HZ));
        lfo_gain.gain().set_value(DRONE_LFO_DEPTH);
        _ = lfo.connect_with_audio_node(&lfo_gain);
        _ = lfo_gain.connect_with_audio_param(&gain.gain());

        _ = osc.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(output);
        _ = lfo.start();
        _ = osc.start();

        Some(AmbientVoice { osc, gain, lfo })
    }

    /// Fade the drone out over two seconds and stop its oscillators just
    /// after. Bookkeeping is cleared by a cancellable timeout once the fade
    /// has fully elapsed. No-op when not playing or already stopping.
    pub fn stop_ambient(&mut self) {
        let Some((ctx, _)) = self.output() else {
            return;
        };
        let ambient = self.ambient.clone();
        let mut amb = ambient.borrow_mut();
        if !amb.playing || amb.teardown_timer.is_some() {
            return;
        }
        let now = ctx.current_time();
        for v in &amb.voices {
            _ = v.gain.gain().cancel_scheduled_values(now);
            _ = v
                .gain
                .gain()
                .linear_ramp_to_value_at_time(0.0, now + DRONE_FADE_OUT_SEC);
            _ = v.osc.stop_with_when(now + DRONE_STOP_AFTER_SEC);
            _ = v.lfo.stop_with_when(now + DRONE_STOP_AFTER_SEC);
        }
        let state = self.ambient.clone();
        let cleanup = Closure::wrap(Box::new(move || {
            let mut a = state.borrow_mut();
            a.voices.clear();
            a.playing = false;
            a.teardown_timer = None;
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            match w.set_timeout_with_callback_and_timeout_and_arguments_0(
                cleanup.as_ref().unchecked_ref(),
                DRONE_TEARDOWN_MS,
            ) {
                Ok(id) => {
                    amb.teardown_timer = Some(id);
                    cleanup.forget();
                }
                Err(e) => {
                    log::warn!("ambient teardown timer failed: {:?}", e);
                    amb.voices.clear();
                    amb.playing = false;
                }
            }
        } else {
            amb.voices.clear();
            amb.playing = false;
        }
    }

    pub fn ambient_playing(&self) -> bool {
        self.ambient.borrow().playing
    }

    // Fill a mono AudioBuffer with procedural noise.
    fn noise_buffer(
        &mut self,
        ctx: &web::AudioContext,
        seconds: f32,
        pink: bool,
        amplitude: f32,
    ) -> Option<web::AudioBuffer> {
        let sample_rate = ctx.sample_rate();
        let len = (sample_rate * seconds) as u32;
        let buffer = ctx.create_buffer(1, len, sample_rate).ok()?;
        let mut data = vec![0.0_f32; len as usize];
        if pink {
            noise::fill_pink(&mut data, &mut self.rng);
        } else {
            noise::fill_white(&mut data, &mut self.rng, amplitude);
        }
        _ = buffer.copy_to_channel(&mut data, 0);
        Some(buffer)
    }

    /// Gift-unwrap pop: a highpassed noise slide layered with a sine whose
    /// pitch drops 300 -> 50 Hz.
    pub fn play_unwrap(&mut self) {
        let Some((ctx, output)) = self.output() else {
            return;
        };
        let t = ctx.current_time();

        if let Some(buffer) = self.noise_buffer(&ctx, UNWRAP_NOISE_SEC, false, UNWRAP_NOISE_AMP) {
            if let (Ok(noise), Ok(filter), Ok(gain)) = (
                web::AudioBufferSourceNode::new(&ctx),
                web::BiquadFilterNode::new(&ctx),
                web::GainNode::new(&ctx),
            ) {
                noise.set_buffer(Some(&buffer));
                filter.set_type(web::BiquadFilterType::Highpass);
                filter.frequency().set_value(UNWRAP_HIGHPASS_HZ);
                _ = gain.gain().set_value_at_time(0.0, t);
                _ = gain.gain().linear_ramp_to_value_at_time(0.8, t + 0.1);
                _ = gain
                    .gain()
                    .exponential_ramp_to_value_at_time(EXP_RAMP_FLOOR, t + 0.4);
                _ = noise.connect_with_audio_node(&filter);
                _ = filter.connect_with_audio_node(&gain);
                _ = gain.connect_with_audio_node(&output);
                _ = noise.start();
            }
        }

        if let (Ok(osc), Ok(gain)) = (
            web::OscillatorNode::new(&ctx),
            web::GainNode::new(&ctx),
        ) {
            _ = osc.frequency().set_value_at_time(UNWRAP_POP_START_HZ, t + 0.1);
            _ = osc
                .frequency()
                .exponential_ramp_to_value_at_time(UNWRAP_POP_END_HZ, t + 0.3);
            _ = gain.gain().set_value_at_time(0.0, t + 0.1);
            _ = gain.gain().linear_ramp_to_value_at_time(0.8, t + 0.15);
            _ = gain
                .gain()
                .exponential_ramp_to_value_at_time(EXP_RAMP_FLOOR, t + 0.3);
            _ = osc.connect_with_audio_node(&gain);
            _ = gain.connect_with_audio_node(&output);
            _ = osc.start_with_when(t + 0.1);
            _ = osc.stop_with_when(t + 0.4);
        }
    }

    /// Rocket launch whistle: a quiet tone sweeping 200 -> 800 Hz.
    pub fn play_firework_launch(&mut self) {
        let Some((ctx, output)) = self.output() else {
            return;
        };
        let t = ctx.current_time();
        if let (Ok(osc), Ok(gain)) = (
            web::OscillatorNode::new(&ctx),
            web::GainNode::new(&ctx),
        ) {
            _ = osc.frequency().set_value_at_time(LAUNCH_START_HZ, t);
            _ = osc
                .frequency()
                .exponential_ramp_to_value_at_time(LAUNCH_END_HZ, t + LAUNCH_DURATION_SEC);
            _ = gain.gain().set_value_at_time(LAUNCH_GAIN, t);
            _ = gain
                .gain()
                .linear_ramp_to_value_at_time(0.0, t + LAUNCH_DURATION_SEC);
            _ = osc.connect_with_audio_node(&gain);
            _ = gain.connect_with_audio_node(&output);
            _ = osc.start();
            _ = osc.stop_with_when(t + LAUNCH_DURATION_SEC);
        }
    }

    /// Firework detonation: a lowpassed full-spectrum noise thump.
    pub fn play_explosion(&mut self) {
        let Some((ctx, output)) = self.output() else {
            return;
        };
        let t = ctx.current_time();
        let Some(buffer) = self.noise_buffer(&ctx, EXPLOSION_NOISE_SEC, false, 1.0) else {
            return;
        };
        if let (Ok(noise), Ok(filter), Ok(gain)) = (
            web::AudioBufferSourceNode::new(&ctx),
            web::BiquadFilterNode::new(&ctx),
            web::GainNode::new(&ctx),
        ) {
            noise.set_buffer(Some(&buffer));
            filter.set_type(web::BiquadFilterType::Lowpass);
            _ = filter.frequency().set_value_at_time(EXPLOSION_LOWPASS_HZ, t);
            _ = gain.gain().set_value_at_time(EXPLOSION_GAIN, t);
            _ = gain
                .gain()
                .exponential_ramp_to_value_at_time(EXP_RAMP_FLOOR, t + EXPLOSION_DECAY_SEC);
            _ = noise.connect_with_audio_node(&filter);
            _ = filter.connect_with_audio_node(&gain);
            _ = gain.connect_with_audio_node(&output);
            _ = noise.start();
        }
    }

    /// Crowd-cheer swell: four seconds of pink noise through a lowpass
    /// filter that opens from 500 Hz to 3 kHz as the cheer builds.
    pub fn play_celebration(&mut self) {
        let Some((ctx, output)) = self.output() else {
            return;
        };
        let t = ctx.current_time();
        let Some(buffer) = self.noise_buffer(&ctx, SWELL_NOISE_SEC, true, 1.0) else {
            return;
        };
        if let (Ok(noise), Ok(filter), Ok(gain)) = (
            web::AudioBufferSourceNode::new(&ctx),
            web::BiquadFilterNode::new(&ctx),
            web::GainNode::new(&ctx),
        ) {
            noise.set_buffer(Some(&buffer));
            filter.set_type(web::BiquadFilterType::Lowpass);
            _ = filter.frequency().set_value_at_time(SWELL_FILTER_START_HZ, t);
            _ = filter
                .frequency()
                .linear_ramp_to_value_at_time(SWELL_FILTER_END_HZ, t + SWELL_FILTER_SWEEP_SEC);
            _ = gain.gain().set_value_at_time(0.0, t);
            _ = gain
                .gain()
                .linear_ramp_to_value_at_time(SWELL_GAIN, t + SWELL_RISE_SEC);
            _ = gain
                .gain()
                .exponential_ramp_to_value_at_time(EXP_RAMP_FLOOR, t + SWELL_DECAY_SEC);
            _ = noise.connect_with_audio_node(&filter);
            _ = filter.connect_with_audio_node(&gain);
            _ = gain.connect_with_audio_node(&output);
            _ = noise.start();
        }
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
