// audio.rs - Web Audio engine: plucks and the rain bed
//
// Every call is fire-and-forget. Nothing in the frame loop waits on audio.

use js_sys::Promise;
use wasm_bindgen::JsValue;
use web_sys::{
    AudioBufferSourceNode, AudioContext, AudioContextState, BiquadFilterType, GainNode,
    OscillatorType,
};

use crate::sim::Cue;
use crate::sound::{
    ATTACK, DECAY, NOISE_CUTOFF_HZ, NOISE_DB, NOISE_SECONDS, PLUCK_DB, RELEASE, SILENCE,
    db_to_gain, pink_noise,
};

pub struct AudioEngine {
    ctx: AudioContext,
    master: GainNode,
    noise: Option<AudioBufferSourceNode>,
    rng: u32,
}

impl AudioEngine {
    /// Must run inside a user gesture or the browser keeps the context muted
    pub fn start(seed: u32) -> Result<Self, JsValue> {
        let ctx = AudioContext::new()?;

        let master = ctx.create_gain()?;
        master.gain().set_value(db_to_gain(PLUCK_DB));
        master.connect_with_audio_node(&ctx.destination())?;

        Ok(Self { ctx, master, noise: None, rng: seed.max(1) })
    }

    /// Ask a suspended context to run. The promise rejects if the browser
    /// refuses; `None` when the context is already running.
    pub fn resume(&self) -> Result<Option<Promise>, JsValue> {
        if self.ctx.state() == AudioContextState::Suspended {
            Ok(Some(self.ctx.resume()?))
        } else {
            Ok(None)
        }
    }

    /// Looped pink noise through a low-pass, started once
    pub fn start_ambient_noise(&mut self) -> Result<(), JsValue> {
        if self.noise.is_some() {
            return Ok(());
        }

        let rate = self.ctx.sample_rate();
        let len = (rate * NOISE_SECONDS) as u32;
        let buffer = self.ctx.create_buffer(1, len, rate)?;
        let mut samples = pink_noise(len as usize, &mut self.rng);
        buffer.copy_to_channel(&mut samples, 0)?;

        let source = self.ctx.create_buffer_source()?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);

        let lowpass = self.ctx.create_biquad_filter()?;
        lowpass.set_type(BiquadFilterType::Lowpass);
        lowpass.frequency().set_value(NOISE_CUTOFF_HZ);

        let level = self.ctx.create_gain()?;
        level.gain().set_value(db_to_gain(NOISE_DB));

        source.connect_with_audio_node(&lowpass)?;
        lowpass.connect_with_audio_node(&level)?;
        level.connect_with_audio_node(&self.ctx.destination())?;
        source.start()?;

        self.noise = Some(source);
        Ok(())
    }

    /// Short sine pluck: attack, decay to silence, gone after release
    pub fn trigger_pluck(&self, cue: &Cue) -> Result<(), JsValue> {
        let now = self.ctx.current_time();
        let peak = cue.velocity.clamp(0.0, 1.0).max(SILENCE);
        let held = now + ATTACK + cue.duration as f64;
        let end = held + DECAY.max(RELEASE);

        let osc = self.ctx.create_oscillator()?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(cue.note.frequency());

        let env = self.ctx.create_gain()?;
        let gain = env.gain();
        gain.set_value_at_time(SILENCE, now)?;
        gain.linear_ramp_to_value_at_time(peak, now + ATTACK)?;
        gain.exponential_ramp_to_value_at_time(SILENCE, now + ATTACK + DECAY)?;

        osc.connect_with_audio_node(&env)?;
        env.connect_with_audio_node(&self.master)?;
        osc.start_with_when(now)?;
        osc.stop_with_when(end)?;
        Ok(())
    }

    /// Stop the bed and release the device
    pub fn close(&mut self) {
        if let Some(noise) = self.noise.take() {
            let _ = noise.stop();
        }
        let _ = self.ctx.close();
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        if self.ctx.state() != AudioContextState::Closed {
            self.close();
        }
    }
}
