//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! One-shot cues go through [`AudioManager`]; the looping engine rumble is
//! an explicit [`EngineLoop`] controller with start/pause/resume/stop, so
//! no looping handle hides in global state.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Confirm/restart accepted on a menu screen
    MenuClick,
    /// An obstacle made it past the player
    Pass,
    /// Player hit an obstacle
    Crash,
}

/// Audio manager for one-shot cues
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute one-shot cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Hand out an engine-loop controller sharing this manager's context
    pub fn engine_loop(&self, volume: f32) -> EngineLoop {
        EngineLoop::new(self.ctx.clone(), volume)
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::MenuClick => self.play_menu_click(ctx, vol),
            SoundEffect::Pass => self.play_pass(ctx, vol),
            SoundEffect::Crash => self.play_crash(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Menu click - short bright blip
    fn play_menu_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(800.0, t).ok();
        osc.frequency().set_value_at_time(1200.0, t + 0.03).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Pass - rising whoosh as a car goes by
    fn play_pass(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Crash - heavy impact with a high crack on top
    fn play_crash(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Falling sawtooth body
        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.7, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        // Glass/metal crack
        if let Some((osc, gain)) = self.create_osc(ctx, 2500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(2500.0, t).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.03).ok();
            osc.frequency().set_value_at_time(2200.0, t + 0.06).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        // Bass thump
        if let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }
}

/// Looping ambient engine rumble with explicit lifecycle control
pub struct EngineLoop {
    ctx: Option<AudioContext>,
    nodes: Option<(OscillatorNode, OscillatorNode, GainNode)>,
    volume: f32,
    paused: bool,
}

impl EngineLoop {
    fn new(ctx: Option<AudioContext>, volume: f32) -> Self {
        Self {
            ctx,
            nodes: None,
            volume: volume.clamp(0.0, 1.0),
            paused: false,
        }
    }

    /// Start the loop from scratch, replacing any previous one
    pub fn start(&mut self) {
        self.stop();
        self.paused = false;

        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Ok(gain) = ctx.create_gain() else { return };
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        gain.gain().set_value(self.volume);

        // Two detuned oscillators give the rumble some body
        let make_osc = |freq: f32, osc_type: OscillatorType| -> Option<OscillatorNode> {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            osc.start().ok()?;
            Some(osc)
        };

        let Some(low) = make_osc(55.0, OscillatorType::Sawtooth) else {
            return;
        };
        let Some(high) = make_osc(111.0, OscillatorType::Sine) else {
            low.stop().ok();
            return;
        };
        self.nodes = Some((low, high, gain));
    }

    /// Silence the loop without tearing it down
    pub fn pause(&mut self) {
        if let Some((_, _, gain)) = &self.nodes {
            gain.gain().set_value(0.0);
        }
        self.paused = true;
    }

    /// Bring a paused loop back
    pub fn resume(&mut self) {
        if let Some((_, _, gain)) = &self.nodes {
            gain.gain().set_value(self.volume);
        }
        self.paused = false;
    }

    /// Tear the loop down completely
    pub fn stop(&mut self) {
        if let Some((low, high, gain)) = self.nodes.take() {
            low.stop().ok();
            high.stop().ok();
            let _ = gain.disconnect();
        }
    }

    /// Update the loop volume (applies immediately unless paused)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        if !self.paused {
            if let Some((_, _, gain)) = &self.nodes {
                gain.gain().set_value(self.volume);
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
