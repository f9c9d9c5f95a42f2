//! Sound effects
//!
//! Procedurally generated with the Web Audio API - no sound files needed.
//! Playback failures are swallowed: sound never affects the game.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin picked up
    Coin,
    /// "?" block hit
    BlockHit,
    /// Level completed
    LevelUp,
    /// Fell out of the world
    LifeLost,
    GameOver,
    /// Last level completed
    Win,
}

impl SoundEffect {
    /// Effect announcing a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(Self::Jump),
            GameEvent::Collected { .. } => Some(Self::Coin),
            GameEvent::BlockHit { .. } => Some(Self::BlockHit),
            GameEvent::Revealed { .. } => None,
            GameEvent::LevelAdvanced { .. } => Some(Self::LevelUp),
            GameEvent::LifeLost { lives } if *lives > 0 => Some(Self::LifeLost),
            // The game-over jingle covers the last life
            GameEvent::LifeLost { .. } => None,
            GameEvent::GameOver => Some(Self::GameOver),
            GameEvent::Won { .. } => Some(Self::Win),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{AudioManager, BackgroundMusic};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.0 }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set effect volume (0.0 - 1.0), 0 mutes
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Coin => self.play_coin(ctx, vol),
                SoundEffect::BlockHit => self.play_block_hit(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
                SoundEffect::LifeLost => self.play_life_lost(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::Win => self.play_win(ctx, vol),
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

        /// Single note with an exponential fade
        fn note(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            start: f64,
            length: f64,
            vol: f32,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(vol, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + length)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + length + 0.02).ok();
        }

        /// Jump - quick upward square sweep
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(660.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Coin - two bright notes
        fn play_coin(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.note(ctx, 988.0, OscillatorType::Square, t, 0.07, vol * 0.3);
            self.note(ctx, 1319.0, OscillatorType::Square, t + 0.07, 0.2, vol * 0.3);
        }

        /// "?" block - soft thump
        fn play_block_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Level complete - rising arpeggio
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.09;
                self.note(ctx, freq, OscillatorType::Triangle, start, 0.15, vol * 0.35);
            }
        }

        /// Life lost - falling whistle
        fn play_life_lost(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(120.0, t + 0.5)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }

        /// Game over - slow descending minor line
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [392.0, 311.0, 262.0, 196.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.25;
                self.note(ctx, freq, OscillatorType::Sawtooth, start, 0.3, vol * 0.2);
            }
        }

        /// Win - fanfare
        fn play_win(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            let melody = [(523.0, 0.12), (523.0, 0.12), (523.0, 0.12), (698.0, 0.5)];
            let mut start = t;
            for (freq, length) in melody {
                self.note(ctx, freq, OscillatorType::Square, start, length, vol * 0.3);
                start += length + 0.03;
            }
        }
    }

    /// The page's looping `#bg-music` track
    pub struct BackgroundMusic {
        element: Option<HtmlAudioElement>,
        /// Shared handler for `play()` promise rejections
        on_blocked: Closure<dyn FnMut(JsValue)>,
    }

    impl BackgroundMusic {
        pub fn from_page() -> Self {
            let element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("bg-music"))
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
            if element.is_none() {
                log::warn!("No #bg-music element - background music disabled");
            }
            let on_blocked = Closure::<dyn FnMut(JsValue)>::new(|e: JsValue| {
                log::debug!("Music playback prevented: {:?}", e);
            });
            Self {
                element,
                on_blocked,
            }
        }

        /// Start or resume at `volume`; 0 pauses
        pub fn play(&self, volume: f32) {
            let Some(el) = &self.element else { return };
            if volume <= 0.0 {
                let _ = el.pause();
                return;
            }
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
            // Autoplay blocking rejects the promise
            if let Ok(promise) = el.play() {
                let _ = promise.catch(&self.on_blocked);
            }
        }

        pub fn pause(&self) {
            if let Some(el) = &self.element {
                let _ = el.pause();
            }
        }
    }
}
