use anyhow::Result;
use bevy_ecs::prelude::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use fundsp::hacker32::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::config::audio::AudioConfig;
use crate::game::PowerupKind;

// Sound effects types that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Catch,
    Tap,
    Penalty,
    ShieldBlock,
    LifeUp,
    Powerup(PowerupKind),
    LevelUp,
    GameOver,
    Win,
    MenuMove,
}

// Command to control the audio thread
enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool), // true to start, false to stop
    SetVolume(f32),  // 0.0 to 1.0
}

// Global audio state
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    available: Arc<AtomicBool>,
    music_enabled: bool,
    sound_enabled: bool,
    volume: f32,
}

impl AudioState {
    pub fn new() -> Self {
        Self::from_config(&AudioConfig::default())
    }

    /// Starts the audio thread with the configured mixer settings.
    pub fn from_config(config: &AudioConfig) -> Self {
        let (sender, receiver) = bounded(64);
        let available = Arc::new(AtomicBool::new(true));

        let flag = Arc::clone(&available);
        thread::spawn(move || {
            if let Err(e) = run_audio_thread(&receiver) {
                flag.store(false, Ordering::Relaxed);
                eprintln!("Audio thread error: {e}");
            }
        });

        let state = Self {
            sender: Some(sender),
            available,
            music_enabled: config.music_enabled,
            sound_enabled: config.sound_enabled,
            volume: config.volume.clamp(0.0, 1.0),
        };
        state.send(AudioCommand::SetVolume(state.volume));
        state.send(AudioCommand::PlayMusic(state.music_enabled));
        state
    }

    fn send(&self, command: AudioCommand) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(command);
        }
    }

    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if self.sound_enabled {
            self.send(AudioCommand::PlaySound(effect));
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_audio_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    #[must_use]
    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        self.send(AudioCommand::PlayMusic(self.music_enabled));
    }

    #[must_use]
    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.send(AudioCommand::SetVolume(self.volume));
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new()
    }
}

fn run_audio_thread(receiver: &Receiver<AudioCommand>) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;

    let mut volume = 0.5f32;
    let mut music_enabled = true;

    // Channels feeding the realtime callback
    let (effect_sender, effect_receiver) = bounded::<SoundEffect>(64);
    let (mix_sender, mix_receiver) = bounded::<(bool, f32)>(16);

    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            run_audio_stream::<f32>(&device, &config.into(), effect_receiver, mix_receiver)?
        }
        cpal::SampleFormat::I16 => {
            run_audio_stream::<i16>(&device, &config.into(), effect_receiver, mix_receiver)?
        }
        cpal::SampleFormat::U16 => {
            run_audio_stream::<u16>(&device, &config.into(), effect_receiver, mix_receiver)?
        }
        _ => return Err(anyhow::anyhow!("Unsupported audio format")),
    };

    // Keep the thread alive and forward commands to the callback
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => {
                let _ = effect_sender.try_send(effect);
            }
            AudioCommand::PlayMusic(enabled) => {
                music_enabled = enabled;
                let _ = mix_sender.try_send((music_enabled, volume));
            }
            AudioCommand::SetVolume(new_volume) => {
                volume = new_volume;
                let _ = mix_sender.try_send((music_enabled, volume));
            }
        }
    }

    Ok(())
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    effect_receiver: Receiver<SoundEffect>,
    mix_receiver: Receiver<(bool, f32)>,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = config.sample_rate.0 as f32;
    let channels = config.channels as usize;
    let dt = 1.0 / sample_rate;

    let mut music_enabled = true;
    let mut volume = 0.5f32;

    let mut music = create_background_music();
    music.set_sample_rate(f64::from(sample_rate));

    // Active effect voices: unit, age in seconds, retirement age
    let mut voices: Vec<(Box<dyn AudioUnit>, f32, f32)> = Vec::new();

    let mut next_value = move || {
        while let Ok((new_music_enabled, new_volume)) = mix_receiver.try_recv() {
            music_enabled = new_music_enabled;
            volume = new_volume;
        }

        while let Ok(effect) = effect_receiver.try_recv() {
            let mut unit = create_sound_effect(effect);
            unit.set_sample_rate(f64::from(sample_rate));
            voices.push((unit, 0.0, effect_duration(effect)));
        }

        let mut left = 0.0f32;
        let mut right = 0.0f32;

        for (unit, age, _) in &mut voices {
            let (l, r) = unit.get_stereo();
            left += l;
            right += r;
            *age += dt;
        }
        voices.retain(|(_, age, max_age)| age < max_age);

        if music_enabled {
            let (l, r) = music.get_stereo();
            left += l;
            right += r;
        }

        left = (left * volume).clamp(-1.0, 1.0);
        right = (right * volume).clamp(-1.0, 1.0);
        (left, right)
    };

    let err_fn = |err| eprintln!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let sample = next_value();
                let left = T::from_sample(sample.0);
                let right = T::from_sample(sample.1);

                for (channel, out) in frame.iter_mut().enumerate() {
                    *out = if channel & 1 == 0 { left } else { right };
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(stream)
}

/// How long a voice for the effect is kept alive before retirement.
pub fn effect_duration(effect: SoundEffect) -> f32 {
    match effect {
        SoundEffect::Catch | SoundEffect::MenuMove => 0.15,
        SoundEffect::Tap | SoundEffect::ShieldBlock => 0.35,
        SoundEffect::Penalty => 0.5,
        SoundEffect::LifeUp => 0.6,
        SoundEffect::Powerup(_) => 0.8,
        SoundEffect::LevelUp => 1.2,
        SoundEffect::GameOver | SoundEffect::Win => 2.0,
    }
}

// Short soft tick when an item lands in the basket
fn create_catch_tick() -> Box<dyn AudioUnit> {
    let node = sine_hz(330.0) * envelope(|t| if t < 0.08 { 1.0 - t * 10.0 } else { 0.0 }) * 0.3;
    Box::new(node >> pan(0.0))
}

// Bright two-tone chime for the tap bonus
fn create_tap_chime() -> Box<dyn AudioUnit> {
    let node = (sine_hz(660.0) + sine_hz(880.0) * 0.5)
        * envelope(|t| if t < 0.3 { (0.3 - t) * 3.0 } else { 0.0 })
        * 0.3;
    Box::new(node >> pan(0.1))
}

// Thud with a noise burst for losing a life
fn create_penalty_thud() -> Box<dyn AudioUnit> {
    let noise_comp = noise() * envelope(|t| exp(-14.0 * t)) * 0.15;
    let tone_comp = sine_hz(70.0) * envelope(|t| exp(-8.0 * t)) * 0.4;
    Box::new((noise_comp + tone_comp) >> pan(-0.1))
}

// Metallic ping when the shield eats an obstacle
fn create_shield_block() -> Box<dyn AudioUnit> {
    let node = (sine_hz(1200.0) + sine_hz(1800.0) * 0.3) * envelope(|t| exp(-18.0 * t)) * 0.25;
    Box::new(node >> pan(0.0))
}

// Two-note rise for an extra life
fn create_life_up() -> Box<dyn AudioUnit> {
    let note = |freq: f32, t_start: f32, t_end: f32| {
        let env = envelope(move |t| if t >= t_start && t < t_end { 0.4 } else { 0.0 });
        sine_hz(freq) * env
    };
    Box::new((note(523.0, 0.0, 0.25) + note(784.0, 0.25, 0.55)) >> pan(0.0))
}

// Slow swell for the coffee slow-motion power-up
fn create_slow_motion_swell() -> Box<dyn AudioUnit> {
    let sweep = envelope(|t| lerp11(440.0, 220.0, (t * 1.5).min(1.0))) >> sine();
    let node = sweep * envelope(|t| if t < 0.3 { t * 2.0 } else { (0.8 - t).max(0.0) }) * 0.35;
    Box::new(node >> pan(0.0))
}

// Rising shimmer when the shield arms
fn create_shield_armed() -> Box<dyn AudioUnit> {
    let sweep = envelope(|t| lerp11(500.0, 1000.0, (t * 2.0).min(1.0))) >> sine();
    let node = sweep * envelope(|t| if t < 0.2 { t * 4.0 } else { (0.8 - t).max(0.0) }) * 0.3;
    Box::new(node >> pan(0.0))
}

// Ascending arpeggio for finishing a level
fn create_level_up() -> Box<dyn AudioUnit> {
    let note = |freq: f32, t_start: f32, t_end: f32| {
        let env = envelope(move |t| if t >= t_start && t < t_end { 1.0 } else { 0.0 });
        sine_hz(freq) * env
    };
    let node = (note(330.0, 0.0, 0.2)
        + note(392.0, 0.2, 0.4)
        + note(494.0, 0.4, 0.6)
        + note(659.0, 0.6, 1.0))
        * 0.4;
    Box::new(node >> pan(0.0))
}

// Descending pitch for game over
fn create_game_over() -> Box<dyn AudioUnit> {
    let sweep = envelope(|t| lerp11(600.0, 200.0, (t * 0.5).min(1.0))) >> sine();
    let node = sweep * envelope(|t| (2.0 - t).max(0.0) * 0.25) * 0.4;
    Box::new(node >> pan(0.0))
}

// Longer celebratory arpeggio with a dual sweep tail for winning the game
fn create_win_fanfare() -> Box<dyn AudioUnit> {
    let note = |freq: f32, t_start: f32, t_end: f32| {
        let env = envelope(move |t| if t >= t_start && t < t_end { 1.0 } else { 0.0 });
        sine_hz(freq) * env
    };
    let arpeggio = note(392.0, 0.0, 0.25)
        + note(494.0, 0.25, 0.5)
        + note(587.0, 0.5, 0.75)
        + note(784.0, 0.75, 1.2);
    let tail = (envelope(|t| lerp11(600.0, 1200.0, (t * 0.8).min(1.0))) >> sine())
        * envelope(|t| if t < 1.2 { 0.0 } else { (2.0 - t).max(0.0) });
    Box::new((arpeggio * 0.35 + tail * 0.25) >> pan(0.0))
}

// Small click for menu navigation
fn create_menu_move() -> Box<dyn AudioUnit> {
    let node = sine_hz(440.0) * envelope(|t| if t < 0.05 { 1.0 } else { 0.0 }) * 0.2;
    Box::new(node >> pan(0.0))
}

// Create a sound effect voice based on type
pub fn create_sound_effect(effect: SoundEffect) -> Box<dyn AudioUnit> {
    match effect {
        SoundEffect::Catch => create_catch_tick(),
        SoundEffect::Tap => create_tap_chime(),
        SoundEffect::Penalty => create_penalty_thud(),
        SoundEffect::ShieldBlock => create_shield_block(),
        SoundEffect::LifeUp => create_life_up(),
        SoundEffect::Powerup(PowerupKind::SlowMotion) => create_slow_motion_swell(),
        SoundEffect::Powerup(PowerupKind::Shield) => create_shield_armed(),
        SoundEffect::LevelUp => create_level_up(),
        SoundEffect::GameOver => create_game_over(),
        SoundEffect::Win => create_win_fanfare(),
        SoundEffect::MenuMove => create_menu_move(),
    }
}

// Gentle background loop: low drone, a wandering pentatonic melody and a
// soft washint-like pulse.
fn create_background_music() -> Box<dyn AudioUnit> {
    let bass = sine_hz(98.0) * 0.07;

    let melody = lfo(move |t: f32| {
        let notes = [196.0, 220.0, 262.0, 294.0, 330.0];
        let idx = ((t * 0.4) % 5.0) as usize;
        notes[idx]
    }) >> sine() * 0.08;

    let chord = sine_hz(196.0) * 0.03 + sine_hz(294.0) * 0.02 + sine_hz(392.0) * 0.02;

    let pulse = lfo(move |t: f32| {
        if (t * 1.5) % 1.0 < 0.08 { 0.04 } else { 0.0 }
    }) * sine_hz(523.0);

    let music = (bass + melody + chord + pulse) * 0.6;

    Box::new(music >> pan(0.0))
}
