use serde::{Deserialize, Serialize};

// Mixer settings applied when the audio thread starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            volume: 0.5,
        }
    }
}
