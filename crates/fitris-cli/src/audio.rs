use fitris_engine::{AudioCategory, AudioSink, Sound};

/// Terminal stand-in for a mixer: every sound becomes a log event.
#[derive(Debug, Default)]
pub struct LoggedAudio {
    played: usize,
}

impl LoggedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LoggedAudio {
    fn play(&mut self, category: AudioCategory, sound: Sound) {
        self.played += 1;
        tracing::debug!(%category, %sound, "play sound");
    }
}
