/// Mixer channel a sound is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AudioCategory {
    Foreground,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Sound {
    /// The shape moved one step.
    Move,
    /// The shape locked into the board.
    Solidify,
    /// A full row was cleared.
    Success,
    /// The menu cursor moved.
    MenuMove,
    /// A screen transition started.
    Transition,
    /// The shape destroyed explosive cells.
    Explosion,
}

/// Fire-and-forget sound output.
pub trait AudioSink {
    fn play(&mut self, category: AudioCategory, sound: Sound);
}

/// Discards every sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _category: AudioCategory, _sound: Sound) {}
}

/// Records played sounds in order.
impl AudioSink for Vec<(AudioCategory, Sound)> {
    fn play(&mut self, category: AudioCategory, sound: Sound) {
        self.push((category, sound));
    }
}
