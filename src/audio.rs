use std::io::{self, Write};
use std::time::Duration;

/// Engine events that carry an advisory sound cue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AudioEvent {
    Start,
    FoodEaten,
    GameOver,
    Pause,
    Resume,
}

/// Suggested tone parameters for an audio event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beep {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub volume: f32,
}

impl AudioEvent {
    /// Returns the suggested tone for this event.
    #[must_use]
    pub fn beep(self) -> Beep {
        match self {
            Self::Start => Beep {
                frequency_hz: 660.0,
                duration: Duration::from_millis(60),
                volume: 0.08,
            },
            Self::FoodEaten => Beep {
                frequency_hz: 880.0,
                duration: Duration::from_millis(50),
                volume: 0.08,
            },
            Self::GameOver => Beep {
                frequency_hz: 220.0,
                duration: Duration::from_millis(120),
                volume: 0.14,
            },
            Self::Pause => Beep {
                frequency_hz: 330.0,
                duration: Duration::from_millis(40),
                volume: 0.04,
            },
            Self::Resume => Beep {
                frequency_hz: 660.0,
                duration: Duration::from_millis(40),
                volume: 0.06,
            },
        }
    }
}

/// Output port for advisory sound cues.
///
/// Implementations are fire-and-forget: they must not block or call back
/// into the session.
pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}

/// Rings the terminal bell for sound cues.
///
/// A terminal cannot voice frequency or volume, so every unmuted event maps
/// to BEL. The mute flag only silences output; it has no engine effect.
#[derive(Debug, Default)]
pub struct TerminalBell {
    muted: bool,
}

impl TerminalBell {
    /// Creates a bell sink, optionally muted from the start.
    #[must_use]
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    /// Flips the mute flag and returns the new value.
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Returns true while muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, _event: AudioEvent) {
        if self.muted {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

/// Discards every cue. Used for headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: AudioEvent) {}
}
