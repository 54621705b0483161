//! Terminal "audio": the bell character, rung for jump cues.

use dino_jockey::core::{Audio, SoundCue};
use std::io::{self, Write};

/// Rings the terminal bell at most once per frame.
#[derive(Debug, Default)]
pub struct TerminalBell {
    muted: bool,
    pending: bool,
}

impl TerminalBell {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            pending: false,
        }
    }

    /// Write the bell if a cue arrived since the last flush.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if std::mem::take(&mut self.pending) {
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

impl Audio for TerminalBell {
    fn play_one_shot(&mut self, cue: SoundCue) {
        if !self.muted && cue == SoundCue::Jump {
            self.pending = true;
        }
    }
}
