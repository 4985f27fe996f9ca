//! Sound cues emitted by the simulation
//!
//! The core never touches an audio device. It records fire-and-forget
//! commands while ticking and the presentation layer replays them on its
//! own mixer through an [`AudioSink`].

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player fired a shell
    Shoot,
    /// Player shell destroyed an invader
    InvaderKilled,
    /// Enemy shell hit the player
    PlayerKilled,
    /// Looping engine hum of the bonus ship
    ShipLoop,
}

impl SoundCue {
    /// Whether the cue keeps playing until an explicit stop
    pub fn is_looping(&self) -> bool {
        matches!(self, SoundCue::ShipLoop)
    }
}

/// A queued audio request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCommand {
    Play(SoundCue),
    Stop(SoundCue),
}

/// Audio backend implemented by the presentation layer
pub trait AudioSink {
    /// Start a cue
    fn play(&mut self, cue: SoundCue);

    /// Stop a cue; no-op when it isn't playing
    fn stop(&mut self, cue: SoundCue);

    /// Dispatch a queued command
    fn apply(&mut self, command: SoundCommand) {
        match command {
            SoundCommand::Play(cue) => self.play(cue),
            SoundCommand::Stop(cue) => self.stop(cue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Mixer {
        playing: Vec<SoundCue>,
    }

    impl AudioSink for Mixer {
        fn play(&mut self, cue: SoundCue) {
            self.playing.push(cue);
        }

        fn stop(&mut self, cue: SoundCue) {
            self.playing.retain(|c| *c != cue);
        }
    }

    #[test]
    fn test_apply_dispatches() {
        let mut mixer = Mixer::default();
        mixer.apply(SoundCommand::Play(SoundCue::ShipLoop));
        mixer.apply(SoundCommand::Play(SoundCue::Shoot));
        assert_eq!(mixer.playing, vec![SoundCue::ShipLoop, SoundCue::Shoot]);

        mixer.apply(SoundCommand::Stop(SoundCue::ShipLoop));
        assert_eq!(mixer.playing, vec![SoundCue::Shoot]);
    }

    #[test]
    fn test_only_ship_loops() {
        assert!(SoundCue::ShipLoop.is_looping());
        assert!(!SoundCue::Shoot.is_looping());
        assert!(!SoundCue::InvaderKilled.is_looping());
        assert!(!SoundCue::PlayerKilled.is_looping());
    }
}
