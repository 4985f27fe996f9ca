//! Space Invaders headless runner
//!
//! Plays a session with a simple autopilot and prints the final snapshot as
//! JSON. Set `RUST_LOG=debug` to follow events and sound cues.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use space_invaders::audio::{AudioSink, SoundCue};
use space_invaders::platform::{InputEvent, Key};
use space_invaders::{Game, GameSettings, GameStatus};

#[derive(Parser)]
#[command(name = "space-invaders")]
#[command(about = "Run a headless Space Invaders session driven by an autopilot")]
struct Args {
    /// JSON settings file; command line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in field units
    #[arg(long)]
    width: Option<f32>,

    /// Playfield height in field units
    #[arg(long)]
    height: Option<f32>,

    /// Ticks per second
    #[arg(long)]
    framerate: Option<u32>,

    /// RNG seed for enemy fire
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
}

impl Args {
    fn settings(&self) -> Result<GameSettings, space_invaders::SettingsError> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::load(path)?,
            None => GameSettings::default(),
        };
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(framerate) = self.framerate {
            settings.framerate = framerate;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        Ok(settings)
    }
}

/// Logs cues instead of playing them
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sound: play {cue:?}");
    }

    fn stop(&mut self, cue: SoundCue) {
        if cue.is_looping() {
            log::debug!("sound: stop {cue:?}");
        }
    }
}

/// Chases the lowest invader and fires whenever the gun is loaded
#[derive(Default)]
struct Autopilot {
    held: Option<Key>,
}

impl Autopilot {
    fn inputs(&mut self, game: &Game) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let player_x = game.player().center().x;
        let target = game
            .invaders()
            .iter()
            .filter(|e| e.is_visible())
            .max_by(|a, b| a.position().y.total_cmp(&b.position().y))
            .map(|e| e.center().x);

        let wanted = match target {
            Some(x) if x < player_x - game.config().player_speed => Some(Key::Left),
            Some(x) if x > player_x + game.config().player_speed => Some(Key::Right),
            _ => None,
        };
        if wanted != self.held {
            if let Some(key) = self.held.take() {
                events.push(InputEvent::KeyReleased(key));
            }
            if let Some(key) = wanted {
                events.push(InputEvent::KeyPressed(key));
                self.held = Some(key);
            }
        }

        if !game.control().player_reload {
            events.push(InputEvent::KeyPressed(Key::Fire));
            events.push(InputEvent::KeyReleased(Key::Fire));
        }
        events
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let settings = match args.settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut game = match Game::new(settings) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut audio = LogAudio;
    let mut pilot = Autopilot::default();

    // Fire on the welcome screen starts the session
    game.execute_event(InputEvent::KeyPressed(Key::Fire));
    game.execute_event(InputEvent::KeyReleased(Key::Fire));

    while game.ticks() < args.ticks && game.status() == GameStatus::Running {
        for event in pilot.inputs(&game) {
            game.execute_event(event);
        }
        game.game_loop();
        game.flush_sounds(&mut audio);
    }
    let snapshot = game.snapshot();
    game.execute_event(InputEvent::Closed);
    game.flush_sounds(&mut audio);

    log::info!(
        "Session ended after {} ticks: score {}, wave {}, {} lives left",
        game.ticks(),
        game.score(),
        game.wave(),
        game.player_lives()
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: failed to encode snapshot: {err}");
            ExitCode::FAILURE
        }
    }
}
