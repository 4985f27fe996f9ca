//! Timed event generation and boundary culling
//!
//! Runs at the start of every tick, before collisions and movement.

use rand::Rng;

use super::entity::{Entity, ShellType};
use super::game::Game;
use super::rect::Rect;
use super::state::period_elapsed;
use crate::audio::{SoundCommand, SoundCue};

/// Advance the event counters and fire whatever is due this tick.
/// Step order matters: counters, enemy fire, ship spawn/departure, player
/// fire, reload.
pub(crate) fn generate_events(game: &mut Game) {
    let config = game.config;

    let control = &mut game.control;
    control.invader_shot_counter = control.invader_shot_counter.wrapping_add(1);
    if control.invader_ship_spawned {
        control.ship_flight_counter = control.ship_flight_counter.wrapping_add(1);
    } else {
        control.ship_spawn_counter = control.ship_spawn_counter.wrapping_add(1);
    }
    if control.player_reload {
        control.player_reload_counter = control.player_reload_counter.wrapping_add(1);
    }

    // Random enemy shot
    if period_elapsed(game.control.invader_shot_counter, config.invader_shot_period) {
        invader_shot(game);
    }

    // Bonus ship spawn, or send it away once its flight time is over
    if !game.control.invader_ship_spawned {
        if period_elapsed(game.control.ship_spawn_counter, config.ship_spawn_period) {
            spawn_invader_ship(game);
        }
    } else if period_elapsed(game.control.ship_flight_counter, config.ship_lifetime_period)
        && !game.invader_ship.is_departing()
    {
        log::debug!("Invader ship departing after {} ticks", game.control.ship_flight_counter);
        game.invader_ship.set_departing();
    }

    // Player shot
    if game.player.take_shot_request() {
        let rect = game.player.rect();
        game.sounds.push(SoundCommand::Play(SoundCue::Shoot));
        fire_shell(game, rect, ShellType::Player);
    }

    // Player reload
    if game.control.player_reload
        && period_elapsed(game.control.player_reload_counter, config.player_reload_period)
    {
        game.control.player_reload = false;
    }
}

/// A random visible invader fires
fn invader_shot(game: &mut Game) {
    let visible = game.enemies.iter().filter(|e| e.is_visible()).count();
    if visible == 0 {
        // The wave respawns in the culling pass of this tick
        log::debug!("No invader left to shoot");
        return;
    }

    let pick = game.rng.random_range(0..visible);
    let Some(invader) = game.enemies.iter().filter(|e| e.is_visible()).nth(pick) else {
        return;
    };
    let rect = invader.rect();
    log::trace!("Invader #{pick} of {visible} fires");
    fire_shell(game, rect, ShellType::Enemy);
}

fn spawn_invader_ship(game: &mut Game) {
    game.invader_ship.revert_position();
    game.invader_ship.set_visible();
    game.control.invader_ship_spawned = true;
    game.control.ship_spawn_counter = 0;
    game.control.ship_flight_counter = 0;
    game.sounds.push(SoundCommand::Play(SoundCue::ShipLoop));
    log::debug!("Invader ship spawned");
}

/// Fire a shell centred on `firer`, reusing the first hidden shell in the
/// pool or growing the pool by one. Returns the shell's pool index.
pub(crate) fn fire_shell(game: &mut Game, firer: Rect, owner: ShellType) -> usize {
    let size = game.settings.sizes.shell;
    let pos = firer.center() - size * 0.5;

    match game.bullets.iter().position(|s| !s.is_visible()) {
        Some(index) => {
            let shell = &mut game.bullets[index];
            shell.set_shell_type(owner);
            shell.set_position(pos);
            shell.set_visible();
            index
        }
        None => {
            game.bullets
                .push(Entity::shell(pos, size, game.config.shell_speed, owner));
            log::trace!("Shell pool grew to {}", game.bullets.len());
            game.bullets.len() - 1
        }
    }
}

/// Hide shells and the ship once they've left the field, and start a new
/// wave when the current one is wiped out
pub(crate) fn control_items_position(game: &mut Game) {
    let field = game.field;

    for shell in game.bullets.iter_mut().filter(|s| s.is_visible()) {
        if shell.rect().is_outside(&field) {
            shell.set_invisible();
        }
    }

    if game.invader_ship.is_visible() && game.invader_ship.rect().is_outside(&field) {
        game.invader_ship.set_invisible();
        game.control.invader_ship_spawned = false;
        game.sounds.push(SoundCommand::Stop(SoundCue::ShipLoop));
        log::debug!("Invader ship left the field");
    }

    if game.control.invaders_left == 0 {
        game.elements.wave += 1;
        game.spawn_invaders();
        log::info!("Wave {} incoming", game.elements.wave);
    }
}
