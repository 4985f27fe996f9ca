//! Collision detection and response
//!
//! Plain AABB overlap tests, one pass per tick over the shell pool. No swept
//! collision: a shell faster than an entity is thick can tunnel through it.

use super::entity::ShellType;
use super::game::Game;
use super::rect::Rect;
use super::state::GameStatus;
use crate::audio::{SoundCommand, SoundCue};
use crate::consts::{INVADER_REWARD, INVADER_SHIP_REWARD};

/// Resolve every shell hit for this tick, in pool order
pub(crate) fn check_collision(game: &mut Game) {
    for index in 0..game.bullets.len() {
        let shell = &game.bullets[index];
        if !shell.is_visible() {
            continue;
        }
        let shell_rect = shell.rect();

        match shell.shell_type() {
            Some(ShellType::Enemy) => {
                if shell_rect.intersects(&game.player.rect()) {
                    handle_player_hit(game);
                }
            }
            Some(ShellType::Player) => {
                hit_invaders(game, index, &shell_rect);
                if game.invader_ship.is_visible() && shell_rect.intersects(&game.invader_ship.rect()) {
                    handle_ship_hit(game, index);
                }
            }
            None => {}
        }

        // Obstacles absorb shells of both owners, even a shell spent above
        let shell = &mut game.bullets[index];
        for obstacle in game.obstacles.iter_mut().filter(|o| o.is_visible()) {
            if shell_rect.intersects(&obstacle.rect()) {
                obstacle.set_invisible();
                shell.set_invisible();
            }
        }
    }
}

/// A player shell destroys every visible invader it overlaps; the scan stops
/// once the wave is empty
fn hit_invaders(game: &mut Game, index: usize, shell_rect: &Rect) {
    for invader in game.enemies.iter_mut() {
        if game.control.invaders_left == 0 {
            break;
        }
        if !invader.is_visible() || !shell_rect.intersects(&invader.rect()) {
            continue;
        }

        invader.set_invisible();
        game.bullets[index].set_invisible();
        game.control.invaders_left -= 1;
        game.elements.add_score(INVADER_REWARD);
        game.sounds.push(SoundCommand::Play(SoundCue::InvaderKilled));
    }
}

fn handle_ship_hit(game: &mut Game, index: usize) {
    game.bullets[index].set_invisible();
    game.invader_ship.set_invisible();
    game.control.invader_ship_spawned = false;
    game.elements.add_score(INVADER_SHIP_REWARD);
    game.sounds.push(SoundCommand::Stop(SoundCue::ShipLoop));
    log::debug!("Invader ship destroyed");
}

/// Wipe every shell, then take a life or end the game
pub(crate) fn handle_player_hit(game: &mut Game) {
    for shell in &mut game.bullets {
        shell.set_invisible();
    }

    if game.elements.player_lives > 0 {
        game.elements.player_lives -= 1;
        game.player.revert_position();
        game.control.invader_shot_counter = 0;
        game.sounds.push(SoundCommand::Play(SoundCue::PlayerKilled));
        log::info!("Player hit, {} lives left", game.elements.player_lives);
    } else {
        game.status = GameStatus::GameOver;
        if game.control.invader_ship_spawned {
            game.sounds.push(SoundCommand::Stop(SoundCue::ShipLoop));
        }
        log::info!("Game over, final score {}", game.elements.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameSettings;
    use crate::sim::entity::Entity;
    use crate::sim::events::fire_shell;
    use glam::Vec2;

    fn running_game() -> Game {
        let mut game = Game::new(GameSettings::default().with_seed(11)).unwrap();
        game.game_restart();
        game.sounds.clear();
        game
    }

    /// Fire a shell of `owner` centred on `target`
    fn shell_on(game: &mut Game, target: Rect, owner: ShellType) -> usize {
        fire_shell(game, target, owner)
    }

    #[test]
    fn test_player_shell_kills_invader() {
        let mut game = running_game();
        let target = game.enemies[3].rect();
        let shell = shell_on(&mut game, target, ShellType::Player);
        let before = game.control.invaders_left;

        check_collision(&mut game);
        assert!(!game.enemies[3].is_visible());
        assert!(!game.bullets[shell].is_visible());
        assert_eq!(game.control.invaders_left, before - 1);
        assert_eq!(game.elements.score, INVADER_REWARD);
        assert_eq!(game.sounds, vec![SoundCommand::Play(SoundCue::InvaderKilled)]);
    }

    #[test]
    fn test_enemy_shell_ignores_invaders() {
        let mut game = running_game();
        let target = game.enemies[0].rect();
        let shell = shell_on(&mut game, target, ShellType::Enemy);
        check_collision(&mut game);
        assert!(game.enemies[0].is_visible());
        assert!(game.bullets[shell].is_visible());
        assert_eq!(game.elements.score, 0);
    }

    #[test]
    fn test_player_shell_ignores_player() {
        let mut game = running_game();
        let target = game.player.rect();
        shell_on(&mut game, target, ShellType::Player);
        check_collision(&mut game);
        assert_eq!(game.elements.player_lives, game.settings.starting_lives);
    }

    #[test]
    fn test_shell_hits_every_overlapping_invader() {
        let mut game = running_game();
        // Stack two invaders on top of each other
        let pos = game.enemies[0].position();
        game.enemies[1].set_position(pos);
        let target = game.enemies[0].rect();
        let shell = shell_on(&mut game, target, ShellType::Player);

        check_collision(&mut game);
        assert!(!game.enemies[0].is_visible());
        assert!(!game.enemies[1].is_visible());
        assert!(!game.bullets[shell].is_visible());
        assert_eq!(game.control.invaders_left, 58);
        assert_eq!(game.elements.score, 2 * INVADER_REWARD);
        assert_eq!(game.sounds, vec![SoundCommand::Play(SoundCue::InvaderKilled); 2]);
    }

    #[test]
    fn test_invader_hit_still_breaks_cover() {
        let mut game = running_game();
        let pos = game.obstacles[0].position();
        game.enemies[0].set_position(pos);
        let target = game.obstacles[0].rect();
        let shell = shell_on(&mut game, target, ShellType::Player);

        check_collision(&mut game);
        assert!(!game.enemies[0].is_visible());
        assert!(!game.obstacles[0].is_visible());
        assert!(!game.bullets[shell].is_visible());
        assert_eq!(game.elements.score, INVADER_REWARD);
    }

    #[test]
    fn test_invader_and_ship_in_one_shot() {
        let mut game = running_game();
        game.invader_ship.revert_position();
        game.invader_ship.set_visible();
        game.control.invader_ship_spawned = true;
        let pos = game.invader_ship.position();
        game.enemies[0].set_position(pos);
        let target = game.enemies[0].rect();
        shell_on(&mut game, target, ShellType::Player);

        check_collision(&mut game);
        assert!(!game.enemies[0].is_visible());
        assert!(!game.invader_ship.is_visible());
        assert_eq!(game.elements.score, INVADER_REWARD + INVADER_SHIP_REWARD);
    }

    #[test]
    fn test_last_invader_stops_scan() {
        let mut game = running_game();
        for invader in game.enemies.iter_mut().skip(1) {
            invader.set_invisible();
        }
        game.control.invaders_left = 1;
        let target = game.enemies[0].rect();
        shell_on(&mut game, target, ShellType::Player);
        // A second shell on a hidden invader must not score
        let hidden = game.enemies[5].rect();
        shell_on(&mut game, hidden, ShellType::Player);

        check_collision(&mut game);
        assert_eq!(game.control.invaders_left, 0);
        assert_eq!(game.elements.score, INVADER_REWARD);
        assert!(game.enemies.iter().all(|e| !e.is_visible()));
    }

    #[test]
    fn test_ship_hit() {
        let mut game = running_game();
        game.invader_ship.revert_position();
        game.invader_ship.set_visible();
        game.control.invader_ship_spawned = true;
        let target = game.invader_ship.rect();
        let shell = shell_on(&mut game, target, ShellType::Player);

        check_collision(&mut game);
        assert!(!game.invader_ship.is_visible());
        assert!(!game.bullets[shell].is_visible());
        assert!(!game.control.invader_ship_spawned);
        assert_eq!(game.elements.score, INVADER_SHIP_REWARD);
        assert_eq!(game.sounds, vec![SoundCommand::Stop(SoundCue::ShipLoop)]);
    }

    #[test]
    fn test_obstacles_absorb_both_owners() {
        for owner in [ShellType::Player, ShellType::Enemy] {
            let mut game = running_game();
            let target = game.obstacles[7].rect();
            let shell = shell_on(&mut game, target, owner);

            check_collision(&mut game);
            assert!(!game.obstacles[7].is_visible(), "{owner:?}");
            assert!(!game.bullets[shell].is_visible(), "{owner:?}");
            assert_eq!(
                game.obstacles.iter().filter(|o| o.is_visible()).count(),
                game.obstacles.len() - 1
            );
        }
    }

    #[test]
    fn test_hidden_obstacle_lets_shell_through() {
        let mut game = running_game();
        game.obstacles[7].set_invisible();
        let target = game.obstacles[7].rect();
        let shell = shell_on(&mut game, target, ShellType::Enemy);
        check_collision(&mut game);
        assert!(game.bullets[shell].is_visible());
    }

    #[test]
    fn test_player_hit_costs_a_life() {
        let mut game = running_game();
        game.player.move_by(Vec2::new(200.0, 0.0));
        game.player.set_motion_vector(Vec2::new(600.0, 0.0));
        game.control.invader_shot_counter = 42;
        let stray = Rect::new(Vec2::new(500.0, 500.0), Vec2::ONE);
        let other = shell_on(&mut game, stray, ShellType::Enemy);
        let target = game.player.rect();
        shell_on(&mut game, target, ShellType::Enemy);

        check_collision(&mut game);
        assert_eq!(game.elements.player_lives, game.settings.starting_lives - 1);
        assert!(game.bullets.iter().all(|s| !s.is_visible()));
        assert!(!game.bullets[other].is_visible());
        assert_eq!(game.player.position(), game.player.default_position());
        assert_eq!(game.player.motion_vector(), Some(game.player.default_position()));
        assert_eq!(game.control.invader_shot_counter, 0);
        assert_eq!(game.status, GameStatus::Running);
        assert_eq!(game.sounds, vec![SoundCommand::Play(SoundCue::PlayerKilled)]);
    }

    #[test]
    fn test_hit_at_zero_lives_is_game_over() {
        let mut game = running_game();
        game.elements.player_lives = 0;
        game.control.invader_ship_spawned = true;
        let target = game.player.rect();
        shell_on(&mut game, target, ShellType::Enemy);

        check_collision(&mut game);
        assert_eq!(game.elements.player_lives, 0);
        assert_eq!(game.status, GameStatus::GameOver);
        assert_eq!(game.sounds, vec![SoundCommand::Stop(SoundCue::ShipLoop)]);
    }

    #[test]
    fn test_invisible_shells_never_collide() {
        let mut game = running_game();
        let target = game.enemies[0].rect();
        game.bullets[0] = Entity::shell(target.pos, Vec2::new(2.0, 10.0), 1.0, ShellType::Player);
        game.bullets[0].set_invisible();
        check_collision(&mut game);
        assert!(game.enemies[0].is_visible());
    }
}
