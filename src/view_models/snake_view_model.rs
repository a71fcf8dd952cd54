//! View model bridging keyboard/timer events to the snake game model.

use iced::keyboard::{key::Named, Key};
use log::debug;

use crate::{
    app::Message,
    models::snake_game::{Cell, Heading, SnakeGame, MILLIS_BETWEEN_FRAMES},
    view_model::ViewModel,
    views::snake_game_screen::SnakeGameMessage,
};

/// Owns the [`SnakeGame`] and serializes every mutation of it.
///
/// The `moving` flag guards against overlapping timer firings: a tick only
/// runs while the previous one has fully committed, so the game state a tick
/// reads is never mid-mutation.
#[derive(Debug)]
pub struct SnakeViewModel {
    game: SnakeGame,
    moving: bool,
}

impl SnakeViewModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            game: SnakeGame::new(),
            moving: true,
        }
    }

    fn handle_key(&mut self, key: &Key) {
        let heading = match key {
            Key::Named(Named::ArrowUp) => Some(Heading::Up),
            Key::Named(Named::ArrowDown) => Some(Heading::Down),
            Key::Named(Named::ArrowLeft) => Some(Heading::Left),
            Key::Named(Named::ArrowRight) => Some(Heading::Right),
            Key::Named(Named::Enter) => {
                self.game.restart();
                None
            }
            _ => None,
        };
        if let Some(heading) = heading {
            self.game.set_heading(heading);
        }
    }

    fn handle_timer(&mut self) {
        if !self.moving {
            debug!("Timer fired while a tick was still in flight. Skipping");
            return;
        }
        self.moving = false;
        self.game.tick();
        self.moving = true;
    }

    #[must_use]
    pub fn get_board(&self) -> Vec<Vec<Cell>> {
        self.game.board()
    }

    #[must_use]
    pub fn get_score(&self) -> u32 {
        self.game.get_score()
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[must_use]
    pub fn get_time_between_frames(&self) -> u64 {
        MILLIS_BETWEEN_FRAMES
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Snake(snake_message) = message;
        match snake_message {
            SnakeGameMessage::Key(key) => self.handle_key(&key),
            SnakeGameMessage::Timer(_) => self.handle_timer(),
            SnakeGameMessage::Reset => {
                debug!("Reset requested");
                self.game.restart();
            }
        }
        None
    }
}

impl Default for SnakeViewModel {
    fn default() -> Self {
        Self::new()
    }
}
