use iced::{Element, Subscription};

use crate::{
    view::View,
    views::snake_game_screen::{SnakeGameMessage, SnakeGameScreen},
};

pub struct State {
    screen: SnakeGameScreen,
}

#[derive(Clone, Debug)]
pub enum Message {
    Snake(SnakeGameMessage),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: SnakeGameScreen::new(),
        }
    }

    pub fn update(state: &mut State, message: Message) {
        // the screen never requests a transition, there is only one screen
        let _ = state.screen.update(message);
    }

    #[must_use]
    pub fn view(state: &State) -> Element<'_, Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
