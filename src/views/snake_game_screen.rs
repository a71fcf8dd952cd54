use std::time::{Duration, Instant};

use iced::{
    keyboard::{self, Key},
    time,
    widget::{button, column, container, text, Column, Row},
    Border, Color, Element, Length, Subscription,
};

use crate::{
    app::Message,
    models::snake_game::Cell,
    view::View,
    view_model::ViewModel,
    view_models::snake_view_model::SnakeViewModel,
};

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    Key(Key),
    Timer(Instant),
    Reset,
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_model: SnakeViewModel::new(),
        }
    }
}

impl Default for SnakeGameScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let mut grid_view = Column::new();
        let cell_size = 20;

        let make_container = |color: Color| {
            container(text(" ").color(color)) // Empty text to preserve size
                .width(cell_size)
                .height(cell_size)
                .style(move |_: &_| container::Style {
                    border: Border {
                        color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                        width: 1.0,
                        ..Default::default()
                    },
                    background: Some(color.into()),
                    ..container::Style::default()
                })
        };

        for grid_row in self.view_model.get_board() {
            let mut row = Row::new();
            for entry in grid_row {
                let rectangle = match entry {
                    Cell::Empty => make_container(Color::WHITE),
                    Cell::Snake => make_container(Color::from_rgb(0.0, 1.0, 0.0)),
                    Cell::Food => make_container(Color::from_rgb(1.0, 0.0, 0.0)),
                };
                row = row.push(rectangle);
            }
            grid_view = grid_view.push(row);
        }

        let restart_button = button(text("Restart"))
            .on_press(Message::Snake(SnakeGameMessage::Reset))
            .width(80)
            .height(40);

        let mut content = column![
            text(format!("Score: {}", self.view_model.get_score())),
            grid_view,
            restart_button,
        ]
        .spacing(10)
        .align_x(iced::alignment::Horizontal::Center);

        if self.view_model.game_over() {
            content = content.push(text("Game Over! Press Enter to restart"));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let timer = time::every(Duration::from_millis(
            self.view_model.get_time_between_frames(),
        ))
        .map(SnakeGameMessage::Timer)
        .map(Message::Snake);
        let keyboard =
            keyboard::on_key_press(|key, _| Some(Message::Snake(SnakeGameMessage::Key(key))));
        Subscription::batch(vec![timer, keyboard])
    }
}
