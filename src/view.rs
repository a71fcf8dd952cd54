//! The [`View`] trait for the MVVM architecture.

use iced::{Element, Subscription};

use crate::app::Message;

/// Trait containing methods for `View` modules in the MVVM architecture.
pub trait View {
    fn update(&mut self, message: Message) -> Option<Message>;

    fn view(&self) -> Element<'_, Message>;

    fn subscription(&self) -> Subscription<Message>;
}
