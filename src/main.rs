use iced_snake::app::State;
use log::debug;

fn main() {
    std::env::set_var("RUST_LOG", "iced_snake=debug");
    env_logger::init();
    debug!("Debug on");
    let _ = iced::application("Snake", State::update, State::view)
        .window_size(iced::Size::new(420.0, 560.0))
        .subscription(State::subscription)
        .run();
}
