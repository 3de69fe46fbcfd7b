use iced::widget::{button, row, text, text_input};
use iced::{Alignment, Element, Fill};

use crate::app::Message;
use crate::ui::theme;

/// The search input ID for focus management
pub const SEARCH_INPUT_ID: &str = "movey-search-input";

/// Build the search input with its clear button
pub fn view<'a>(placeholder: &str, value: &str) -> Element<'a, Message> {
    let input = text_input(placeholder, value)
        .on_input(Message::QueryChanged)
        .on_submit(Message::Submit)
        .id(SEARCH_INPUT_ID)
        .padding(12)
        .size(18)
        .width(Fill)
        .style(theme::search_input);

    let clear = button(text("Clear").size(14).color(theme::TEXT_SECONDARY))
        .on_press(Message::Clear)
        .style(button::text);

    row![input, clear]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
