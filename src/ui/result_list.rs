use iced::widget::{column, container, mouse_area, row, text, Column};
use iced::{mouse, Element, Fill, Padding};

use crate::app::Message;
use crate::autocomplete::{Row, RowContent, NO_MATCHES_LABEL};
use crate::source::Suggestion;
use crate::ui::theme;

/// First row to draw so the highlighted row stays in view
fn window_start(highlighted: Option<usize>, max_visible: usize) -> usize {
    highlighted
        .map(|i| (i + 1).saturating_sub(max_visible))
        .unwrap_or(0)
}

/// Build the suggestion dropdown. Renders nothing when there are no rows.
pub fn view<'a>(rows: &[Row<'a>], max_visible: usize) -> Element<'a, Message> {
    if rows.is_empty() {
        return column![].into();
    }

    let max_visible = max_visible.max(1);
    let highlighted = rows.iter().find(|r| r.highlighted).map(|r| r.index);
    let start = window_start(highlighted, max_visible);

    let mut list = Column::new().spacing(2);
    for item in rows.iter().skip(start).take(max_visible) {
        list = list.push(row_view(item));
    }

    let panel = container(list)
        .padding(Padding::new(4.0))
        .width(Fill)
        .style(theme::dropdown);

    mouse_area(panel)
        .on_enter(Message::PointerOverDropdown(true))
        .on_exit(Message::PointerOverDropdown(false))
        .into()
}

fn row_view<'a>(item: &Row<'a>) -> Element<'a, Message> {
    let suggestion = match item.content {
        RowContent::Suggestion(suggestion) => suggestion,
        RowContent::NoMatches => {
            // Non-interactive: no click, no hover, no pointer cursor
            return container(text(NO_MATCHES_LABEL).size(14).color(theme::TEXT_SECONDARY))
                .padding(Padding::from([8, 12]))
                .width(Fill)
                .style(theme::result_row)
                .into();
        }
    };

    let style = if item.highlighted {
        theme::result_row_highlighted as fn(&iced::Theme) -> container::Style
    } else if item.hovered {
        theme::result_row_hovered
    } else {
        theme::result_row
    };

    let row = container(suggestion_content(suggestion))
        .padding(Padding::from([6, 12]))
        .width(Fill)
        .style(style);

    mouse_area(row)
        .on_press(Message::SuggestionClicked(item.index))
        .on_enter(Message::RowHovered(Some(item.index)))
        .on_exit(Message::RowHovered(None))
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn suggestion_content<'a>(suggestion: &'a Suggestion) -> Element<'a, Message> {
    let mut title = row![text(&suggestion.name).size(16).color(theme::TEXT_PRIMARY)].spacing(8);
    if !suggestion.version.is_empty() {
        title = title.push(text(&suggestion.version).size(12).color(theme::TEXT_SECONDARY));
    }
    for metric in &suggestion.metrics {
        title = title.push(
            text(format!("{} {}", metric.value, metric.label))
                .size(12)
                .color(theme::TEXT_SECONDARY),
        );
    }

    if suggestion.description.is_empty() {
        return title.into();
    }

    column![
        title,
        text(&suggestion.description).size(12).color(theme::TEXT_SECONDARY)
    ]
    .spacing(2)
    .into()
}
