use iced::widget::{container, text_input};
use iced::{Border, Color, Shadow, Theme};

/// Registry navy, the search bar backdrop of the web header
pub const BACKGROUND: Color = Color {
    r: 0.008,
    g: 0.078,
    b: 0.227,
    a: 0.96,
};

/// Lighter surface for the input and the dropdown
const SURFACE: Color = Color {
    r: 0.09,
    g: 0.15,
    b: 0.3,
    a: 1.0,
};

/// Accent color for the highlighted row and focused input
const ACCENT: Color = Color {
    r: 0.27,
    g: 0.62,
    b: 0.95,
    a: 1.0,
};

pub const TEXT_PRIMARY: Color = Color {
    r: 0.93,
    g: 0.94,
    b: 0.97,
    a: 1.0,
};

pub const TEXT_SECONDARY: Color = Color {
    r: 0.58,
    g: 0.63,
    b: 0.73,
    a: 1.0,
};

/// Style for the main container wrapping the whole window
pub fn main_container(theme: &Theme) -> container::Style {
    let _ = theme;
    container::Style {
        background: Some(BACKGROUND.into()),
        text_color: Some(TEXT_PRIMARY),
        ..container::Style::default()
    }
}

pub fn search_input(theme: &Theme, status: text_input::Status) -> text_input::Style {
    let _ = theme;
    let focused = matches!(status, text_input::Status::Focused { .. });
    text_input::Style {
        background: SURFACE.into(),
        border: Border {
            color: if focused { ACCENT } else { Color::TRANSPARENT },
            width: if focused { 2.0 } else { 0.0 },
            radius: 8.0.into(),
        },
        icon: TEXT_SECONDARY,
        placeholder: TEXT_SECONDARY,
        value: TEXT_PRIMARY,
        selection: Color { a: 0.3, ..ACCENT },
    }
}

/// The dropdown panel under the input
pub fn dropdown(theme: &Theme) -> container::Style {
    let _ = theme;
    container::Style {
        background: Some(SURFACE.into()),
        border: Border {
            color: Color {
                a: 0.4,
                ..ACCENT
            },
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::BLACK,
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
        text_color: Some(TEXT_PRIMARY),
        ..container::Style::default()
    }
}

pub fn result_row(theme: &Theme) -> container::Style {
    let _ = theme;
    container::Style {
        background: None,
        text_color: Some(TEXT_PRIMARY),
        ..container::Style::default()
    }
}

/// Row under the mouse pointer
pub fn result_row_hovered(theme: &Theme) -> container::Style {
    let _ = theme;
    container::Style {
        background: Some(Color { a: 0.1, ..ACCENT }.into()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 6.0.into(),
        },
        text_color: Some(TEXT_PRIMARY),
        ..container::Style::default()
    }
}

/// Row carrying the keyboard highlight
pub fn result_row_highlighted(theme: &Theme) -> container::Style {
    let _ = theme;
    container::Style {
        background: Some(Color { a: 0.25, ..ACCENT }.into()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 6.0.into(),
        },
        text_color: Some(TEXT_PRIMARY),
        ..container::Style::default()
    }
}
