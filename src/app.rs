use std::sync::Arc;

use iced::widget::{column, container};
use iced::window;
use iced::{event, keyboard, Color, Element, Fill, Padding, Size, Subscription, Task, Theme};

use crate::autocomplete::{AutoComplete, AutoCompleteConfig, FetchOutcome, HideTimer, Key};
use crate::config::Config;
use crate::navigator::{BrowserNavigator, Navigator};
use crate::source::registry::RegistrySource;
use crate::source::SuggestionSource;
use crate::ui::{result_list, search_input, theme};

pub struct State {
    config: Config,
    search: AutoComplete,

    /// Current window ID
    window_id: Option<window::Id>,
}

#[derive(Debug, Clone)]
pub enum Message {
    WindowOpened(window::Id),
    WindowClosed(window::Id),
    /// Window gained (true) or lost (false) keyboard focus
    FocusChanged(bool),
    QueryChanged(String),
    Submit,
    Clear,
    SuggestionsFetched(FetchOutcome),
    SuggestionClicked(usize),
    RowHovered(Option<usize>),
    PointerOverDropdown(bool),
    HideElapsed(HideTimer),
    KeyEvent(keyboard::Event),
}

impl State {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        let source = Arc::new(RegistrySource::new(&config.registry));
        let navigator = Arc::new(BrowserNavigator::new(&config.registry.base_url));
        Self::with_collaborators(config, source, navigator)
    }

    /// Build the app around explicit collaborators
    pub fn with_collaborators(
        config: Config,
        source: Arc<dyn SuggestionSource>,
        navigator: Arc<dyn Navigator>,
    ) -> (Self, Task<Message>) {
        let search =
            AutoComplete::new(AutoCompleteConfig::new(source, navigator).with_settings(&config.search));

        let (_id, open_task) = window::open(window::Settings {
            size: Size::new(config.window.width, config.window.height),
            position: window::Position::Centered,
            resizable: false,
            exit_on_close_request: true,
            ..window::Settings::default()
        });

        let state = Self {
            config,
            search,
            window_id: None,
        };

        (state, open_task.map(Message::WindowOpened))
    }

    pub fn title(&self, _window: window::Id) -> String {
        String::from("Movey Search")
    }

    pub fn search(&self) -> &AutoComplete {
        &self.search
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => {
                self.window_id = Some(id);
                Task::batch([
                    window::gain_focus(id),
                    iced::widget::operation::focus(search_input::SEARCH_INPUT_ID),
                ])
            }
            Message::WindowClosed(id) => {
                if self.window_id == Some(id) {
                    tracing::info!("Search window closed, exiting");
                    self.window_id = None;
                    iced::exit()
                } else {
                    Task::none()
                }
            }
            Message::FocusChanged(true) => {
                self.search.on_focus_in();
                Task::none()
            }
            Message::FocusChanged(false) => {
                let timer = self.search.on_focus_out();
                Task::perform(timer.wait(), Message::HideElapsed)
            }
            Message::QueryChanged(query) => match self.search.on_text_changed(query) {
                Some(fetch) => {
                    tracing::debug!("Fetching suggestions for '{}'", fetch.query());
                    Task::perform(fetch.run(), Message::SuggestionsFetched)
                }
                None => Task::none(),
            },
            Message::Submit => {
                self.search.on_key_down(Key::Enter);
                Task::none()
            }
            Message::Clear => {
                self.search.clear();
                iced::widget::operation::focus(search_input::SEARCH_INPUT_ID)
            }
            Message::SuggestionsFetched(outcome) => {
                self.search.on_fetch_resolved(outcome);
                Task::none()
            }
            Message::SuggestionClicked(index) => {
                self.search.on_suggestion_clicked(index);
                Task::none()
            }
            Message::RowHovered(index) => {
                self.search.on_row_hovered(index);
                Task::none()
            }
            Message::PointerOverDropdown(over) => {
                self.search.set_pointer_over_dropdown(over);
                Task::none()
            }
            Message::HideElapsed(timer) => {
                self.search.on_hide_elapsed(timer);
                Task::none()
            }
            Message::KeyEvent(kb_event) => {
                if let Some(key) = key_from_event(&kb_event) {
                    let outcome = self.search.on_key_down(key);
                    tracing::debug!("{:?} -> {:?}", key, outcome);
                }
                Task::none()
            }
        }
    }

    pub fn view(&self, _window: window::Id) -> Element<'_, Message> {
        let input = search_input::view(self.search.placeholder(), self.search.input_text());
        let rows = self.search.rows();
        let results = result_list::view(&rows, self.config.search.max_visible);

        let content = column![input, results]
            .spacing(8)
            .padding(Padding::new(12.0))
            .height(Fill);

        container(content)
            .width(Fill)
            .height(Fill)
            .style(theme::main_container)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_events().map(Message::WindowClosed),
            event::listen_with(|event, status, _window| match event {
                iced::Event::Keyboard(kb_event) => {
                    if matches!(status, event::Status::Ignored) {
                        Some(Message::KeyEvent(kb_event))
                    } else {
                        // The input captures Escape; the dropdown still wants it
                        match &kb_event {
                            keyboard::Event::KeyPressed {
                                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                                ..
                            } => Some(Message::KeyEvent(kb_event)),
                            _ => None,
                        }
                    }
                }
                iced::Event::Window(window::Event::Focused) => Some(Message::FocusChanged(true)),
                iced::Event::Window(window::Event::Unfocused) => {
                    Some(Message::FocusChanged(false))
                }
                _ => None,
            }),
        ])
    }

    pub fn theme(&self, _window: window::Id) -> Theme {
        Theme::Dark
    }

    pub fn style(&self, _theme: &Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: theme::BACKGROUND,
            text_color: Color::WHITE,
        }
    }
}

/// Widget key for a keyboard event; releases and unrelated events map to None
pub fn key_from_event(event: &keyboard::Event) -> Option<Key> {
    let keyboard::Event::KeyPressed { key, .. } = event else {
        return None;
    };
    let key = match key {
        keyboard::Key::Named(keyboard::key::Named::ArrowUp) => Key::ArrowUp,
        keyboard::Key::Named(keyboard::key::Named::ArrowDown) => Key::ArrowDown,
        keyboard::Key::Named(keyboard::key::Named::Enter) => Key::Enter,
        keyboard::Key::Named(keyboard::key::Named::Escape) => Key::Escape,
        _ => Key::Other,
    };
    Some(key)
}
