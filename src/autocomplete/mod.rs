//! Headless suggestive search input.
//!
//! [`AutoComplete`] owns the query, the dropdown contents and the keyboard
//! highlight. The UI layer feeds it events and runs the futures it hands
//! back ([`PendingFetch`], [`HideTimer`]); selections go straight to the
//! injected [`Navigator`].

mod suggestions;
#[cfg(test)]
pub(crate) mod testing;

pub use suggestions::{Row, RowContent, Suggestions, NO_MATCHES_LABEL};

use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::navigator::Navigator;
use crate::source::{FetchError, FetchFuture, Suggestion, SuggestionSource};

pub const DEFAULT_MIN_QUERY_LEN: usize = 3;
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(50);

/// Everything a widget needs at construction
pub struct AutoCompleteConfig {
    pub source: Arc<dyn SuggestionSource>,
    pub navigator: Arc<dyn Navigator>,
    pub placeholder: String,
    /// Empty results for queries at least this long show "No matches found"
    pub min_query_len: usize,
    /// Delay between focus-out and hiding the dropdown
    pub hide_delay: Duration,
}

impl AutoCompleteConfig {
    pub fn new(source: Arc<dyn SuggestionSource>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            source,
            navigator,
            placeholder: "Enter a search term".to_string(),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            hide_delay: DEFAULT_HIDE_DELAY,
        }
    }

    pub fn with_settings(mut self, settings: &SearchConfig) -> Self {
        self.placeholder = settings.placeholder.clone();
        self.min_query_len = settings.min_query_len;
        self.hide_delay = Duration::from_millis(settings.hide_delay_ms);
        self
    }
}

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key changed widget state
    Handled,
    /// The key finished the search and a navigation was requested
    Navigated,
    /// The key is one the widget owns but it had nothing to do
    Ignored,
    /// Not a widget key; the input should process it normally
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dropdown hidden
    Idle,
    /// Suggestions shown, nothing highlighted
    Listing,
    /// Suggestions shown, one highlighted
    Navigating,
    /// Only the "No matches found" row is shown
    NoMatches,
}

/// A fetch issued for one text change. Only the newest one may apply.
pub struct PendingFetch {
    generation: u64,
    query: String,
    future: FetchFuture,
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn run(self) -> FetchOutcome {
        let result = self.future.await.map_err(Arc::new);
        FetchOutcome {
            generation: self.generation,
            query: self.query,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub generation: u64,
    pub query: String,
    pub result: Result<Vec<Suggestion>, Arc<FetchError>>,
}

/// A delayed hide armed by focus-out. Superseded by any later focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideTimer {
    token: u64,
    delay: Duration,
}

impl HideTimer {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(self) -> Self {
        tokio::time::sleep(self.delay).await;
        self
    }
}

pub struct AutoComplete {
    source: Arc<dyn SuggestionSource>,
    navigator: Arc<dyn Navigator>,
    placeholder: String,
    min_query_len: usize,
    hide_delay: Duration,

    query: String,
    suggestions: Suggestions,
    /// Keyboard highlight; `None` shows the raw query
    highlighted: Option<usize>,
    /// Pointer hover, styling only
    hovered: Option<usize>,
    visible: bool,

    generation: u64,
    hide_token: u64,
    pointer_over_dropdown: bool,
}

impl AutoComplete {
    pub fn new(config: AutoCompleteConfig) -> Self {
        tracing::debug!(
            "AutoComplete over '{}' source, min_query_len={}",
            config.source.name(),
            config.min_query_len
        );
        Self {
            source: config.source,
            navigator: config.navigator,
            placeholder: config.placeholder,
            min_query_len: config.min_query_len,
            hide_delay: config.hide_delay,
            query: String::new(),
            suggestions: Suggestions::Empty,
            highlighted: None,
            hovered: None,
            visible: false,
            generation: 0,
            hide_token: 0,
            pointer_over_dropdown: false,
        }
    }

    // ---- Accessors ----

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Text the input displays: the highlighted name, else the typed query
    pub fn input_text(&self) -> &str {
        match self.highlighted.and_then(|i| self.suggestions.get(i)) {
            Some(suggestion) => &suggestion.name,
            None => &self.query,
        }
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_dropdown_visible(&self) -> bool {
        self.visible && !self.suggestions.is_empty()
    }

    pub fn phase(&self) -> Phase {
        if !self.is_dropdown_visible() {
            return Phase::Idle;
        }
        match (&self.suggestions, self.highlighted) {
            (Suggestions::NoMatches, _) => Phase::NoMatches,
            (Suggestions::Listed(_), Some(_)) => Phase::Navigating,
            (Suggestions::Listed(_), None) => Phase::Listing,
            (Suggestions::Empty, _) => Phase::Idle,
        }
    }

    /// Dropdown rows, empty while the dropdown is hidden
    pub fn rows(&self) -> Vec<Row<'_>> {
        if !self.is_dropdown_visible() {
            return Vec::new();
        }
        match &self.suggestions {
            Suggestions::Empty => Vec::new(),
            Suggestions::NoMatches => vec![Row {
                index: 0,
                content: RowContent::NoMatches,
                highlighted: false,
                hovered: false,
            }],
            Suggestions::Listed(items) => items
                .iter()
                .enumerate()
                .map(|(index, suggestion)| Row {
                    index,
                    content: RowContent::Suggestion(suggestion),
                    highlighted: self.highlighted == Some(index),
                    hovered: self.hovered == Some(index),
                })
                .collect(),
        }
    }

    // ---- Input ----

    /// The input text changed. Returns the fetch to run, if any.
    pub fn on_text_changed(&mut self, text: String) -> Option<PendingFetch> {
        self.generation += 1;
        self.query = text;
        self.highlighted = None;
        self.hovered = None;

        if self.query.is_empty() {
            self.suggestions = Suggestions::Empty;
            self.visible = false;
            return None;
        }

        Some(PendingFetch {
            generation: self.generation,
            query: self.query.clone(),
            future: self.source.fetch(&self.query),
        })
    }

    /// Apply a finished fetch. Returns false if a newer text change superseded it.
    pub fn on_fetch_resolved(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                "Dropping stale suggestions for '{}' (gen {}, current {})",
                outcome.query,
                outcome.generation,
                self.generation
            );
            return false;
        }

        self.suggestions = match outcome.result {
            Ok(results) => Suggestions::from_results(
                results,
                self.query.chars().count(),
                self.min_query_len,
            ),
            Err(e) => {
                tracing::warn!("Suggestion fetch for '{}' failed: {}", outcome.query, e);
                Suggestions::NoMatches
            }
        };
        self.highlighted = None;
        self.hovered = None;
        self.visible = true;
        true
    }

    /// Empty the input (clear button)
    pub fn clear(&mut self) {
        self.generation += 1;
        self.query.clear();
        self.suggestions = Suggestions::Empty;
        self.highlighted = None;
        self.hovered = None;
        self.visible = false;
    }

    // ---- Keyboard ----

    pub fn on_key_down(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::ArrowDown | Key::ArrowUp => {
                let count = self.suggestions.navigable_len();
                if count == 0 {
                    return KeyOutcome::Ignored;
                }
                self.highlighted = if key == Key::ArrowDown {
                    next_index(self.highlighted, count)
                } else {
                    previous_index(self.highlighted, count)
                };
                self.visible = true;
                KeyOutcome::Handled
            }
            Key::Enter => match self.highlighted {
                Some(index) => {
                    self.on_suggestion_clicked(index);
                    KeyOutcome::Navigated
                }
                None if !self.query.is_empty() => {
                    self.submit_query();
                    KeyOutcome::Navigated
                }
                None => KeyOutcome::Ignored,
            },
            Key::Escape => {
                if self.is_dropdown_visible() {
                    self.visible = false;
                    // Nothing hidden may stay selected; the input falls back to the typed text
                    self.highlighted = None;
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::PassThrough
                }
            }
            Key::Other => KeyOutcome::PassThrough,
        }
    }

    // ---- Pointer ----

    /// A suggestion row was clicked. The placeholder row and stale indices are ignored.
    pub fn on_suggestion_clicked(&mut self, index: usize) -> bool {
        let Some(suggestion) = self.suggestions.get(index) else {
            return false;
        };
        let key = suggestion.key.clone();
        self.query = suggestion.name.clone();
        // A fetch still in flight must not reopen the dropdown
        self.generation += 1;
        self.highlighted = None;
        self.hovered = None;
        self.visible = false;

        tracing::info!("Selected '{}' ({})", self.query, key);
        if let Err(e) = self.navigator.select(&key) {
            tracing::error!("Failed to open package: {}", e);
        }
        true
    }

    pub fn on_row_hovered(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|&i| self.suggestions.get(i).is_some());
    }

    pub fn set_pointer_over_dropdown(&mut self, over: bool) {
        self.pointer_over_dropdown = over;
        if !over {
            self.hovered = None;
        }
    }

    // ---- Focus ----

    pub fn on_focus_in(&mut self) {
        self.hide_token += 1;
        self.visible = true;
    }

    /// Arm the delayed hide; run the timer and hand it back to [`Self::on_hide_elapsed`].
    pub fn on_focus_out(&mut self) -> HideTimer {
        self.hide_token += 1;
        HideTimer {
            token: self.hide_token,
            delay: self.hide_delay,
        }
    }

    /// Returns true if the dropdown was hidden
    pub fn on_hide_elapsed(&mut self, timer: HideTimer) -> bool {
        if timer.token != self.hide_token {
            return false;
        }
        if self.pointer_over_dropdown {
            tracing::debug!("Pointer over dropdown, keeping it open");
            return false;
        }
        self.visible = false;
        self.highlighted = None;
        self.hovered = None;
        true
    }

    // ---- Helpers ----

    fn submit_query(&mut self) {
        self.generation += 1;
        self.visible = false;
        self.hovered = None;

        tracing::info!("Searching for '{}'", self.query);
        if let Err(e) = self.navigator.search(&self.query) {
            tracing::error!("Failed to open search results: {}", e);
        }
    }
}

/// Cycle forward through `[None, 0, .., count - 1]`
fn next_index(current: Option<usize>, count: usize) -> Option<usize> {
    match current {
        None => Some(0),
        Some(i) if i + 1 < count => Some(i + 1),
        Some(_) => None,
    }
}

/// Cycle backward through `[None, 0, .., count - 1]`
fn previous_index(current: Option<usize>, count: usize) -> Option<usize> {
    match current {
        None => Some(count - 1),
        Some(0) => None,
        Some(i) => Some(i - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Navigation, RecordingNavigator, StaticSource};
    use super::*;

    fn widget(source: StaticSource) -> (AutoComplete, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let config = AutoCompleteConfig::new(Arc::new(source), navigator.clone());
        (AutoComplete::new(config), navigator)
    }

    async fn type_text(widget: &mut AutoComplete, text: &str) {
        if let Some(fetch) = widget.on_text_changed(text.to_string()) {
            let outcome = fetch.run().await;
            widget.on_fetch_resolved(outcome);
        }
    }

    fn packages() -> Vec<Suggestion> {
        vec![
            Suggestion::new("move-stdlib", "move-stdlib")
                .with_version("1.5.0")
                .with_description("Move standard library")
                .with_metric("downloads", 1200)
                .with_metric("stars", 31),
            Suggestion::new("move-nursery", "move-nursery"),
            Suggestion::new("movey-utils", "movey-utils"),
        ]
    }

    #[tokio::test]
    async fn short_query_without_results_stays_hidden() {
        let (mut search, _) = widget(StaticSource::new());
        type_text(&mut search, "xy").await;

        assert_eq!(search.suggestions(), &Suggestions::Empty);
        assert!(!search.is_dropdown_visible());
        assert_eq!(search.phase(), Phase::Idle);
        assert!(search.rows().is_empty());
    }

    #[tokio::test]
    async fn long_query_without_results_shows_placeholder_row() {
        let (mut search, _) = widget(StaticSource::new());
        type_text(&mut search, "xyz").await;

        assert_eq!(search.phase(), Phase::NoMatches);
        let rows = search.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, RowContent::NoMatches);
        assert!(!rows[0].is_interactive());
    }

    #[tokio::test]
    async fn failed_fetch_shows_placeholder_row() {
        let (mut search, _) = widget(StaticSource::new().failing("ab"));
        type_text(&mut search, "ab").await;

        assert_eq!(search.suggestions(), &Suggestions::NoMatches);
        assert_eq!(search.phase(), Phase::NoMatches);
    }

    #[tokio::test]
    async fn results_are_listed_in_server_order() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        assert_eq!(search.phase(), Phase::Listing);
        let names: Vec<&str> = search
            .rows()
            .iter()
            .map(|row| match row.content {
                RowContent::Suggestion(s) => s.name.as_str(),
                RowContent::NoMatches => NO_MATCHES_LABEL,
            })
            .collect();
        assert_eq!(names, ["move-stdlib", "move-nursery", "movey-utils"]);
        assert!(search.rows().iter().all(|row| !row.highlighted));
    }

    #[tokio::test]
    async fn rows_carry_ranked_metadata() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        let rows = search.rows();
        let RowContent::Suggestion(first) = rows[0].content else {
            panic!("expected a suggestion row");
        };
        assert_eq!(first.version, "1.5.0");
        assert_eq!(first.description, "Move standard library");
        let metrics: Vec<(&str, u64)> =
            first.metrics.iter().map(|m| (m.label.as_str(), m.value)).collect();
        assert_eq!(metrics, [("downloads", 1200), ("stars", 31)]);
    }

    #[tokio::test]
    async fn arrow_down_cycles_back_to_query() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        let mut seen = Vec::new();
        for _ in 0..4 {
            assert_eq!(search.on_key_down(Key::ArrowDown), KeyOutcome::Handled);
            seen.push(search.highlighted());
        }
        assert_eq!(seen, [Some(0), Some(1), Some(2), None]);
        assert_eq!(search.input_text(), "mov");
    }

    #[tokio::test]
    async fn arrow_up_cycles_in_reverse() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        let mut seen = Vec::new();
        for _ in 0..4 {
            search.on_key_down(Key::ArrowUp);
            seen.push(search.highlighted());
        }
        assert_eq!(seen, [Some(2), Some(1), Some(0), None]);
    }

    #[tokio::test]
    async fn input_text_follows_highlight() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        search.on_key_down(Key::ArrowDown);
        search.on_key_down(Key::ArrowDown);
        assert_eq!(search.input_text(), "move-nursery");
        assert_eq!(search.query(), "mov");
        assert_eq!(search.phase(), Phase::Navigating);

        let rows = search.rows();
        let highlighted: Vec<usize> = rows.iter().filter(|r| r.highlighted).map(|r| r.index).collect();
        assert_eq!(highlighted, [1]);

        search.on_key_down(Key::ArrowUp);
        search.on_key_down(Key::ArrowUp);
        assert_eq!(search.input_text(), "mov");
        assert_eq!(search.phase(), Phase::Listing);
    }

    #[tokio::test]
    async fn stale_response_is_ignored() {
        let (mut search, _) = widget(
            StaticSource::new()
                .with("se", vec![Suggestion::new("sea", "sea")])
                .with("ser", vec![Suggestion::new("serde", "serde-slug")]),
        );

        let first = search.on_text_changed("se".to_string()).unwrap();
        let second = search.on_text_changed("ser".to_string()).unwrap();
        assert!(second.generation() > first.generation());

        let newer = second.run().await;
        assert!(search.on_fetch_resolved(newer));
        let older = first.run().await;
        assert!(!search.on_fetch_resolved(older));

        assert_eq!(search.suggestions().get(0).map(|s| s.key.as_str()), Some("serde-slug"));
        assert_eq!(search.suggestions().len(), 1);
    }

    #[tokio::test]
    async fn clearing_text_discards_in_flight_fetch() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));

        let pending = search.on_text_changed("mov".to_string()).unwrap();
        assert!(search.on_text_changed(String::new()).is_none());
        assert!(!search.on_fetch_resolved(pending.run().await));

        assert_eq!(search.suggestions(), &Suggestions::Empty);
        assert_eq!(search.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn enter_without_highlight_searches_raw_query() {
        let (mut search, navigator) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        assert_eq!(search.on_key_down(Key::Enter), KeyOutcome::Navigated);
        assert_eq!(navigator.take(), [Navigation::Search("mov".to_string())]);
        assert!(!search.is_dropdown_visible());
    }

    #[tokio::test]
    async fn enter_with_highlight_selects_navigation_key() {
        let (mut search, navigator) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        search.on_key_down(Key::ArrowUp);
        assert_eq!(search.on_key_down(Key::Enter), KeyOutcome::Navigated);
        assert_eq!(navigator.take(), [Navigation::Select("movey-utils".to_string())]);
        assert_eq!(search.input_text(), "movey-utils");
        assert_eq!(search.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn enter_on_empty_query_does_nothing() {
        let (mut search, navigator) = widget(StaticSource::new());
        assert_eq!(search.on_key_down(Key::Enter), KeyOutcome::Ignored);
        assert!(navigator.take().is_empty());
    }

    #[tokio::test]
    async fn select_serde_by_keyboard() {
        let (mut search, navigator) = widget(
            StaticSource::new().with("ser", vec![Suggestion::new("serde", "serde-slug")]),
        );
        type_text(&mut search, "ser").await;

        let rows = search.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, RowContent::Suggestion(&Suggestion::new("serde", "serde-slug")));

        search.on_key_down(Key::ArrowDown);
        assert!(search.rows()[0].highlighted);
        assert_eq!(search.input_text(), "serde");

        search.on_key_down(Key::Enter);
        assert_eq!(navigator.take(), [Navigation::Select("serde-slug".to_string())]);
    }

    #[tokio::test]
    async fn no_matches_disables_navigation_but_enter_searches() {
        let (mut search, navigator) = widget(StaticSource::new());
        type_text(&mut search, "xyz123").await;

        assert_eq!(search.rows().len(), 1);
        assert_eq!(search.on_key_down(Key::ArrowDown), KeyOutcome::Ignored);
        assert_eq!(search.on_key_down(Key::ArrowUp), KeyOutcome::Ignored);
        assert_eq!(search.highlighted(), None);
        assert_eq!(search.input_text(), "xyz123");

        search.on_key_down(Key::Enter);
        assert_eq!(navigator.take(), [Navigation::Search("xyz123".to_string())]);
    }

    #[tokio::test]
    async fn clicking_placeholder_row_is_ignored() {
        let (mut search, navigator) = widget(StaticSource::new());
        type_text(&mut search, "xyz").await;

        assert!(!search.on_suggestion_clicked(0));
        search.on_row_hovered(Some(0));
        assert!(!search.rows()[0].hovered);
        assert!(navigator.take().is_empty());
        assert_eq!(search.phase(), Phase::NoMatches);
    }

    #[tokio::test]
    async fn click_selects_by_key_and_hides() {
        let (mut search, navigator) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        assert!(search.on_suggestion_clicked(1));
        assert!(!search.on_suggestion_clicked(7));
        assert_eq!(navigator.take(), [Navigation::Select("move-nursery".to_string())]);
        assert_eq!(search.input_text(), "move-nursery");
        assert!(!search.is_dropdown_visible());
    }

    #[tokio::test]
    async fn selection_discards_in_flight_fetch() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()).with("move", packages()));
        type_text(&mut search, "mov").await;

        let pending = search.on_text_changed("move".to_string()).unwrap();
        search.on_suggestion_clicked(0);
        assert!(!search.on_fetch_resolved(pending.run().await));
        assert_eq!(search.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn hover_does_not_move_keyboard_highlight() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        search.on_row_hovered(Some(2));
        assert_eq!(search.highlighted(), None);
        assert_eq!(search.input_text(), "mov");
        assert!(search.rows()[2].hovered);

        search.set_pointer_over_dropdown(false);
        assert!(search.rows().iter().all(|row| !row.hovered));
    }

    #[tokio::test(start_paused = true)]
    async fn focus_out_hides_after_grace_delay() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        let timer = search.on_focus_out();
        assert_eq!(timer.delay(), DEFAULT_HIDE_DELAY);
        assert!(search.is_dropdown_visible());

        let elapsed = timer.wait().await;
        assert!(search.on_hide_elapsed(elapsed));
        assert_eq!(search.phase(), Phase::Idle);

        search.on_focus_in();
        assert_eq!(search.phase(), Phase::Listing);
    }

    #[tokio::test]
    async fn focus_in_cancels_pending_hide() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        let timer = search.on_focus_out();
        search.on_focus_in();
        assert!(!search.on_hide_elapsed(timer));
        assert!(search.is_dropdown_visible());
    }

    #[tokio::test]
    async fn pointer_over_dropdown_suppresses_hide() {
        let (mut search, navigator) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        search.set_pointer_over_dropdown(true);
        let timer = search.on_focus_out();
        assert!(!search.on_hide_elapsed(timer));
        assert!(search.is_dropdown_visible());

        // the click that caused the focus-out still lands
        assert!(search.on_suggestion_clicked(0));
        assert_eq!(navigator.take(), [Navigation::Select("move-stdlib".to_string())]);
    }

    #[tokio::test]
    async fn focus_in_with_nothing_to_show_stays_idle() {
        let (mut search, _) = widget(StaticSource::new());
        search.on_focus_in();
        assert_eq!(search.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn escape_hides_and_arrows_reopen() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        assert_eq!(search.on_key_down(Key::Escape), KeyOutcome::Handled);
        assert_eq!(search.phase(), Phase::Idle);
        assert_eq!(search.on_key_down(Key::Escape), KeyOutcome::PassThrough);

        search.on_key_down(Key::ArrowDown);
        assert_eq!(search.phase(), Phase::Navigating);
        assert_eq!(search.on_key_down(Key::Other), KeyOutcome::PassThrough);
    }

    #[tokio::test]
    async fn escape_drops_highlight_so_enter_searches_typed_text() {
        let (mut search, navigator) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        search.on_key_down(Key::ArrowDown);
        assert_eq!(search.input_text(), "move-stdlib");

        search.on_key_down(Key::Escape);
        assert_eq!(search.phase(), Phase::Idle);
        assert_eq!(search.highlighted(), None);
        assert_eq!(search.input_text(), "mov");

        search.on_key_down(Key::Enter);
        assert_eq!(navigator.take(), [Navigation::Search("mov".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn focus_out_hide_drops_highlight() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        type_text(&mut search, "mov").await;

        search.on_key_down(Key::ArrowUp);
        assert_eq!(search.input_text(), "movey-utils");

        let timer = search.on_focus_out().wait().await;
        assert!(search.on_hide_elapsed(timer));
        assert_eq!(search.highlighted(), None);
        assert_eq!(search.input_text(), "mov");

        search.on_focus_in();
        assert_eq!(search.phase(), Phase::Listing);
    }

    #[tokio::test]
    async fn clear_resets_to_idle() {
        let (mut search, _) = widget(StaticSource::new().with("mov", packages()));
        let pending = search.on_text_changed("mov".to_string()).unwrap();

        search.clear();
        assert!(!search.on_fetch_resolved(pending.run().await));
        assert_eq!(search.query(), "");
        assert_eq!(search.suggestions(), &Suggestions::Empty);
        assert_eq!(search.phase(), Phase::Idle);
    }

    #[test]
    fn settings_override_defaults() {
        let settings = SearchConfig {
            placeholder: "Find a package".to_string(),
            min_query_len: 1,
            hide_delay_ms: 120,
            max_visible: 5,
        };
        let config = AutoCompleteConfig::new(
            Arc::new(StaticSource::new()),
            Arc::new(RecordingNavigator::default()),
        )
        .with_settings(&settings);

        assert_eq!(config.min_query_len, 1);
        assert_eq!(config.hide_delay, Duration::from_millis(120));
        assert_eq!(AutoComplete::new(config).placeholder(), "Find a package");
    }

    #[tokio::test]
    async fn min_query_len_comes_from_config() {
        let navigator = Arc::new(RecordingNavigator::default());
        let mut config = AutoCompleteConfig::new(Arc::new(StaticSource::new()), navigator);
        config.min_query_len = 1;
        let mut search = AutoComplete::new(config);

        type_text(&mut search, "é").await;
        assert_eq!(search.phase(), Phase::NoMatches);
    }
}
