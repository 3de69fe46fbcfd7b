use std::collections::HashMap;
use std::sync::Mutex;

use crate::navigator::{NavigateError, Navigator};
use crate::source::{FetchError, FetchFuture, Suggestion, SuggestionSource};

/// Source answering from a fixed table; unknown queries match nothing
#[derive(Default)]
pub struct StaticSource {
    results: HashMap<String, Result<Vec<Suggestion>, String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, suggestions: Vec<Suggestion>) -> Self {
        self.results.insert(query.to_string(), Ok(suggestions));
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.results
            .insert(query.to_string(), Err(format!("no route for '{query}'")));
        self
    }
}

impl SuggestionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, query: &str) -> FetchFuture {
        let result = match self.results.get(query) {
            Some(Ok(suggestions)) => Ok(suggestions.clone()),
            Some(Err(msg)) => Err(FetchError::Unavailable(msg.clone())),
            None => Ok(Vec::new()),
        };
        Box::pin(async move { result })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Select(String),
    Search(String),
}

#[derive(Default)]
pub struct RecordingNavigator {
    log: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn take(&self) -> Vec<Navigation> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

impl Navigator for RecordingNavigator {
    fn select(&self, key: &str) -> Result<(), NavigateError> {
        self.log.lock().unwrap().push(Navigation::Select(key.to_string()));
        Ok(())
    }

    fn search(&self, query: &str) -> Result<(), NavigateError> {
        self.log.lock().unwrap().push(Navigation::Search(query.to_string()));
        Ok(())
    }
}
