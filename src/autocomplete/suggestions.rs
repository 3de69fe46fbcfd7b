use crate::source::Suggestion;

/// Label of the placeholder row shown when a long enough query matched nothing
pub const NO_MATCHES_LABEL: &str = "No matches found";

/// The dropdown's contents.
///
/// `NoMatches` is a single non-interactive row and is distinct from `Empty`,
/// which shows nothing at all. `Listed` never holds an empty vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Suggestions {
    #[default]
    Empty,
    NoMatches,
    Listed(Vec<Suggestion>),
}

impl Suggestions {
    /// Classify a fetch result for a query of `query_len` characters
    pub fn from_results(results: Vec<Suggestion>, query_len: usize, min_query_len: usize) -> Self {
        if !results.is_empty() {
            Self::Listed(results)
        } else if query_len >= min_query_len {
            Self::NoMatches
        } else {
            Self::Empty
        }
    }

    /// Number of rows the dropdown shows
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::NoMatches => 1,
            Self::Listed(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rows the keyboard can highlight
    pub fn navigable_len(&self) -> usize {
        match self {
            Self::Listed(items) => items.len(),
            _ => 0,
        }
    }

    /// The suggestion at `index`; never the placeholder row
    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        match self {
            Self::Listed(items) => items.get(index),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowContent<'a> {
    Suggestion(&'a Suggestion),
    NoMatches,
}

/// One rendered dropdown row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    pub index: usize,
    pub content: RowContent<'a>,
    pub highlighted: bool,
    pub hovered: bool,
}

impl Row<'_> {
    /// Whether the row takes clicks, hover and a pointer cursor
    pub fn is_interactive(&self) -> bool {
        matches!(self.content, RowContent::Suggestion(_))
    }
}
