//! Structural selectors
//!
//! A minimal `tag.class` selector language: an optional tag name followed by
//! any number of `.class` requirements. This is all the enhancement watcher
//! needs to identify its targets.

use crate::dom::Node;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorParseError {
    #[error("selector must name a tag or at least one class")]
    Empty,
    #[error("selector contains an empty class segment: {0:?}")]
    EmptyClass(String),
}

impl Selector {
    /// Match on tag name only.
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            classes: Vec::new(),
        }
    }

    /// Match on a single class only.
    pub fn class(class: &str) -> Self {
        Self {
            tag: None,
            classes: vec![class.to_string()],
        }
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if node.tag != *tag {
                return false;
            }
        }
        self.classes.iter().all(|class| node.classes.contains(class))
    }
}

impl FromStr for Selector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('.');
        let tag = match segments.next() {
            Some("") | None => None,
            Some(tag) => Some(tag.to_string()),
        };
        let classes: Vec<String> = segments.map(str::to_string).collect();

        if classes.iter().any(String::is_empty) {
            return Err(SelectorParseError::EmptyClass(s.to_string()));
        }
        if tag.is_none() && classes.is_empty() {
            return Err(SelectorParseError::Empty);
        }
        Ok(Selector { tag, classes })
    }
}
