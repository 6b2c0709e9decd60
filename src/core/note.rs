//! Note templates read from configuration text

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Decides whether a note applies to a given set of attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteMatcher {
    #[default]
    Always,
}

impl NoteMatcher {
    pub fn matches(&self, _attributes: &HashMap<&str, &str>) -> bool {
        match self {
            NoteMatcher::Always => true,
        }
    }
}

/// A note pattern such as `"Valid at {agency_id}"` plus its matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteProperties {
    pattern: String,
    matcher: NoteMatcher,
}

impl NoteProperties {
    pub fn new(pattern: &str, matcher: NoteMatcher) -> Self {
        Self {
            pattern: pattern.to_string(),
            matcher,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matcher(&self) -> NoteMatcher {
        self.matcher
    }

    /// Expands `{key}` placeholders from `attributes`. Returns `None` when the
    /// matcher rejects the attributes. Unknown keys expand to nothing.
    pub fn generate_note(&self, attributes: &HashMap<&str, &str>) -> Option<String> {
        if !self.matcher.matches(attributes) {
            return None;
        }

        let mut note = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern.as_str();
        while let Some(open) = rest.find('{') {
            note.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = &after[..close];
                    note.push_str(attributes.get(key).copied().unwrap_or_default());
                    rest = &after[close + 1..];
                }
                None => {
                    note.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        note.push_str(rest);
        Some(note)
    }
}

impl FromStr for NoteProperties {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NoteProperties::new(s, NoteMatcher::Always))
    }
}

impl TryFrom<String> for NoteProperties {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoteProperties> for String {
    fn from(props: NoteProperties) -> Self {
        props.pattern
    }
}

impl Display for NoteProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
