//! Language fallback for one logical field
//!
//! Precedence: requested language, then the default language, then the first
//! candidate in storage order. Entries without content never win.

use crate::contract::TextEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackResolver {
    default_language_id: i32,
}

impl FallbackResolver {
    pub fn new(default_language_id: i32) -> Self {
        Self {
            default_language_id,
        }
    }

    pub fn default_language_id(&self) -> i32 {
        self.default_language_id
    }

    /// Pick the text to show for `requested` among the candidates of one
    /// (entity type, entity id, field name). `None` when no candidate has text.
    pub fn resolve<'a, I>(&self, requested: i32, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a TextEntry>,
    {
        let mut default = None;
        let mut first = None;

        for entry in candidates {
            let Some(text) = entry.text_content.as_deref() else {
                continue;
            };
            if entry.language_id == requested {
                return Some(text.to_string());
            }
            if default.is_none() && entry.language_id == self.default_language_id {
                default = Some(text);
            }
            if first.is_none() {
                first = Some(text);
            }
        }

        default.or(first).map(str::to_string)
    }
}
