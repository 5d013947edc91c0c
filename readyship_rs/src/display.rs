//! Display items and the fixed sequences carousels cycle through.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One immutable card of display copy: an alert, an analytics view, a
/// feature description or a hero phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    /// Stable identifier (`"carriers"`, `"rate-shopping"`).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Category badge shown above the title (`"UPSELL"`).
    #[serde(default)]
    pub badge: Option<String>,
    /// Accent color as a CSS hex string.
    pub color: String,
    /// Icon name understood by the render surface.
    #[serde(default)]
    pub icon: Option<String>,
    /// Small print next to the title (`"4m ago"`, `"today"`).
    #[serde(default)]
    pub caption: Option<String>,
    /// Call-to-action label.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    /// Panel header shown while the item is active.
    #[serde(default)]
    pub label: Option<String>,
    /// Play the delayed reveal animation when this item becomes visible.
    #[serde(default)]
    pub reveal: bool,
}

impl DisplayItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            badge: None,
            color: color.into(),
            icon: None,
            caption: None,
            action: None,
            channel: None,
            label: None,
            reveal: false,
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn revealed_on_entry(mut self) -> Self {
        self.reveal = true;
        self
    }
}

/// A non-empty, immutable, ordered list.
///
/// Indexing wraps modulo the length, so every `usize` maps to an item and
/// out-of-range access cannot happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    /// Infallible constructor: `first` guarantees at least one item.
    pub fn of(first: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut items = vec![first];
        items.extend(rest);
        Self { items }
    }

    /// Build from configuration input. `name` only labels the error.
    pub fn new(name: &str, items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptySequence {
                name: name.to_string(),
            });
        }
        Ok(Self { items })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> &T {
        &self.items[index % self.items.len()]
    }

    /// The index `back` steps before `index`, wrapping.
    pub fn back(&self, index: usize, back: usize) -> usize {
        let len = self.items.len();
        (index % len + len - back % len) % len
    }

    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_rejected() {
        let err = Sequence::<u8>::new("alerts", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptySequence { ref name } if name == "alerts"));
        assert_eq!(err.to_string(), "display sequence `alerts` has no items");
    }

    #[test]
    fn indexing_wraps() {
        let seq = Sequence::of('a', ['b', 'c']);
        assert_eq!(seq.len(), 3);
        assert_eq!(*seq.get(4), 'b');
        assert_eq!(seq.next(2), 0);
        assert_eq!(seq.back(0, 1), 2);
        assert_eq!(seq.back(1, 2), 2);
        assert_eq!(seq.back(2, 5), 0);
    }

    #[test]
    fn display_item_optional_fields_default() {
        let item: DisplayItem =
            toml::from_str("id = \"x\"\ntitle = \"Hello\"\ncolor = \"#000000\"\n").expect("item");
        assert_eq!(item, DisplayItem::new("x", "Hello", "#000000"));
        assert!(!item.reveal);
    }
}
