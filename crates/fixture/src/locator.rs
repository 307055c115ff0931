//! Locator vocabulary for finding elements on the page under test.
//!
//! A [`Locator`] pairs a lookup strategy with a [`Pick`] rule for
//! disambiguating multiple matches. The target application exposes no
//! test-id contract, so lookups go by visible text, role + accessible
//! name, CSS selectors, or placeholder attributes — the same incidental
//! surface the app's own UI copy and markup provide.

use std::fmt;

/// How to find candidate elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Elements whose visible text contains the needle (deepest match wins).
    Text(String),
    /// Buttons (native or `role="button"`) matched by accessible name.
    Button(String),
    /// Raw CSS selector.
    Css(String),
    /// Inputs/textareas matched by exact `placeholder` attribute.
    Placeholder(String),
    /// The button inside the enclosing row (two ancestors up) of another
    /// located element. Used for per-item controls like a delete button.
    RowButton(Box<Locator>),
}

/// Which element to act on when a strategy matches more than one.
///
/// `Last` is the rule that picks a freshly appended list item over
/// pre-existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pick {
    #[default]
    First,
    Last,
    Nth(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub pick: Pick,
}

impl Locator {
    pub fn text(needle: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Text(needle.into()),
            pick: Pick::First,
        }
    }

    pub fn button(name: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Button(name.into()),
            pick: Pick::First,
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css(selector.into()),
            pick: Pick::First,
        }
    }

    pub fn placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Placeholder(placeholder.into()),
            pick: Pick::First,
        }
    }

    pub fn row_button_of(inner: Locator) -> Self {
        Self {
            strategy: Strategy::RowButton(Box::new(inner)),
            pick: Pick::First,
        }
    }

    pub fn first(mut self) -> Self {
        self.pick = Pick::First;
        self
    }

    pub fn last(mut self) -> Self {
        self.pick = Pick::Last;
        self
    }

    pub fn nth(mut self, index: usize) -> Self {
        self.pick = Pick::Nth(index);
        self
    }

    /// Stable identity of the strategy, independent of the pick rule.
    /// Drivers that fake the DOM key element state on this.
    pub fn key(&self) -> String {
        match &self.strategy {
            Strategy::Text(t) => format!("text={t}"),
            Strategy::Button(n) => format!("button={n}"),
            Strategy::Css(s) => format!("css={s}"),
            Strategy::Placeholder(p) => format!("placeholder={p}"),
            Strategy::RowButton(inner) => format!("row-button({})", inner.key()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())?;
        match self.pick {
            Pick::First => Ok(()),
            Pick::Last => write!(f, " (last)"),
            Pick::Nth(n) => write!(f, " (nth {n})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_pick() {
        let first = Locator::text("Admin Console");
        let last = Locator::text("Admin Console").last();
        assert_eq!(first.key(), last.key());
        assert_eq!(first.key(), "text=Admin Console");
    }

    #[test]
    fn display_includes_pick() {
        let loc = Locator::placeholder("Plan Name").last();
        assert_eq!(loc.to_string(), "placeholder=Plan Name (last)");
    }

    #[test]
    fn row_button_key_nests_inner() {
        let inner = Locator::css("input[value='Verified Plan']").last();
        let row = Locator::row_button_of(inner);
        assert_eq!(row.key(), "row-button(css=input[value='Verified Plan'])");
    }
}
