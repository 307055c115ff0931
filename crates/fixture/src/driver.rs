//! Driver abstraction over a live browser page.
//!
//! Scenarios are written against [`Driver`] so they run identically on the
//! real CDP-backed session and on the mock driver in
//! [`crate::testing`], which fakes element state without a browser.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::locator::Locator;

#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate the page to `url`.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Full page reload, so the app re-reads injected storage state.
    async fn reload(&self) -> Result<()>;

    /// Evaluate a JS expression, returning its JSON value (`Null` when the
    /// expression yields `undefined`).
    async fn eval(&self, expression: &str) -> Result<Value>;

    /// Number of elements matching the locator's strategy (pick ignored).
    async fn count(&self, locator: &Locator) -> Result<usize>;

    /// Whether the picked element exists and is rendered visible.
    async fn is_visible(&self, locator: &Locator) -> Result<bool>;

    /// Click the picked element. `ElementNotFound` if nothing matches.
    async fn click(&self, locator: &Locator) -> Result<()>;

    /// Replace the picked input's value with `text`, raising input/change
    /// events. Returns the value read back after the write.
    async fn fill(&self, locator: &Locator, text: &str) -> Result<String>;

    /// Current value of the picked input element.
    async fn value(&self, locator: &Locator) -> Result<String>;

    /// Scroll the picked element into view.
    async fn scroll_into_view(&self, locator: &Locator) -> Result<()>;

    /// Serialized DOM of the current document.
    async fn page_html(&self) -> Result<String>;

    /// Pre-register auto-accept for native confirm/alert dialogs. Must be
    /// called before any interaction that triggers one, or it hangs.
    async fn accept_dialogs(&self) -> Result<()>;

    /// Capture the viewport as a PNG.
    async fn screenshot_png(&self) -> Result<Vec<u8>>;

    /// Unconditional fixed-duration pause. Mock drivers skip real time.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
