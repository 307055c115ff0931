//! Best-effort suppression of transient UI overlays.
//!
//! Two deliberately separate utilities with different testing intents:
//! [`dismiss_known_overlays`] exercises the overlays' own dismiss
//! affordances; [`remove_overlay_nodes`] clears obstructions outright
//! without verifying the affordances work. Neither guarantees
//! completeness — unknown overlay variants are not handled, and callers
//! must treat subsequent steps as likely, not certain, to succeed.

use std::time::Duration;

use tracing::{debug, info};

use crate::driver::Driver;
use crate::error::Result;
use crate::js;
use crate::locator::Locator;

const DISMISS_ATTEMPTS: usize = 5;
const DISMISS_DELAY: Duration = Duration::from_millis(500);

/// Known overlay trigger text paired with its dismiss control.
fn known_overlays() -> Vec<(Locator, Locator)> {
    vec![
        (
            Locator::text("Daily Goal Tracker"),
            Locator::text("Continue Learning"),
        ),
        (
            Locator::text("Terms & Conditions"),
            Locator::text("I Agree & Continue"),
        ),
    ]
}

/// Generic close affordance: any button wrapping an "x" icon.
fn close_icon_button() -> Locator {
    Locator::css("button:has(svg.lucide-x)")
}

/// Interactive dismissal: poll for known overlays and click their dismiss
/// controls, bounded retries, every probe error swallowed. Returns how
/// many dismiss clicks landed. Running it again on a clean page is a
/// no-op.
pub async fn dismiss_known_overlays(driver: &dyn Driver) -> usize {
    let mut dismissed = 0;
    for attempt in 0..DISMISS_ATTEMPTS {
        for (trigger, dismiss) in known_overlays() {
            if driver.is_visible(&trigger).await.unwrap_or(false) {
                debug!(target = "uiv", overlay = %trigger, attempt, "dismissing overlay");
                if driver.click(&dismiss).await.is_ok() {
                    dismissed += 1;
                    driver.pause(DISMISS_DELAY).await;
                }
            }
        }
        let close = close_icon_button();
        if driver.is_visible(&close).await.unwrap_or(false)
            && driver.click(&close).await.is_ok()
        {
            dismissed += 1;
            driver.pause(DISMISS_DELAY).await;
        }
        driver.pause(DISMISS_DELAY).await;
    }
    if dismissed > 0 {
        info!(target = "uiv", dismissed, "overlays dismissed");
    }
    dismissed
}

/// Destructive removal: delete full-screen overlay containers from the DOM
/// and restore body scroll. Returns the number of nodes removed.
pub async fn remove_overlay_nodes(driver: &dyn Driver) -> Result<usize> {
    let removed = driver
        .eval(js::remove_overlays_js())
        .await?
        .as_u64()
        .unwrap_or(0) as usize;
    if removed > 0 {
        info!(target = "uiv", removed, "overlay nodes removed");
    }
    Ok(removed)
}
