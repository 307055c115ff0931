//! Bounded waiting primitives.
//!
//! Waiting is either a visibility poll with a hard attempt budget or an
//! unconditional pause for cases with no reliable signal (animations,
//! app settle after reload).

use std::time::Duration;

use tracing::debug;

use crate::driver::Driver;
use crate::error::{FixtureError, Result};
use crate::locator::Locator;

pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Poll until the locator's element is visible, erroring with
/// [`FixtureError::Timeout`] once the attempt budget is spent.
pub async fn until_visible(
    driver: &dyn Driver,
    locator: &Locator,
    timeout: Duration,
) -> Result<()> {
    let attempts = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1) as u64;
    for attempt in 0..attempts {
        if driver.is_visible(locator).await.unwrap_or(false) {
            debug!(target = "uiv", %locator, attempt, "element visible");
            return Ok(());
        }
        driver.pause(POLL_INTERVAL).await;
    }
    Err(FixtureError::Timeout {
        ms: timeout.as_millis() as u64,
        condition: locator.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDriver;

    #[tokio::test]
    async fn resolves_once_visible() {
        let driver = MockDriver::new();
        driver.add_visible(&Locator::text("Admin Console"));
        let result = until_visible(
            &driver,
            &Locator::text("Admin Console"),
            Duration::from_secs(1),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn times_out_when_never_visible() {
        let driver = MockDriver::new();
        let err = until_visible(
            &driver,
            &Locator::text("Missing"),
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();
        match err {
            FixtureError::Timeout { ms, condition } => {
                assert_eq!(ms, 1000);
                assert!(condition.contains("Missing"));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
