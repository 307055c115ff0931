//! The verification-session workflow: seed → reload → suppress →
//! navigate → assert → capture.
//!
//! [`Flow`] carries the driver, the evidence report, and the step policy.
//! Every navigation step is explicitly essential or optional: an
//! essential step that fails captures a labeled diagnostic screenshot
//! and aborts the scenario; an optional step logs and moves on.
//! Assertion checks never abort — later unrelated checks still run.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::driver::Driver;
use crate::error::Result;
use crate::evidence::{self, Report};
use crate::locator::Locator;
use crate::overlay;
use crate::seed::SeedSpec;
use crate::{seed, wait};

#[derive(Debug, Clone)]
pub struct FlowOptions {
    pub base_url: String,
    pub shots_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            shots_dir: PathBuf::from("verification"),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct Flow<'a> {
    driver: &'a dyn Driver,
    report: Report,
    options: FlowOptions,
}

impl<'a> Flow<'a> {
    pub fn new(driver: &'a dyn Driver, scenario: &str, options: FlowOptions) -> Self {
        Self {
            driver,
            report: Report::new(scenario),
            options,
        }
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    /// Open the target origin and seed the session.
    pub async fn open_and_seed(&mut self, spec: &SeedSpec) -> Result<()> {
        self.driver.goto(&self.options.base_url).await?;
        seed::apply(self.driver, spec).await
    }

    pub async fn dismiss_overlays(&self) -> usize {
        overlay::dismiss_known_overlays(self.driver).await
    }

    pub async fn remove_overlays(&self) -> Result<usize> {
        overlay::remove_overlay_nodes(self.driver).await
    }

    pub async fn pause_ms(&self, ms: u64) {
        self.driver.pause(Duration::from_millis(ms)).await;
    }

    /// Essential wait: the element must become visible or the scenario
    /// aborts with a labeled diagnostic screenshot.
    pub async fn require_visible(&mut self, locator: &Locator, label: &str) -> Result<()> {
        match wait::until_visible(self.driver, locator, self.options.timeout).await {
            Ok(()) => Ok(()),
            Err(err) => self.abort_step(label, err).await,
        }
    }

    /// Essential click: waits for visibility first.
    pub async fn click(&mut self, locator: &Locator, label: &str) -> Result<()> {
        let outcome = async {
            wait::until_visible(self.driver, locator, self.options.timeout).await?;
            self.driver.click(locator).await
        }
        .await;
        match outcome {
            Ok(()) => {
                info!(target = "uiv", %locator, label, "clicked");
                Ok(())
            }
            Err(err) => self.abort_step(label, err).await,
        }
    }

    /// Optional click: a short visibility probe, then click; locator
    /// failures are logged and skipped. Returns whether the click landed.
    pub async fn try_click(&self, locator: &Locator, label: &str) -> bool {
        let probe = wait::until_visible(self.driver, locator, Duration::from_secs(2)).await;
        match probe {
            Ok(()) => match self.driver.click(locator).await {
                Ok(()) => {
                    info!(target = "uiv", %locator, label, "clicked");
                    true
                }
                Err(err) => {
                    warn!(target = "uiv", %locator, label, error = %err, "optional click failed");
                    false
                }
            },
            Err(_) => {
                warn!(target = "uiv", %locator, label, "optional step skipped");
                false
            }
        }
    }

    /// Essential fill: waits for visibility, writes, and reports the
    /// written-back value as a round-trip check.
    pub async fn fill(&mut self, locator: &Locator, text: &str, label: &str) -> Result<()> {
        let outcome = async {
            wait::until_visible(self.driver, locator, self.options.timeout).await?;
            self.driver.fill(locator, text).await
        }
        .await;
        match outcome {
            Ok(read_back) => {
                if read_back == text {
                    self.report.pass(format!("{label}: value is {text:?}"));
                } else {
                    self.report
                        .fail(label, format!("wrote {text:?}, read back {read_back:?}"));
                }
                Ok(())
            }
            Err(err) => self.abort_step(label, err).await,
        }
    }

    pub async fn scroll_into_view(&mut self, locator: &Locator, label: &str) -> Result<()> {
        match self.driver.scroll_into_view(locator).await {
            Ok(()) => Ok(()),
            Err(err) => self.abort_step(label, err).await,
        }
    }

    pub async fn accept_dialogs(&self) -> Result<()> {
        self.driver.accept_dialogs().await
    }

    pub async fn count(&self, locator: &Locator) -> Result<usize> {
        self.driver.count(locator).await
    }

    // ----- checks: report, never abort -----

    pub async fn check_visible(&mut self, locator: &Locator, label: &str) {
        let visible = self.driver.is_visible(locator).await.unwrap_or(false);
        if visible {
            self.report.pass(label);
        } else {
            self.report.fail(label, format!("{locator} not visible"));
        }
    }

    pub async fn check_count(&mut self, locator: &Locator, expected: usize, label: &str) {
        let actual = self.driver.count(locator).await.unwrap_or(usize::MAX);
        if actual == expected {
            self.report.pass(label);
        } else {
            self.report
                .fail(label, format!("count was {actual}, expected {expected}"));
        }
    }

    pub async fn check_value(&mut self, locator: &Locator, expected: &str, label: &str) {
        match self.driver.value(locator).await {
            Ok(actual) if actual == expected => self.report.pass(label),
            Ok(actual) => self
                .report
                .fail(label, format!("value was {actual:?}, expected {expected:?}")),
            Err(err) => self.report.fail(label, err.to_string()),
        }
    }

    /// Assert a literal does NOT appear anywhere in the document markup.
    pub async fn check_absent_markup(&mut self, needle: &str, label: &str) {
        match self.driver.page_html().await {
            Ok(html) if html.contains(needle) => {
                self.report.fail(label, format!("{needle:?} still present in DOM"));
            }
            Ok(_) => self.report.pass(label),
            Err(err) => self.report.fail(label, err.to_string()),
        }
    }

    // ----- evidence -----

    /// Capture a screenshot under the shots directory.
    pub async fn capture(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.options.shots_dir.join(name);
        evidence::capture(self.driver, &path).await?;
        self.report.record_screenshot(path.clone());
        Ok(path)
    }

    /// Capture the diagnostic screenshot for a failed essential step and
    /// propagate the error.
    async fn abort_step<T>(&mut self, label: &str, err: crate::error::FixtureError) -> Result<T> {
        warn!(target = "uiv", label, error = %err, "essential step failed");
        let name = format!("failed_{}.png", sanitize(label));
        match self.capture(&name).await {
            Ok(path) => info!(target = "uiv", path = %path.display(), "diagnostic screenshot"),
            Err(shot_err) => {
                warn!(target = "uiv", label, error = %shot_err, "diagnostic screenshot failed");
            }
        }
        Err(err)
    }
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
