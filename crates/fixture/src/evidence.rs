//! Assertion reporting and screenshot evidence.
//!
//! Checks print a PASS/FAIL line the moment they run and accumulate in a
//! [`Report`]; a failed check never aborts the scenario, so later
//! unrelated checks still execute. Screenshots are the human-reviewed
//! artifact and are written on every terminal branch, with failure
//! branches using a distinct name.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::info;

use crate::driver::Driver;
use crate::error::{FixtureError, Result};

#[derive(Debug, Clone)]
pub struct Check {
    pub label: String,
    pub passed: bool,
    pub detail: Option<String>,
}

/// Accumulated verification outcome for one scenario run.
#[derive(Debug, Clone)]
pub struct Report {
    scenario: String,
    checks: Vec<Check>,
    screenshots: Vec<PathBuf>,
}

impl Report {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            checks: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn pass(&mut self, label: impl Into<String>) {
        let label = label.into();
        println!("{} {label}", "PASS:".green().bold());
        self.checks.push(Check {
            label,
            passed: true,
            detail: None,
        });
    }

    pub fn fail(&mut self, label: impl Into<String>, detail: impl Into<String>) {
        let label = label.into();
        let detail = detail.into();
        println!("{} {label} ({detail})", "FAIL:".red().bold());
        self.checks.push(Check {
            label,
            passed: false,
            detail: Some(detail),
        });
    }

    pub fn record_screenshot(&mut self, path: PathBuf) {
        self.screenshots.push(path);
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn screenshots(&self) -> &[PathBuf] {
        &self.screenshots
    }

    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} checks, {} failed, {} screenshot(s)",
            self.scenario,
            self.checks.len(),
            self.failures(),
            self.screenshots.len()
        )
    }
}

/// Capture the page as PNG at `path`, creating the parent directory when
/// absent. The file is written even when the caller is on a failure path.
pub async fn capture(driver: &dyn Driver, path: &Path) -> Result<()> {
    let bytes = driver.screenshot_png().await?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &bytes).map_err(|source| FixtureError::Screenshot {
        path: path.to_path_buf(),
        source,
    })?;
    info!(target = "uiv", path = %path.display(), "screenshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDriver;

    #[test]
    fn report_counts_failures() {
        let mut report = Report::new("plans_editor");
        report.pass("plan added");
        report.fail("plan deleted", "count was 1, expected 0");
        assert_eq!(report.failures(), 1);
        assert!(!report.is_success());
        assert!(report.summary().contains("2 checks, 1 failed"));
    }

    #[tokio::test]
    async fn capture_creates_parent_and_writes_bytes() {
        let driver = MockDriver::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verification").join("final_success.png");

        capture(&driver, &path).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        // PNG magic from the mock driver's canned screenshot.
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }
}
