//! Revision hub flow: a student with stale MCQ history should see their
//! weak subtopics grouped by chapter and be able to open a revision
//! session.

use crate::error::Result;
use crate::flow::Flow;
use crate::locator::Locator;
use crate::seed::{FeatureFlags, McqAttempt, MockUser, SeedSpec};

fn student_with_history() -> MockUser {
    let report = serde_json::json!({
        "topics": [
            { "name": "Newton Laws", "status": "WEAK", "score": 40 },
            { "name": "Kinematics", "status": "STRONG", "score": 90 }
        ]
    });
    let mut user = MockUser::student("test-user", "Test Student");
    user.mcq_history.push(McqAttempt {
        id: "h1".into(),
        chapter_id: "ch1".into(),
        chapter_title: "Physics Chapter 1".into(),
        score: 40,
        total_questions: 100,
        // Old enough that the revision scheduler marks it due today.
        date: "2023-01-01T00:00:00Z".into(),
        ultra_analysis_report: report.to_string(),
    });
    user
}

pub async fn revision_hub(flow: &mut Flow<'_>) -> Result<()> {
    let spec = SeedSpec::new(
        student_with_history(),
        FeatureFlags::new().terms_accepted(),
    );
    flow.open_and_seed(&spec).await?;

    // Popups here overlap unpredictably; clearing obstructions is the
    // intent, not exercising their dismiss buttons.
    flow.remove_overlays().await?;
    flow.pause_ms(1000).await;

    flow.click(&Locator::button("Notes"), "notes tab").await?;
    flow.pause_ms(2000).await;

    flow.check_visible(&Locator::text("Physics Chapter 1"), "chapter header visible")
        .await;
    flow.check_visible(&Locator::text("Newton Laws"), "weak subtopic visible")
        .await;

    flow.click(&Locator::button("Revise").first(), "revise button")
        .await?;
    flow.pause_ms(2000).await;

    flow.check_visible(&Locator::text("Study Notes"), "study notes pane")
        .await;
    flow.check_visible(&Locator::text("Quick Practice"), "quick practice pane")
        .await;

    flow.capture("revision_hub.png").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowOptions;
    use crate::scenarios::{self, Scenario};
    use crate::testing::{MockAction, MockDriver};

    fn options(dir: &std::path::Path) -> FlowOptions {
        FlowOptions {
            base_url: "http://localhost:5001".to_string(),
            shots_dir: dir.to_path_buf(),
            timeout: std::time::Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn due_history_opens_revision_session() {
        let driver = MockDriver::new();
        driver.add_visible(&Locator::button("Notes"));
        driver.add_visible(&Locator::text("Physics Chapter 1"));
        driver.add_visible(&Locator::text("Newton Laws"));
        driver.add_visible(&Locator::button("Revise"));
        driver.add_visible(&Locator::text("Study Notes"));
        driver.add_visible(&Locator::text("Quick Practice"));

        let dir = tempfile::tempdir().unwrap();
        let (report, outcome) =
            scenarios::run(Scenario::RevisionHub, &driver, options(dir.path())).await;

        outcome.unwrap();
        assert!(report.is_success(), "failures: {:?}", report.checks());
        assert!(report.screenshots()[0].ends_with("revision_hub.png"));
    }

    #[tokio::test]
    async fn seed_carries_mcq_history() {
        let driver = MockDriver::new();
        driver.add_visible(&Locator::button("Notes"));
        driver.add_visible(&Locator::button("Revise"));

        let dir = tempfile::tempdir().unwrap();
        let (_, _) = scenarios::run(Scenario::RevisionHub, &driver, options(dir.path())).await;

        let seeded = driver.actions().iter().any(|a| match a {
            MockAction::Eval { expression } => {
                expression.contains("mcqHistory") && expression.contains("Physics Chapter 1")
            }
            _ => false,
        });
        assert!(seeded);
    }

    #[tokio::test]
    async fn missing_panes_fail_checks_but_still_capture() {
        let driver = MockDriver::new();
        driver.add_visible(&Locator::button("Notes"));
        driver.add_visible(&Locator::button("Revise"));
        // Chapter header, subtopic, and session panes never render.

        let dir = tempfile::tempdir().unwrap();
        let (report, outcome) =
            scenarios::run(Scenario::RevisionHub, &driver, options(dir.path())).await;

        outcome.unwrap();
        assert_eq!(report.failures(), 4);
        assert_eq!(report.screenshots().len(), 1);
    }
}
