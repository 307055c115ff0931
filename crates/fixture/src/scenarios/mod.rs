//! The verification scenarios, one per UI flow under check.
//!
//! Each scenario is a linear seed → suppress → navigate → assert →
//! capture run over a [`Flow`]. They share the fixture layer instead of
//! re-rolling setup per script, and they all run on the [`Driver`]
//! trait, so the tests exercise them end to end on the mock driver.

mod admin;
mod plans;
mod revision;
mod store;
mod topic_notes;

use crate::driver::Driver;
use crate::error::Result;
use crate::evidence::Report;
use crate::flow::{Flow, FlowOptions};

pub use admin::{admin_console, admin_scroll, dashboard_cleanup};
pub use plans::{plans_editor, visual_edit};
pub use revision::revision_hub;
pub use store::student_store;
pub use topic_notes::topic_notes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    AdminConsole,
    AdminScroll,
    DashboardCleanup,
    StudentStore,
    PlansEditor,
    VisualEdit,
    RevisionHub,
    TopicNotes,
}

impl Scenario {
    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::AdminConsole,
            Scenario::AdminScroll,
            Scenario::DashboardCleanup,
            Scenario::StudentStore,
            Scenario::PlansEditor,
            Scenario::VisualEdit,
            Scenario::RevisionHub,
            Scenario::TopicNotes,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::AdminConsole => "admin_console",
            Scenario::AdminScroll => "admin_scroll",
            Scenario::DashboardCleanup => "dashboard_cleanup",
            Scenario::StudentStore => "student_store",
            Scenario::PlansEditor => "plans_editor",
            Scenario::VisualEdit => "visual_edit",
            Scenario::RevisionHub => "revision_hub",
            Scenario::TopicNotes => "topic_notes",
        }
    }
}

/// Run one scenario to completion, returning the evidence report. The
/// report comes back even when the scenario errors, so the caller can
/// still summarize partial evidence.
pub async fn run(
    scenario: Scenario,
    driver: &dyn Driver,
    options: FlowOptions,
) -> (Report, Result<()>) {
    let mut flow = Flow::new(driver, scenario.name(), options);
    let outcome = match scenario {
        Scenario::AdminConsole => admin_console(&mut flow).await,
        Scenario::AdminScroll => admin_scroll(&mut flow).await,
        Scenario::DashboardCleanup => dashboard_cleanup(&mut flow).await,
        Scenario::StudentStore => student_store(&mut flow).await,
        Scenario::PlansEditor => plans_editor(&mut flow).await,
        Scenario::VisualEdit => visual_edit(&mut flow).await,
        Scenario::RevisionHub => revision_hub(&mut flow).await,
        Scenario::TopicNotes => topic_notes(&mut flow).await,
    };
    (flow.into_report(), outcome)
}
