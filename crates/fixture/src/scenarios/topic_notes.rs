//! Topic notes manager flow: reach the PDF study material tab as admin
//! and add a topic note.

use crate::error::Result;
use crate::flow::Flow;
use crate::locator::Locator;
use crate::seed::{FeatureFlags, MockUser, SeedSpec};

pub async fn topic_notes(flow: &mut Flow<'_>) -> Result<()> {
    let spec = SeedSpec::new(
        MockUser::admin("admin-1", "Super Admin"),
        FeatureFlags::new(),
    );
    flow.open_and_seed(&spec).await?;

    flow.remove_overlays().await?;
    flow.pause_ms(1000).await;

    // Some builds land directly on the console; older ones need the
    // panel link first.
    if !flow
        .driver()
        .is_visible(&Locator::text("Admin Console"))
        .await
        .unwrap_or(false)
    {
        flow.try_click(&Locator::text("Admin Panel"), "admin panel link")
            .await;
        flow.pause_ms(2000).await;
    }

    // PDF tab label has shifted between builds.
    if !flow.try_click(&Locator::button("PDF"), "pdf tab").await {
        flow.click(&Locator::text("PDF / Notes"), "pdf notes tab").await?;
    }
    flow.pause_ms(2000).await;

    flow.require_visible(
        &Locator::text("Topic Notes Manager (New)"),
        "topic notes manager",
    )
    .await?;
    flow.check_visible(
        &Locator::text("Topic Notes Manager (New)"),
        "topic notes manager visible",
    )
    .await;
    flow.capture("verification_topic_notes.png").await?;

    flow.click(&Locator::text("+ Add Topic Note"), "add topic note")
        .await?;
    flow.pause_ms(500).await;

    flow.fill(
        &Locator::placeholder("Topic (e.g. Introduction)").last(),
        "Test Topic",
        "topic field",
    )
    .await?;
    flow.fill(
        &Locator::placeholder("Note Title").last(),
        "Test Note 1",
        "note title field",
    )
    .await?;

    flow.capture("verification_topic_notes_added.png").await?;
    Ok(())
}
