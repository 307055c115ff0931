//! Admin console flows: pricing/visibility tab navigation and the
//! dashboard-cleanup regression check.

use crate::error::Result;
use crate::flow::Flow;
use crate::locator::Locator;
use crate::seed::{FeatureFlags, MockUser, SeedSpec};

fn admin_seed() -> SeedSpec {
    SeedSpec::new(
        MockUser::admin("admin-123", "Test Admin").with_credits(9999),
        FeatureFlags::suppress_all_onboarding(),
    )
}

/// Drive the admin console through the pricing tab, back, and into the
/// visibility tab; capture `verification.png` at the end.
pub async fn admin_console(flow: &mut Flow<'_>) -> Result<()> {
    flow.open_and_seed(&admin_seed()).await?;

    // Terms can still land if the flag write raced the first paint.
    flow.try_click(&Locator::text("I Agree & Continue"), "dismiss terms")
        .await;

    flow.require_visible(&Locator::text("Admin Console"), "admin dashboard")
        .await?;

    flow.click(&Locator::text("💰 Pricing"), "pricing tab").await?;
    flow.require_visible(
        &Locator::text("Store Feature Lists (Basic vs Ultra)"),
        "store feature lists",
    )
    .await?;
    flow.check_visible(
        &Locator::text("Store Feature Lists (Basic vs Ultra)"),
        "pricing page loaded",
    )
    .await;

    // Back to the dashboard via the arrow icon, then into Visibility.
    flow.click(
        &Locator::css("button:has(svg.lucide-arrow-left)"),
        "back button",
    )
    .await?;
    flow.require_visible(&Locator::text("Admin Console"), "admin dashboard again")
        .await?;

    flow.click(&Locator::text("Visibility"), "visibility tab").await?;
    flow.require_visible(
        &Locator::text("Hide Topic Notes Globally"),
        "global toggle",
    )
    .await?;
    flow.check_visible(
        &Locator::text("Hide Topic Notes Globally"),
        "visibility toggle present",
    )
    .await;

    flow.capture("verification.png").await?;
    Ok(())
}

/// Same entry as [`admin_console`] but scrolls the visibility toggle into
/// view before capturing, for evidence of below-the-fold layout.
pub async fn admin_scroll(flow: &mut Flow<'_>) -> Result<()> {
    flow.open_and_seed(&admin_seed()).await?;

    flow.try_click(&Locator::text("I Agree & Continue"), "dismiss terms")
        .await;

    flow.require_visible(&Locator::text("Admin Console"), "admin dashboard")
        .await?;
    flow.click(&Locator::text("Visibility"), "visibility tab").await?;

    let toggle = Locator::text("Hide Topic Notes Globally");
    flow.require_visible(&toggle, "global toggle").await?;
    flow.scroll_into_view(&toggle, "scroll to toggle").await?;

    flow.capture("verification_scrolled.png").await?;
    Ok(())
}

/// Regression check that retired dashboard sections stayed removed from
/// the DOM, not just hidden.
pub async fn dashboard_cleanup(flow: &mut Flow<'_>) -> Result<()> {
    let spec = SeedSpec::new(
        MockUser::admin("test-admin-1", "Test Admin").with_credits(99999),
        FeatureFlags::new(),
    )
    .clearing_storage();
    flow.open_and_seed(&spec).await?;

    flow.require_visible(&Locator::text("Admin Console"), "admin dashboard")
        .await?;

    flow.check_absent_markup("EXPLORE BANNERS", "explore banners removed")
        .await;
    flow.check_absent_markup("FEATURE CONTROL", "feature control removed")
        .await;

    flow.capture("admin_dashboard.png").await?;
    Ok(())
}
