//! Session seeding: inject a mock user and onboarding-suppression flags
//! into the app's localStorage, then reload so initialization picks them up.
//!
//! The app reads two date formats that are NOT interchangeable: the daily
//! tracker/challenge keys expect the locale `toDateString()` form
//! ("Thu Aug 28 2025"), while user-record dates are ISO strings.
//! [`FlagValue::Today`] resolves in-page to the locale form; ISO dates stay
//! literals on the user record.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::driver::Driver;
use crate::error::Result;
use crate::js::js_string;

pub const CURRENT_USER_KEY: &str = "nst_current_user";
pub const TERMS_ACCEPTED_KEY: &str = "nst_terms_accepted";
pub const HAS_SEEN_WELCOME_KEY: &str = "nst_has_seen_welcome";
pub const LAST_DAILY_TRACKER_KEY: &str = "nst_last_daily_tracker_date";
pub const LAST_DAILY_CHALLENGE_KEY: &str = "nst_last_daily_challenge_date";

/// How long the app is given to settle after the post-seed reload.
pub const SETTLE_AFTER_RELOAD: Duration = Duration::from_secs(3);

/// The closed set of roles the target app recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Admin,
}

/// One MCQ attempt in a student's history. Drives the revision hub's
/// due-date grouping; an old ISO `date` makes the attempt due today.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McqAttempt {
    pub id: String,
    pub chapter_id: String,
    pub chapter_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub date: String,
    /// JSON-encoded per-topic report, stored by the app as a string.
    pub ultra_analysis_report: String,
}

/// Synthetic user record, serialized verbatim into `nst_current_user`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_level: Option<String>,
    /// Outer `None` leaves the key off the record; `Some(None)` writes an
    /// explicit JSON `null`, which some student records carry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<Option<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mcq_history: Vec<McqAttempt>,
}

impl MockUser {
    pub fn admin(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Role::Admin,
            credits: None,
            is_premium: Some(true),
            subscription_tier: None,
            subscription_level: None,
            subscription_end_date: None,
            board: None,
            class_level: None,
            stream: None,
            mcq_history: Vec::new(),
        }
    }

    pub fn student(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Role::Student,
            credits: None,
            is_premium: None,
            subscription_tier: None,
            subscription_level: None,
            subscription_end_date: None,
            board: None,
            class_level: None,
            stream: None,
            mcq_history: Vec::new(),
        }
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }

    /// Put the `stream` key on the record; `None` serializes as `null`.
    pub fn with_stream(mut self, stream: Option<String>) -> Self {
        self.stream = Some(stream);
        self
    }
}

/// Value written into a flag key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    /// Verbatim string, e.g. an ISO date.
    Literal(String),
    /// Resolved in-page as `new Date().toDateString()` so "today" matches
    /// the browser's own locale clock, not the host's.
    Today,
}

impl FlagValue {
    fn to_js_expr(&self) -> String {
        match self {
            FlagValue::Bool(b) => js_string(if *b { "true" } else { "false" }),
            FlagValue::Literal(s) => js_string(s),
            FlagValue::Today => "new Date().toDateString()".to_string(),
        }
    }
}

/// Ordered flag set written alongside the user record.
#[derive(Debug, Clone, Default)]
pub struct FeatureFlags(Vec<(String, FlagValue)>);

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every suppression flag the onboarding flows check.
    pub fn suppress_all_onboarding() -> Self {
        Self::new()
            .terms_accepted()
            .has_seen_welcome()
            .tracker_seen_today()
            .challenge_seen_today()
    }

    pub fn terms_accepted(self) -> Self {
        self.set(TERMS_ACCEPTED_KEY, FlagValue::Bool(true))
    }

    pub fn has_seen_welcome(self) -> Self {
        self.set(HAS_SEEN_WELCOME_KEY, FlagValue::Bool(true))
    }

    pub fn tracker_seen_today(self) -> Self {
        self.set(LAST_DAILY_TRACKER_KEY, FlagValue::Today)
    }

    pub fn challenge_seen_today(self) -> Self {
        self.set(LAST_DAILY_CHALLENGE_KEY, FlagValue::Today)
    }

    pub fn set(mut self, key: impl Into<String>, value: FlagValue) -> Self {
        self.0.push((key.into(), value));
        self
    }

    pub fn entries(&self) -> &[(String, FlagValue)] {
        &self.0
    }
}

/// A complete seeding request: user record, flag set, and whether to wipe
/// pre-existing storage first.
#[derive(Debug, Clone)]
pub struct SeedSpec {
    pub user: MockUser,
    pub flags: FeatureFlags,
    pub clear_storage: bool,
}

impl SeedSpec {
    pub fn new(user: MockUser, flags: FeatureFlags) -> Self {
        Self {
            user,
            flags,
            clear_storage: false,
        }
    }

    pub fn clearing_storage(mut self) -> Self {
        self.clear_storage = true;
        self
    }

    /// The injection script: one evaluate call writing every key.
    pub fn to_js(&self) -> Result<String> {
        let user_json = serde_json::to_string(&self.user)?;
        let mut body = String::new();
        if self.clear_storage {
            body.push_str("localStorage.clear();\n");
        }
        body.push_str(&format!(
            "localStorage.setItem({}, {});\n",
            js_string(CURRENT_USER_KEY),
            js_string(&user_json)
        ));
        for (key, value) in self.flags.entries() {
            body.push_str(&format!(
                "localStorage.setItem({}, {});\n",
                js_string(key),
                value.to_js_expr()
            ));
        }
        Ok(format!("(() => {{\n{body}return true;\n}})()"))
    }
}

/// Write the spec into storage and reload so the app re-reads it.
///
/// No failure handling beyond propagation: if the app ignores the injected
/// state, later locator steps surface it as element-not-found.
pub async fn apply(driver: &dyn Driver, spec: &SeedSpec) -> Result<()> {
    info!(target = "uiv", user = %spec.user.name, role = ?spec.user.role, "seeding session");
    driver.eval(&spec.to_js()?).await?;
    driver.reload().await?;
    driver.pause(SETTLE_AFTER_RELOAD).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_app_shape() {
        let user = MockUser::admin("admin-123", "Test Admin").with_credits(9999);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "admin-123");
        assert_eq!(json["role"], "ADMIN");
        assert_eq!(json["isPremium"], true);
        assert_eq!(json["credits"], 9999);
        // Unset optionals stay off the record entirely.
        assert!(json.get("subscriptionTier").is_none());
        assert!(json.get("mcqHistory").is_none());
    }

    #[test]
    fn stream_distinguishes_absent_from_null() {
        let bare = MockUser::student("s", "S");
        assert!(serde_json::to_value(&bare).unwrap().get("stream").is_none());

        let with_null = MockUser::student("s", "S").with_stream(None);
        let json = serde_json::to_value(&with_null).unwrap();
        assert!(json.as_object().unwrap().contains_key("stream"));
        assert!(json["stream"].is_null());

        let named = MockUser::student("s", "S").with_stream(Some("Science".into()));
        assert_eq!(serde_json::to_value(&named).unwrap()["stream"], "Science");
    }

    #[test]
    fn mcq_history_round_trips_field_names() {
        let mut user = MockUser::student("test-user", "Test Student");
        user.mcq_history.push(McqAttempt {
            id: "h1".into(),
            chapter_id: "ch1".into(),
            chapter_title: "Physics Chapter 1".into(),
            score: 40,
            total_questions: 100,
            date: "2023-01-01T00:00:00Z".into(),
            ultra_analysis_report: "{}".into(),
        });
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["mcqHistory"][0]["chapterTitle"], "Physics Chapter 1");
        assert_eq!(json["mcqHistory"][0]["totalQuestions"], 100);
    }

    #[test]
    fn seed_script_writes_every_key() {
        let spec = SeedSpec::new(
            MockUser::admin("a", "A"),
            FeatureFlags::suppress_all_onboarding(),
        );
        let js = spec.to_js().unwrap();
        assert!(js.contains(CURRENT_USER_KEY));
        assert!(js.contains(TERMS_ACCEPTED_KEY));
        assert!(js.contains(HAS_SEEN_WELCOME_KEY));
        assert!(js.contains(LAST_DAILY_TRACKER_KEY));
        assert!(js.contains(LAST_DAILY_CHALLENGE_KEY));
        assert!(!js.contains("localStorage.clear"));
    }

    #[test]
    fn today_flag_resolves_in_page() {
        let spec = SeedSpec::new(
            MockUser::student("s", "S"),
            FeatureFlags::new().tracker_seen_today(),
        );
        let js = spec.to_js().unwrap();
        assert!(js.contains("new Date().toDateString()"));
    }

    #[test]
    fn clearing_storage_prepends_clear() {
        let spec = SeedSpec::new(MockUser::admin("a", "A"), FeatureFlags::new())
            .clearing_storage();
        let js = spec.to_js().unwrap();
        assert!(js.contains("localStorage.clear();"));
    }

    #[test]
    fn bool_flags_write_string_values() {
        assert_eq!(FlagValue::Bool(true).to_js_expr(), "\"true\"");
        assert_eq!(
            FlagValue::Literal("2025-12-31T00:00:00.000Z".into()).to_js_expr(),
            "\"2025-12-31T00:00:00.000Z\""
        );
    }
}
