//! Shared fixture layer for browser-driven UI verification.
//!
//! The target application is an externally served SPA with no test-id
//! contract; verification drives it through a real browser the way a
//! human would: inject a mock session into client storage, clear any
//! onboarding overlays, click through the screen under test, assert on
//! visible UI, and capture a screenshot as evidence.
//!
//! The crate factors what used to be duplicated across standalone
//! scripts into one fixture layer: [`seed`] for session injection,
//! [`overlay`] for suppression, [`locator`]/[`wait`] for element lookup,
//! [`evidence`] for assertions and screenshots, and [`flow`] to tie one
//! verification run together. Concrete flows live in [`scenarios`]; the
//! real browser backend is in [`session`], and [`testing`] provides a
//! mock driver for browserless tests.

pub mod driver;
pub mod error;
pub mod evidence;
pub mod flow;
pub mod js;
pub mod locator;
pub mod overlay;
pub mod scenarios;
pub mod seed;
pub mod session;
pub mod testing;
pub mod wait;

pub use driver::Driver;
pub use error::{FixtureError, Result};
pub use evidence::Report;
pub use flow::{Flow, FlowOptions};
pub use locator::{Locator, Pick};
pub use scenarios::Scenario;
pub use seed::{FeatureFlags, FlagValue, McqAttempt, MockUser, Role, SeedSpec};
pub use session::{LaunchOptions, Session};
