use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uiv_fixture::Scenario;

#[derive(Parser, Debug)]
#[command(name = "uiv")]
#[command(about = "Browser-driven UI verification for the study app")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Target application origin
    #[arg(
        long,
        global = true,
        value_name = "URL",
        default_value = "http://localhost:5000"
    )]
    pub base_url: String,

    /// Directory screenshots are written to
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        default_value = "verification"
    )]
    pub shots_dir: PathBuf,

    /// Per-wait visibility timeout in milliseconds
    #[arg(long, global = true, value_name = "MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Run with a visible browser window
    #[arg(long, global = true)]
    pub headful: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Admin console: pricing and visibility tab navigation
    AdminConsole,
    /// Admin console: visibility toggle scrolled into view
    AdminScroll,
    /// Admin dashboard: retired sections stay out of the DOM
    DashboardCleanup,
    /// Student store reached via the header credits control
    StudentStore,
    /// Plans editor add/edit/delete round trip
    PlansEditor,
    /// Plans editor visual edit capture
    VisualEdit,
    /// Student revision hub with due MCQ history
    RevisionHub,
    /// Admin topic notes manager
    TopicNotes,
    /// Every scenario in sequence, each in a fresh browser
    All,
}

impl Command {
    pub fn scenarios(&self) -> Vec<Scenario> {
        match self {
            Command::AdminConsole => vec![Scenario::AdminConsole],
            Command::AdminScroll => vec![Scenario::AdminScroll],
            Command::DashboardCleanup => vec![Scenario::DashboardCleanup],
            Command::StudentStore => vec![Scenario::StudentStore],
            Command::PlansEditor => vec![Scenario::PlansEditor],
            Command::VisualEdit => vec![Scenario::VisualEdit],
            Command::RevisionHub => vec![Scenario::RevisionHub],
            Command::TopicNotes => vec![Scenario::TopicNotes],
            Command::All => Scenario::all().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scenario_command() {
        let cli = Cli::try_parse_from(["uiv", "plans-editor"]).unwrap();
        assert_eq!(cli.command, Command::PlansEditor);
        assert_eq!(cli.base_url, "http://localhost:5000");
        assert_eq!(cli.shots_dir, PathBuf::from("verification"));
        assert_eq!(cli.timeout_ms, 10_000);
        assert!(!cli.headful);
    }

    #[test]
    fn parse_overridden_origin() {
        let cli = Cli::try_parse_from([
            "uiv",
            "revision-hub",
            "--base-url",
            "http://localhost:5001",
            "--shots-dir",
            "/tmp/shots",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://localhost:5001");
        assert_eq!(cli.shots_dir, PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn all_expands_to_every_scenario() {
        let cli = Cli::try_parse_from(["uiv", "all"]).unwrap();
        assert_eq!(cli.command.scenarios().len(), 8);
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["uiv", "-vv", "admin-console"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn unknown_scenario_fails() {
        assert!(Cli::try_parse_from(["uiv", "nonexistent"]).is_err());
    }
}
