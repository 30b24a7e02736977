//! logsift - Entry Point

use chrono::Duration as ChronoDuration;
use clap::Parser;
use logsift::source::{load_dataset, load_meta};
use logsift::state::{AppState, Notice, NoticeKind};
use logsift::view::ColorConfig;
use std::path::PathBuf;
use tracing::{info, warn};

/// logsift - triage tabular log exports in the terminal
#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(version)]
#[command(about = "TUI application for triaging tabular log exports (CSV or saved snapshots)")]
pub struct Args {
    /// CSV export or `.json` snapshot to open
    pub file: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write debug-level logs to this file
    #[arg(long, value_name = "FILE")]
    pub debug: Option<PathBuf>,

    /// Start with this filter applied
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Start showing only marked rows
    #[arg(long)]
    pub marks_only: bool,

    /// Merge marks and comments from a `.meta.json` sidecar
    #[arg(long, value_name = "FILE")]
    pub meta: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = logsift::config::load_config_with_precedence(args.config.clone())?;
        let merged = logsift::config::merge_config(config_file);
        let with_env = logsift::config::apply_env_overrides(merged);
        let marks_only_override = args.marks_only.then_some(true);
        logsift::config::apply_cli_overrides(with_env, args.debug.clone(), marks_only_override)
    };

    logsift::logging::init(&config.log_file_path, config.debug)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let dataset = load_dataset(&args.file)?;
    info!(
        path = %args.file.display(),
        rows = dataset.rows.len(),
        columns = dataset.columns.len(),
        "Dataset loaded"
    );

    let mut state = AppState::new(dataset.into_store());
    state.source_path = Some(args.file.clone());
    state.notice = Notice::new(config.notice_duration);
    state.time_step = ChronoDuration::minutes(config.time_step_minutes as i64);

    if let Some(meta_path) = &args.meta {
        let (marks, comments) = load_meta(meta_path)?;
        let applied = state.merge_overlays(marks, comments);
        info!(path = %meta_path.display(), applied, "Merged sidecar overlays");
        state.notify(
            NoticeKind::Info,
            format!("Merged {applied} marks and comments from {}", meta_path.display()),
        );
    }

    state.set_marks_only(config.marks_only);

    if let Some(pattern) = &args.filter {
        if let Err(err) = state.set_filter_pattern(pattern) {
            warn!(pattern = %pattern, error = %err, "Ignoring startup filter");
            state.notify(NoticeKind::Error, format!("Invalid filter: {err}"));
        }
    }

    logsift::view::run_with_state(state, ColorConfig::from_env_and_args(args.no_color))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["logsift", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["logsift", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_file_is_required() {
        let result = Args::try_parse_from(["logsift"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_file_only_defaults() {
        let args = Args::parse_from(["logsift", "export.csv"]);
        assert_eq!(args.file, PathBuf::from("export.csv"));
        assert_eq!(args.config, None);
        assert_eq!(args.debug, None);
        assert_eq!(args.filter, None);
        assert!(!args.marks_only);
        assert_eq!(args.meta, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_filter_short_and_long() {
        let args = Args::parse_from(["logsift", "a.csv", "-f", "error"]);
        assert_eq!(args.filter.as_deref(), Some("error"));

        let args = Args::parse_from(["logsift", "a.csv", "--filter", "warn|error"]);
        assert_eq!(args.filter.as_deref(), Some("warn|error"));
    }

    #[test]
    fn test_debug_takes_a_path() {
        let args = Args::parse_from(["logsift", "a.csv", "--debug", "/tmp/logsift.log"]);
        assert_eq!(args.debug, Some(PathBuf::from("/tmp/logsift.log")));

        let result = Args::try_parse_from(["logsift", "a.csv", "--debug"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "logsift",
            "session.json",
            "--marks-only",
            "--meta",
            "session.meta.json",
            "--no-color",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.file, PathBuf::from("session.json"));
        assert!(args.marks_only);
        assert_eq!(args.meta, Some(PathBuf::from("session.meta.json")));
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_overrides_flow_through_precedence_chain() {
        use logsift::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        // Defaults → Config File → Env Vars → CLI Args
        let config_file = ConfigFile {
            marks_only: Some(false),
            time_step_minutes: Some(60),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.time_step_minutes, 60);
        assert!(!merged.marks_only);

        let with_env = apply_env_overrides(merged);
        let with_cli = apply_cli_overrides(with_env, Some(PathBuf::from("debug.log")), Some(true));

        assert!(with_cli.marks_only, "CLI should override the config file");
        assert!(with_cli.debug);
        assert_eq!(with_cli.log_file_path, PathBuf::from("debug.log"));
        assert_eq!(with_cli.time_step_minutes, 60);
    }
}
