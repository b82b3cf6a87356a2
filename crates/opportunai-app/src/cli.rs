//! CLI argument definitions for the OpportunAI application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use opportunai_auth::API_URL_ENV;
use opportunai_core::{CompanyFilter, CompatibilityBand, TenderFilter, TenderStatus, ValueBand};

static DEFAULT_COMMAND: Command = Command::Chat { no_delay: false };

/// Env var naming the configuration file.
pub const CONFIG_ENV: &str = "OPPORTUNAI_CONFIG";

/// OpportunAI: tenders, partner companies and a scripted assistant.
#[derive(Parser, Debug)]
#[command(name = "opportunai", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding persisted credentials.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Backend base URL, e.g. http://localhost:3000/api.
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Talk to the assistant (default).
    Chat {
        /// Reveal replies immediately.
        #[arg(long)]
        no_delay: bool,
    },
    /// List tenders.
    Tenders(TenderArgs),
    /// List partner companies.
    Companies(CompanyArgs),
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Keep the session across restarts.
        #[arg(long)]
        remember_me: bool,
    },
    /// Register a company account.
    Register(RegisterArgs),
    /// Show the logged-in user's profile.
    Profile {
        #[arg(long)]
        json: bool,
    },
    /// End the session and forget stored credentials.
    Logout,
}

#[derive(Args, Debug, Default)]
pub struct TenderArgs {
    /// Matches title, organ or location.
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,
    #[arg(long)]
    pub location: Option<String>,
    /// Value range.
    #[arg(long, value_parser = ["all", "low", "mid", "high"])]
    pub value: Option<String>,
    /// Compatibility range.
    #[arg(long, value_parser = ["all", "high", "mid", "low"])]
    pub compatibility: Option<String>,
    #[arg(long, value_parser = ["all", "open", "closing", "closed"])]
    pub status: Option<String>,
    #[arg(long)]
    pub json: bool,
}

impl TenderArgs {
    pub fn filter(&self) -> TenderFilter {
        TenderFilter {
            query: self.query.clone(),
            location: self.location.clone(),
            value_band: self.value.as_deref().and_then(ValueBand::from_key),
            compatibility_band: self
                .compatibility
                .as_deref()
                .and_then(CompatibilityBand::from_key),
            status: self.status.as_deref().and_then(TenderStatus::from_key),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CompanyArgs {
    /// Matches name, sector or location.
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, value_parser = ["all", "high", "mid", "low"])]
    pub compatibility: Option<String>,
    #[arg(long)]
    pub json: bool,
}

impl CompanyArgs {
    pub fn filter(&self) -> CompanyFilter {
        CompanyFilter {
            query: self.query.clone(),
            location: self.location.clone(),
            compatibility_band: self
                .compatibility
                .as_deref()
                .and_then(CompatibilityBand::from_key),
        }
    }
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub company_name: String,
    #[arg(long)]
    pub cnpj: String,
    #[arg(long)]
    pub sector: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    /// Accept the terms and conditions.
    #[arg(long)]
    pub accept_terms: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > OPPORTUNAI_CONFIG env var > ~/.opportunai/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the data directory, expanding a leading `~`.
    ///
    /// Priority: --data-dir flag > config file value.
    pub fn resolve_data_dir(&self, config_data_dir: &str) -> PathBuf {
        match &self.data_dir {
            Some(p) => p.clone(),
            None => expand_home(config_data_dir),
        }
    }

    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_log_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_log_level.to_string())
    }

    /// Resolve the backend base URL.
    ///
    /// Priority: --api-url flag > OPPORTUNAI_API_URL env var > config file value.
    pub fn resolve_api_url(&self, config_base_url: &str) -> String {
        self.pick_api_url(std::env::var(API_URL_ENV).ok(), config_base_url)
    }

    fn pick_api_url(&self, env: Option<String>, config_base_url: &str) -> String {
        self.api_url
            .clone()
            .or(env.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| config_base_url.to_string())
    }

    /// The subcommand to run; `chat` when none is given.
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&DEFAULT_COMMAND)
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let home = std::env::var("USERPROFILE");
    #[cfg(not(target_os = "windows"))]
    let home = std::env::var("HOME");
    home.ok().map(PathBuf::from)
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
        return PathBuf::from(".").join(rest);
    }
    PathBuf::from(path)
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(".opportunai").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("opportunai").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_command_is_chat() {
        let cli = parse(&[]);
        assert!(matches!(cli.command(), Command::Chat { no_delay: false }));
    }

    #[test]
    fn test_chat_no_delay() {
        let cli = parse(&["chat", "--no-delay"]);
        assert!(matches!(cli.command(), Command::Chat { no_delay: true }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["tenders", "--log-level", "debug", "--data-dir", "/tmp/opp"]);
        assert_eq!(cli.resolve_log_level("info"), "debug");
        assert_eq!(cli.resolve_data_dir("~/.opportunai/data"), PathBuf::from("/tmp/opp"));
    }

    #[test]
    fn test_tender_filter_from_flags() {
        let cli = parse(&[
            "tenders", "-q", "segurança", "--value", "high", "--compatibility", "all", "--status",
            "open",
        ]);
        let Command::Tenders(args) = cli.command() else {
            panic!("expected tenders");
        };
        let filter = args.filter();
        assert_eq!(filter.query, "segurança");
        assert_eq!(filter.value_band, Some(ValueBand::High));
        assert_eq!(filter.compatibility_band, None);
        assert_eq!(filter.status, Some(TenderStatus::Open));
    }

    #[test]
    fn test_unknown_band_rejected() {
        let result = CliArgs::try_parse_from(["opportunai", "companies", "--compatibility", "top"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_priority() {
        let cli = parse(&["--api-url", "http://cli/api", "profile"]);
        assert_eq!(
            cli.pick_api_url(Some("http://env/api".into()), "http://file/api"),
            "http://cli/api"
        );

        let cli = parse(&["profile"]);
        assert_eq!(
            cli.pick_api_url(Some("http://env/api".into()), "http://file/api"),
            "http://env/api"
        );
        assert_eq!(cli.pick_api_url(None, "http://file/api"), "http://file/api");
        assert_eq!(cli.pick_api_url(Some("  ".into()), "http://file/api"), "http://file/api");
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/var/lib/opp"), PathBuf::from("/var/lib/opp"));
        assert!(expand_home("~/.opportunai/data").ends_with(".opportunai/data"));
    }
}
