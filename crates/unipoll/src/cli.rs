//! Clap derive structures for the `unipoll` binary.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use unipoll_api::DevMgrCmd;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unipoll -- poll UniFi controllers for metrics and events
#[derive(Debug, Parser)]
#[command(
    name = "unipoll",
    version,
    about = "Collect metrics and events from UniFi network controllers",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "UNIPOLL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Only talk to the configured controller with this URL
    #[arg(long, short = 'c', global = true)]
    pub controller: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll every configured controller on the configured interval
    Poll(PollArgs),

    /// List the sites each controller would poll
    Sites,

    /// Print a raw controller response for debugging
    Dump(DumpArgs),

    /// Collect events, alarms, anomalies and IDS records once
    Events(EventsArgs),

    /// Send a device-manager command
    Devmgr(DevmgrArgs),
}

// ── Subcommand Args ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Collect once and exit
    #[arg(long)]
    pub once: bool,
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// sites, devices, clients, or other:<api path>
    pub what: DumpTarget,

    /// Limit device and client dumps to one site (short name)
    #[arg(long, short = 's')]
    pub site: Option<String>,
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// How far back to look
    #[arg(long, default_value = "1h", value_parser = humantime::parse_duration)]
    pub since: Duration,
}

#[derive(Debug, Args)]
pub struct DevmgrArgs {
    /// Command name, e.g. restart, set-locate, power-cycle
    pub cmd: DevMgrCmd,

    /// Target device MAC
    #[arg(long)]
    pub mac: String,

    /// Switch port index (power-cycle)
    #[arg(long)]
    pub port: Option<u32>,

    /// Firmware URL (upgrade-external) or inform URL (migrate)
    #[arg(long)]
    pub url: Option<String>,

    /// Site short name
    #[arg(long, short = 's', default_value = "default")]
    pub site: String,
}

// ── Dump targets ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpTarget {
    Sites,
    Devices,
    Clients,
    /// Any API path, e.g. `other:/api/s/default/stat/health`.
    Other(String),
}

impl FromStr for DumpTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sites" => Ok(Self::Sites),
            "devices" => Ok(Self::Devices),
            "clients" => Ok(Self::Clients),
            other => match other.strip_prefix("other:") {
                Some(path) if !path.is_empty() => Ok(Self::Other(path.to_owned())),
                _ => Err(format!(
                    "expected sites, devices, clients or other:<path>, got '{other}'"
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn dump_targets_parse() {
        assert_eq!("devices".parse::<DumpTarget>().unwrap(), DumpTarget::Devices);
        assert_eq!(
            "other:/api/s/default/stat/health".parse::<DumpTarget>().unwrap(),
            DumpTarget::Other("/api/s/default/stat/health".into())
        );
        assert!("other:".parse::<DumpTarget>().is_err());
        assert!("routers".parse::<DumpTarget>().is_err());
    }

    #[test]
    fn devmgr_args_parse() {
        let cli = Cli::try_parse_from([
            "unipoll", "devmgr", "power-cycle", "--mac", "AA:BB", "--port", "4",
        ])
        .unwrap();
        let Command::Devmgr(args) = cli.command else {
            panic!("expected devmgr");
        };
        assert_eq!(args.cmd, DevMgrCmd::PowerCycle);
        assert_eq!(args.port, Some(4));
        assert_eq!(args.site, "default");
    }

    #[test]
    fn events_since_is_humantime() {
        let cli = Cli::try_parse_from(["unipoll", "events", "--since", "90m"]).unwrap();
        let Command::Events(args) = cli.command else {
            panic!("expected events");
        };
        assert_eq!(args.since, Duration::from_secs(90 * 60));
    }

    #[test]
    fn global_flags_anywhere() {
        let cli =
            Cli::try_parse_from(["unipoll", "poll", "--once", "-vv", "--log-format", "json"])
                .unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Command::Poll(PollArgs { once: true })));
    }
}
