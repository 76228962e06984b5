//! Command handlers. Every command loads the config, builds one collector
//! and hands it to its handler.

mod devmgr;
mod dump;
mod events;
mod poll;
mod sites;

use std::time::Duration;

use unipoll_api::Controller;
use unipoll_api::models::Site;
use unipoll_core::{Filter, UnifiCollector};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Everything a handler needs: the collector over all configured
/// controllers and the global selection flags.
pub struct Context {
    pub collector: UnifiCollector,
    pub interval: Duration,
    pub controller: Option<String>,
}

impl Context {
    fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let path = global
            .config
            .clone()
            .unwrap_or_else(unipoll_config::config_path);
        let cfg = unipoll_config::load_config(Some(&path))
            .map_err(|e| CliError::config(e, &path))?;
        let targets = cfg.targets().map_err(|e| CliError::config(e, &path))?;
        tracing::debug!(controllers = targets.len(), path = %path.display(), "config loaded");

        Ok(Self {
            collector: UnifiCollector::new(targets),
            interval: cfg.defaults.interval,
            controller: global.controller.clone(),
        })
    }

    /// Collector filter honoring `--controller`.
    pub fn filter(&self, dur: Duration) -> Filter {
        Filter {
            controller: self.controller.clone(),
            dur,
            skip_events: false,
        }
    }

    /// URLs of the controllers this invocation talks to.
    pub fn urls(&self) -> Vec<String> {
        match &self.controller {
            Some(url) => vec![url.clone()],
            None => self.collector.targets().map(|t| t.url().to_owned()).collect(),
        }
    }
}

pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::load(&cli.global)?;
    tracing::debug!(command = ?cli.command, "dispatching command");

    match cli.command {
        Command::Poll(args) => poll::handle(&ctx, &args).await,
        Command::Sites => sites::handle(&ctx).await,
        Command::Dump(args) => dump::handle(&ctx, &args).await,
        Command::Events(args) => events::handle(&ctx, &args).await,
        Command::Devmgr(args) => devmgr::handle(&ctx, &args).await,
    }
}

/// Look a site up by short name on the controller itself, ignoring the
/// configured site filter.
async fn find_site(ctrl: &Controller, name: &str) -> Result<Site, CliError> {
    ctrl.get_sites()
        .await?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "site".into(),
            identifier: name.to_owned(),
            list_command: "sites".into(),
        })
}
