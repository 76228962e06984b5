// Device manager commands
//
// One-shot commands posted to `cmd/devmgr` as a small envelope. Only the
// fields a command needs are serialized.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use crate::controller::Controller;
use crate::endpoints::require_site;
use crate::error::Error;
use crate::models::Site;
use crate::paths;

/// Commands understood by `cmd/devmgr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DevMgrCmd {
    /// Power-cycle one PoE port of a switch.
    PowerCycle,
    Adopt,
    Restart,
    ForceProvision,
    Speedtest,
    SpeedtestStatus,
    SetLocate,
    UnsetLocate,
    Upgrade,
    UpgradeExternal,
    Migrate,
    CancelMigrate,
    SpectrumScan,
}

/// Body posted to `cmd/devmgr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevMgrCommand {
    pub cmd: String,
    pub mac: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inform_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_idx: Option<u32>,
}

impl DevMgrCommand {
    pub fn new(cmd: DevMgrCmd, mac: &str) -> Self {
        Self {
            cmd: cmd.to_string(),
            mac: mac.to_lowercase(),
            url: None,
            inform_url: None,
            port_idx: None,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_owned());
        self
    }

    pub fn with_inform_url(mut self, inform_url: &str) -> Self {
        self.inform_url = Some(inform_url.to_owned());
        self
    }

    pub fn with_port(mut self, port_idx: u32) -> Self {
        self.port_idx = Some(port_idx);
        self
    }
}

impl Controller {
    /// Post `command` to a site's device manager and return the raw reply.
    pub async fn devmgr(&self, site: &Site, command: &DevMgrCommand) -> Result<Vec<u8>, Error> {
        require_site(site)?;
        debug!(site = %site.name, cmd = %command.cmd, mac = %command.mac, "device manager command");

        let body = serde_json::to_value(command).map_err(|e| Error::Decode {
            path: paths::devmgr(&site.name),
            message: e.to_string(),
        })?;
        self.get_json(&paths::devmgr(&site.name), Some(&body))
            .await
            .map_err(|e| match e {
                Error::Http { status, body, .. } => Error::Command {
                    cmd: command.cmd.clone(),
                    status,
                    message: body,
                },
                other => other,
            })
    }

    async fn devmgr_simple(&self, site: &Site, command: DevMgrCommand) -> Result<(), Error> {
        self.devmgr(site, &command).await.map(|_| ())
    }

    /// Power-cycle PoE on `port_idx` of switch `mac`.
    pub async fn power_cycle_port(&self, site: &Site, mac: &str, port_idx: u32) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::PowerCycle, mac).with_port(port_idx))
            .await
    }

    pub async fn adopt(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::Adopt, mac))
            .await
    }

    pub async fn restart(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::Restart, mac))
            .await
    }

    pub async fn force_provision(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::ForceProvision, mac))
            .await
    }

    /// Start a gateway speed test.
    pub async fn speedtest(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::Speedtest, mac))
            .await
    }

    /// Progress or result of the last speed test, as raw JSON.
    pub async fn speedtest_status(&self, site: &Site, mac: &str) -> Result<Vec<u8>, Error> {
        self.devmgr(site, &DevMgrCommand::new(DevMgrCmd::SpeedtestStatus, mac))
            .await
    }

    /// Blink the device LED.
    pub async fn set_locate(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::SetLocate, mac))
            .await
    }

    pub async fn unset_locate(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::UnsetLocate, mac))
            .await
    }

    /// Upgrade to the controller's cached firmware.
    pub async fn upgrade(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::Upgrade, mac))
            .await
    }

    /// Upgrade from a firmware image at `url`.
    pub async fn upgrade_external(&self, site: &Site, mac: &str, url: &str) -> Result<(), Error> {
        self.devmgr_simple(
            site,
            DevMgrCommand::new(DevMgrCmd::UpgradeExternal, mac).with_url(url),
        )
        .await
    }

    /// Point a device at another controller.
    ///
    /// Dream machines and 10Gb gateways do not support migration; the
    /// request is sent unchanged and the controller decides.
    pub async fn migrate(&self, site: &Site, mac: &str, inform_url: &str) -> Result<(), Error> {
        self.devmgr_simple(
            site,
            DevMgrCommand::new(DevMgrCmd::Migrate, mac).with_inform_url(inform_url),
        )
        .await
    }

    pub async fn cancel_migrate(&self, site: &Site, mac: &str) -> Result<(), Error> {
        self.devmgr_simple(site, DevMgrCommand::new(DevMgrCmd::CancelMigrate, mac))
            .await
    }

    /// Start an RF spectrum scan on an access point; returns the raw reply.
    pub async fn spectrum_scan(&self, site: &Site, mac: &str) -> Result<Vec<u8>, Error> {
        self.devmgr(site, &DevMgrCommand::new(DevMgrCmd::SpectrumScan, mac))
            .await
    }
}
