use serde_json::json;

use crate::controller::Controller;
use crate::endpoints::{for_each_site, require_site};
use crate::error::{Error, SitesResult};
use crate::models::{Client, Site, User};
use crate::paths;

/// Look-back window for the historical users view: one year.
pub const DEFAULT_USER_WINDOW_HOURS: u32 = 8760;

impl Controller {
    /// Connected clients of one site.
    pub async fn get_site_clients(&self, site: &Site) -> Result<Vec<Client>, Error> {
        require_site(site)?;
        let mut clients: Vec<Client> = self.fetch(&paths::clients(&site.name), None).await?;
        for client in &mut clients {
            client.normalize_names();
            client.site_name = site.label().to_owned();
            client.source_name = self.source_name().to_owned();
        }
        Ok(clients)
    }

    pub async fn get_clients(&self, sites: &[Site]) -> SitesResult<Client> {
        for_each_site(sites, |site| self.get_site_clients(site)).await
    }

    /// Every client seen within `within_hours`, connected or not.
    pub async fn get_site_users(&self, site: &Site, within_hours: u32) -> Result<Vec<User>, Error> {
        require_site(site)?;
        let body = json!({"type": "all", "conn": "all", "within": within_hours});
        let mut users: Vec<User> = self.fetch(&paths::all_users(&site.name), Some(&body)).await?;
        let site_name = site.tagged_name();
        for user in &mut users {
            user.normalize_names();
            user.site_name.clone_from(&site_name);
            user.source_name = self.source_name().to_owned();
        }
        Ok(users)
    }

    pub async fn get_users(&self, sites: &[Site], within_hours: u32) -> SitesResult<User> {
        for_each_site(sites, |site| self.get_site_users(site, within_hours)).await
    }
}
