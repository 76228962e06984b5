use crate::controller::Controller;
use crate::endpoints::{for_each_site, require_site};
use crate::error::{Error, SitesResult};
use crate::models::{Network, RogueAp, Site};
use crate::paths;

impl Controller {
    /// Network (subnet/VLAN) configuration of one site.
    pub async fn get_site_networks(&self, site: &Site) -> Result<Vec<Network>, Error> {
        require_site(site)?;
        let mut networks: Vec<Network> = self.fetch(&paths::networks(&site.name), None).await?;
        let site_name = site.tagged_name();
        for network in &mut networks {
            network.site_name.clone_from(&site_name);
            network.source_name = self.source_name().to_owned();
        }
        Ok(networks)
    }

    pub async fn get_networks(&self, sites: &[Site]) -> SitesResult<Network> {
        for_each_site(sites, |site| self.get_site_networks(site)).await
    }

    /// Neighboring access points the site's APs can hear.
    pub async fn get_site_rogue_aps(&self, site: &Site) -> Result<Vec<RogueAp>, Error> {
        require_site(site)?;
        let mut aps: Vec<RogueAp> = self.fetch(&paths::rogue_aps(&site.name), None).await?;
        let site_name = site.tagged_name();
        for ap in &mut aps {
            ap.site_name.clone_from(&site_name);
            ap.source_name = self.source_name().to_owned();
        }
        Ok(aps)
    }

    pub async fn get_rogue_aps(&self, sites: &[Site]) -> SitesResult<RogueAp> {
        for_each_site(sites, |site| self.get_site_rogue_aps(site)).await
    }
}
