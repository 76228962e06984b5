use serde_json::json;
use tracing::debug;

use crate::controller::Controller;
use crate::endpoints::{for_each_site, require_site};
use crate::error::{Error, SitesResult};
use crate::models::{DpiTable, Site};
use crate::paths;

impl Controller {
    /// Site-wide DPI counters.
    ///
    /// Returns `None` when DPI is disabled on the site (empty reply). More
    /// than one table is a controller bug and surfaces as
    /// [`Error::DpiBug`].
    pub async fn get_site_dpi(&self, site: &Site) -> Result<Option<DpiTable>, Error> {
        require_site(site)?;
        let body = json!({"type": "by_app"});
        let tables: Vec<DpiTable> = self.fetch(&paths::site_dpi(&site.name), Some(&body)).await?;

        let count = tables.len();
        let Some(mut table) = tables.into_iter().next() else {
            self.hooks()
                .debug(&format!("Site DPI data missing! Is DPI enabled? ({})", site.name));
            return Ok(None);
        };
        if count > 1 {
            return Err(Error::DpiBug {
                site: site.name.clone(),
                count,
            });
        }

        table.site_name = site.tagged_name();
        table.source_name = self.source_name().to_owned();
        Ok(Some(table))
    }

    /// Site DPI across `sites`; sites without DPI are skipped.
    pub async fn get_sites_dpi(&self, sites: &[Site]) -> SitesResult<DpiTable> {
        for_each_site(sites, |site| async move {
            Ok(self.get_site_dpi(site).await?.into_iter().collect())
        })
        .await
    }

    /// Per-client DPI counters of one site.
    ///
    /// `name` is the client MAC; the collector swaps in a friendly name
    /// when it knows one.
    pub async fn get_site_client_dpi(&self, site: &Site) -> Result<Vec<DpiTable>, Error> {
        require_site(site)?;
        let body = json!({"type": "by_app"});
        let mut tables: Vec<DpiTable> =
            self.fetch(&paths::client_dpi(&site.name), Some(&body)).await?;
        debug!(site = %site.name, count = tables.len(), "fetched client DPI");

        let site_name = site.tagged_name();
        for table in &mut tables {
            table.name.clone_from(&table.mac);
            table.site_name.clone_from(&site_name);
            table.source_name = self.source_name().to_owned();
        }
        Ok(tables)
    }

    pub async fn get_clients_dpi(&self, sites: &[Site]) -> SitesResult<DpiTable> {
        for_each_site(sites, |site| self.get_site_client_dpi(site)).await
    }
}
