use serde_json::Value;
use tracing::debug;

use crate::controller::Controller;
use crate::dispatch::{Devices, parse_devices};
use crate::endpoints::require_site;
use crate::error::{Error, Partial};
use crate::models::Site;
use crate::paths;

impl Controller {
    /// Devices of one site, bucketed by variant and tagged with the
    /// site's label.
    pub async fn get_site_devices(&self, site: &Site) -> Result<Devices, Error> {
        require_site(site)?;
        let raw: Vec<Value> = self.fetch(&paths::devices(&site.name), None).await?;
        debug!(site = %site.name, count = raw.len(), "fetched device records");
        Ok(parse_devices(
            &raw,
            site.label(),
            self.source_name(),
            self.hooks(),
        ))
    }

    /// Devices across `sites`, in site order.
    pub async fn get_devices(&self, sites: &[Site]) -> Result<Devices, Partial<Devices>> {
        let mut devices = Devices::default();
        for site in sites {
            match self.get_site_devices(site).await {
                Ok(found) => devices.extend(found),
                Err(e) => return Err(Partial::new(devices, e)),
            }
        }
        Ok(devices)
    }
}
