// Site listing is controller-scoped (`/api/self/sites`), unlike every
// other fetcher here.

use tracing::debug;

use crate::controller::Controller;
use crate::error::Error;
use crate::models::{Site, pick};
use crate::paths;

impl Controller {
    /// List every site the user can see.
    ///
    /// `desc` falls back to `name`; records are tagged with
    /// `"{desc} ({name})"` and the controller URL.
    pub async fn get_sites(&self) -> Result<Vec<Site>, Error> {
        let mut sites: Vec<Site> = self.fetch(paths::SITES, None).await?;
        for site in &mut sites {
            site.desc = pick(&[&site.desc, &site.name]).to_owned();
            site.site_name = site.tagged_name();
            site.source_name = self.source_name().to_owned();
        }
        debug!(count = sites.len(), "found sites");
        self.hooks()
            .debug(&format!("Found {} site(s) on controller {}", sites.len(), self.source_name()));
        Ok(sites)
    }
}
