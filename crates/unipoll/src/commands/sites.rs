use super::Context;
use crate::error::CliError;

pub async fn handle(ctx: &Context) -> Result<(), CliError> {
    for url in ctx.urls() {
        let sites = ctx.collector.sites(Some(url.as_str())).await?;
        println!("{url}");
        for site in &sites {
            let health: Vec<String> = site
                .health
                .iter()
                .map(|h| format!("{}={}", h.subsystem, h.status))
                .collect();
            println!("  {:<16} {:<32} {}", site.name, site.site_name, health.join(" "));
        }
    }
    Ok(())
}
