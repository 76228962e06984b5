use std::io::Write;

use unipoll_api::paths;

use super::Context;
use crate::cli::{DumpArgs, DumpTarget};
use crate::error::CliError;

/// Print raw controller JSON, one document per line.
pub async fn handle(ctx: &Context, args: &DumpArgs) -> Result<(), CliError> {
    let url = ctx.controller.as_deref();
    let ctrl = ctx.collector.controller(url).await?;

    let bodies = match &args.what {
        DumpTarget::Sites => vec![ctrl.get_json(paths::SITES, None).await?],
        DumpTarget::Other(path) => vec![ctrl.get_json(path, None).await?],
        target @ (DumpTarget::Devices | DumpTarget::Clients) => {
            let mut sites = ctx.collector.sites(url).await?;
            if let Some(name) = &args.site {
                sites.retain(|s| &s.name == name);
                if sites.is_empty() {
                    return Err(CliError::NotFound {
                        resource_type: "site".into(),
                        identifier: name.clone(),
                        list_command: "sites".into(),
                    });
                }
            }
            let mut bodies = Vec::with_capacity(sites.len());
            for site in &sites {
                let path = if *target == DumpTarget::Devices {
                    paths::devices(&site.name)
                } else {
                    paths::clients(&site.name)
                };
                bodies.push(ctrl.get_json(&path, None).await?);
            }
            bodies
        }
    };

    let mut out = std::io::stdout().lock();
    for body in bodies {
        out.write_all(&body)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
