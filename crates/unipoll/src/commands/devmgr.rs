use std::io::Write;

use unipoll_api::{DevMgrCmd, DevMgrCommand};

use super::{Context, find_site};
use crate::cli::DevmgrArgs;
use crate::error::CliError;

pub async fn handle(ctx: &Context, args: &DevmgrArgs) -> Result<(), CliError> {
    let command = build_command(args)?;
    let ctrl = ctx.collector.controller(ctx.controller.as_deref()).await?;
    let site = find_site(&ctrl, &args.site).await?;

    let reply = ctrl.devmgr(&site, &command).await?;
    tracing::info!(cmd = %args.cmd, mac = %command.mac, site = %site.name, "command sent");
    if !reply.is_empty() {
        let mut out = std::io::stdout().lock();
        out.write_all(&reply)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn build_command(args: &DevmgrArgs) -> Result<DevMgrCommand, CliError> {
    let missing = |field: &str| CliError::Validation {
        field: field.into(),
        reason: format!("required for {}", args.cmd),
    };

    let command = DevMgrCommand::new(args.cmd, &args.mac);
    Ok(match args.cmd {
        DevMgrCmd::PowerCycle => command.with_port(args.port.ok_or_else(|| missing("--port"))?),
        DevMgrCmd::UpgradeExternal => {
            command.with_url(args.url.as_deref().ok_or_else(|| missing("--url"))?)
        }
        DevMgrCmd::Migrate => {
            command.with_inform_url(args.url.as_deref().ok_or_else(|| missing("--url"))?)
        }
        _ => command,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn args(cmd: DevMgrCmd, port: Option<u32>, url: Option<&str>) -> DevmgrArgs {
        DevmgrArgs {
            cmd,
            mac: "AA:BB:CC:00:00:01".into(),
            port,
            url: url.map(str::to_owned),
            site: "default".into(),
        }
    }

    #[test]
    fn power_cycle_needs_port() {
        assert!(matches!(
            build_command(&args(DevMgrCmd::PowerCycle, None, None)),
            Err(CliError::Validation { .. })
        ));
        let cmd = build_command(&args(DevMgrCmd::PowerCycle, Some(3), None)).unwrap();
        assert_eq!(cmd.port_idx, Some(3));
        assert_eq!(cmd.mac, "aa:bb:cc:00:00:01");
    }

    #[test]
    fn url_goes_to_the_right_field() {
        let upgrade =
            build_command(&args(DevMgrCmd::UpgradeExternal, None, Some("https://fw"))).unwrap();
        assert_eq!(upgrade.url.as_deref(), Some("https://fw"));
        assert_eq!(upgrade.inform_url, None);

        let migrate =
            build_command(&args(DevMgrCmd::Migrate, None, Some("http://inform"))).unwrap();
        assert_eq!(migrate.inform_url.as_deref(), Some("http://inform"));
        assert!(build_command(&args(DevMgrCmd::Migrate, None, None)).is_err());
    }

    #[test]
    fn plain_commands_ignore_extras() {
        let cmd = build_command(&args(DevMgrCmd::Restart, Some(1), Some("x"))).unwrap();
        assert_eq!(cmd.port_idx, None);
        assert_eq!(cmd.url, None);
    }
}
