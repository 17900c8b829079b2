//! netedit check / apply - edit one interface.

use clap::Args;
use netedit::edit::{RequestDiff, advise};
use netedit::{AddressingMode, Interface, PendingEdit};
use serde_json::json;

use super::{Context, or_dash};

/// Field overrides applied on top of the observed values.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Interface to edit.
    pub name: String,

    /// New interface name.
    #[arg(long, value_name = "NAME")]
    pub rename: Option<String>,

    /// Addressing mode (dhcp or manual).
    #[arg(long)]
    pub mode: Option<AddressingMode>,

    /// Static IPv4 address.
    #[arg(long)]
    pub address: Option<String>,

    /// Subnet mask or prefix length.
    #[arg(long)]
    pub subnet: Option<String>,

    /// Gateway; an empty value removes it.
    #[arg(long)]
    pub gateway: Option<String>,

    /// Comma-separated DNS servers.
    #[arg(long)]
    pub dns: Option<String>,

    /// Comma-separated routes, e.g. 192.168.0.0/16,10.0.0.0/8.
    #[arg(long)]
    pub routes: Option<String>,

    /// Default route metric.
    #[arg(long)]
    pub metric: Option<String>,
}

impl EditArgs {
    fn apply_to(&self, edit: &mut PendingEdit) {
        let overrides = [
            (&self.rename, &mut edit.new_name),
            (&self.address, &mut edit.address),
            (&self.subnet, &mut edit.subnet),
            (&self.gateway, &mut edit.gateway),
            (&self.dns, &mut edit.dns),
            (&self.routes, &mut edit.routes),
            (&self.metric, &mut edit.metric),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        if let Some(mode) = self.mode {
            edit.mode = mode;
        }
    }

    /// Observe, select the interface and apply the overrides.
    async fn prepare(&self, ctx: &mut Context) -> anyhow::Result<(PendingEdit, Interface)> {
        let snapshot = ctx.sync.refresh().await?;
        let edit = ctx.sync.select(&self.name)?;
        self.apply_to(edit);
        let edit = edit.clone();

        // select() only succeeds for names in the snapshot
        let observed = snapshot.get(&self.name).cloned().unwrap_or_else(|| Interface::new(&self.name));
        Ok((edit, observed))
    }
}

#[derive(Args)]
pub struct CheckCmd {
    #[command(flatten)]
    edit: EditArgs,
}

impl CheckCmd {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let (edit, observed) = self.edit.prepare(ctx).await?;
        ctx.sync.cancel()?;

        let advisories = advise(&edit);
        let request = match edit.validate() {
            Ok(request) => request,
            Err(failure) => {
                for advisory in &advisories {
                    eprintln!("{}", advisory);
                }
                return Err(failure.into());
            }
        };
        let diff = RequestDiff::between(&observed, &request);

        if ctx.json {
            let output = json!({
                "advisories": advisories.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "changes": diff.changes.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "request": request,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        for advisory in &advisories {
            println!("{}", advisory);
        }
        println!("{}", diff.summary());
        println!("Request: {}", request.to_json()?);
        Ok(())
    }
}

#[derive(Args)]
pub struct ApplyCmd {
    #[command(flatten)]
    edit: EditArgs,
}

impl ApplyCmd {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let (_, observed) = self.edit.prepare(ctx).await?;
        let request = ctx.sync.submit().await?;
        let diff = RequestDiff::between(&observed, &request);
        let snapshot = ctx.sync.snapshot();
        let updated = snapshot.get(&request.new_interface_name);

        if ctx.json {
            let output = json!({
                "changes": diff.changes.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "request": request,
                "interface": updated,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("{}", diff.summary());
        for notice in ctx.drain_notices() {
            if !notice.is_error() {
                println!("{}", notice);
            }
        }
        if let Some(iface) = updated {
            println!(
                "{}: {} {} {}/{} gateway {}",
                iface.name,
                iface.status,
                iface.mode,
                or_dash(iface.address.as_deref()),
                or_dash(iface.subnet.as_deref()),
                or_dash(iface.gateway.as_deref()),
            );
        }
        Ok(())
    }
}
