//! netedit show - list interfaces.

use clap::Args;
use netedit::{Error, Interface};
use serde::Serialize;

use super::{Context, or_dash};

#[derive(Args)]
pub struct ShowCmd {
    /// Only show this interface.
    name: Option<String>,
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    interface: &'a Interface,
    editable: bool,
}

impl ShowCmd {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let snapshot = ctx.sync.refresh().await?;
        let policy = ctx.sync.policy();

        let interfaces: Vec<&Interface> = match &self.name {
            Some(name) => vec![snapshot.get(name).ok_or_else(|| Error::InterfaceNotFound {
                name: name.clone(),
            })?],
            None => snapshot.iter().collect(),
        };

        if ctx.json {
            let rows: Vec<Row<'_>> = interfaces
                .into_iter()
                .map(|interface| Row {
                    interface,
                    editable: policy.is_editable(&interface.name),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        println!(
            "{:<16} {:<6} {:<8} {:<16} {:<16} {:<16} {:<24} EDITABLE",
            "NAME", "STATUS", "MODE", "ADDRESS", "SUBNET", "GATEWAY", "DNS"
        );
        for iface in interfaces {
            // Only an up link has a meaningful subnet, gateway and DNS
            let up = iface.status.is_up();
            let dns = iface.dns.join(",");
            println!(
                "{:<16} {:<6} {:<8} {:<16} {:<16} {:<16} {:<24} {}",
                iface.name,
                iface.status.to_string(),
                iface.mode.to_string(),
                or_dash(iface.address.as_deref()),
                or_dash(iface.subnet.as_deref().filter(|_| up)),
                or_dash(iface.gateway.as_deref().filter(|_| up)),
                or_dash(Some(dns.as_str()).filter(|_| up)),
                if policy.is_editable(&iface.name) {
                    "yes"
                } else {
                    "no"
                },
            );
        }

        Ok(())
    }
}
