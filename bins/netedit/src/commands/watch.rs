//! netedit watch - print interface changes as they are observed.

use std::collections::BTreeMap;
use std::sync::Arc;

use clap::Args;
use netedit::{Interface, Snapshot};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use super::{Context, or_dash};

#[derive(Args)]
pub struct WatchCmd {
    /// Exit after this many snapshot changes.
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

impl WatchCmd {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let mut snapshots = WatchStream::new(ctx.sync.subscribe());
        ctx.sync.start();

        if !ctx.json {
            eprintln!("Watching network interfaces (Ctrl+C to stop)...");
        }

        let mut previous = Arc::new(Snapshot::empty());
        let mut changes = 0;
        let result = loop {
            if self.count.is_some_and(|count| changes >= count) {
                break Ok(());
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => break Ok(()),
                Some(notice) = ctx.notices.recv() => {
                    if notice.is_error() {
                        eprintln!("{}", notice);
                    }
                }
                next = snapshots.next() => {
                    let Some(snapshot) = next else {
                        break Ok(());
                    };
                    // Nothing observed yet, or nothing changed
                    if snapshot.observed_at().is_none() || snapshot.same_state(&previous) {
                        continue;
                    }
                    if let Err(e) = print_changes(&previous, &snapshot, ctx.json) {
                        break Err(e);
                    }
                    previous = snapshot;
                    changes += 1;
                }
            }
        };

        ctx.sync.stop().await;
        result
    }
}

fn summary(iface: &Interface) -> String {
    format!(
        "{} {} {}/{} gw {} routes [{}]",
        iface.status,
        iface.mode,
        or_dash(iface.address.as_deref()),
        or_dash(iface.subnet.as_deref()),
        or_dash(iface.gateway.as_deref()),
        iface.routes.join(", ")
    )
}

fn print_changes(previous: &Snapshot, current: &Snapshot, json: bool) -> anyhow::Result<()> {
    if json {
        let interfaces: BTreeMap<&str, &Interface> =
            current.iter().map(|iface| (iface.name.as_str(), iface)).collect();
        println!("{}", serde_json::to_string(&interfaces)?);
        return Ok(());
    }

    for iface in current.iter() {
        match previous.get(&iface.name) {
            None => println!("+ {} {}", iface.name, summary(iface)),
            Some(old) if old != iface => println!("~ {} {}", iface.name, summary(iface)),
            Some(_) => {}
        }
    }
    for name in previous.names() {
        if current.get(name).is_none() {
            println!("- {}", name);
        }
    }
    Ok(())
}
