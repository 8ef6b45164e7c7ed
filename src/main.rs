mod models;
mod services;

use anyhow::Result;
use models::{seed_records, ConsoleConfig, StatusFilter, VmId, VmRecord};
use services::{Console, QueryBar, VmRegistry};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = ConsoleConfig::load().unwrap_or_default();

    // The --status flag plays the part of the address bar's query parameter.
    let initial_status = std::env::args()
        .skip_while(|arg| arg != "--status")
        .nth(1);

    let nav = match initial_status {
        Some(status) => Arc::new(QueryBar::with_status(config.base_path.clone(), status)),
        None => Arc::new(QueryBar::new(config.base_path.clone())),
    };

    let registry = VmRegistry::with_restart_delay(seed_records(), config.restart_delay());
    let mut console = Console::new(registry, nav.clone());

    println!("vm-console — type 'help' for commands");
    print_table(&console.visible().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.next();

        match command {
            "list" => print_table(&console.visible().await),
            "all" => print_table(&console.records().await),
            "filter" => match arg.map(str::parse::<StatusFilter>) {
                Some(Ok(filter)) => {
                    console.set_filter(filter);
                    print_table(&console.visible().await);
                }
                Some(Err(err)) => eprintln!("{err}"),
                None => println!("active filter: {}", console.filter()),
            },
            "start" | "stop" | "restart" | "delete" => match arg.map(str::parse::<u32>) {
                Some(Ok(raw)) => {
                    let id = VmId(raw);
                    match command {
                        "start" => console.start(id).await,
                        "stop" => console.stop(id).await,
                        "restart" => console.restart(id).await,
                        _ => console.delete(id).await,
                    }
                    print_table(&console.visible().await);
                }
                _ => eprintln!("usage: {command} <id>"),
            },
            "url" => println!("{}", nav.href()),
            "export" => println!("{}", serde_json::to_string_pretty(&console.records().await)?),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => eprintln!("unknown command: {other}"),
        }
    }

    Ok(())
}

fn print_table(records: &[VmRecord]) {
    if records.is_empty() {
        println!("(no VMs match the active filter)");
        return;
    }
    println!(
        "{:<4} {:<12} {:<12} {:<14} {:<12} {:<16} {:<8} {}",
        "ID", "NAME", "STATUS", "RESOURCE GRP", "LOCATION", "SIZE", "OS", "IP"
    );
    for vm in records {
        println!(
            "{:<4} {:<12} {:<12} {:<14} {:<12} {:<16} {:<8} {}",
            vm.id, vm.name, vm.status, vm.resource_group, vm.location, vm.size, vm.os_type,
            vm.ip_address
        );
    }
}

fn print_help() {
    println!("commands:");
    println!("  list                     show the filtered VM list");
    println!("  all                      show every VM regardless of filter");
    println!("  filter [all|Running|Stopped]  show or change the status filter");
    println!("  start|stop|restart|delete <id>");
    println!("  url                      print the navigational location");
    println!("  export                   dump the registry as JSON");
    println!("  quit");
}
