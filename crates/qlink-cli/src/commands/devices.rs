//! Devices command implementation.

use anyhow::Result;
use console::style;

use qlink_adapter_aqt::{BASE_HOSTNAME, BASE_URL_ENV, TOKEN_ENV, Target, join_path};
use qlink_hal::DeviceRegistry;

/// Execute the devices command.
pub fn execute() -> Result<()> {
    let mut registry = DeviceRegistry::new();
    qlink_adapter_aqt::register_devices(&mut registry);

    let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| BASE_HOSTNAME.to_string());
    let configured = std::env::var(TOKEN_ENV).is_ok_and(|t| !t.is_empty());

    println!("{} Available devices:\n", style("qlink").cyan().bold());

    for name in registry.available_devices() {
        let Some(target) = Target::from_short_name(&name) else {
            continue;
        };
        println!(
            "  {} {} {}",
            if configured {
                style("●").green()
            } else {
                style("○").yellow()
            },
            style(&name).bold(),
            if target.is_simulator() {
                "(simulator)"
            } else {
                ""
            }
        );
        println!("    Name: {}", target.name());
        println!("    Endpoint: {}", join_path(&base_url, target.path()));
        println!();
    }

    if !configured {
        println!("  Set {TOKEN_ENV} or pass --token to run jobs");
    }

    Ok(())
}
