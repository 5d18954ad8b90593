//! Run command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use qlink_hal::{DeviceConfig, DeviceRegistry};

use super::common::{load_program, print_samples, samples_json};

/// Arguments of the run command.
pub struct RunArgs<'a> {
    pub input: &'a str,
    pub device: &'a str,
    pub wires: Option<usize>,
    pub shots: u32,
    pub token: Option<String>,
    pub poll_timeout: u64,
    pub format: &'a str,
}

/// Execute the run command.
pub async fn execute(args: RunArgs<'_>) -> Result<()> {
    let program = load_program(args.input)?;
    let wires = args.wires.unwrap_or_else(|| program.num_wires());
    if wires == 0 {
        anyhow::bail!("Cannot infer the number of wires; pass --wires");
    }

    let json = match args.format {
        "json" => true,
        "table" => false,
        other => anyhow::bail!("Unknown output format: '{other}'. Available: table, json"),
    };

    if !json {
        println!(
            "{} Running {} on {} ({} wires, {} shots)",
            style("→").cyan().bold(),
            style(args.input).green(),
            style(args.device).yellow(),
            wires,
            args.shots
        );
        println!(
            "  Loaded: {} operations, {} rotations",
            program.operations.len(),
            program.rotations.len()
        );
    }

    debug!("Operations: {:?}", program.operations);
    debug!("Rotations: {:?}", program.rotations);

    let mut registry = DeviceRegistry::new();
    qlink_adapter_aqt::register_devices(&mut registry);

    let mut config = DeviceConfig::new(args.device)
        .with_extra("wires", serde_json::json!(wires))
        .with_extra("shots", serde_json::json!(args.shots))
        .with_extra("poll_timeout_ms", serde_json::json!(args.poll_timeout.saturating_mul(1000)));
    if let Some(token) = args.token {
        config = config.with_token(token);
    }

    let mut device = registry.create(args.device, config).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create device '{}': {e}. Available: {}",
            args.device,
            registry.available_devices().join(", ")
        )
    })?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Running on {}...", device.name()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = device.execute(&program.operations, &program.rotations).await;
    spinner.finish_and_clear();
    let samples = outcome?;

    if json {
        println!("{}", serde_json::to_string_pretty(&samples_json(&samples))?);
    } else {
        print_samples(&samples);
    }

    Ok(())
}
