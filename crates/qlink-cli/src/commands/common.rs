//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Deserialize;

use qlink_hal::{Operation, Samples};

/// Operations to run plus the rotations that diagonalize the observables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Program {
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub rotations: Vec<Operation>,
}

/// Either a full program object or a bare operation list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProgramFile {
    Program(Program),
    Operations(Vec<Operation>),
}

impl Program {
    /// Smallest wire count that covers every operation and rotation.
    pub fn num_wires(&self) -> usize {
        self.operations
            .iter()
            .chain(&self.rotations)
            .flat_map(|op| op.wires.iter().copied())
            .max()
            .map_or(0, |w| w + 1)
    }
}

/// Parse a program from JSON source.
pub fn parse_program(source: &str) -> Result<Program> {
    let file: ProgramFile = serde_json::from_str(source).context("Invalid program JSON")?;
    Ok(match file {
        ProgramFile::Program(program) => program,
        ProgramFile::Operations(operations) => Program {
            operations,
            rotations: Vec::new(),
        },
    })
}

/// Load a program from a JSON file.
pub fn load_program(path: &str) -> Result<Program> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    parse_program(&source)
}

/// Print samples as a histogram table.
pub fn print_samples(samples: &Samples) {
    println!(
        "\n{} Results ({} shots, {} wires):",
        style("✓").green().bold(),
        samples.num_shots(),
        samples.num_wires()
    );

    let counts = samples.counts();
    let sorted = counts.sorted();
    let total = counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    let expvals: Vec<String> = (0..samples.num_wires())
        .filter_map(|w| samples.expval_z(w).map(|e| format!("{e:+.3}")))
        .collect();
    if !expvals.is_empty() {
        println!("\n  <Z> per wire: {}", style(expvals.join(" ")).yellow());
    }
}

/// Samples as JSON: the shot matrix plus its histogram.
pub fn samples_json(samples: &Samples) -> serde_json::Value {
    let shots: Vec<Vec<u8>> = samples
        .bits()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    serde_json::json!({
        "samples": shots,
        "counts": samples.counts(),
    })
}
