//! Operations command implementation.

use console::style;

use qlink_adapter_aqt::{OBSERVABLES, OPERATION_MAP};

/// Execute the operations command.
pub fn execute() {
    println!("{} Supported operations:\n", style("qlink").cyan().bold());

    let mut names: Vec<_> = OPERATION_MAP.iter().collect();
    names.sort_by_key(|(name, _)| **name);

    for (name, gate) in names {
        let native = match gate {
            Some(gate) => gate.as_str(),
            None => "decomposed",
        };
        println!("  {:<12} → {}", style(name).bold(), style(native).yellow());
    }

    println!("\n{} Supported observables:\n", style("qlink").cyan().bold());
    for observable in OBSERVABLES {
        println!("  {}", style(observable).bold());
    }
}
