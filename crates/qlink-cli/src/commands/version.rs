//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - AQT gateway device plugin",
        style("qlink").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlink-hal          Device contract, operations, samples");
    println!("  qlink-adapter-aqt  AQT gateway translation and job polling");
    println!("  qlink-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
