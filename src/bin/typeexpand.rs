use anyhow::Result;
use clap::Parser;

use typeexpand::cli::args::CliArgs;
use typeexpand::cli::driver;

fn main() -> Result<()> {
    // Installs a subscriber only when TYPEEXPAND_LOG or RUST_LOG is set.
    typeexpand::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    println!("{output}");
    Ok(())
}
