mod cli;
mod core;
mod fingerprint;
mod harvest;
mod http;
mod reporting;
mod scan;
mod taxonomy;
mod transport;

use clap::{CommandFactory, Parser};
use cli::args::Cli;
use core::context::Context;
use core::engine::Engine;
use std::env;
use taxonomy::Taxonomy;
use tracing_subscriber::EnvFilter;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════════════╗
 ║                                                                    ║
 ║    ██████╗  █████╗  ██████╗ ███████╗███████╗██╗███████╗████████╗   ║
 ║    ██╔══██╗██╔══██╗██╔════╝ ██╔════╝██╔════╝██║██╔════╝╚══██╔══╝   ║
 ║    ██████╔╝███████║██║  ███╗█████╗  ███████╗██║█████╗     ██║      ║
 ║    ██╔═══╝ ██╔══██║██║   ██║██╔══╝  ╚════██║██║██╔══╝     ██║      ║
 ║    ██║     ██║  ██║╚██████╔╝███████╗███████║██║██║        ██║      ║
 ║    ╚═╝     ╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚══════╝╚═╝╚═╝        ╚═╝      ║
 ║                                                                    ║
 ║    Passive web-page leak triage and server fingerprinting          ║
 ║                                                                    ║
 ║    Version : 0.1.0                                                 ║
 ║    License : Apache-2.0                                            ║
 ║                                                                    ║
 ╚════════════════════════════════════════════════════════════════════╝
"#;

fn print_banner() {
    // Banner goes to stderr so `--format json` output stays clean.
    eprintln!("\x1b[36m{}\x1b[0m", BANNER);
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let show_help = args.iter().any(|a| a == "--help" || a == "-h");
    let no_banner = args.iter().any(|a| a == "--no-banner");

    if show_help && !no_banner {
        print_banner();
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let cli = Cli::parse();

    if cli.show_config {
        let config = Taxonomy::new()?.to_config();
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if !cli.no_banner && !cli.quiet {
        print_banner();
    }

    init_tracing(&cli);

    let ctx = Context::from_cli(cli)?;
    let engine = Engine::new(ctx)?;
    engine.run().await?;

    Ok(())
}
