use std::io;
use std::path::PathBuf;

use clap::Parser;
use kwic_cli::session::Session;

/// Interactive keyword search over one report
#[derive(Parser)]
#[command(name = "kwic-interactive", version)]
struct Cli {
    /// Plain-text report
    path: PathBuf,

    /// Company label (defaults to the file stem)
    #[arg(long)]
    company: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    kwic_cli::init_tracing(cli.verbose);

    println!("🔍 Interactive Snippet Search");
    println!("=============================");
    let session = match Session::load(&cli.path, cli.company) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
