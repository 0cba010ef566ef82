//! lockstep CLI
//!
//! Usage:
//!   lockstep --client democorp --organization-id ABC123@AdobeOrg
//!   lockstep --addr 0.0.0.0:3000 --timeout-ms 5000 --debug

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

use lockstep::core::{run_server, AppState, DeliveryClient};
use lockstep::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "lockstep",
    version = VERSION,
    about = "Session-continuity relay - personalization demo server",
    long_about = "Serves a handful of demo pages whose content is decided by an\n\
                  external decisioning service, and round-trips the visitor,\n\
                  session, and location-hint cookies so every visitor stays in\n\
                  the experience the service assigned them."
)]
struct Args {
    /// Address to serve on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Client code registered with the decisioning service
    #[arg(long, default_value = "democorp")]
    client: String,

    /// Organization id the visitor cookie is keyed by
    #[arg(long, default_value = "5D60123F5245B13E0A490D45@AdobeOrg")]
    organization_id: String,

    /// Decisioning call timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Directory served under /public
    #[arg(long, default_value = "./public")]
    public_dir: String,

    /// Show the raw decisioning response on the questions pages
    #[arg(long)]
    debug: bool,

    /// Disable colors in startup output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    print_banner(&args);

    if let Err(e) = run(&args).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = DeliveryClient::new(&args.client, Duration::from_millis(args.timeout_ms))?;
    let state = AppState::new(
        Arc::new(gateway),
        &args.organization_id,
        &args.public_dir,
        args.debug,
    )?;
    run_server(&args.addr, Arc::new(state)).await
}

fn print_banner(args: &Args) {
    let title = format!("lockstep v{VERSION} - personalization relay");
    if args.no_color {
        println!("{title}");
        println!("  client: {}  org: {}", args.client, args.organization_id);
    } else {
        println!("{}", title.bold());
        println!(
            "  client: {}  org: {}",
            args.client.green(),
            args.organization_id.green()
        );
    }
    println!("  serving on http://{}", args.addr);
    println!();
}
