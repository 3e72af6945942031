//! Thales HSM command simulator: TCP entrypoint.
//!
//! Accepts connections, spawns one thread per connection, and drives each
//! with [`thales_hsm_sim::session::run_session`]. The command-processing
//! core itself performs no I/O; this binary is the external collaborator
//! the core assumes.

use std::net::TcpListener;
use std::thread;

use clap::Parser;
use thales_hsm_sim::context::{Context, DEFAULT_LMK_HEX};

/// Thales HSM command simulator
#[derive(Parser)]
#[command(name = "hsm-server")]
#[command(about = "Thales HSM command simulator")]
#[command(version)]
struct Cli {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 1500)]
    port: u16,

    /// Hex-encoded 16-byte Local Master Key
    #[arg(short, long, default_value = DEFAULT_LMK_HEX)]
    key: String,

    /// Message header expected on every request and echoed on every response
    #[arg(short = 'H', long)]
    header: Option<String>,

    /// Enable debug-level protocol tracing (field dumps, PVV/CVV mismatches)
    #[arg(short, long)]
    debug: bool,

    /// Raise log verbosity further, independent of --debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match (cli.debug, cli.verbose) {
        (_, v) if v >= 2 => log::LevelFilter::Trace,
        (true, _) | (_, 1) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new().filter_level(level).init();

    let ctx = match Context::new(&cli.key, cli.header.map(String::into_bytes)) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("invalid LMK: {e}");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(("0.0.0.0", cli.port)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error starting server: {e}");
            std::process::exit(1);
        }
    };

    log::info!("firmware version: {}", thales_hsm_sim::context::FIRMWARE_VERSION);
    log::info!("listening on port {}", cli.port);

    for incoming in listener.incoming() {
        let mut stream = match incoming {
            Ok(s) => s,
            Err(e) => {
                log::warn!("error accepting connection: {e}");
                continue;
            }
        };

        let ctx = ctx.clone();
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        thread::spawn(move || {
            log::info!("connected client: {peer}");
            if let Err(e) = thales_hsm_sim::session::run_session(&mut stream, &ctx, &peer) {
                log::warn!("connection to {peer} ended with error: {e}");
            }
        });
    }
}
