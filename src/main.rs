use std::process::ExitCode;

use staticd::config::Config;
use staticd::server::Server;

// sysexits(3)
const EX_USAGE: u8 = 64;
const EX_CONFIG: u8 = 78;

const USAGE: &str = "Usage: staticd <config.yaml>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        tracing::error!("{}", USAGE);
        return ExitCode::from(EX_USAGE);
    }

    let cfg = match Config::load(&args[1]).and_then(|cfg| cfg.validate().map(|_| cfg)) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load config file {}: {:#}", args[1], e);
            tracing::error!("{}", USAGE);
            return ExitCode::from(EX_CONFIG);
        }
    };

    tracing::info!(
        listen_addr = %cfg.listen_addr,
        doc_root = %cfg.doc_root.display(),
        mime_types = %cfg.mime_types.display(),
        "Loaded configuration"
    );

    match run(&cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server stopped: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: &Config) -> anyhow::Result<()> {
    let server = Server::from_config(cfg)?;

    tokio::select! {
        res = server.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
