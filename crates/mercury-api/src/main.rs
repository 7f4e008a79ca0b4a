//! Mercury CLI and webhook server entry point.
//!
//! Binary name: `mercury`
//!
//! Parses CLI arguments, loads configuration from the environment, then
//! either starts the webhook server or runs a maintenance command.

mod cli;
mod http;
mod state;

use clap::Parser;

use mercury_infra::config::Config;
use mercury_types::user::UserKey;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    mercury_observe::tracing_setup::init_tracing(cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::init(config).await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Mercury relay listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Clear { contact } => {
            let Some(key) = UserKey::from_contact(&contact) else {
                anyhow::bail!("contact id must not be empty");
            };

            let state = AppState::init(config).await?;
            state.dispatcher.clear_history(&key).await?;

            println!(
                "  {} Cleared history for {}",
                console::style("✓").green(),
                console::style(key.as_str()).cyan()
            );
        }

        Commands::Status => {
            println!();
            println!("  {} Mercury configuration", console::style("●").bold());
            println!();
            println!("  Model:           {}", config.model);
            println!("  Phone number id: {}", config.phone_number_id);
            println!("  Data directory:  {}", config.data_dir.display());
            println!("  Database:        {}", config.database_url());
            println!();
        }
    }

    mercury_observe::tracing_setup::shutdown_tracing();

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
