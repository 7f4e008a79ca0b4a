//! CLI definition for the `mercury` binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mercury", version, about = "WhatsApp-to-Claude relay service")]
pub struct Cli {
    /// Export spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the webhook server.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// Delete the stored conversation history for a contact.
    Clear {
        /// Provider contact id (the WhatsApp `wa_id`).
        contact: String,
    },

    /// Show the resolved configuration.
    Status,
}
