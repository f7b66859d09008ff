//! Command line interface for the YTU academic calendar export.

mod commands;

use std::env;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytu_takvim_core::provider::DEFAULT_API_URL;

#[derive(Parser)]
#[command(name = "ytu-takvim")]
#[command(about = "YTÜ akademik takvim ICS dışa aktarma aracı")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ayrıntılı log çıktısı
    #[arg(short, long)]
    verbose: bool,

    /// Takvim API adresi (varsayılan: TAKVIM_API_URL ortam değişkeni)
    #[arg(long)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Takvim girdilerini akademik döneme göre listele
    List {
        /// Ham payload'u JSON olarak yazdır
        #[arg(long)]
        json: bool,
    },

    /// Seçilen girdileri ay ay önizle
    Months {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Seçilen girdileri ICS dosyası olarak dışa aktar
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Çıktı dosya yolu
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Hangi girdilerin seçileceği
#[derive(Args)]
struct SelectionArgs {
    /// Tüm girdileri seç
    #[arg(long)]
    all: bool,

    /// Popüler ön seçimi uygula
    #[arg(long)]
    popular: bool,

    /// Belirli girdi id'lerini seç (virgülle ayrılmış)
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,
}

impl SelectionArgs {
    fn into_spec(self) -> commands::SelectionSpec {
        commands::SelectionSpec {
            all: self.all,
            popular: self.popular,
            ids: self.ids,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ytu_takvim_cli={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = cli
        .api_url
        .or_else(|| env::var("TAKVIM_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    match cli.command {
        Commands::List { json } => commands::list_command(api_url, json).await,

        Commands::Months { selection } => {
            commands::months_command(api_url, selection.into_spec()).await
        }

        Commands::Export { selection, output } => {
            commands::export_command(api_url, selection.into_spec(), output).await
        }
    }
}
