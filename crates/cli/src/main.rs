use anyhow::Context;
use bookstore_app::{build_registry, Stores};
use bookstore_kernel::{settings::Settings, InitCtx};
use clap::{Parser, Subcommand};

/// Bookstore service command line
#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print the schema migrations declared by every module
    Migrations,
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    match cli.command {
        Command::Serve => serve(settings).await,
        Command::Migrations => {
            let registry = build_registry(&settings, &Stores::in_memory());
            for (module, migration) in registry.collect_migrations() {
                println!("-- {}::{}", module, migration.id);
                println!("{}", migration.up.trim());
            }
            Ok(())
        }
        Command::Config => {
            println!("{:#?}", settings);
            Ok(())
        }
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    bookstore_telemetry::init(&settings.telemetry)?;

    let registry = build_registry(&settings, &Stores::in_memory());
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!(modules = registry.len(), "serving bookstore modules");
    let served = bookstore_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    served
}
