mod handlers;
mod logging;
mod models;
mod router;
mod state;
mod templates;

use clap::Parser;
use std::sync::Arc;
use tracing::info;

use radmap_core::export::{CommandExportRunner, ExportRunner};
use radmap_core::layout::GridLayout;
use radmap_core::storage::{DatabaseStorage, InMemoryStorage, Storage};
use radmap_core::{Batch, DatabaseManager, Sample};

use state::AppState;

#[derive(Parser)]
#[command(name = "radmap-web")]
#[command(about = "Web viewer for catalog genotypes and manual corrections")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Database name forwarded to export jobs
    #[arg(long, default_value = "radtags")]
    database: String,

    /// Genotype grid column count
    #[arg(long, default_value_t = GridLayout::DEFAULT_COLUMNS)]
    columns: usize,

    /// Serve seeded in-memory data instead of connecting to the database
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    logging::init_logging();

    let storage: Arc<dyn Storage> = if cli.demo {
        info!("Serving seeded in-memory data");
        Arc::new(demo_storage())
    } else {
        info!("Initializing database storage...");
        let db_manager = DatabaseManager::new().await?;
        db_manager.run_migrations().await?;
        Arc::new(DatabaseStorage::new(db_manager))
    };

    let exporter: Arc<dyn ExportRunner> = Arc::new(CommandExportRunner::from_env());

    let app_state = AppState {
        storage,
        exporter,
        database: cli.database,
        layout: GridLayout::new(cli.columns),
    };

    let app = router::app_router(app_state);

    let bind_addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Genotype viewer listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

/// A small mapping cross for poking at the pages without a database.
fn demo_storage() -> InMemoryStorage {
    let storage = InMemoryStorage::new();
    storage.add_batch(Batch {
        id: 1,
        date: chrono::NaiveDate::from_ymd_opt(2011, 3, 14),
        description: "demo cross".to_string(),
    });

    for id in 1..=23 {
        storage.add_sample(Sample {
            id,
            batch_id: 1,
            file: format!("progeny_{id:02}"),
        });
    }

    for id in 1..=23 {
        let genotype = match id % 3 {
            0 => "ll",
            1 => "lm",
            _ => "--",
        };
        storage.add_genotype(1, 1, id, genotype);
    }
    storage.add_correction(1, 1, 5, "lm");

    for id in 1..=20 {
        let genotype = if id % 2 == 0 { "nn" } else { "np" };
        storage.add_genotype(1, 2, id, genotype);
    }

    storage
}
