use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing. The terminal itself is owned by the UI, so log lines
/// go to a file under the user's local data directory instead of stdout.
pub fn init() -> Result<()> {
    let directory = log_directory()?;
    std::fs::create_dir_all(&directory)?;
    let log_file = File::create(directory.join("medbook.log"))?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn log_directory() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "medbook")
        .ok_or_else(|| eyre!("could not determine a data directory for logs"))?;
    Ok(dirs.data_local_dir().to_path_buf())
}
