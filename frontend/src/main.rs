//! `marketplace` entry point: loads settings, opens storage and runs one
//! page interaction.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use frontend::FrontendSettings;
use frontend::cli::{self, CliArgs};
use frontend::pages::PageContext;
use identity_store::{DirStorage, MemoryStorage, Storage};
use ortho_config::OrthoConfig;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let settings = FrontendSettings::load_from_iter([OsString::from("marketplace")])
        .map_err(|err| eyre!("failed to load marketplace settings: {err}"))?;
    init_tracing(settings.log_json);

    let storage_dir = settings.storage_dir(args.storage_dir.as_deref());
    let ctx = PageContext::init(open_storage(&storage_dir));
    let output = cli::run(&ctx, &args.command);

    writeln!(io::stdout().lock(), "{output}").wrap_err("failed to write command output")?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn open_storage(dir: &Path) -> Arc<dyn Storage> {
    match DirStorage::open(dir) {
        Ok(storage) => {
            debug!(path = %dir.display(), "using directory storage");
            Arc::new(storage)
        }
        Err(err) => {
            warn!(error = %err, "falling back to in-memory storage; nothing will persist");
            Arc::new(MemoryStorage::new())
        }
    }
}
