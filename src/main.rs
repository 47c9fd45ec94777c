// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, create the API client and hand it
//   to the UI loop.
// - Returns `anyhow::Result` to simplify error handling at the top level.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use uploadthing_client::{ui::main_menu, UtApi};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uploadthing_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Secret comes from `UPLOADTHING_SECRET` (a `.env` file is honored),
    // see `ClientConfig::from_env`.
    let api = UtApi::from_env().context("Failed to build API client")?;
    tracing::info!(base_url = %api.config().base_url, "client ready");
    if api.check_availability().is_err() {
        eprintln!("UPLOADTHING_SECRET is not set; every request will be refused.");
    }

    // Blocks until the user exits.
    main_menu(&api)?;
    Ok(())
}
