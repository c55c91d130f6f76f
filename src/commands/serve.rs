//! Preview the output directory

use anyhow::Result;

use crate::server;
use crate::Site;

/// Serve the built site on the configured port until interrupted
pub async fn run(site: &Site, open: bool) -> Result<()> {
    if !site.output_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {:?}, run `sitegen build` first",
            site.output_dir
        );
    }

    server::start(&site.output_dir, site.config.port, open).await
}
