//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Run a full rebuild of the output directory
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    tracing::debug!("Source: {:?}", site.source_dir);
    tracing::debug!("Output: {:?}", site.output_dir);

    let mut generator = Generator::new(site);
    generator.build()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s",
        generator.posts().len(),
        duration.as_secs_f64()
    );

    Ok(())
}
