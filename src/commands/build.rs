//! Build the static site

use anyhow::Result;
use std::time::Instant;

use crate::content::loader::ContentLoader;
use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Run one full build.
///
/// Posts and templates are read before anything under the output
/// directory is created, so a bad source tree leaves no output behind.
/// A failure while writing aborts the build; files already written stay.
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let loader = ContentLoader::new(site);
    let posts = loader.load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(site)?;
    let mut report = generator.generate(&posts)?;
    report.elapsed = start.elapsed();

    tracing::info!(
        "Generated {} pages in {:.2}s -> {:?}",
        report.pages.len() + 1,
        report.elapsed.as_secs_f64(),
        site.output_dir
    );

    Ok(report)
}
