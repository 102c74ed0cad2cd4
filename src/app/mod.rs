pub mod order;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::catalog::{Catalog, CatalogCache};
use crate::config::ShopConfig;
use crate::errors::ShopError;
use crate::imaging::{DefaultImageSource, FontResolver, ReportComposer, ThumbnailFetcher};
use crate::models::Mission;
use crate::reporting::{assemble_report, write_report};
use crate::session::Session;
use tracing::info;

/// Shared context behind every user action: catalog, missions and the
/// report pipeline.
#[derive(Clone)]
pub struct AppState {
    pub config: ShopConfig,
    pub catalog: Arc<Catalog>,
    pub missions: Arc<Vec<Mission>>,
    pub fetcher: ThumbnailFetcher,
    pub composer: ReportComposer,
}

pub async fn create_app_state(config: ShopConfig, catalogs: &CatalogCache) -> Result<AppState, ShopError> {
    let catalog = catalogs.load(&config.catalog_path())?;
    let source = DefaultImageSource::new(&config.fetch())?;
    let fetcher = ThumbnailFetcher::new(Arc::new(source));

    let report = config.report();
    let font = FontResolver::new(report.fonts.clone()).resolve();
    let composer = ReportComposer::new(font, config.fetch().thumbnail_size, report.max_reason_lines);

    let missions = config.missions();
    info!(products = catalog.len(), missions = missions.len(), "Shop ready");

    Ok(AppState {
        missions: Arc::new(missions),
        config,
        catalog,
        fetcher,
        composer,
    })
}

impl AppState {
    /// Render the session's report and save it, by default under the
    /// configured output directory with the mission-derived file name.
    pub async fn export(&self, session: &Session, target: Option<&Path>) -> Result<PathBuf, ShopError> {
        let artifact = assemble_report(session, &self.fetcher, &self.composer).await?;
        let target = match target {
            Some(t) => t.to_path_buf(),
            None => self.config.report().output_dir,
        };
        write_report(&artifact, &target).await
    }
}
