use std::path::{Path, PathBuf};
use crate::errors::ShopError;
use crate::imaging::{ReportComposer, ReportInput, ReportRow, ThumbnailFetcher};
use crate::session::Session;
use crate::utils::formatting::report_file_name;
use tracing::info;

/// An encoded report ready to be saved.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Collect the report input for a finished session, fetching a thumbnail per
/// cart entry. Rows follow the cart's name order.
pub async fn collect_report_input(
    session: &Session,
    fetcher: &ThumbnailFetcher,
    thumb_size: u32,
) -> Result<ReportInput, ShopError> {
    if !session.can_export() {
        return Err(ShopError::InvalidTransition(
            "the report is available after submitting and writing down your reasons".into(),
        ));
    }
    let mission = session
        .mission()
        .ok_or_else(|| ShopError::InvalidTransition("no mission is active".into()))?;

    let mut rows = Vec::with_capacity(session.cart().len());
    for (name, entry) in session.cart().iter() {
        let thumbnail = fetcher.fetch(&entry.image, thumb_size, thumb_size).await;
        rows.push(ReportRow {
            name: name.clone(),
            quantity: entry.quantity,
            unit_price: entry.unit_price,
            line_total: entry.line_total(),
            thumbnail,
        });
    }

    Ok(ReportInput {
        mission_title: mission.title.clone(),
        rows,
        reasons: session.reasons().to_string(),
        spent: session.spent(),
        budget: session.budget(),
    })
}

pub async fn assemble_report(
    session: &Session,
    fetcher: &ThumbnailFetcher,
    composer: &ReportComposer,
) -> Result<ReportArtifact, ShopError> {
    let input = collect_report_input(session, fetcher, composer.thumb_size()).await?;
    let bytes = composer.compose(&input)?;
    Ok(ReportArtifact {
        file_name: report_file_name(&input.mission_title),
        bytes,
    })
}

/// Write the artifact. A directory target receives the artifact's own file name.
pub async fn write_report(artifact: &ReportArtifact, target: &Path) -> Result<PathBuf, ShopError> {
    let path = if target.is_dir() || target.extension().is_none() {
        tokio::fs::create_dir_all(target).await?;
        target.join(&artifact.file_name)
    } else {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        target.to_path_buf()
    };

    tokio::fs::write(&path, &artifact.bytes).await?;
    info!(path = %path.display(), bytes = artifact.bytes.len(), "Report written");
    Ok(path)
}
