use std::path::PathBuf;
use crate::app::{self, order::{replay_order, OrderFile}};
use crate::catalog::CatalogCache;
use crate::cli::commands::RenderArgs;
use crate::config::ShopConfig;
use crate::errors::ShopError;
use crate::utils::formatting::format_won;
use tracing::info;

pub async fn handle_render(args: RenderArgs, config: ShopConfig) -> Result<(), ShopError> {
    let order = OrderFile::load(&PathBuf::from(&args.order)).await?;

    let catalogs = CatalogCache::new();
    let state = app::create_app_state(config, &catalogs).await?;

    let session = replay_order(&state, &order)?;
    let target = args.output.as_ref().map(PathBuf::from);
    let path = state.export(&session, target.as_deref()).await?;

    info!(
        spent = session.spent(),
        remaining = session.remaining(),
        "Report rendered"
    );
    println!(
        "Report saved to {} (spent {}, remaining {})",
        path.display(),
        format_won(session.spent()),
        format_won(session.remaining()),
    );
    Ok(())
}
