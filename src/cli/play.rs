use crate::app;
use crate::catalog::CatalogCache;
use crate::cli::commands::PlayArgs;
use crate::config::ShopConfig;
use crate::errors::ShopError;
use crate::repl::ReplSession;
use crate::session::{Session, SessionStore};

pub async fn handle_play(args: PlayArgs, config: ShopConfig) -> Result<(), ShopError> {
    let catalogs = CatalogCache::new();
    let state = app::create_app_state(config, &catalogs).await?;

    let store = SessionStore::new(state.config.session_file());
    let (session, notice) = if args.resume {
        store.resume().unwrap_or_else(|| (Session::new(), None))
    } else {
        (Session::new(), None)
    };

    ReplSession::new(state, session, store)
        .splash(!args.no_splash)
        .notice(notice)
        .run()
        .await
}
