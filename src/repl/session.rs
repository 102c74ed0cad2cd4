use std::path::PathBuf;

use console::style;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::errors::ShopError;
use crate::models::find_mission;
use crate::repl::banner;
use crate::repl::commands::{self, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::progress::ExportProgress;
use crate::repl::renderer;
use crate::session::{FlowNotice, Session, SessionStore, Step, SubmitStatus};
use crate::utils::format_won;

/// Interactive front end over one mission session.
pub struct ReplSession {
    state: AppState,
    session: Session,
    store: SessionStore,
    splash: bool,
    notice: Option<FlowNotice>,
}

impl ReplSession {
    pub fn new(state: AppState, session: Session, store: SessionStore) -> Self {
        Self {
            state,
            session,
            store,
            splash: true,
            notice: None,
        }
    }

    pub fn splash(mut self, enabled: bool) -> Self {
        self.splash = enabled;
        self
    }

    /// Redirect to announce before the first view, e.g. from a resumed session.
    pub fn notice(mut self, notice: Option<FlowNotice>) -> Self {
        self.notice = notice;
        self
    }

    pub async fn run(mut self) -> Result<(), ShopError> {
        if self.splash {
            banner::show_splash(&self.state.missions, self.state.catalog.len());
        }

        let config = Config::builder()
            .auto_add_history(true)
            .build();
        let mut editor: Editor<ReplHelper, DefaultHistory> = Editor::with_config(config)
            .map_err(|e| ShopError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper::new(
            self.state.catalog.products().iter().map(|p| p.name.clone()).collect(),
            self.state.missions.iter().map(|m| m.title.clone()).collect(),
        )));

        if let Some(notice) = self.notice.take().or_else(|| self.session.resolve()) {
            println!("{}", renderer::render_notice(&notice));
        }
        self.show_current_step();

        loop {
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let step = self.session.step();
                let result = tokio::task::spawn_blocking(move || {
                    let term_w = console::Term::stdout().size().1 as usize;
                    let sep = format!("{}", style("─".repeat(term_w)).dim());
                    let prompt = format!("{}\n{} ", sep, style(format!("shop:{}>", step)).cyan().bold());
                    let result = editor.readline(&prompt);
                    (editor, result)
                })
                .await
                .map_err(|e| ShopError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let term_w = console::Term::stdout().size().1 as usize;
                    println!("{}", style("─".repeat(term_w)).dim());

                    match commands::parse_command(trimmed) {
                        Ok(cmd) => {
                            if let Some(notice) = self.session.resolve() {
                                println!("{}", renderer::render_notice(&notice));
                            }
                            debug!(command = ?cmd, step = %self.session.step(), "Dispatching command");
                            if self.handle_command(cmd).await {
                                break;
                            }
                        }
                        Err(msg) => {
                            println!("{}", renderer::render_error(&msg));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        match self.store.save(&self.session) {
            Ok(()) => println!(
                "{}",
                renderer::render_info(&format!(
                    "Session saved to {}. Resume with `shopmission play --resume`.",
                    self.store.path().display()
                ))
            ),
            Err(e) => {
                warn!(error = %e, "Failed to save session");
                println!("{}", renderer::render_error(&format!("Could not save session: {}", e)));
            }
        }
        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }

    fn show_current_step(&self) {
        match self.session.step() {
            Step::Selection => {
                println!("{}", renderer::render_missions(&self.state.missions, None));
            }
            Step::Shopping => println!("{}", renderer::render_cart(&self.session)),
            Step::Result => println!("{}", renderer::render_result(&self.session)),
        }
    }

    /// Returns true when the REPL should exit.
    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        let outcome = match cmd {
            SlashCommand::Exit => return true,

            SlashCommand::Help { command } => {
                println!("{}", renderer::render_help(command.as_deref()));
                Ok(())
            }

            SlashCommand::Version => {
                println!("{}", renderer::render_version());
                Ok(())
            }

            SlashCommand::Status => {
                println!("{}", renderer::render_status(&self.session));
                Ok(())
            }

            SlashCommand::Missions => {
                println!(
                    "{}",
                    renderer::render_missions(&self.state.missions, self.session.mission())
                );
                Ok(())
            }

            SlashCommand::Pick { selector } => self.pick(&selector),

            SlashCommand::Products => {
                println!("{}", renderer::render_products(&self.state.catalog));
                Ok(())
            }

            SlashCommand::Add { selector, quantity } => self.add(&selector, quantity),

            SlashCommand::Cart => {
                println!("{}", renderer::render_cart(&self.session));
                Ok(())
            }

            SlashCommand::Clear => self.session.clear_cart().map(|()| {
                println!("{}", renderer::render_success("Cart cleared."));
            }),

            SlashCommand::Submit => self.session.submit().map(|()| {
                println!("{}", renderer::render_success("Cart submitted."));
                println!("{}", renderer::render_result(&self.session));
            }),

            SlashCommand::Reason { text } => self.session.append_reason(&text).map(|()| {
                println!("{}", renderer::render_success("Reason noted."));
                if self.session.can_export() {
                    println!("{}", renderer::render_info("The report can now be exported with /export."));
                }
            }),

            SlashCommand::ClearReasons => self.session.set_reasons("").map(|()| {
                println!("{}", renderer::render_success("Reasoning cleared."));
            }),

            SlashCommand::Reasons => {
                println!("{}", renderer::render_reasons(&self.session));
                Ok(())
            }

            SlashCommand::Export { path } => self.export(path.map(PathBuf::from)).await,

            SlashCommand::Back => self.session.back().map(|step| {
                println!("{}", renderer::render_success(&format!("Back to {}.", step)));
            }),

            SlashCommand::Restart => self.session.restart().map(|()| {
                println!("{}", renderer::render_success("Started over."));
                println!("{}", renderer::render_missions(&self.state.missions, None));
            }),
        };

        if let Err(e) = outcome {
            println!("{}", renderer::render_error(&e.to_string()));
            if matches!(e, ShopError::InvalidTransition(_)) {
                println!("{}", renderer::render_info(renderer::next_hint(&self.session)));
            }
        }
        false
    }

    fn pick(&mut self, selector: &str) -> Result<(), ShopError> {
        let mission = find_mission(&self.state.missions, selector)
            .ok_or_else(|| ShopError::NotFound(format!("no mission matches '{}'", selector)))?;
        self.session.pick_mission(mission)?;
        println!(
            "{}",
            renderer::render_success(&format!(
                "Mission '{}' started with a budget of {}.",
                mission.title,
                format_won(mission.budget)
            ))
        );
        println!("{}", renderer::render_info(renderer::next_hint(&self.session)));
        Ok(())
    }

    fn add(&mut self, selector: &str, quantity: i64) -> Result<(), ShopError> {
        let product = self
            .state
            .catalog
            .lookup(selector)
            .ok_or_else(|| ShopError::NotFound(format!("no product matches '{}'", selector)))?;

        if !self.session.add_item(product, quantity)? {
            println!("{}", renderer::render_info("Quantity must be at least 1; nothing was added."));
            return Ok(());
        }

        println!(
            "{}",
            renderer::render_success(&format!(
                "{} × {} added. Spent {}, remaining {}.",
                product.name,
                quantity,
                format_won(self.session.spent()),
                format_won(self.session.remaining()),
            ))
        );
        if let SubmitStatus::OverBudget { .. } = self.session.submit_status() {
            println!("{}", renderer::render_cart(&self.session));
        }
        Ok(())
    }

    async fn export(&mut self, target: Option<PathBuf>) -> Result<(), ShopError> {
        if !self.session.can_export() {
            return Err(ShopError::InvalidTransition(
                "the report is available once the cart is submitted and the reasoning is written".into(),
            ));
        }
        let progress = ExportProgress::start(self.session.cart().len());
        match self.state.export(&self.session, target.as_deref()).await {
            Ok(path) => {
                progress.finish(&path);
                Ok(())
            }
            Err(e) => {
                progress.fail();
                Err(e)
            }
        }
    }
}
