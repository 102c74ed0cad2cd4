use console::style;

use crate::catalog::Catalog;
use crate::models::Mission;
use crate::repl::commands::{CommandHelp, COMMAND_HELP};
use crate::session::{FlowNotice, Session, Step, SubmitStatus};
use crate::utils::format_won;

pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        if let Some(cmd) = COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            return format_command_detail(cmd);
        } else {
            return format!("{} Unknown command: /{}", style("✗").red(), cmd_name);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).cyan().bold(),
            style(cmd.description).dim(),
        ));
    }
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n  {}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).cyan().bold(),
        style(cmd.usage).white(),
        style(cmd.description).dim(),
    )
}

pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");

    format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Version:").dim(),
        style(version).white().bold(),
        style("Commit:").dim(),
        style(git_hash).white(),
        style("Built:").dim(),
        style(build_ts).white(),
    )
}

pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

pub fn render_success(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

pub fn render_info(msg: &str) -> String {
    format!("{}", style(msg).dim())
}

pub fn render_notice(notice: &FlowNotice) -> String {
    format!("{} {}", style("↺").yellow().bold(), style(notice.message()).yellow())
}

/// Signed amount, green when within budget and red when over.
fn render_balance(remaining: i64) -> String {
    let text = format_won(remaining);
    if remaining < 0 {
        style(text).red().bold().to_string()
    } else {
        style(text).green().bold().to_string()
    }
}

pub fn render_missions(missions: &[Mission], current: Option<&Mission>) -> String {
    if missions.is_empty() {
        return render_info("No missions are configured.");
    }
    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Missions:").white().bold()));
    for (i, mission) in missions.iter().enumerate() {
        let marker = if current.map(|m| m.title == mission.title).unwrap_or(false) {
            style("●").green().to_string()
        } else {
            " ".to_string()
        };
        out.push_str(&format!(
            "  {} {:>2}. {}  {}\n",
            marker,
            i + 1,
            style(&mission.title).white().bold(),
            style(format!("예산 {}", format_won(mission.budget))).cyan(),
        ));
    }
    out.push_str(&format!("\n  {}\n", style("Pick one with /pick <number|title>").dim()));
    out
}

pub fn render_products(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return render_info("The catalog is empty.");
    }
    let width = catalog
        .products()
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n\n",
        style("Products").white().bold(),
        style(format!("({})", catalog.len())).dim(),
    ));
    for (i, product) in catalog.products().iter().enumerate() {
        let pad = width.saturating_sub(product.name.chars().count());
        out.push_str(&format!(
            "  {:>3}. {}{}  {:>12}\n",
            i + 1,
            product.name,
            " ".repeat(pad),
            format_won(product.price),
        ));
    }
    out
}

/// Cart table plus the spent/remaining summary and the submit state.
pub fn render_cart(session: &Session) -> String {
    let mut out = String::new();
    let title = session
        .mission()
        .map(|m| m.title.as_str())
        .unwrap_or("-");
    out.push_str(&format!(
        "\n{} {}\n\n",
        style("Cart").white().bold(),
        style(format!("· {}", title)).dim(),
    ));

    if session.cart().is_empty() {
        out.push_str(&format!("  {}\n", style("(empty)").dim()));
    } else {
        for (name, entry) in session.cart().iter() {
            out.push_str(&format!(
                "  {} × {}  {} {}\n",
                name,
                entry.quantity,
                style(format!("@ {}", format_won(entry.unit_price))).dim(),
                style(format!("= {}", format_won(entry.line_total()))).white(),
            ));
        }
    }

    out.push('\n');
    out.push_str(&render_totals(session));

    if session.step() == Step::Shopping {
        let status = session.submit_status();
        match status {
            SubmitStatus::Ready => {
                out.push_str(&format!("  {} {}\n", style("Submit:").dim(), style("enabled").green()));
            }
            SubmitStatus::OverBudget { .. } => {
                out.push_str(&format!(
                    "  {} {}\n",
                    style("⚠").red().bold(),
                    style(format!("예산을 초과했습니다 ({})", status.describe())).red(),
                ));
            }
            SubmitStatus::EmptyCart => {
                out.push_str(&format!(
                    "  {} {}\n",
                    style("Submit:").dim(),
                    style(format!("disabled, {}", status.describe())).yellow(),
                ));
            }
        }
    }
    out
}

fn render_totals(session: &Session) -> String {
    format!(
        "  {} {}\n  {} {}\n  {} {}\n",
        style("예산:").dim(),
        format_won(session.budget()),
        style("사용 금액:").dim(),
        format_won(session.spent()),
        style("남은 예산:").dim(),
        render_balance(session.remaining()),
    )
}

pub fn render_status(session: &Session) -> String {
    let mission = session
        .mission()
        .map(|m| m.title.clone())
        .unwrap_or_else(|| "none".to_string());
    let mut out = format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Session:").dim(),
        style(session.id()).white(),
        style("Step:").dim(),
        style(session.step()).cyan().bold(),
        style("Mission:").dim(),
        style(mission).white().bold(),
    );
    if session.mission().is_some() {
        let started = session.started_at().with_timezone(&chrono::Local);
        out.push_str(&format!(
            "  {} {}\n",
            style("Started:").dim(),
            started.format("%Y-%m-%d %H:%M"),
        ));
        out.push_str(&format!(
            "  {} {} ({} items)\n",
            style("Spent:").dim(),
            format_won(session.spent()),
            session.cart().len(),
        ));
        out.push_str(&format!("  {} {}\n", style("Remaining:").dim(), render_balance(session.remaining())));
    }
    out.push_str(&format!("\n  {}\n", style(next_hint(session)).dim()));
    out
}

/// What the user can do next from the current step.
pub fn next_hint(session: &Session) -> &'static str {
    match session.step() {
        Step::Selection => "Next: /missions, then /pick <number|title>",
        Step::Shopping => "Next: /products, /add <item> [qty], /cart, then /submit",
        Step::Result if session.can_export() => "Next: /export [path], or /restart for a new mission",
        Step::Result => "Next: explain your choices with /reason <text>, then /export",
    }
}

/// Summary shown on entering the result step.
pub fn render_result(session: &Session) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", style("구매 결과").white().bold()));
    out.push_str(&render_cart(session));
    out.push_str(&format!("\n  {}\n", style(next_hint(session)).dim()));
    out
}

pub fn render_reasons(session: &Session) -> String {
    if session.reasons().trim().is_empty() {
        return render_info("No reasoning written yet. Add a line with /reason <text>.");
    }
    let mut out = format!("\n{}\n\n", style("선택 이유").white().bold());
    for line in session.reasons().lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    fn plain() {
        console::set_colors_enabled(false);
    }

    fn shopping_session() -> Session {
        let mut session = Session::new();
        session.pick_mission(&Mission::new("카레 만들기", 15000, None)).unwrap();
        session
    }

    #[test]
    fn test_help_lists_every_command() {
        plain();
        let help = render_help(None);
        for cmd in COMMAND_HELP {
            assert!(help.contains(&format!("/{}", cmd.name)));
        }
        assert!(render_help(Some("add")).contains("/add <number|name> [quantity]"));
        assert!(render_help(Some("nope")).contains("Unknown command"));
    }

    #[test]
    fn test_cart_shows_over_budget_warning() {
        plain();
        let mut session = shopping_session();
        let beef = Product { name: "소고기".into(), price: 9000, image: String::new() };
        session.add_item(&beef, 2).unwrap();
        let out = render_cart(&session);
        assert!(out.contains("18,000원"));
        assert!(out.contains("-3,000원"));
        assert!(out.contains("예산을 초과했습니다"));
    }

    #[test]
    fn test_cart_empty_disables_submit() {
        plain();
        let out = render_cart(&shopping_session());
        assert!(out.contains("(empty)"));
        assert!(out.contains("disabled"));
    }

    #[test]
    fn test_missions_marks_current() {
        plain();
        let missions = crate::models::default_missions();
        let out = render_missions(&missions, missions.first());
        assert!(out.contains("●"));
        assert!(out.contains("15,000원"));
    }

    #[test]
    fn test_next_hint_follows_step() {
        let mut session = Session::new();
        assert!(next_hint(&session).contains("/pick"));
        session.pick_mission(&Mission::new("카레 만들기", 15000, None)).unwrap();
        assert!(next_hint(&session).contains("/submit"));
    }
}
