use console::{style, Key, Term};
use tracing::debug;
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

use crate::models::Mission;
use crate::utils::format_won;

const LEAF: u8 = 114;
const SAGE: u8 = 65;

const TAGLINE: &str = "Shop for the mission, stay within the budget";

/// Left padding that centers a block of `width` columns in the terminal.
struct Centering {
    term_w: usize,
}

impl Centering {
    fn pad(&self, width: usize) -> String {
        match self.term_w.checked_sub(width + 4) {
            Some(_) => " ".repeat((self.term_w - width) / 2),
            None => "  ".to_string(),
        }
    }

    fn rule(&self) {
        let width = self.term_w.clamp(40, 72);
        println!("{}{}", self.pad(width), style("·".repeat(width)).color256(SAGE));
    }
}

fn clear(term: &Term) {
    if let Err(e) = term.clear_screen() {
        debug!(error = %e, "Could not clear the screen");
    }
}

fn figlet(term_w: usize, fallback_pad: &str) -> String {
    let palette = Palette::from_hex(&[
        "#D7FFAF", // pale lime
        "#87D787", // leaf
        "#5FAF87", // sage
        "#FFAF5F", // carrot
    ]);
    let gradient = Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal);

    match Banner::new("SHOPMISSION") {
        Ok(b) => b
            .gradient(gradient)
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .color_mode(ColorMode::TrueColor)
            .width(term_w)
            .render(),
        Err(_) => format!("{}{}\n", fallback_pad, style("SHOPMISSION").color256(LEAF).bold()),
    }
}

/// Full-screen splash listing today's missions. Waits for Enter or Esc,
/// then clears the screen and leaves a one-line header behind.
pub fn show_splash(missions: &[Mission], products: usize) {
    let term = Term::stdout();
    clear(&term);

    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let layout = Centering { term_w: term.size().1 as usize };

    println!();
    print!("{}", figlet(layout.term_w, &layout.pad(11)));

    let build = format!("v{} ({})", version, git_hash);
    println!("{}{}", layout.pad(build.len()), style(build).dim());
    layout.rule();
    println!("{}{}", layout.pad(TAGLINE.len()), style(TAGLINE).white().bold());
    layout.rule();
    println!();

    let title_w = missions
        .iter()
        .map(|m| m.title.chars().count() * 2)
        .max()
        .unwrap_or(0);
    let block = layout.pad(title_w + 24);
    println!("{}{}", block, style("Today's missions").white().bold());
    for (i, mission) in missions.iter().enumerate() {
        // Hangul glyphs take two columns
        let gap = title_w.saturating_sub(mission.title.chars().count() * 2);
        println!(
            "{}  {} {}{}  {}",
            block,
            style(format!("{}.", i + 1)).color256(LEAF).bold(),
            mission.title,
            " ".repeat(gap),
            style(format_won(mission.budget)).cyan(),
        );
    }
    println!(
        "{}  {}",
        block,
        style(format!("{} products on the shelves", products)).dim(),
    );
    println!();
    println!(
        "{}{} {} {} {}",
        block,
        style("Start with").dim(),
        style("/pick 1").color256(LEAF),
        style("or").dim(),
        style("/help").color256(LEAF),
    );
    println!();
    println!("{}Press {} to continue", layout.pad(24), style("Enter").white().bold());

    while !matches!(term.read_key(), Ok(Key::Enter) | Ok(Key::Escape) | Err(_)) {}

    clear(&term);
    println!(
        "  {} {}  {}",
        style("ShopMission").color256(LEAF).bold(),
        style(format!("v{}", version)).dim(),
        style("type /help for commands").dim(),
    );
    println!();
}
