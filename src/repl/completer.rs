use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::repl::commands::COMMAND_NAMES;

/// Completes command names, product names after `/add` and mission titles
/// after `/pick`.
#[derive(Default)]
pub struct ReplHelper {
    products: Vec<String>,
    missions: Vec<String>,
}

impl ReplHelper {
    pub fn new(products: Vec<String>, missions: Vec<String>) -> Self {
        Self { products, missions }
    }

    fn arguments_for(&self, cmd: &str) -> &[String] {
        match cmd {
            "/add" => &self.products,
            "/pick" => &self.missions,
            _ => &[],
        }
    }
}

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.contains(' ') {
            return None;
        }
        for name in COMMAND_NAMES {
            if name.starts_with(trimmed) && *name != trimmed {
                return Some(name[trimmed.len()..].to_string());
            }
        }
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();

        if !trimmed.starts_with('/') {
            return Ok((0, vec![]));
        }

        // Past the command name: complete the argument as a whole
        if let Some(space_idx) = trimmed.find(' ') {
            let cmd = &trimmed[..space_idx];
            let arg_prefix = trimmed[space_idx..].trim_start();
            let arg_start = pos - arg_prefix.len();

            let matches: Vec<Pair> = self
                .arguments_for(cmd)
                .iter()
                .filter(|candidate| candidate.starts_with(arg_prefix))
                .map(|candidate| Pair {
                    display: candidate.clone(),
                    replacement: candidate.clone(),
                })
                .collect();

            return Ok((arg_start, matches));
        }

        let start = pos - trimmed.len();
        let matches: Vec<Pair> = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(trimmed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((start, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    fn complete(helper: &ReplHelper, line: &str) -> (usize, Vec<String>) {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let (start, pairs) = helper.complete(line, line.len(), &ctx).unwrap();
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn test_completes_command_names() {
        let helper = ReplHelper::default();
        let (start, names) = complete(&helper, "/re");
        assert_eq!(start, 0);
        assert_eq!(names, vec!["/reason", "/reasons", "/restart"]);
    }

    #[test]
    fn test_completes_product_names_after_add() {
        let helper = ReplHelper::new(
            vec!["감자".into(), "카레 가루".into(), "당근".into()],
            vec![],
        );
        let (start, names) = complete(&helper, "/add 카");
        assert_eq!(start, "/add ".len());
        assert_eq!(names, vec!["카레 가루"]);
    }

    #[test]
    fn test_completes_mission_titles_after_pick() {
        let helper = ReplHelper::new(vec![], vec!["카레 만들기".into(), "여름캠핑 준비하기".into()]);
        let (_, names) = complete(&helper, "/pick 여름");
        assert_eq!(names, vec!["여름캠핑 준비하기"]);
    }
}
