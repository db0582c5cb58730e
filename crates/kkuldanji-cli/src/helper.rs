use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use kkuldanji_core::report::ListField;
use kkuldanji_core::view::ReportTab;
use strum::IntoEnumIterator;

use crate::command::COMMANDS;

/// Rustyline helper: completes slash commands, tab names and list paths.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    tabs: Vec<String>,
    lists: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
            tabs: ReportTab::iter().map(|tab| tab.to_string()).collect(),
            lists: ListField::iter()
                .map(|list| list.path_str().to_string())
                .collect(),
        }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.commands.iter().filter(move |cmd| cmd.starts_with(prefix))
    }

    /// Candidates for the first argument of `command`.
    fn arguments(&self, command: &str) -> &[String] {
        match command {
            "/tab" => &self.tabs,
            "/add" | "/del" => &self.lists,
            _ => &[],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let (start, prefix, pool): (usize, &str, Vec<&String>) = match line.split_once(' ') {
            None => (0, line, self.matching(line).collect()),
            Some((command, arg)) if !arg.contains(' ') => (
                command.len() + 1,
                arg,
                self.arguments(command).iter().collect(),
            ),
            Some(_) => return Ok((pos, vec![])),
        };

        let candidates = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(prefix))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.matching(line)
                .find(|cmd| cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}
