// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, TabKind},
    theme::Theme,
};
use stockroom_core::search::navigation_target;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Toggle the help popup
    Help,
    // Change theme
    Theme(String),
    // Switch tab by 1-based number or label
    Tab(String),
    // Empty the search box of the active dataset
    Clear,
    // Navigate to a record by id, or show an image by relative path on the gallery tab
    Open(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")`, meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => required(rest, "usage: theme <default|gruvbox>").map(Command::Theme),
            "tab" => required(rest, "usage: tab <number|name>").map(Command::Tab),
            "open" | "o" => required(rest, "usage: open <id|image path>").map(Command::Open),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(usage.to_string())
    } else {
        Ok(rest.to_string())
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Tab(which) => {
            let by_number = which
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=s.tabs.len()).contains(n))
                .map(|n| n - 1);
            let by_label = || {
                s.tabs
                    .iter()
                    .position(|t| t.label.eq_ignore_ascii_case(&which))
            };
            match by_number.or_else(by_label) {
                Some(idx) => s.switch_tab(idx),
                None => s.error = Some(format!("no tab `{which}`")),
            }
        }
        Command::Clear => {
            if let TabKind::Dataset(tab) = &mut s.tabs[s.active_tab].kind {
                tab.search.clear();
            }
            s.refresh_active();
        }
        Command::Open(arg) => match &mut s.tabs[s.active_tab].kind {
            TabKind::Dataset(tab) => match tab.dataset.find(&arg) {
                Some(record) => {
                    let record = record.clone();
                    let location = navigation_target(&tab.dataset.route_prefix, &arg);
                    s.navigate(location, Some(record));
                }
                None => s.error = Some(format!("no record with id {arg}")),
            },
            TabKind::Gallery(gallery) => {
                gallery.swapper.pick(&arg);
                s.error = None;
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
