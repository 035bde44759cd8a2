//! Interactive selection state.
//!
//! `App` is a finite-state machine driven by [`Event`]s. It holds the command
//! catalog, the location filter, the search query and the focused pane, and
//! ends in one of the [`Outcome`]s. Terminal rendering and key decoding live
//! in [`crate::tui`]; nothing here touches the terminal.

use std::collections::HashSet;

use crate::core::{fuzzy, CommandCatalog, CommandEntry, SelectionResult};
use crate::tui::Theme;

/// Pane that receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Location filter list
    Locations,
    /// Search input
    #[default]
    Search,
    /// Ranked command list
    Results,
}

impl Focus {
    /// Next pane in Tab order.
    pub fn next(self) -> Self {
        match self {
            Self::Locations => Self::Search,
            Self::Search => Self::Results,
            Self::Results => Self::Locations,
        }
    }
}

/// Input events understood by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A typed character
    Char(char),
    /// Delete the last query character
    Backspace,
    /// Move up
    Up,
    /// Move down
    Down,
    /// Move focus to the next pane
    CycleFocus,
    /// Flip the highlighted location in the filter
    Toggle,
    /// Accept the current entry
    Confirm,
    /// Abort the selection
    Cancel,
    /// Restore the initial filter, query and focus
    Reset,
    /// Empty the query
    ClearQuery,
}

/// Terminal state of a selection session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command was chosen
    Selected(SelectionResult),
    /// The user backed out
    Canceled,
}

/// Selection state machine.
#[derive(Debug)]
pub struct App {
    /// Catalog entries, rendered in bracketed style
    pub entries: Vec<CommandEntry>,

    /// Distinct location display names, in catalog order
    pub locations: Vec<String>,

    /// Location names the results are restricted to (empty means all)
    pub location_filter: HashSet<String>,

    /// Current search query
    pub query: String,

    /// Focused pane
    pub focus: Focus,

    /// Highlighted index in `results`
    pub cursor: usize,

    /// Highlighted index in `locations`
    pub location_cursor: usize,

    /// Indices into `entries`, best match first
    pub results: Vec<usize>,

    /// Set once the session has ended
    pub outcome: Option<Outcome>,

    /// Current UI theme
    pub theme: Theme,
}

impl App {
    /// Create a selector over a catalog and the location names it may filter by.
    pub fn new(catalog: CommandCatalog, locations: Vec<String>) -> Self {
        let mut app = Self {
            entries: catalog.into_entries(),
            locations,
            location_filter: HashSet::new(),
            query: String::new(),
            focus: Focus::default(),
            cursor: 0,
            location_cursor: 0,
            results: Vec::new(),
            outcome: None,
            theme: Theme::default(),
        };
        app.recompute();
        app
    }

    /// Use a different theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Whether the session has reached a terminal state.
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// Apply one event.
    ///
    /// Events after a terminal state are ignored.
    pub fn handle(&mut self, event: Event) {
        if self.is_done() {
            return;
        }

        match event {
            Event::Cancel => self.outcome = Some(Outcome::Canceled),
            Event::Reset => self.reset(),
            Event::ClearQuery => self.set_query(String::new()),
            Event::CycleFocus => self.focus = self.focus.next(),
            Event::Backspace => {
                if self.focus != Focus::Locations {
                    let mut query = self.query.clone();
                    query.pop();
                    self.focus = Focus::Search;
                    self.set_query(query);
                }
            }
            Event::Char(c) => self.handle_char(c),
            Event::Toggle => {
                if self.focus == Focus::Locations {
                    self.toggle_highlighted_location();
                }
            }
            Event::Up => self.move_up(),
            Event::Down => self.move_down(),
            Event::Confirm => self.confirm(),
        }
    }

    fn handle_char(&mut self, c: char) {
        match self.focus {
            Focus::Search => self.push_query(c),
            Focus::Results if !c.is_whitespace() && !c.is_control() => {
                self.focus = Focus::Search;
                self.push_query(c);
            }
            Focus::Locations if c == ' ' => self.toggle_highlighted_location(),
            _ => {}
        }
    }

    fn push_query(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    fn set_query(&mut self, query: String) {
        self.query = query;
        self.recompute();
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Locations => self.location_cursor = self.location_cursor.saturating_sub(1),
            Focus::Search => {
                self.focus = Focus::Results;
                self.cursor = self.results.len().saturating_sub(1);
            }
            Focus::Results if self.cursor == 0 => self.focus = Focus::Search,
            Focus::Results => self.cursor -= 1,
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Locations => {
                if !self.locations.is_empty() {
                    self.location_cursor = (self.location_cursor + 1).min(self.locations.len() - 1);
                }
            }
            Focus::Search => {
                self.focus = Focus::Results;
                self.cursor = 0;
            }
            Focus::Results => {
                if !self.results.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.results.len() - 1);
                }
            }
        }
    }

    fn confirm(&mut self) {
        let entry = match self.focus {
            Focus::Results => self.highlighted(),
            Focus::Search => self.result_entries().next(),
            Focus::Locations => return,
        };

        if let Some(selection) = entry.map(CommandEntry::selection) {
            self.outcome = Some(Outcome::Selected(selection));
        }
    }

    fn reset(&mut self) {
        self.location_filter.clear();
        self.query.clear();
        self.focus = Focus::Search;
        self.cursor = 0;
        self.recompute();
    }

    fn toggle_highlighted_location(&mut self) {
        let Some(name) = self.locations.get(self.location_cursor).cloned() else {
            return;
        };
        if !self.location_filter.remove(&name) {
            self.location_filter.insert(name);
        }
        self.recompute();
    }

    /// Whether a location name passes the current filter.
    pub fn is_location_enabled(&self, name: &str) -> bool {
        self.location_filter.is_empty() || self.location_filter.contains(name)
    }

    /// Rebuild `results` from the filter and query, then clamp the cursor.
    pub fn recompute(&mut self) {
        let candidates = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.is_location_enabled(&entry.display_name))
            .map(|(index, entry)| (index, entry.display.as_str()));

        self.results = if self.query.is_empty() {
            candidates.map(|(index, _)| index).collect()
        } else {
            fuzzy::rank(candidates, &self.query)
        };

        self.cursor = self.cursor.min(self.results.len().saturating_sub(1));
    }

    /// The highlighted result entry.
    pub fn highlighted(&self) -> Option<&CommandEntry> {
        self.results.get(self.cursor).map(|&i| &self.entries[i])
    }

    /// Entries in result order.
    pub fn result_entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.results.iter().map(|&i| &self.entries[i])
    }

    /// Short description of the location filter.
    pub fn filter_summary(&self) -> String {
        if self.location_filter.is_empty() {
            format!("all {} locations", self.locations.len())
        } else {
            format!(
                "{} of {} locations",
                self.location_filter.len(),
                self.locations.len()
            )
        }
    }
}
