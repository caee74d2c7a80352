//! Interactive selection state machine
//!
//! The terminal layer turns key presses into [`Input`]s; the controller owns
//! the cursor and the text filter and decides when a command is chosen.
//! Enter only confirms while browsing, so typing a filter can never launch
//! anything by accident.

use crate::catalog::CatalogItem;
use crate::error::{Error, Result};

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    Filtering,
    Confirmed,
    Cancelled,
}

impl Mode {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

/// Events the controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Open the text filter
    StartFilter,
    Char(char),
    Backspace,
    /// Leave or clear the filter; quits when there is nothing to clear
    Back,
    Confirm,
    Quit,
    /// Terminal resized; only the number of rows per page changes
    Resize { page_size: usize },
}

/// Mutable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub mode: Mode,
    /// Index into the visible list
    pub cursor: usize,
    pub filter: String,
    pub page_size: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            mode: Mode::Browsing,
            cursor: 0,
            filter: String::new(),
            page_size: 10,
        }
    }
}

pub struct SelectionController<'a> {
    /// Candidates in display order, with their catalog index
    entries: Vec<(usize, &'a CatalogItem)>,
    /// Positions into `entries` matching the text filter
    visible: Vec<usize>,
    state: SelectionState,
}

impl<'a> SelectionController<'a> {
    /// Start browsing `entries`; refuses an empty list
    pub fn new(entries: Vec<(usize, &'a CatalogItem)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyResult);
        }

        let visible = (0..entries.len()).collect();
        Ok(Self {
            entries,
            visible,
            state: SelectionState::default(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn filter_text(&self) -> &str {
        &self.state.filter
    }

    pub fn is_filtering(&self) -> bool {
        self.state.mode == Mode::Filtering
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Visible candidates as (position in the full list, item)
    pub fn visible(&self) -> impl Iterator<Item = (usize, &'a CatalogItem)> + '_ {
        self.visible.iter().map(|&pos| (pos, self.entries[pos].1))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Highlighted item and its catalog index
    pub fn selected(&self) -> Option<(usize, &'a CatalogItem)> {
        let pos = *self.visible.get(self.state.cursor)?;
        Some(self.entries[pos])
    }

    /// The command to run, once confirmed
    pub fn confirmed_command(&self) -> Option<&'a str> {
        if self.state.mode != Mode::Confirmed {
            return None;
        }
        self.selected().map(|(_, item)| item.command.as_str())
    }

    pub fn handle(&mut self, input: Input) -> Mode {
        match self.state.mode {
            Mode::Browsing => self.handle_browsing(input),
            Mode::Filtering => self.handle_filtering(input),
            Mode::Confirmed | Mode::Cancelled => {}
        }
        self.state.mode
    }

    fn handle_browsing(&mut self, input: Input) {
        match input {
            Input::StartFilter => self.state.mode = Mode::Filtering,
            Input::Confirm => {
                if self.selected().is_some() {
                    self.state.mode = Mode::Confirmed;
                }
            }
            Input::Back if !self.state.filter.is_empty() => self.set_filter(String::new()),
            Input::Back | Input::Quit => self.state.mode = Mode::Cancelled,
            Input::Char(_) | Input::Backspace => {}
            other => self.navigate(other),
        }
    }

    fn handle_filtering(&mut self, input: Input) {
        match input {
            Input::Char(c) => {
                let mut filter = std::mem::take(&mut self.state.filter);
                filter.push(c);
                self.set_filter(filter);
            }
            Input::Backspace => {
                let mut filter = std::mem::take(&mut self.state.filter);
                filter.pop();
                self.set_filter(filter);
            }
            // Enter applies the filter, it never picks an item here
            Input::Confirm => self.state.mode = Mode::Browsing,
            Input::Back => {
                self.set_filter(String::new());
                self.state.mode = Mode::Browsing;
            }
            Input::Quit => self.state.mode = Mode::Cancelled,
            Input::StartFilter => {}
            other => self.navigate(other),
        }
    }

    fn navigate(&mut self, input: Input) {
        let last = self.visible.len().saturating_sub(1);
        let page = self.state.page_size.max(1);
        let cursor = self.state.cursor;

        self.state.cursor = match input {
            Input::Up => cursor.saturating_sub(1),
            Input::Down => (cursor + 1).min(last),
            Input::PageUp => cursor.saturating_sub(page),
            Input::PageDown => (cursor + page).min(last),
            Input::Top => 0,
            Input::Bottom => last,
            Input::Resize { page_size } => {
                self.state.page_size = page_size.max(1);
                cursor
            }
            _ => cursor,
        };
    }

    fn set_filter(&mut self, filter: String) {
        let needle = filter.to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (_, item))| needle.is_empty() || item.title.to_lowercase().contains(&needle))
            .map(|(pos, _)| pos)
            .collect();
        self.state.filter = filter;
        self.state.cursor = 0;
    }
}
