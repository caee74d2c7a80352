//! Application state and logic

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mash_core::{CatalogItem, Input, Mode, SelectionController};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListState;

use crate::style::Styles;

/// Rows each list entry takes (title + description)
pub const ENTRY_HEIGHT: u16 = 2;

/// Rows taken by the margin, header, status line and footer
pub const CHROME_HEIGHT: u16 = 7;

/// How a catalog item is shown in the list
#[derive(Debug, Clone)]
pub struct ListEntry<'a> {
    /// Catalog index, handed back on selection
    pub key: usize,
    pub title: &'a str,
    pub tags: &'a [String],
    pub description: &'a str,
}

impl<'a> ListEntry<'a> {
    pub fn from_item(key: usize, item: &'a CatalogItem) -> Self {
        Self {
            key,
            title: &item.title,
            tags: &item.tags,
            description: &item.description,
        }
    }

    /// Title followed by one coloured chip per tag
    pub fn title_line(&self, title_style: ratatui::style::Style, styles: &Styles) -> Line<'a> {
        let mut spans = vec![Span::styled(self.title, title_style)];
        if !self.tags.is_empty() {
            spans.push(Span::raw("  "));
            spans.extend(
                self.tags
                    .iter()
                    .map(|tag| Span::styled(format!(" {} ", tag), styles.tag_chip(tag))),
            );
        }
        Line::from(spans)
    }
}

/// What the splash screen asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroAction {
    Continue,
    Quit,
}

/// Application state
pub struct App<'a> {
    pub controller: SelectionController<'a>,
    /// Entries aligned with the controller's candidate positions
    pub entries: Vec<ListEntry<'a>>,
    pub styles: Styles,
    pub list_state: ListState,
    pub show_intro: bool,
}

impl<'a> App<'a> {
    pub fn new(visible: Vec<(usize, &'a CatalogItem)>, styles: Styles, show_intro: bool) -> mash_core::Result<Self> {
        let entries = visible
            .iter()
            .map(|&(key, item)| ListEntry::from_item(key, item))
            .collect();
        let controller = SelectionController::new(visible)?;

        Ok(Self {
            controller,
            entries,
            styles,
            list_state: ListState::default().with_selected(Some(0)),
            show_intro,
        })
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Mode {
        if self.show_intro {
            return match intro_action(key) {
                IntroAction::Quit => self.apply(Input::Quit),
                IntroAction::Continue => {
                    self.show_intro = false;
                    self.controller.mode()
                }
            };
        }

        match input_for(key, self.controller.mode()) {
            Some(input) => self.apply(input),
            None => self.controller.mode(),
        }
    }

    pub fn on_resize(&mut self, height: u16) -> Mode {
        let rows = height.saturating_sub(CHROME_HEIGHT) / ENTRY_HEIGHT;
        self.apply(Input::Resize {
            page_size: usize::from(rows.max(1)),
        })
    }

    fn apply(&mut self, input: Input) -> Mode {
        let mode = self.controller.handle(input);
        self.list_state.select(Some(self.controller.cursor()));
        mode
    }

    /// Entry under the cursor
    pub fn selected_entry(&self) -> Option<&ListEntry<'a>> {
        self.visible_entries().nth(self.controller.cursor())
    }

    /// Visible entries in display order
    pub fn visible_entries(&self) -> impl Iterator<Item = &ListEntry<'a>> + '_ {
        self.controller.visible().map(|(pos, _)| &self.entries[pos])
    }
}

/// Any key leaves the splash screen except the quit keys
pub fn intro_action(key: KeyEvent) -> IntroAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => IntroAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => IntroAction::Quit,
        _ => IntroAction::Continue,
    }
}

/// Translate a key press for the current mode
pub fn input_for(key: KeyEvent, mode: Mode) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    let shared = match key.code {
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::PageUp => Some(Input::PageUp),
        KeyCode::PageDown => Some(Input::PageDown),
        KeyCode::Home => Some(Input::Top),
        KeyCode::End => Some(Input::Bottom),
        KeyCode::Enter => Some(Input::Confirm),
        KeyCode::Esc => Some(Input::Back),
        KeyCode::Backspace => Some(Input::Backspace),
        _ => None,
    };
    if shared.is_some() {
        return shared;
    }

    match (mode, key.code) {
        (_, KeyCode::Char('q')) => Some(Input::Quit),
        (Mode::Filtering, KeyCode::Char(c)) => Some(Input::Char(c)),
        (_, KeyCode::Char('/')) => Some(Input::StartFilter),
        (_, KeyCode::Char('k')) => Some(Input::Up),
        (_, KeyCode::Char('j')) => Some(Input::Down),
        (_, KeyCode::Char('g')) => Some(Input::Top),
        (_, KeyCode::Char('G')) => Some(Input::Bottom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn items() -> Vec<CatalogItem> {
        vec![
            CatalogItem {
                title: "Build".into(),
                description: "Run build".into(),
                command: "make".into(),
                tags: vec!["dev".into(), "infra".into()],
            },
            CatalogItem {
                title: "Home".into(),
                command: "cd:$HOME".into(),
                ..Default::default()
            },
        ]
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_title_line_with_tags() {
        let items = items();
        let styles = Styles::default();
        let entry = ListEntry::from_item(0, &items[0]);

        let line = entry.title_line(styles.title, &styles);
        let text = plain(&line);
        assert!(text.contains("Build"));
        assert!(text.contains(" dev "));
        assert!(text.contains(" infra "));
        assert_eq!(line.spans[2].style, styles.tag_chip("dev"));
    }

    #[test]
    fn test_title_line_without_tags() {
        let items = items();
        let styles = Styles::default();
        let entry = ListEntry::from_item(1, &items[1]);

        assert_eq!(plain(&entry.title_line(styles.title, &styles)), "Home");
        assert_eq!(entry.key, 1);
    }

    #[test]
    fn test_q_quits_in_both_modes() {
        assert_eq!(input_for(key(KeyCode::Char('q')), Mode::Browsing), Some(Input::Quit));
        assert_eq!(input_for(key(KeyCode::Char('q')), Mode::Filtering), Some(Input::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input_for(ctrl_c, Mode::Filtering), Some(Input::Quit));
    }

    #[test]
    fn test_letters_are_text_while_filtering() {
        assert_eq!(input_for(key(KeyCode::Char('j')), Mode::Browsing), Some(Input::Down));
        assert_eq!(input_for(key(KeyCode::Char('j')), Mode::Filtering), Some(Input::Char('j')));
        assert_eq!(input_for(key(KeyCode::Char('/')), Mode::Browsing), Some(Input::StartFilter));
        assert_eq!(input_for(key(KeyCode::Char('/')), Mode::Filtering), Some(Input::Char('/')));
        assert_eq!(input_for(key(KeyCode::Char('x')), Mode::Browsing), None);
    }

    #[test]
    fn test_enter_after_typing_filter_does_not_launch() {
        let items = items();
        let visible = items.iter().enumerate().collect();
        let mut app = App::new(visible, Styles::default(), false).unwrap();

        app.on_key(key(KeyCode::Char('/')));
        app.on_key(key(KeyCode::Char('h')));
        assert_eq!(app.on_key(key(KeyCode::Enter)), Mode::Browsing);
        assert_eq!(app.visible_entries().map(|e| e.title).collect::<Vec<_>>(), vec!["Home"]);

        assert_eq!(app.on_key(key(KeyCode::Enter)), Mode::Confirmed);
        assert_eq!(app.controller.confirmed_command(), Some("cd:$HOME"));
        assert_eq!(app.selected_entry().map(|e| e.key), Some(1));
    }

    #[test]
    fn test_intro_consumes_first_key() {
        let items = items();
        let visible = items.iter().enumerate().collect();
        let mut app = App::new(visible, Styles::default(), true).unwrap();

        // Enter on the splash only dismisses it
        assert_eq!(app.on_key(key(KeyCode::Enter)), Mode::Browsing);
        assert!(!app.show_intro);
        assert_eq!(app.on_key(key(KeyCode::Enter)), Mode::Confirmed);
    }

    #[test]
    fn test_intro_quit() {
        let items = items();
        let visible = items.iter().enumerate().collect();
        let mut app = App::new(visible, Styles::default(), true).unwrap();

        assert_eq!(intro_action(key(KeyCode::Char('q'))), IntroAction::Quit);
        assert_eq!(intro_action(key(KeyCode::Char(' '))), IntroAction::Continue);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(intro_action(ctrl_c), IntroAction::Quit);

        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Mode::Cancelled);
        assert!(app.controller.confirmed_command().is_none());
    }

    #[test]
    fn test_resize_sets_page_size_only() {
        let items = items();
        let visible = items.iter().enumerate().collect();
        let mut app = App::new(visible, Styles::default(), false).unwrap();

        app.on_key(key(KeyCode::Down));
        assert_eq!(app.on_resize(27), Mode::Browsing);
        assert_eq!(app.controller.state().page_size, 10);
        assert_eq!(app.controller.cursor(), 1);
        assert_eq!(app.list_state.selected(), Some(1));

        app.on_resize(3);
        assert_eq!(app.controller.state().page_size, 1);
    }

    #[test]
    fn test_empty_list_is_refused() {
        assert!(matches!(
            App::new(Vec::new(), Styles::default(), false),
            Err(mash_core::Error::EmptyResult)
        ));
    }
}
