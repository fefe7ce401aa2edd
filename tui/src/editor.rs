use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deckedit_common::catalog::FILE_CATALOG;
use deckedit_core::{EditorSession, Field, ImageState, Notice, SessionManager, SessionState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use std::io;
use tokio::time::{interval, Duration};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Choosing a file from the static catalog.
    Picker,
    /// Editing the loaded deck.
    Editor,
}

pub struct EditorApp {
    manager: SessionManager,
    running: bool,
    mode: Mode,
    picker_index: usize,
    slide: usize,
    field: usize,
    open: Option<String>,
}

impl EditorApp {
    pub fn new(manager: SessionManager, open: Option<String>) -> Self {
        let mode = if open.is_some() { Mode::Editor } else { Mode::Picker };
        Self {
            manager,
            running: true,
            mode,
            picker_index: 0,
            slide: 0,
            field: 0,
            open,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Some(file_name) = self.open.take() {
            let _ = self.manager.load(&file_name).await;
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut tick_interval = interval(Duration::from_millis(100));

        while self.running {
            {
                let session = self.manager.session();
                let session = session.lock().await;
                terminal.draw(|f| self.draw(f, &session))?;
            }

            tokio::select! {
                _ = tick_interval.tick() => {
                    // Redraw so notices from background saves show up.
                }
                event_result = tokio::task::spawn_blocking(|| event::poll(Duration::from_millis(0))) => {
                    if let Ok(Ok(true)) = event_result {
                        if let Ok(Event::Key(key)) = event::read() {
                            self.handle_key(key.code, key.modifiers).await;
                        }
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    async fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        // A save outcome is a modal alert: any key dismisses it first.
        if self.dismiss_save_notice(code).await {
            return;
        }

        match self.mode {
            Mode::Picker => self.handle_picker_key(code).await,
            Mode::Editor => self.handle_editor_key(code, modifiers).await,
        }
    }

    async fn dismiss_save_notice(&mut self, _code: KeyCode) -> bool {
        let session = self.manager.session();
        let mut session = session.lock().await;
        match session.notice() {
            Some(Notice::Saved(_)) | Some(Notice::SaveFailed(_)) | Some(Notice::Rejected(_)) => {
                session.clear_notice();
                true
            }
            _ => false,
        }
    }

    async fn handle_picker_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.picker_index = self.picker_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.picker_index + 1 < FILE_CATALOG.len() {
                    self.picker_index += 1;
                }
            }
            KeyCode::Enter => {
                let file_name = FILE_CATALOG[self.picker_index];
                self.slide = 0;
                self.field = 0;
                self.mode = Mode::Editor;
                let manager = self.manager.clone();
                // Runs in the background; a failure lands on the session
                // as an inline notice in place of the editor body.
                tokio::spawn(async move {
                    let _ = manager.load(file_name).await;
                });
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.running = false;
            }
            _ => {}
        }
    }

    async fn handle_editor_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('s') && modifiers.contains(KeyModifiers::CONTROL) {
            let manager = self.manager.clone();
            tokio::spawn(async move {
                let _ = manager.save().await;
            });
            return;
        }

        let session = self.manager.session();
        let mut session = session.lock().await;
        let slide_count = session.widgets().len();
        // A reload may have produced a shorter deck.
        self.slide = self.slide.min(slide_count.saturating_sub(1));

        match code {
            KeyCode::Esc => {
                self.mode = Mode::Picker;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.field = (self.field + 1) % Field::ALL.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = (self.field + Field::ALL.len() - 1) % Field::ALL.len();
            }
            KeyCode::Right | KeyCode::PageDown => {
                if self.slide + 1 < slide_count {
                    self.slide += 1;
                    self.field = 0;
                }
            }
            KeyCode::Left | KeyCode::PageUp => {
                if self.slide > 0 {
                    self.slide -= 1;
                    self.field = 0;
                }
            }
            KeyCode::Backspace => {
                if let Some(widget) = session.widgets_mut().get_mut(self.slide) {
                    widget.field_mut(Field::ALL[self.field]).pop();
                }
            }
            KeyCode::Enter => {
                if let Some(widget) = session.widgets_mut().get_mut(self.slide) {
                    widget.field_mut(Field::ALL[self.field]).push('\n');
                }
            }
            KeyCode::Char(c) => {
                if let Some(widget) = session.widgets_mut().get_mut(self.slide) {
                    widget.field_mut(Field::ALL[self.field]).push(c);
                }
            }
            _ => {}
        }
    }

    fn draw(&self, f: &mut Frame, session: &EditorSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0], session);
        match self.mode {
            Mode::Picker => self.draw_picker(f, chunks[1]),
            Mode::Editor => self.draw_editor(f, chunks[1], session),
        }
        self.draw_footer(f, chunks[2], session);

        if let Some(notice) = session.notice() {
            match notice {
                Notice::Saved(msg) => self.draw_alert(f, "Saved", msg, Color::Green),
                Notice::SaveFailed(msg) => self.draw_alert(f, "Save failed", msg, Color::Red),
                Notice::Rejected(msg) => self.draw_alert(f, "Busy", msg, Color::Yellow),
                Notice::LoadFailed(_) => {}
            }
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, session: &EditorSession) {
        let state = match session.state() {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading...",
            SessionState::Ready => "ready",
            SessionState::Saving => "saving...",
        };
        let title = match session.file_name() {
            Some(name) => format!("deckedit — {name} [{state}]"),
            None => format!("deckedit [{state}]"),
        };
        let block = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(block, area);
    }

    fn draw_picker(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = FILE_CATALOG
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == self.picker_index {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("  {name}")).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Select a deck").borders(Borders::ALL));
        f.render_widget(list, area);
    }

    fn draw_editor(&self, f: &mut Frame, area: Rect, session: &EditorSession) {
        if let Some(Notice::LoadFailed(msg)) = session.notice() {
            // Inline error in place of the editor; no widgets, no save.
            let error = Paragraph::new(msg.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Load error").borders(Borders::ALL));
            f.render_widget(error, area);
            return;
        }

        let slide = self.slide.min(session.widgets().len().saturating_sub(1));
        let Some(widget) = session.widgets().get(slide) else {
            let empty = Paragraph::new("No slides in this deck.")
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, area);
            return;
        };

        let title = format!("Slide {}/{}", slide + 1, session.widgets().len());
        let outer = Block::default().title(title).borders(Borders::ALL);
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(inner);

        let image_line = match widget.image {
            ImageState::Available => format!("image: {}", widget.image_ref),
            ImageState::Missing => format!("image: {} [image not found]", widget.image_ref),
        };
        f.render_widget(Paragraph::new(image_line), rows[0]);

        for (i, field) in Field::ALL.iter().enumerate() {
            let active = i == self.field;
            let style = if active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value = widget.field(*field);
            let text = if active {
                format!("{value}\u{2588}")
            } else {
                value.to_string()
            };
            let para = Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .block(Block::default().title(field.label()).borders(Borders::ALL).border_style(style));
            f.render_widget(para, rows[i + 1]);
        }
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect, session: &EditorSession) {
        let hint = match self.mode {
            Mode::Picker => "↑/↓ select  Enter open  Ctrl+Q quit".to_string(),
            Mode::Editor => {
                let save = if session.can_save() { "Ctrl+S save  " } else { "" };
                format!("Tab field  ←/→ slide  {save}Esc files  Ctrl+Q quit")
            }
        };
        f.render_widget(Paragraph::new(hint), area);
    }

    fn draw_alert(&self, f: &mut Frame, title: &str, message: &str, color: Color) {
        let width = (message.width() as u16 + 6)
            .clamp(24, f.area().width.saturating_sub(4));
        let height = 5;
        let area = centered(f.area(), width, height);
        f.render_widget(Clear, area);
        let body = Paragraph::new(format!("{message}\n\n(press any key)"))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(body, area);
    }
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let x = outer.x + outer.width.saturating_sub(width) / 2;
    let y = outer.y + outer.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(outer.width),
        height: height.min(outer.height),
    }
}
