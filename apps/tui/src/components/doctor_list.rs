use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use doctor_cell::models::Doctor;
use doctor_cell::services::DirectoryService;
use doctor_cell::state::DirectoryState;

use super::{centered_rect, Component, SPINNER_FRAMES};
use crate::action::{Action, Panel};

/// Left panel: the doctor directory. Fetches once on activation and reports
/// the selection upward through `Action::DoctorSelected`.
pub struct DoctorListComponent {
    tx: Option<UnboundedSender<Action>>,
    service: Arc<DirectoryService>,
    state: DirectoryState,
    list_state: ListState,
    focused: bool,
    spinner: usize,
}

impl DoctorListComponent {
    pub fn new(service: Arc<DirectoryService>) -> Self {
        Self {
            tx: None,
            service,
            state: DirectoryState::new(),
            list_state: ListState::default(),
            focused: false,
            spinner: 0,
        }
    }

    fn list_items(&self) -> Vec<ListItem<'static>> {
        let selected = self.state.selected_index();
        self.state
            .doctors()
            .iter()
            .enumerate()
            .map(|(index, doctor)| doctor_item(doctor, Some(index) == selected))
            .collect()
    }
}

fn doctor_item(doctor: &Doctor, is_selected: bool) -> ListItem<'static> {
    let name_style = if is_selected {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let marker = if is_selected { "✓ " } else { "  " };

    let badges = doctor
        .day_badges()
        .iter()
        .map(|day| format!("[{day}]"))
        .collect::<Vec<_>>()
        .join(" ");

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Green)),
            Span::styled(doctor.name.clone(), name_style),
        ]),
        Line::from(Span::styled(
            format!("    {}", doctor.hours_summary()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("    {badges}"),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ])
}

impl Component for DoctorListComponent {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    fn init(&mut self, _area: ratatui::layout::Size) -> Result<()> {
        // One fetch per activation; a failure stays on screen, no retries.
        if let Some(tx) = self.tx.clone() {
            let service = Arc::clone(&self.service);
            tokio::spawn(async move {
                let result = service.list_doctors().await.map_err(|err| {
                    error!("Doctor directory fetch failed: {}", err);
                    err.to_string()
                });
                let _ = tx.send(Action::DoctorsLoaded(result));
            });
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.cursor_up();
                Ok(None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.cursor_down();
                Ok(None)
            }
            KeyCode::Enter => Ok(self
                .state
                .select_highlighted()
                .cloned()
                .map(Action::DoctorSelected)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.spinner = self.spinner.wrapping_add(1);
            }
            Action::FocusChanged(panel) => {
                self.focused = panel == Panel::Directory;
            }
            Action::DoctorsLoaded(Ok(doctors)) => {
                self.state.loaded(doctors);
            }
            Action::DoctorsLoaded(Err(message)) => {
                self.state.failed(message);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(" Select a Doctor ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.state.is_loading() {
            let frame_char = SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()];
            frame.render_widget(
                Paragraph::new(format!("{frame_char} Loading doctors...")).centered(),
                centered_rect(inner.width, 1, inner),
            );
            return Ok(());
        }

        if let Some(message) = self.state.error() {
            frame.render_widget(
                Paragraph::new(message.to_string())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return Ok(());
        }

        if self.state.doctors().is_empty() {
            frame.render_widget(
                Paragraph::new("No doctors available.")
                    .style(Style::default().fg(Color::DarkGray))
                    .centered(),
                centered_rect(inner.width, 1, inner),
            );
            return Ok(());
        }

        let list = List::new(self.list_items())
            .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)))
            .highlight_symbol("> ");
        self.list_state.select(Some(self.state.cursor()));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
        Ok(())
    }
}
