use std::sync::Arc;

use chrono::{Local, NaiveDate};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;
use tui_prompts::prelude::{FocusState, TextPrompt, TextState};
use tui_prompts::{Prompt, State};

use appointment_cell::models::TimeSlot;
use appointment_cell::services::BookingService;
use appointment_cell::workflow::{BookingWorkflow, DateRejection, WorkflowPhase};
use doctor_cell::models::Doctor;

use super::{centered_rect, Component, SPINNER_FRAMES};
use crate::action::{Action, Panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Date,
    Slots,
}

/// Right panel: the booking form. Holds the workflow state machine and the
/// read-only copy of the doctor the shell handed down.
pub struct BookingFormComponent {
    tx: Option<UnboundedSender<Action>>,
    service: Arc<BookingService>,
    workflow: BookingWorkflow,
    doctor: Option<Doctor>,
    focus: Field,
    name_state: TextState<'static>,
    date_state: TextState<'static>,
    date_error: Option<String>,
    slot_cursor: usize,
    slot_list_state: ListState,
    focused: bool,
    spinner: usize,
}

impl BookingFormComponent {
    pub fn new(service: Arc<BookingService>) -> Self {
        Self {
            tx: None,
            service,
            workflow: BookingWorkflow::new(),
            doctor: None,
            focus: Field::Name,
            name_state: TextState::default(),
            date_state: TextState::default(),
            date_error: None,
            slot_cursor: 0,
            slot_list_state: ListState::default(),
            focused: false,
            spinner: 0,
        }
    }

    fn sync_focus_states(&mut self) {
        let name_focus = if self.focused && self.focus == Field::Name {
            FocusState::Focused
        } else {
            FocusState::Unfocused
        };
        let date_focus = if self.focused && self.focus == Field::Date {
            FocusState::Focused
        } else {
            FocusState::Unfocused
        };
        *self.name_state.focus_state_mut() = name_focus;
        *self.date_state.focus_state_mut() = date_focus;
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.sync_focus_states();
    }

    fn clear_inputs(&mut self) {
        self.name_state = TextState::default();
        self.date_state = TextState::default();
        self.date_error = None;
        self.slot_cursor = 0;
        self.set_focus(Field::Name);
    }

    /// Commit the date field: parse, refuse past dates locally, then clear
    /// the old slots synchronously and start the tagged fetch.
    fn commit_date(&mut self) {
        self.date_error = None;

        let today = Local::now().date_naive();
        match parse_booking_date(self.date_state.value(), today) {
            Ok(None) => self.workflow.clear_date(),
            Ok(Some(date)) => match self.workflow.select_date(date, today) {
                Ok(token) => {
                    self.slot_cursor = 0;
                    self.spawn_slots_fetch(token, date);
                }
                Err(DateRejection::InPast) => {
                    self.date_error = Some("That date is in the past".to_string());
                }
            },
            Err(message) => self.date_error = Some(message),
        }
    }

    fn spawn_slots_fetch(&self, token: u64, date: NaiveDate) {
        let (Some(tx), Some(doctor)) = (self.tx.clone(), self.doctor.as_ref()) else {
            return;
        };
        let service = Arc::clone(&self.service);
        let doctor_id = doctor.id.clone();
        tokio::spawn(async move {
            let result = service
                .available_slots(&doctor_id, date)
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(Action::SlotsLoaded { token, result });
        });
    }

    fn submit(&mut self) {
        let Some(doctor) = self.doctor.as_ref() else {
            return;
        };
        let Some(request) = self.workflow.begin_submit(&doctor.id) else {
            return;
        };
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service
                .book_appointment(&request)
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(Action::BookingResolved(result));
        });
    }

    fn handle_slots_key(&mut self, key: KeyEvent) {
        let slot_count = self.workflow.slots().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.slot_cursor == 0 {
                    self.set_focus(Field::Date);
                } else {
                    self.slot_cursor -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.slot_cursor + 1 < slot_count {
                    self.slot_cursor += 1;
                }
            }
            KeyCode::Enter => {
                self.workflow.select_slot(self.slot_cursor);
            }
            _ => {}
        }
    }

    fn notice_line(&self) -> Option<(String, Color)> {
        if let Some(message) = self.date_error.as_ref() {
            return Some((message.clone(), Color::Yellow));
        }
        if let Some(message) = self.workflow.error() {
            return Some((format!("{message}  (Esc to dismiss)"), Color::Red));
        }
        if let Some(message) = self.workflow.success() {
            return Some((format!("{message}  (Esc to dismiss)"), Color::Green));
        }
        None
    }

    fn slot_items(&self) -> Vec<ListItem<'static>> {
        let selected = self.workflow.selected_index();
        self.workflow
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| slot_item(slot, Some(index) == selected))
            .collect()
    }

    fn draw_slot_area(&mut self, frame: &mut Frame, area: Rect) {
        if self.workflow.is_busy() {
            let frame_char = SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()];
            let label = match self.workflow.phase() {
                WorkflowPhase::Submitting => format!("{frame_char} Booking..."),
                _ => format!("{frame_char} Loading slots..."),
            };
            frame.render_widget(
                Paragraph::new(label).centered(),
                centered_rect(area.width, 1, area),
            );
            return;
        }

        match self.workflow.phase() {
            WorkflowPhase::SlotsReady if self.workflow.slots().is_empty() => {
                frame.render_widget(
                    Paragraph::new("No free slots on this date.")
                        .style(Style::default().fg(Color::DarkGray))
                        .centered(),
                    centered_rect(area.width, 1, area),
                );
            }
            WorkflowPhase::SlotsReady => {
                let list = List::new(self.slot_items())
                    .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)))
                    .highlight_symbol("> ");
                let cursor = if self.focus == Field::Slots {
                    Some(self.slot_cursor)
                } else {
                    None
                };
                self.slot_list_state.select(cursor);
                frame.render_stateful_widget(list, area, &mut self.slot_list_state);
            }
            _ => {
                frame.render_widget(
                    Paragraph::new("Pick a date to see available slots.")
                        .style(Style::default().fg(Color::DarkGray))
                        .centered(),
                    centered_rect(area.width, 1, area),
                );
            }
        }
    }
}

/// Input-boundary date validation. Empty input clears the date; malformed
/// and past dates are refused with the message shown next to the field.
fn parse_booking_date(raw: &str, today: NaiveDate) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "Enter the date as YYYY-MM-DD".to_string())?;
    if date < today {
        return Err("That date is in the past".to_string());
    }
    Ok(Some(date))
}

fn slot_item(slot: &TimeSlot, is_selected: bool) -> ListItem<'static> {
    let (marker, style) = if is_selected {
        (
            "✓ ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default())
    };
    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(slot.to_string(), style),
    ]))
}

impl Component for BookingFormComponent {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.doctor.is_none() {
            return Ok(None);
        }

        if key.code == KeyCode::Char('b') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit();
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => {
                self.workflow.dismiss_notices();
                self.date_error = None;
            }
            KeyCode::Enter => match self.focus {
                Field::Name => self.set_focus(Field::Date),
                Field::Date => self.commit_date(),
                Field::Slots => self.handle_slots_key(key),
            },
            KeyCode::Up | KeyCode::Down if self.focus == Field::Slots => {
                self.handle_slots_key(key);
            }
            KeyCode::Down if self.focus == Field::Name => self.set_focus(Field::Date),
            KeyCode::Down if self.focus == Field::Date => {
                if !self.workflow.slots().is_empty() {
                    self.set_focus(Field::Slots);
                    self.slot_cursor = 0;
                }
            }
            KeyCode::Up if self.focus == Field::Date => self.set_focus(Field::Name),
            _ => match self.focus {
                Field::Name => {
                    self.name_state.handle_key_event(key);
                    self.workflow.set_patient_name(self.name_state.value());
                }
                Field::Date => {
                    self.date_state.handle_key_event(key);
                }
                Field::Slots => self.handle_slots_key(key),
            },
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.spinner = self.spinner.wrapping_add(1);
            }
            Action::FocusChanged(panel) => {
                self.focused = panel == Panel::Booking;
                self.sync_focus_states();
            }
            Action::DoctorSelected(doctor) => {
                let changed = self.doctor.as_ref().map(|d| d.id.as_str()) != Some(doctor.id.as_str());
                if changed {
                    // Everything tied to the previous doctor's slots is stale.
                    self.workflow.reset_for_doctor();
                    self.date_state = TextState::default();
                    self.date_error = None;
                    self.slot_cursor = 0;
                    self.set_focus(Field::Name);
                }
                self.doctor = Some(doctor);
            }
            Action::SlotsLoaded { token, result } => match result {
                Ok(slots) => {
                    if self.workflow.slots_loaded(token, slots) {
                        self.slot_cursor = 0;
                    }
                }
                Err(message) => {
                    self.workflow.slots_failed(token, message);
                }
            },
            Action::BookingResolved(result) => match result {
                Ok(()) => {
                    self.workflow.booking_succeeded();
                    self.clear_inputs();
                }
                Err(message) => {
                    self.workflow.booking_failed(message);
                }
            },
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
            .title(" Book Appointment ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(doctor) = self.doctor.clone() else {
            frame.render_widget(
                Paragraph::new("Please select a doctor first")
                    .style(Style::default().fg(Color::DarkGray))
                    .centered(),
                centered_rect(inner.width, 1, inner),
            );
            return Ok(());
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // doctor summary
                Constraint::Length(2), // notices
                Constraint::Length(1), // patient name
                Constraint::Length(1), // date
                Constraint::Length(1), // slots header
                Constraint::Min(0),    // slot list
                Constraint::Length(1), // submit hint
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Doctor: ", Style::default().fg(Color::DarkGray)),
                Span::styled(doctor.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  ({} min slots)", doctor.slot_duration),
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            chunks[0],
        );

        if let Some((message, color)) = self.notice_line() {
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(color))
                    .wrap(Wrap { trim: true }),
                chunks[1],
            );
        }

        TextPrompt::from("Patient Name").draw(frame, chunks[2], &mut self.name_state);
        TextPrompt::from("Date (YYYY-MM-DD)").draw(frame, chunks[3], &mut self.date_state);

        frame.render_widget(
            Paragraph::new("Available Slots").style(Style::default().fg(Color::DarkGray)),
            chunks[4],
        );
        self.draw_slot_area(frame, chunks[5]);

        let hint = if self.workflow.can_submit() {
            Span::styled(
                "Ctrl+B  Book Appointment",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "Ctrl+B  Book (needs name, date and slot)",
                Style::default().fg(Color::DarkGray),
            )
        };
        frame.render_widget(Paragraph::new(Line::from(hint)), chunks[6]);

        Ok(())
    }
}
