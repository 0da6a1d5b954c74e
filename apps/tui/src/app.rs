use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

use appointment_cell::services::BookingService;
use doctor_cell::models::Doctor;
use doctor_cell::services::DirectoryService;
use shared_config::AppConfig;

use crate::action::{Action, Panel};
use crate::components::{BookingFormComponent, Component, DoctorListComponent};
use crate::tui::{Event, Tui};

/// The shell: owns the terminal loop, the two panels, and the one piece of
/// cross-panel state — the currently selected doctor. Children receive the
/// doctor read-only through actions and report changes back the same way.
pub struct App {
    tick_rate: f64,
    frame_rate: f64,
    components: Vec<Box<dyn Component>>,
    focus: Panel,
    selected_doctor: Option<Doctor>,
    should_quit: bool,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let directory_service = Arc::new(DirectoryService::new(config));
        let booking_service = Arc::new(BookingService::new(config));

        Ok(Self {
            tick_rate: 4.0,
            frame_rate: 30.0,
            components: vec![
                Box::new(DoctorListComponent::new(directory_service)),
                Box::new(BookingFormComponent::new(booking_service)),
            ],
            focus: Panel::Directory,
            selected_doctor: None,
            should_quit: false,
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.register_action_handler(self.action_tx.clone())?;
        }
        let size = tui.size()?;
        for component in self.components.iter_mut() {
            component.init(size)?;
        }
        self.action_tx.send(Action::FocusChanged(self.focus))?;
        self.action_tx.send(Action::Render)?;

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_quit {
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match event {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(width, height) => action_tx.send(Action::Resize(width, height))?,
            Event::Key(key) => {
                if let Some(action) = self.global_action(key) {
                    action_tx.send(action)?;
                } else {
                    let index = self.focus_index();
                    if let Some(component) = self.components.get_mut(index) {
                        if let Some(action) = component.handle_events(Some(Event::Key(key)))? {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Keys the shell claims before the focused panel sees them.
    fn global_action(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            _ => None,
        }
    }

    fn focus_index(&self) -> usize {
        match self.focus {
            Panel::Directory => 0,
            Panel::Booking => 1,
        }
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            }
            match &action {
                Action::Quit => self.should_quit = true,
                Action::Resize(width, height) => {
                    tui.resize(ratatui::layout::Rect::new(0, 0, *width, *height))?;
                    self.render(tui)?;
                }
                Action::Render => self.render(tui)?,
                Action::FocusNext | Action::FocusPrev => {
                    self.focus = match self.focus {
                        Panel::Directory => Panel::Booking,
                        Panel::Booking => Panel::Directory,
                    };
                    self.action_tx.send(Action::FocusChanged(self.focus))?;
                }
                Action::DoctorSelected(doctor) => {
                    self.selected_doctor = Some(doctor.clone());
                    // Move the user straight to the booking panel.
                    if self.focus != Panel::Booking {
                        self.focus = Panel::Booking;
                        self.action_tx.send(Action::FocusChanged(self.focus))?;
                    }
                }
                Action::Error(message) => {
                    error!("{}", message);
                }
                _ => {}
            }

            for component in self.components.iter_mut() {
                if let Some(next) = component.update(action.clone())? {
                    self.action_tx.send(next)?;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        let title = match &self.selected_doctor {
            Some(doctor) => format!("Appointment Scheduler | {}", doctor.name),
            None => "Appointment Scheduler".to_string(),
        };
        let components = &mut self.components;
        tui.draw(|frame| {
            let outer = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

            frame.render_widget(
                Paragraph::new(title)
                    .style(
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    )
                    .centered(),
                outer[0],
            );

            let panels =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(outer[1]);
            for (component, area) in components.iter_mut().zip(panels.iter()) {
                if let Err(err) = component.draw(frame, *area) {
                    let _ = action_tx.send(Action::Error(format!("Failed to draw: {err:?}")));
                }
            }

            frame.render_widget(
                Paragraph::new(
                    "Tab switch panel | Up/Down move | Enter select | Ctrl+B book | Esc dismiss | Ctrl+C quit",
                )
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
                outer[2],
            );
        })?;
        Ok(())
    }
}
