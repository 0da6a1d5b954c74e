use chrono::NaiveDate;
use tracing::debug;

use crate::models::{BookAppointmentRequest, TimeSlot};

/// Tag attached to each slots fetch. Monotonically increasing; a response is
/// applied only if it still carries the current token, so a fetch superseded
/// by a later date selection can never overwrite fresher state.
pub type RequestToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// No date chosen yet (also the state after a doctor change).
    NoDate,
    /// A date was chosen; the slots fetch is in flight.
    LoadingSlots,
    /// Slots for the current date are on screen.
    SlotsReady,
    /// The slots fetch failed; the list stays empty.
    SlotsError,
    /// The booking request is in flight.
    Submitting,
    /// The booking succeeded; the form has been cleared.
    Booked,
}

/// Reasons a date is refused at the input boundary, before any fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRejection {
    InPast,
}

/// The booking workflow of one doctor panel.
///
/// Invariant: `selected` only ever indexes into `slots`, and `slots` always
/// belongs to `date`. Changing the date clears both synchronously, before
/// the new fetch resolves, so a booking can never target stale data.
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    phase: WorkflowPhase,
    generation: RequestToken,
    date: Option<NaiveDate>,
    slots: Vec<TimeSlot>,
    selected: Option<usize>,
    patient_name: String,
    error: Option<String>,
    success: Option<String>,
}

impl Default for BookingWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWorkflow {
    pub fn new() -> Self {
        Self {
            phase: WorkflowPhase::NoDate,
            generation: 0,
            date: None,
            slots: Vec::new(),
            selected: None,
            patient_name: String::new(),
            error: None,
            success: None,
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected.and_then(|index| self.slots.get(index))
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn set_patient_name(&mut self, name: impl Into<String>) {
        self.patient_name = name.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn dismiss_notices(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// True while a network call is in flight and the panel shows a busy
    /// indicator.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            WorkflowPhase::LoadingSlots | WorkflowPhase::Submitting
        )
    }

    /// Choose a date. Past dates are refused here, at the input boundary —
    /// no server round trip. On acceptance the previous slot list and slot
    /// selection are cleared immediately and a fresh token is issued for the
    /// fetch the caller is about to start.
    pub fn select_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<RequestToken, DateRejection> {
        if date < today {
            return Err(DateRejection::InPast);
        }

        self.date = Some(date);
        self.slots.clear();
        self.selected = None;
        self.error = None;
        self.success = None;
        self.phase = WorkflowPhase::LoadingSlots;
        self.generation += 1;
        debug!("Date {} selected, slots fetch generation {}", date, self.generation);
        Ok(self.generation)
    }

    /// Clear the date field: back to `NoDate` with nothing to book.
    pub fn clear_date(&mut self) {
        self.date = None;
        self.slots.clear();
        self.selected = None;
        self.phase = WorkflowPhase::NoDate;
    }

    /// Apply a successful slots response. Returns `false` (and changes
    /// nothing) if the token is stale.
    pub fn slots_loaded(&mut self, token: RequestToken, slots: Vec<TimeSlot>) -> bool {
        if token != self.generation || self.phase != WorkflowPhase::LoadingSlots {
            debug!("Discarding stale slots response (token {})", token);
            return false;
        }
        self.slots = slots;
        self.selected = None;
        self.phase = WorkflowPhase::SlotsReady;
        true
    }

    /// Apply a failed slots response. Same staleness rule as `slots_loaded`.
    pub fn slots_failed(&mut self, token: RequestToken, message: String) -> bool {
        if token != self.generation || self.phase != WorkflowPhase::LoadingSlots {
            debug!("Discarding stale slots failure (token {})", token);
            return false;
        }
        self.slots.clear();
        self.selected = None;
        self.error = Some(message);
        self.phase = WorkflowPhase::SlotsError;
        true
    }

    /// Select one slot by its position in the current list. Valid only in
    /// `SlotsReady` and only for a member of the list — the selection set is
    /// exactly the fetched list. Exactly one slot is selected at a time.
    pub fn select_slot(&mut self, index: usize) -> bool {
        if self.phase != WorkflowPhase::SlotsReady || index >= self.slots.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Enabling condition for the submit action: date and slot selected,
    /// patient name non-empty, nothing in flight. A disabled submit is not an
    /// error, the action is simply unavailable.
    pub fn can_submit(&self) -> bool {
        self.phase == WorkflowPhase::SlotsReady
            && self.date.is_some()
            && self.selected_slot().is_some()
            && !self.patient_name.trim().is_empty()
    }

    /// Enter `Submitting` and build the request body for the caller to send.
    /// Returns `None` when the enabling condition does not hold.
    pub fn begin_submit(&mut self, doctor_id: &str) -> Option<BookAppointmentRequest> {
        if !self.can_submit() {
            return None;
        }
        let slot = *self.selected_slot()?;
        let date = self.date?;

        self.error = None;
        self.success = None;
        self.phase = WorkflowPhase::Submitting;
        Some(BookAppointmentRequest {
            doctor_id: doctor_id.to_string(),
            patient_name: self.patient_name.trim().to_string(),
            date,
            start_time: slot.start,
            end_time: slot.end,
        })
    }

    /// The booking went through: clear patient name, date, slot and slot
    /// list, and show the success notice.
    pub fn booking_succeeded(&mut self) {
        self.patient_name.clear();
        self.date = None;
        self.slots.clear();
        self.selected = None;
        self.error = None;
        self.success = Some("Appointment booked successfully!".to_string());
        self.phase = WorkflowPhase::Booked;
    }

    /// The booking was refused. The message already names the suggested
    /// alternative when the service proposed one. Everything else stays as it
    /// was before submission so the user can re-select and try again.
    pub fn booking_failed(&mut self, message: String) {
        self.error = Some(message);
        self.success = None;
        self.phase = WorkflowPhase::SlotsReady;
    }

    /// A different doctor was picked in the directory: drop everything tied
    /// to the previous doctor's slots. The patient name survives, it is not
    /// doctor-specific. Stale in-flight fetches die via the bumped token.
    pub fn reset_for_doctor(&mut self) {
        self.date = None;
        self.slots.clear();
        self.selected = None;
        self.error = None;
        self.success = None;
        self.generation += 1;
        self.phase = WorkflowPhase::NoDate;
    }
}
