use strum::Display;

use appointment_cell::models::TimeSlot;
use appointment_cell::workflow::RequestToken;
use doctor_cell::models::Doctor;

/// The two panels of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Directory,
    Booking,
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    FocusNext,
    FocusPrev,
    FocusChanged(Panel),
    /// The directory fetch resolved.
    DoctorsLoaded(Result<Vec<Doctor>, String>),
    /// The user picked a doctor; the shell owns this state and the booking
    /// panel receives the doctor read-only.
    DoctorSelected(Doctor),
    /// A slots fetch resolved. Carries the generation token it was issued
    /// with; the workflow discards it if a newer date selection superseded it.
    SlotsLoaded {
        token: RequestToken,
        result: Result<Vec<TimeSlot>, String>,
    },
    /// The booking request resolved.
    BookingResolved(Result<(), String>),
}
