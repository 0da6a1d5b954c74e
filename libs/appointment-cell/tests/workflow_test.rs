use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};

use appointment_cell::models::{BookingError, TimeSlot};
use appointment_cell::workflow::{BookingWorkflow, DateRejection, WorkflowPhase};

fn date(ymd: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap()
}

fn slot(start: (u32, u32), end: (u32, u32)) -> TimeSlot {
    TimeSlot {
        start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
    }
}

const TODAY: (i32, u32, u32) = (2026, 8, 6);

fn workflow_with_slots(slots: Vec<TimeSlot>) -> BookingWorkflow {
    let mut workflow = BookingWorkflow::new();
    let token = workflow.select_date(date(TODAY), date(TODAY)).unwrap();
    assert!(workflow.slots_loaded(token, slots));
    workflow
}

#[test]
fn starts_with_no_date_and_nothing_selected() {
    let workflow = BookingWorkflow::new();
    assert_eq!(workflow.phase(), WorkflowPhase::NoDate);
    assert!(workflow.date().is_none());
    assert!(workflow.slots().is_empty());
    assert!(!workflow.can_submit());
}

#[test]
fn past_dates_are_rejected_at_the_input_boundary() {
    let mut workflow = BookingWorkflow::new();
    let result = workflow.select_date(date((2026, 8, 5)), date(TODAY));
    assert_matches!(result, Err(DateRejection::InPast));
    assert_eq!(workflow.phase(), WorkflowPhase::NoDate);
}

#[test]
fn today_is_not_a_past_date() {
    let mut workflow = BookingWorkflow::new();
    assert!(workflow.select_date(date(TODAY), date(TODAY)).is_ok());
    assert_eq!(workflow.phase(), WorkflowPhase::LoadingSlots);
}

#[test]
fn selecting_a_date_clears_old_slots_before_the_fetch_resolves() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30)), slot((9, 30), (10, 0))]);
    assert!(workflow.select_slot(1));

    // New date: the old list and selection are gone synchronously.
    workflow
        .select_date(date((2026, 8, 7)), date(TODAY))
        .unwrap();
    assert!(workflow.slots().is_empty());
    assert!(workflow.selected_slot().is_none());
    assert_eq!(workflow.phase(), WorkflowPhase::LoadingSlots);
}

#[test]
fn stale_slots_responses_are_discarded() {
    let mut workflow = BookingWorkflow::new();
    let first = workflow.select_date(date(TODAY), date(TODAY)).unwrap();
    let second = workflow
        .select_date(date((2026, 8, 7)), date(TODAY))
        .unwrap();
    assert_ne!(first, second);

    // The first request resolves late; it must not win.
    assert!(!workflow.slots_loaded(first, vec![slot((9, 0), (9, 30))]));
    assert!(workflow.slots().is_empty());
    assert_eq!(workflow.phase(), WorkflowPhase::LoadingSlots);

    assert!(workflow.slots_loaded(second, vec![slot((14, 0), (14, 30))]));
    assert_eq!(workflow.slots().len(), 1);
    assert_eq!(workflow.phase(), WorkflowPhase::SlotsReady);
}

#[test]
fn stale_failures_are_discarded_too() {
    let mut workflow = BookingWorkflow::new();
    let first = workflow.select_date(date(TODAY), date(TODAY)).unwrap();
    let second = workflow
        .select_date(date((2026, 8, 7)), date(TODAY))
        .unwrap();

    assert!(!workflow.slots_failed(first, "network down".to_string()));
    assert!(workflow.error().is_none());

    assert!(workflow.slots_failed(second, "network down".to_string()));
    assert_eq!(workflow.phase(), WorkflowPhase::SlotsError);
    assert_eq!(workflow.error(), Some("network down"));
}

#[test]
fn slot_selection_is_limited_to_the_fetched_list() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    assert!(workflow.select_slot(0));
    assert!(!workflow.select_slot(1));
    assert_eq!(workflow.selected_index(), Some(0));
}

#[test]
fn slot_selection_is_invalid_outside_slots_ready() {
    let mut workflow = BookingWorkflow::new();
    assert!(!workflow.select_slot(0));

    workflow.select_date(date(TODAY), date(TODAY)).unwrap();
    assert!(!workflow.select_slot(0));
}

#[test]
fn exactly_one_slot_is_selected_at_a_time() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30)), slot((9, 30), (10, 0))]);
    assert!(workflow.select_slot(0));
    assert!(workflow.select_slot(1));
    assert_eq!(workflow.selected_index(), Some(1));
}

#[test]
fn submit_is_enabled_only_with_date_slot_and_name() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    assert!(!workflow.can_submit());

    workflow.select_slot(0);
    assert!(!workflow.can_submit());

    workflow.set_patient_name("   ");
    assert!(!workflow.can_submit());

    workflow.set_patient_name("Ada Lovelace");
    assert!(workflow.can_submit());
}

#[test]
fn begin_submit_builds_the_request_and_blocks_reentry() {
    let mut workflow = workflow_with_slots(vec![slot((9, 30), (10, 0))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada Lovelace");

    let request = workflow.begin_submit("64f1c0ffee").unwrap();
    assert_eq!(request.doctor_id, "64f1c0ffee");
    assert_eq!(request.patient_name, "Ada Lovelace");
    assert_eq!(request.date, date(TODAY));
    assert_eq!(request.start_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());

    assert_eq!(workflow.phase(), WorkflowPhase::Submitting);
    assert!(workflow.begin_submit("64f1c0ffee").is_none());
}

#[test]
fn successful_booking_resets_the_whole_form() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada Lovelace");
    workflow.begin_submit("64f1c0ffee").unwrap();

    workflow.booking_succeeded();
    assert_eq!(workflow.phase(), WorkflowPhase::Booked);
    assert!(workflow.patient_name().is_empty());
    assert!(workflow.date().is_none());
    assert!(workflow.slots().is_empty());
    assert!(workflow.selected_slot().is_none());
    assert_eq!(workflow.success(), Some("Appointment booked successfully!"));
}

#[test]
fn conflict_shows_the_alternative_and_does_not_book() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada Lovelace");
    workflow.begin_submit("64f1c0ffee").unwrap();

    let conflict = BookingError::Conflict {
        suggested: slot((9, 30), (10, 0)),
    };
    workflow.booking_failed(conflict.to_string());

    assert_ne!(workflow.phase(), WorkflowPhase::Booked);
    assert!(workflow.success().is_none());
    let message = workflow.error().unwrap();
    assert!(message.contains("09:30"));
    assert!(message.contains("10:00"));

    // State is as it was before submission: same date, slots, selection.
    assert_eq!(workflow.phase(), WorkflowPhase::SlotsReady);
    assert_eq!(workflow.date(), Some(date(TODAY)));
    assert_eq!(workflow.slots().len(), 1);
    assert_eq!(workflow.selected_index(), Some(0));
    assert!(workflow.can_submit());
}

#[test]
fn generic_failure_keeps_the_form_for_another_attempt() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada Lovelace");
    workflow.begin_submit("64f1c0ffee").unwrap();

    workflow.booking_failed("Failed to book appointment".to_string());
    assert_eq!(workflow.error(), Some("Failed to book appointment"));
    assert_eq!(workflow.phase(), WorkflowPhase::SlotsReady);
    assert!(workflow.can_submit());
}

#[test]
fn doctor_change_drops_slots_but_keeps_the_name() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada Lovelace");

    workflow.reset_for_doctor();
    assert_eq!(workflow.phase(), WorkflowPhase::NoDate);
    assert!(workflow.date().is_none());
    assert!(workflow.slots().is_empty());
    assert!(workflow.selected_slot().is_none());
    assert_eq!(workflow.patient_name(), "Ada Lovelace");
}

#[test]
fn in_flight_fetch_dies_with_the_doctor_change() {
    let mut workflow = BookingWorkflow::new();
    let token = workflow.select_date(date(TODAY), date(TODAY)).unwrap();

    workflow.reset_for_doctor();
    assert!(!workflow.slots_loaded(token, vec![slot((9, 0), (9, 30))]));
    assert!(workflow.slots().is_empty());
    assert_eq!(workflow.phase(), WorkflowPhase::NoDate);
}

#[test]
fn clearing_the_date_returns_to_no_date() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.clear_date();
    assert_eq!(workflow.phase(), WorkflowPhase::NoDate);
    assert!(workflow.slots().is_empty());
    assert!(!workflow.can_submit());
}

#[test]
fn dismissing_notices_clears_both_messages() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada");
    workflow.begin_submit("d").unwrap();
    workflow.booking_succeeded();
    assert!(workflow.success().is_some());

    workflow.dismiss_notices();
    assert!(workflow.success().is_none());
    assert!(workflow.error().is_none());
}

#[test]
fn booking_again_after_success_walks_the_full_machine() {
    let mut workflow = workflow_with_slots(vec![slot((9, 0), (9, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Ada Lovelace");
    workflow.begin_submit("64f1c0ffee").unwrap();
    workflow.booking_succeeded();

    // A new date selection leaves `Booked` and restarts the flow.
    let token = workflow
        .select_date(date((2026, 8, 10)), date(TODAY))
        .unwrap();
    assert_eq!(workflow.phase(), WorkflowPhase::LoadingSlots);
    assert!(workflow.success().is_none());

    workflow.slots_loaded(token, vec![slot((11, 0), (11, 30))]);
    workflow.select_slot(0);
    workflow.set_patient_name("Grace Hopper");
    assert!(workflow.begin_submit("64f1c0ffee").is_some());
}
