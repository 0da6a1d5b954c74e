use doctor_cell::models::Doctor;
use doctor_cell::state::{DirectoryPhase, DirectoryState};

fn doctors(count: usize) -> Vec<Doctor> {
    (0..count)
        .map(|index| {
            serde_json::from_value(serde_json::json!({
                "_id": format!("doc-{index}"),
                "name": format!("Dr. Number {index}"),
                "workingDays": ["Monday"],
                "workingHours": { "start": "09:00", "end": "17:00" },
                "slotDuration": 30,
                "breaks": []
            }))
            .unwrap()
        })
        .collect()
}

#[test]
fn starts_loading_with_no_entries() {
    let state = DirectoryState::new();
    assert!(state.is_loading());
    assert!(state.doctors().is_empty());
    assert!(state.selected().is_none());
}

#[test]
fn failure_keeps_zero_entries_and_a_message() {
    let mut state = DirectoryState::new();
    state.failed("Failed to fetch doctors".to_string());

    assert_eq!(state.error(), Some("Failed to fetch doctors"));
    assert!(state.doctors().is_empty());
    assert!(state.select_highlighted().is_none());
}

#[test]
fn selection_follows_the_cursor() {
    let mut state = DirectoryState::new();
    state.loaded(doctors(3));
    assert_eq!(*state.phase(), DirectoryPhase::Ready);

    state.cursor_down();
    state.cursor_down();
    let selected = state.select_highlighted().unwrap().clone();
    assert_eq!(selected.id, "doc-2");
    assert_eq!(state.selected_index(), Some(2));
}

#[test]
fn cursor_clamps_at_both_ends() {
    let mut state = DirectoryState::new();
    state.loaded(doctors(2));

    state.cursor_up();
    assert_eq!(state.cursor(), 0);

    state.cursor_down();
    state.cursor_down();
    state.cursor_down();
    assert_eq!(state.cursor(), 1);
}

#[test]
fn reselecting_the_same_doctor_is_a_no_op_but_not_blocked() {
    let mut state = DirectoryState::new();
    state.loaded(doctors(2));

    let first = state.select_highlighted().unwrap().clone();
    let again = state.select_highlighted().unwrap().clone();
    assert_eq!(first, again);
    assert_eq!(state.selected_index(), Some(0));
}

#[test]
fn selection_is_impossible_outside_ready() {
    let mut state = DirectoryState::new();
    assert!(state.select_highlighted().is_none());

    state.failed("boom".to_string());
    state.cursor_down();
    assert_eq!(state.cursor(), 0);
    assert!(state.select_highlighted().is_none());
}
