use super::*;

use std::cell::RefCell;
use std::rc::Rc;

fn state(slide_count: usize, viewport_width: f32) -> BannerState {
    let state = BannerState::new();
    state.set_layout(slide_count, viewport_width);
    state
}

fn record_pages(state: &BannerState) -> Rc<RefCell<Vec<usize>>> {
    let pages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pages);
    state.add_page_changed_callback(move |page| sink.borrow_mut().push(page));
    pages
}

#[test]
fn set_current_page_roundtrips_for_every_index() {
    let state = state(5, 300.0);
    for index in 0..5 {
        state.set_current_page(index as isize);
        assert_eq!(state.current_page(), index);
        assert_eq!(state.scroll_offset(), index as f32 * 300.0);
    }
}

#[test]
fn out_of_range_requests_clamp_to_nearest_boundary() {
    let state = state(4, 300.0);
    state.set_current_page(99);
    assert_eq!(state.current_page(), 3);
    state.set_current_page(-7);
    assert_eq!(state.current_page(), 0);
}

#[test]
fn repeated_set_current_page_notifies_exactly_once() {
    let state = state(4, 300.0);
    let pages = record_pages(&state);
    state.set_current_page(2);
    state.set_current_page(2);
    assert_eq!(*pages.borrow(), vec![2]);
}

#[test]
fn forward_drag_past_threshold_commits_next_page() {
    // Viewport 300, threshold 100: releasing 150 into the page commits.
    let state = state(4, 300.0);
    state.drag_start(300.0);
    assert!(state.drag_move(150.0));
    assert_eq!(state.scroll_offset(), 150.0);
    state.drag_end(150.0);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.scroll_offset(), 300.0);
}

#[test]
fn forward_drag_below_threshold_snaps_back() {
    let state = state(4, 300.0);
    state.drag_start(300.0);
    assert!(state.drag_move(250.0));
    assert_eq!(state.scroll_offset(), 50.0);
    state.drag_end(250.0);
    assert_eq!(state.current_page(), 0);
    assert_eq!(state.scroll_offset(), 0.0);
}

#[test]
fn forward_drag_scenario_notifies_committed_page() {
    let state = state(4, 300.0);
    let pages = record_pages(&state);
    state.drag_start(300.0);
    state.drag_move(150.0);
    state.drag_end(150.0);
    assert_eq!(state.current_page(), 1);
    assert_eq!(*pages.borrow(), vec![1]);
}

#[test]
fn notification_fires_per_commit_not_per_move() {
    let state = state(4, 300.0);
    let pages = record_pages(&state);
    state.drag_start(300.0);
    for step in 1..=10 {
        state.drag_move(300.0 - step as f32 * 15.0);
    }
    assert!(pages.borrow().is_empty());
    state.drag_end(150.0);
    assert_eq!(*pages.borrow(), vec![1]);
}

#[test]
fn forward_move_at_last_page_is_rejected() {
    let state = state(4, 300.0);
    state.set_current_page(3);
    assert_eq!(state.scroll_offset(), 900.0);
    state.drag_start(300.0);
    assert!(!state.drag_move(100.0 - 300.0));
    assert_eq!(state.scroll_offset(), 900.0);
}

#[test]
fn backward_move_at_first_page_is_rejected() {
    let state = state(4, 300.0);
    state.drag_start(100.0);
    assert!(!state.drag_move(250.0));
    assert_eq!(state.scroll_offset(), 0.0);
}

#[test]
fn long_backward_drag_commits_previous_page() {
    let state = state(4, 300.0);
    state.set_current_page(1);
    state.drag_start(100.0);
    assert!(state.drag_move(250.0));
    assert_eq!(state.scroll_offset(), 150.0);
    state.drag_end(250.0);
    assert_eq!(state.current_page(), 0);
}

#[test]
fn short_backward_drag_returns_to_next_boundary() {
    // Total displacement from gesture start stays under the threshold, so the
    // release re-advances to the boundary it was dragged away from.
    let state = state(4, 300.0);
    state.set_current_page(1);
    state.drag_start(100.0);
    assert!(state.drag_move(150.0));
    assert_eq!(state.scroll_offset(), 250.0);
    state.drag_end(150.0);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.scroll_offset(), 300.0);
}

#[test]
fn backward_commitment_uses_total_displacement_not_last_delta() {
    // Many small moves ending with a tiny delta: the cumulative displacement
    // is what crosses the threshold.
    let state = state(4, 300.0);
    state.set_current_page(1);
    state.drag_start(100.0);
    for step in 1..=15 {
        state.drag_move(100.0 + step as f32 * 10.0);
    }
    state.drag_end(250.0);
    assert_eq!(state.current_page(), 0);
}

#[test]
fn zero_slides_accept_no_drag() {
    let state = state(0, 300.0);
    state.drag_start(100.0);
    assert!(!state.is_dragging());
    assert!(!state.drag_move(50.0));
}

#[test]
fn single_slide_commits_clamp_to_page_zero_without_notification() {
    let state = state(1, 300.0);
    let pages = record_pages(&state);
    state.drag_start(300.0);
    state.drag_move(100.0);
    state.drag_end(100.0);
    assert_eq!(state.current_page(), 0);
    assert_eq!(state.scroll_offset(), 0.0);
    assert!(pages.borrow().is_empty());
}

#[test]
fn zero_viewport_width_makes_operations_no_ops() {
    let state = state(4, 0.0);
    state.set_current_page(2);
    assert_eq!(state.scroll_offset(), 0.0);
    state.drag_start(100.0);
    assert!(!state.is_dragging());
}

#[test]
fn drag_start_is_ignored_while_already_dragging() {
    let state = state(4, 300.0);
    state.drag_start(300.0);
    state.drag_move(200.0);
    state.drag_start(500.0);
    // The original gesture keeps its accumulated offset.
    assert_eq!(state.scroll_offset(), 100.0);
}

#[test]
fn cancel_restores_the_settled_offset() {
    let state = state(4, 300.0);
    state.set_current_page(1);
    state.drag_start(300.0);
    state.drag_move(160.0);
    assert_eq!(state.scroll_offset(), 440.0);
    state.drag_cancel();
    assert!(!state.is_dragging());
    assert_eq!(state.scroll_offset(), 300.0);
    assert_eq!(state.current_page(), 1);
}

#[test]
fn release_without_movement_stays_on_settled_page() {
    let state = state(4, 300.0);
    let pages = record_pages(&state);
    state.set_current_page(2);
    pages.borrow_mut().clear();
    state.drag_start(150.0);
    state.drag_end(150.0);
    assert_eq!(state.current_page(), 2);
    assert!(pages.borrow().is_empty());
}

#[test]
fn custom_snap_fraction_changes_commit_distance() {
    let state = BannerState::with_snap_fraction(0.5);
    state.set_layout(4, 300.0);
    // 140 into the page is past one third but short of half.
    state.drag_start(300.0);
    state.drag_move(160.0);
    state.drag_end(160.0);
    assert_eq!(state.current_page(), 0);
}

#[test]
fn invalid_snap_fraction_is_rejected() {
    let state = BannerState::new();
    state.set_snap_fraction(0.0);
    assert_eq!(state.snap_fraction(), 1.0 / 3.0);
    state.set_snap_fraction(f32::NAN);
    assert_eq!(state.snap_fraction(), 1.0 / 3.0);
    state.set_snap_fraction(0.25);
    assert_eq!(state.snap_fraction(), 0.25);
}

#[test]
fn reentrant_handler_terminates_and_settles() {
    let state = state(5, 300.0);
    let chained = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&chained);
    let inner_state = state.clone();
    state.add_page_changed_callback(move |page| {
        sink.borrow_mut().push(page);
        // Chain a follow-up jump from inside the notification.
        inner_state.set_current_page(3);
    });
    state.set_current_page(1);
    assert_eq!(state.current_page(), 3);
    assert_eq!(*chained.borrow(), vec![1, 3]);
}

#[test]
fn shrinking_layout_clamps_offset_into_range() {
    let state = state(4, 300.0);
    state.set_current_page(3);
    state.set_layout(2, 300.0);
    assert_eq!(state.scroll_offset(), 300.0);
    assert_eq!(state.current_page(), 1);
}

#[test]
fn removed_callback_no_longer_fires() {
    let state = state(4, 300.0);
    let pages = record_pages(&state);
    let counted = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&counted);
    let id = state.add_page_changed_callback(move |_| *sink.borrow_mut() += 1);
    state.set_current_page(1);
    state.remove_page_changed_callback(id);
    state.set_current_page(2);
    assert_eq!(*counted.borrow(), 1);
    assert_eq!(*pages.borrow(), vec![1, 2]);
}
