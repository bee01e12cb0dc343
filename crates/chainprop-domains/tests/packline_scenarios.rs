//! End-to-end production-line scenarios, times in minutes from a zero
//! baseline.

use chainprop_core::{AnchorId, ChainSession, ElementId, EventLog};
use chainprop_domains::{Job, JobSchedule, PacklineComputer, ProductId};

const PRODUCT_A: ProductId = ProductId(0);
const PRODUCT_B: ProductId = ProductId(1);
const PRODUCT_C: ProductId = ProductId(2);

/// One line at baseline 0 with jobs A (duration 100, cleaning 0),
/// B (duration 50, cleaning 10) and C (duration 20, cleaning 5) registered
/// but not yet linked. Cleaning durations depend only on the incoming
/// product, from any predecessor including the line baseline.
fn rig() -> (
    ChainSession<PacklineComputer, EventLog>,
    AnchorId,
    [ElementId; 3],
) {
    let mut computer = PacklineComputer::new();
    for (product, cleaning) in [(PRODUCT_A, 0), (PRODUCT_B, 10), (PRODUCT_C, 5)] {
        computer.set_changeover(None, product, cleaning);
        for from in [PRODUCT_A, PRODUCT_B, PRODUCT_C] {
            computer.set_changeover(Some(from), product, cleaning);
        }
    }
    let mut session = ChainSession::new(computer, EventLog::new());
    let line = session.add_anchor();
    session.computer_mut().set_line_start(line, 0);

    let jobs = [
        (PRODUCT_A, 100i64),
        (PRODUCT_B, 50),
        (PRODUCT_C, 20),
    ]
    .map(|(product, duration)| {
        let element = session.entity_added().unwrap();
        session.computer_mut().set_job(
            element,
            Job {
                product,
                duration,
                ready: 0,
            },
        );
        element
    });
    (session, line, jobs)
}

fn schedule(start_cleaning: i64, start_production: i64, end: i64) -> JobSchedule {
    JobSchedule {
        start_cleaning,
        start_production,
        end,
    }
}

#[test]
fn scenario_1_first_job_starts_at_baseline() {
    let (mut session, line, [a, _, _]) = rig();

    session.link_requested(a, line).unwrap();

    assert_eq!(session.state(a), Some(&schedule(0, 0, 100)));
}

#[test]
fn scenario_2_second_job_waits_for_cleaning() {
    let (mut session, line, [a, b, _]) = rig();
    session.link_requested(a, line).unwrap();

    session.link_requested(b, a).unwrap();

    assert_eq!(session.state(b), Some(&schedule(100, 110, 160)));
}

#[test]
fn scenario_3_mid_chain_insert_recomputes_suffix() {
    let (mut session, line, [a, b, c]) = rig();
    session.link_requested(a, line).unwrap();
    session.link_requested(b, a).unwrap();

    // Insert C between A and B.
    session.unlink_requested(b).unwrap();
    session.link_requested(c, a).unwrap();
    session.link_requested(b, c).unwrap();

    assert_eq!(session.state(a), Some(&schedule(0, 0, 100)));
    assert_eq!(session.state(c), Some(&schedule(100, 105, 125)));
    assert_eq!(session.state(b), Some(&schedule(125, 135, 185)));
}

#[test]
fn scenario_4_removing_head_reseats_successor_on_baseline() {
    let (mut session, line, [a, b, _]) = rig();
    session.link_requested(a, line).unwrap();
    session.link_requested(b, a).unwrap();

    session.unlink_requested(a).unwrap();

    assert_eq!(session.state(a), None);
    // B now heads the line: baseline cleaning applies instead of A -> B.
    assert_eq!(session.state(b), Some(&schedule(0, 10, 60)));
}

#[test]
fn scenario_4b_remaining_suffix_recomputes_from_baseline() {
    let (mut session, line, [a, b, c]) = rig();
    session.link_requested(a, line).unwrap();
    session.link_requested(c, a).unwrap();
    session.link_requested(b, c).unwrap();

    session.unlink_requested(a).unwrap();

    // C becomes the new head and B follows it.
    assert_eq!(session.state(c), Some(&schedule(0, 5, 25)));
    assert_eq!(session.state(b), Some(&schedule(25, 35, 85)));
}

#[test]
fn scenario_5_unlinking_last_job_notifies_absent_once() {
    let (mut session, line, [a, _, _]) = rig();
    session.link_requested(a, line).unwrap();
    session.notifier_mut().clear();

    let outcome = session.unlink_requested(a).unwrap();

    assert_eq!(session.state(a), None);
    assert_eq!(outcome.changed, 1);
    assert_eq!(session.notifier().changed_elements(), vec![a]);
    // Each of the three attributes fires one before/after pair going Absent.
    assert_eq!(session.notifier().len(), 6);
}

#[test]
fn notifications_follow_chain_order() {
    let (mut session, line, [a, b, c]) = rig();
    session.link_requested(a, line).unwrap();
    session.link_requested(b, a).unwrap();
    session.link_requested(c, b).unwrap();
    session.notifier_mut().clear();

    // Move B out of the middle; A keeps its schedule, C shifts forward.
    session.unlink_requested(b).unwrap();

    assert_eq!(session.notifier().changed_elements(), vec![b, c]);
    assert_eq!(session.state(c), Some(&schedule(100, 105, 125)));
}
