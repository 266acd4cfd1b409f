mod common;

use bt::{BtError, NodeStatus, Sequence, TreeNode, Violation};
use common::action;

use NodeStatus::{Failure, Idle, Running, Skipped, Success};

#[test]
fn sequence_all_success() {
    let (a, pa) = action("a", &[Success]);
    let (b, pb) = action("b", &[Success]);
    let mut seq = Sequence::new("seq", vec![a, b]);

    assert_eq!(seq.execute_tick().unwrap(), Success);
    assert_eq!((pa.ticks(), pb.ticks()), (1, 1));
    assert_eq!(seq.status(), Success);
    assert_eq!(seq.current_child(), 0);
}

#[test]
fn sequence_fails_after_third_child_and_restarts_from_first() {
    let (a, pa) = action("a", &[Success]);
    let (b, pb) = action("b", &[Success]);
    let (c, pc) = action("c", &[Failure]);
    let mut seq = Sequence::new("seq", vec![a, b, c]);

    assert_eq!(seq.execute_tick().unwrap(), Failure);
    assert_eq!(pa.ticks() + pb.ticks() + pc.ticks(), 3);
    assert_eq!(seq.current_child(), 0);
    // Every child was reset.
    assert!(seq.children().iter().all(|child| child.status() == Idle));

    assert_eq!(seq.execute_tick().unwrap(), Failure);
    assert_eq!(pa.ticks(), 2);
}

#[test]
fn running_child_resumes_without_reticking_earlier_children() {
    let (a, pa) = action("a", &[Success]);
    let (b, pb) = action("b", &[Running, Success]);
    let (c, pc) = action("c", &[Success]);
    let mut seq = Sequence::new("seq", vec![a, b, c]);

    assert_eq!(seq.execute_tick().unwrap(), Running);
    assert_eq!((pa.ticks(), pb.ticks(), pc.ticks()), (1, 1, 0));
    assert_eq!(seq.current_child(), 1);

    assert_eq!(seq.execute_tick().unwrap(), Success);
    assert_eq!((pa.ticks(), pb.ticks(), pc.ticks()), (1, 2, 1));
    assert_eq!(seq.current_child(), 0);
}

#[test]
fn skipped_children_are_stepped_over() {
    let (a, _) = action("a", &[Skipped]);
    let (b, pb) = action("b", &[Success]);
    let mut seq = Sequence::new("seq", vec![a, b]);

    assert_eq!(seq.execute_tick().unwrap(), Success);
    assert_eq!(pb.ticks(), 1);
}

#[test]
fn child_returning_idle_is_a_contract_violation() {
    let (a, _) = action("lazy", &[Idle]);
    let mut seq = Sequence::new("seq", vec![a]);

    let err = seq.execute_tick().unwrap_err();
    assert_eq!(
        err,
        BtError::violation(
            "seq",
            Violation::ChildReturnedIdle {
                child: "lazy".to_string()
            }
        )
    );
}

#[test]
fn empty_sequence_is_a_contract_violation() {
    let mut seq = Sequence::new("seq", vec![]);
    assert_eq!(
        seq.execute_tick().unwrap_err(),
        BtError::violation("seq", Violation::NoChildren)
    );
}

#[test]
fn halting_cascades_to_the_running_child() {
    let (a, pa) = action("a", &[Success]);
    let (b, pb) = action("b", &[Running]);
    let mut seq = Sequence::new("seq", vec![a, b]);
    assert_eq!(seq.execute_tick().unwrap(), Running);

    seq.halt_node();

    assert_eq!(seq.status(), Idle);
    assert_eq!(seq.current_child(), 0);
    assert_eq!(pb.halts(), 1);
    assert!(seq.children().iter().all(|child| child.is_halted()));

    // Restarts from the first child.
    assert_eq!(seq.execute_tick().unwrap(), Running);
    assert_eq!(pa.ticks(), 2);
}

#[test]
fn add_child_appends_in_order() {
    let (a, pa) = action("a", &[Success]);
    let (b, pb) = action("b", &[Failure]);
    let mut seq = Sequence::new("seq", vec![]);
    seq.add_child(a);
    seq.add_child(b);

    assert_eq!(seq.children_count(), 2);
    assert_eq!(seq.execute_tick().unwrap(), Failure);
    assert_eq!((pa.ticks(), pb.ticks()), (1, 1));
}
