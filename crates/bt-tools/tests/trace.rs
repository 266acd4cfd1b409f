use bt::builder::{action, always_success, sequence};
use bt::{BehaviorTree, NodeCore, NodeStatus, TreeConfig};
use bt_core::{TraceEvent, TraceSink};
use bt_tools::{TraceRecorder, VecTraceSink};

#[test]
fn vec_sink_collects_events() {
    let mut sink = VecTraceSink::default();
    sink.emit(TraceEvent::new(1, "root", NodeStatus::Idle, NodeStatus::Running));

    assert_eq!(sink.events.len(), 1);
    assert_eq!(sink.events[0].path, "root");
    assert_eq!(sink.events[0].to, NodeStatus::Running);
}

#[test]
fn recorder_sees_every_transition_of_a_tree() {
    let recorder = TraceRecorder::new();
    let mut ticks = 0;
    let slow = action("slow", move |_: &NodeCore| {
        ticks += 1;
        Ok(if ticks < 2 {
            NodeStatus::Running
        } else {
            NodeStatus::Success
        })
    });
    let mut tree = BehaviorTree::with_config(
        sequence("root", vec![always_success("fast"), slow]),
        TreeConfig::default().with_trace(recorder.sink()),
    );

    assert_eq!(tree.tick_while_running().unwrap(), NodeStatus::Success);

    let log = recorder.log();
    assert_eq!(
        log.history("root.slow"),
        vec![NodeStatus::Idle, NodeStatus::Running, NodeStatus::Success]
    );
    assert_eq!(
        log.history("root"),
        vec![NodeStatus::Idle, NodeStatus::Running, NodeStatus::Success]
    );
    assert_eq!(log.history("root.fast"), vec![NodeStatus::Idle, NodeStatus::Success]);
    assert!(log.to_string().starts_with("#2    root.fast: IDLE -> SUCCESS\n"));
}

#[test]
fn take_drains_the_log() {
    let recorder = TraceRecorder::new();
    let mut tree = BehaviorTree::with_config(
        always_success("ok"),
        TreeConfig::default().with_trace(recorder.sink()),
    );
    tree.tick_once().unwrap();

    assert_eq!(recorder.take().len(), 1);
    assert!(recorder.log().is_empty());
}
