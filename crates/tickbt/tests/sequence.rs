mod common;

use common::{always, ctx, scripted, Recorder};
use tickbt::{Blackboard, Status, Task, TaskConfig};

#[test]
fn sequence_resumes_at_the_running_child() {
    let mut seq = Task::sequence(TaskConfig::new().named("seq").tasks(vec![
        always("a", Status::Success),
        always("b", Status::Success),
        scripted("c", &[Status::Running, Status::Running, Status::Success]),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    let results: Vec<Status> = (1..=3)
        .map(|t| seq.run(&ctx(t), &mut world, &mut bb).unwrap())
        .collect();

    assert_eq!(
        results,
        vec![Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(world.count("run:a"), 1);
    assert_eq!(world.count("run:b"), 1);
    assert_eq!(world.count("run:c"), 3);
    assert_eq!(world.count("start:c"), 1);
    assert_eq!(world.count("end:c"), 1);
}

#[test]
fn children_succeeding_in_one_tick_all_run_in_that_tick() {
    let mut seq = Task::sequence(TaskConfig::new().tasks(vec![
        always("a", Status::Success),
        always("b", Status::Success),
        always("c", Status::Success),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(seq.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(
        world.log,
        vec![
            "start:a", "run:a", "end:a", "start:b", "run:b", "end:b", "start:c", "run:c",
            "end:c",
        ]
    );
}

#[test]
fn failure_discards_the_rest_of_the_queue() {
    let mut seq = Task::sequence(TaskConfig::new().tasks(vec![
        always("a", Status::Success),
        always("b", Status::Failure),
        always("c", Status::Success),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(seq.run(&ctx(1), &mut world, &mut bb), Ok(Status::Failure));
    assert_eq!(world.count("run:c"), 0);
    assert!(seq.remaining().is_empty());
}

#[test]
fn remaining_queue_is_a_suffix_of_the_children() {
    let mut seq = Task::sequence(TaskConfig::new().tasks(vec![
        always("a", Status::Success),
        scripted("b", &[Status::Running, Status::Success]),
        always("c", Status::Running),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    seq.run(&ctx(1), &mut world, &mut bb).unwrap();
    let names: Vec<_> = seq.remaining().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["b", "c"]);

    seq.run(&ctx(2), &mut world, &mut bb).unwrap();
    let names: Vec<_> = seq.remaining().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["c"]);
    assert_eq!(seq.children().len(), 3);
}

#[test]
fn a_new_activation_restarts_every_child() {
    let mut seq = Task::sequence(TaskConfig::new().tasks(vec![
        always("a", Status::Success),
        always("b", Status::Success),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(seq.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(seq.run(&ctx(2), &mut world, &mut bb), Ok(Status::Success));

    assert_eq!(world.count("start:a"), 2);
    assert_eq!(world.count("run:a"), 2);
    assert_eq!(world.count("end:b"), 2);
}

#[test]
fn children_can_come_from_a_factory_reading_config_fields() {
    const WIDTH: tickbt::BbKey<usize> = tickbt::BbKey::new("width");

    let mut seq = Task::sequence(
        TaskConfig::new()
            .named("fan")
            .field(WIDTH, 4)
            .tasks_from(|cfg: &TaskConfig<Recorder>| {
                let n = cfg.get_field(WIDTH).copied().unwrap_or(0);
                (0..n).map(|_| always("x", Status::Success)).collect()
            }),
    )
    .unwrap();

    assert_eq!(seq.children().len(), 4);
    assert_eq!(seq.field(WIDTH), Some(&4));

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();
    assert_eq!(seq.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(world.count("run:x"), 4);
}
