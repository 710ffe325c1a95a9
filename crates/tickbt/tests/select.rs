mod common;

use common::{always, ctx, scripted, Recorder};
use tickbt::{Blackboard, Status, Task, TaskConfig};

#[test]
fn select_falls_through_to_the_first_success_in_one_tick() {
    let mut sel = Task::select(TaskConfig::new().named("sel").tasks(vec![
        always("a", Status::Failure),
        always("b", Status::Success),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(sel.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(
        world.log,
        vec!["start:a", "run:a", "end:a", "start:b", "run:b", "end:b"]
    );
}

#[test]
fn success_short_circuits_remaining_children() {
    let mut sel = Task::select(TaskConfig::new().tasks(vec![
        always("a", Status::Success),
        always("b", Status::Success),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(sel.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(world.count("run:b"), 0);
}

#[test]
fn select_fails_when_every_child_fails() {
    let mut sel = Task::select(TaskConfig::new().tasks(vec![
        always("a", Status::Failure),
        always("b", Status::Failure),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(sel.run(&ctx(1), &mut world, &mut bb), Ok(Status::Failure));
    assert_eq!(world.count("end:a"), 1);
    assert_eq!(world.count("end:b"), 1);
}

#[test]
fn running_child_suspends_select_without_rechecking_earlier_children() {
    let mut sel = Task::select(TaskConfig::new().tasks(vec![
        always("a", Status::Failure),
        scripted("b", &[Status::Running, Status::Failure]),
        always("c", Status::Success),
    ]))
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();

    assert_eq!(sel.run(&ctx(1), &mut world, &mut bb), Ok(Status::Running));
    assert_eq!(sel.run(&ctx(2), &mut world, &mut bb), Ok(Status::Success));

    assert_eq!(world.count("run:a"), 1);
    assert_eq!(world.count("run:b"), 2);
    assert_eq!(world.count("start:b"), 1);
    assert_eq!(world.count("run:c"), 1);
}
