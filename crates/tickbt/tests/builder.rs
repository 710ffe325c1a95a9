mod common;

use common::{always, ctx, Recorder};
use tickbt::builder::{
    action, condition, fail, invert, repeat_until_fail, select, sequence, succeed,
};
use tickbt::{Blackboard, ConfigurationError, Status, TaskKindName};

#[test]
fn decorator_shorthands_name_themselves_after_their_child() {
    let task = invert(always("ready", Status::Success));
    assert_eq!(task.name(), "invert(ready)");
    assert_eq!(task.kind(), TaskKindName::Invert);

    let task = repeat_until_fail(succeed(always("x", Status::Failure)));
    assert_eq!(task.name(), "repeat_until_fail(succeed(x))");
}

#[test]
fn composite_shorthands_reject_empty_children() {
    let err = select::<Recorder>("fallbacks", Vec::new()).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::NoChildren {
            kind: TaskKindName::Select,
            task: "fallbacks".into(),
        }
    );
}

#[test]
fn shorthands_compose_into_a_runnable_tree() {
    let mut tree = sequence(
        "root",
        vec![
            condition("always_true", |_scope| true),
            fail(always("masked", Status::Success)),
        ],
    )
    .map(invert)
    .unwrap();

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();
    assert_eq!(tree.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(world.count("run:masked"), 1);
}

#[test]
fn action_runs_its_effect_and_succeeds() {
    let mut task = action("mark", |scope: &mut tickbt::Scope<'_, Recorder>| {
        scope.world.log.push(format!("acted:{}", scope.task));
    });

    let mut world = Recorder::default();
    let mut bb = Blackboard::new();
    assert_eq!(task.run(&ctx(1), &mut world, &mut bb), Ok(Status::Success));
    assert_eq!(world.take(), vec!["acted:mark".to_string()]);
}
