//! Leaf tasks that treat a blackboard slot as a LIFO stack.
//!
//! The slot holds a `Vec<T>`; pushes and pops both happen at the end. None of these leaves ever
//! reports `Running`.

use tickbt_core::{BbKey, Status};

use crate::task::{Scope, Task, TaskConfig};

/// Field naming the stack slot a primitive operates on.
pub const STACK_VAR: BbKey<&'static str> = BbKey::new("stack_var");
/// Field naming the slot `pop_from_stack` writes the popped element to.
pub const POPPED_VAR: BbKey<&'static str> = BbKey::new("popped_var");

/// Append the elements produced by `elements` to the stack, creating it when absent.
///
/// `elements` is evaluated on every run, so each run pushes again. Always succeeds.
pub fn push_to_stack<W, T, F>(stack: BbKey<Vec<T>>, mut elements: F) -> Task<W>
where
    W: 'static,
    T: 'static,
    F: FnMut(&mut Scope<'_, W>) -> Vec<T> + 'static,
{
    Task::leaf(
        TaskConfig::new()
            .named("push_to_stack")
            .field(STACK_VAR, stack.name())
            .run(move |scope| {
                let produced = elements(scope);
                scope
                    .blackboard
                    .get_or_insert_with(stack, Vec::new)
                    .extend(produced);
                Status::Success
            }),
    )
}

/// Move the most recently pushed element to `popped`.
///
/// Fails without touching the blackboard when the stack is absent or empty.
pub fn pop_from_stack<W, T>(stack: BbKey<Vec<T>>, popped: BbKey<T>) -> Task<W>
where
    W: 'static,
    T: 'static,
{
    Task::leaf(
        TaskConfig::new()
            .named("pop_from_stack")
            .field(STACK_VAR, stack.name())
            .field(POPPED_VAR, popped.name())
            .run(move |scope| {
                let Some(value) = scope.blackboard.get_mut(stack).and_then(Vec::pop) else {
                    return Status::Failure;
                };
                scope.blackboard.set(popped, value);
                Status::Success
            }),
    )
}

/// Empty the stack unconditionally. Always succeeds.
pub fn clear_stack<W, T>(stack: BbKey<Vec<T>>) -> Task<W>
where
    W: 'static,
    T: 'static,
{
    Task::leaf(
        TaskConfig::new()
            .named("clear_stack")
            .field(STACK_VAR, stack.name())
            .run(move |scope| {
                scope.blackboard.get_or_insert_with(stack, Vec::new).clear();
                Status::Success
            }),
    )
}

/// Succeeds iff the stack is absent or empty. Never mutates.
pub fn is_empty<W, T>(stack: BbKey<Vec<T>>) -> Task<W>
where
    W: 'static,
    T: 'static,
{
    Task::leaf(
        TaskConfig::new()
            .named("is_empty")
            .field(STACK_VAR, stack.name())
            .run(move |scope| {
                let empty = scope.blackboard.get(stack).map_or(true, Vec::is_empty);
                Status::from(empty)
            }),
    )
}
