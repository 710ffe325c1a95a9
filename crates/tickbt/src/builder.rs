//! Shorthand constructors for building trees without spelling out a [`TaskConfig`].
//!
//! Composites still return `Result` because an empty child list is a configuration error;
//! decorators here always receive their child, so they cannot fail.

use std::borrow::Cow;

use tickbt_core::Status;

use crate::composite::Composite;
use crate::decorator::Decorator;
use crate::error::ConfigurationError;
use crate::task::{Scope, Task, TaskConfig, TaskKindName};

#[inline]
pub fn leaf<W: 'static>(
    name: impl Into<Cow<'static, str>>,
    run: impl FnMut(&mut Scope<'_, W>) -> Status + 'static,
) -> Task<W> {
    Task::leaf(TaskConfig::new().named(name).run(run))
}

/// A leaf that runs `act` and always succeeds.
#[inline]
pub fn action<W: 'static>(
    name: impl Into<Cow<'static, str>>,
    mut act: impl FnMut(&mut Scope<'_, W>) + 'static,
) -> Task<W> {
    leaf(name, move |scope| {
        act(scope);
        Status::Success
    })
}

/// A leaf mapping `true` to `Success` and `false` to `Failure`.
#[inline]
pub fn condition<W: 'static>(
    name: impl Into<Cow<'static, str>>,
    mut cond: impl FnMut(&mut Scope<'_, W>) -> bool + 'static,
) -> Task<W> {
    leaf(name, move |scope| Status::from(cond(scope)))
}

#[inline]
pub fn sequence<W: 'static>(
    name: impl Into<Cow<'static, str>>,
    children: Vec<Task<W>>,
) -> Result<Task<W>, ConfigurationError> {
    Task::composite(
        Composite::Sequence,
        TaskConfig::new().named(name).tasks(children),
    )
}

#[inline]
pub fn select<W: 'static>(
    name: impl Into<Cow<'static, str>>,
    children: Vec<Task<W>>,
) -> Result<Task<W>, ConfigurationError> {
    Task::composite(
        Composite::Select,
        TaskConfig::new().named(name).tasks(children),
    )
}

fn decorate<W: 'static>(kind: Decorator, child: Task<W>) -> Task<W> {
    let name = format!("{}({})", TaskKindName::from(kind), child.name());
    Task::wrap(kind, name, child)
}

#[inline]
pub fn invert<W: 'static>(child: Task<W>) -> Task<W> {
    decorate(Decorator::Invert, child)
}

#[inline]
pub fn succeed<W: 'static>(child: Task<W>) -> Task<W> {
    decorate(Decorator::Succeed, child)
}

#[inline]
pub fn fail<W: 'static>(child: Task<W>) -> Task<W> {
    decorate(Decorator::Fail, child)
}

#[inline]
pub fn repeat<W: 'static>(child: Task<W>) -> Task<W> {
    decorate(Decorator::Repeat, child)
}

#[inline]
pub fn repeat_until_fail<W: 'static>(child: Task<W>) -> Task<W> {
    decorate(Decorator::RepeatUntilFail, child)
}
