use std::borrow::Cow;
use std::fmt;

use tickbt_core::{BbKey, Blackboard, Outcome, Status, TickContext};
use tickbt_trace::{emit as trace_emit, TraceEvent, TASK_END, TASK_START};

use crate::composite::{Composite, CompositeState};
use crate::decorator::Decorator;
use crate::error::{BehaviorError, ConfigurationError};

/// Everything a hook can reach while its task runs.
pub struct Scope<'a, W> {
    pub ctx: &'a TickContext,
    /// External collaborator (world, services) owned by the tree driver.
    pub world: &'a mut W,
    pub blackboard: &'a mut Blackboard,
    /// Named extra fields configured on the task itself.
    pub fields: &'a Blackboard,
    pub task: &'a str,
}

impl<W> Scope<'_, W> {
    pub fn field<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        self.fields.get(key)
    }
}

pub type RunHook<W> = Box<dyn FnMut(&mut Scope<'_, W>) -> Status>;
pub type Hook<W> = Box<dyn FnMut(&mut Scope<'_, W>)>;
pub type TasksFactory<W> = Box<dyn FnOnce(&TaskConfig<W>) -> Vec<Task<W>>>;

enum Children<W>
where
    W: 'static,
{
    List(Vec<Task<W>>),
    Factory(TasksFactory<W>),
}

/// Option bag a task is built from.
///
/// Every kind reads only the options it needs: leaves use `run`, composites use `tasks` (or
/// `tasks_from`), decorators use `task`. `start`, `end`, `name` and named fields apply to every
/// kind.
pub struct TaskConfig<W>
where
    W: 'static,
{
    name: Option<Cow<'static, str>>,
    start: Option<Hook<W>>,
    run: Option<RunHook<W>>,
    end: Option<Hook<W>>,
    task: Option<Task<W>>,
    tasks: Option<Children<W>>,
    fields: Blackboard,
}

impl<W> Default for TaskConfig<W>
where
    W: 'static,
{
    fn default() -> Self {
        Self {
            name: None,
            start: None,
            run: None,
            end: None,
            task: None,
            tasks: None,
            fields: Blackboard::new(),
        }
    }
}

impl<W> TaskConfig<W>
where
    W: 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn start(mut self, hook: impl FnMut(&mut Scope<'_, W>) + 'static) -> Self {
        self.start = Some(Box::new(hook));
        self
    }

    pub fn run(mut self, hook: impl FnMut(&mut Scope<'_, W>) -> Status + 'static) -> Self {
        self.run = Some(Box::new(hook));
        self
    }

    pub fn end(mut self, hook: impl FnMut(&mut Scope<'_, W>) + 'static) -> Self {
        self.end = Some(Box::new(hook));
        self
    }

    pub fn task(mut self, child: Task<W>) -> Self {
        self.task = Some(child);
        self
    }

    pub fn tasks(mut self, children: Vec<Task<W>>) -> Self {
        self.tasks = Some(Children::List(children));
        self
    }

    /// Build the children with a one-shot factory, called once with this configuration when the
    /// composite is constructed.
    pub fn tasks_from(
        mut self,
        factory: impl FnOnce(&TaskConfig<W>) -> Vec<Task<W>> + 'static,
    ) -> Self {
        self.tasks = Some(Children::Factory(Box::new(factory)));
        self
    }

    pub fn field<T: 'static>(mut self, key: BbKey<T>, value: T) -> Self {
        self.fields.set(key, value);
        self
    }

    pub fn get_field<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        self.fields.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKindName {
    Leaf,
    Sequence,
    Select,
    Invert,
    Succeed,
    Fail,
    Repeat,
    RepeatUntilFail,
}

impl TaskKindName {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKindName::Leaf => "leaf",
            TaskKindName::Sequence => "sequence",
            TaskKindName::Select => "select",
            TaskKindName::Invert => "invert",
            TaskKindName::Succeed => "succeed",
            TaskKindName::Fail => "fail",
            TaskKindName::Repeat => "repeat",
            TaskKindName::RepeatUntilFail => "repeat_until_fail",
        }
    }
}

impl From<Composite> for TaskKindName {
    fn from(value: Composite) -> Self {
        match value {
            Composite::Sequence => TaskKindName::Sequence,
            Composite::Select => TaskKindName::Select,
        }
    }
}

impl From<Decorator> for TaskKindName {
    fn from(value: Decorator) -> Self {
        match value {
            Decorator::Invert => TaskKindName::Invert,
            Decorator::Succeed => TaskKindName::Succeed,
            Decorator::Fail => TaskKindName::Fail,
            Decorator::Repeat => TaskKindName::Repeat,
            Decorator::RepeatUntilFail => TaskKindName::RepeatUntilFail,
        }
    }
}

impl fmt::Display for TaskKindName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    NotStarted,
    Started,
    /// The last activation produced this terminal result; the next `run` starts a new one.
    Finished(Outcome),
}

enum TaskKind<W>
where
    W: 'static,
{
    Leaf(Option<RunHook<W>>),
    Composite(Composite, CompositeState<W>),
    Decorator(Decorator, Box<Task<W>>),
}

/// A node of the tree: lifecycle state, optional hooks and a kind-specific payload.
pub struct Task<W>
where
    W: 'static,
{
    name: Cow<'static, str>,
    kind: TaskKind<W>,
    lifecycle: Lifecycle,
    on_start: Option<Hook<W>>,
    on_end: Option<Hook<W>>,
    fields: Blackboard,
}

fn warn_ignored(task: &str, kind: TaskKindName, option: &str) {
    tracing::warn!(task, %kind, option, "ignoring option the task kind does not use");
}

impl<W> Task<W>
where
    W: 'static,
{
    fn from_parts(kind: TaskKind<W>, name: Cow<'static, str>, config: TaskConfig<W>) -> Self {
        Self {
            name,
            kind,
            lifecycle: Lifecycle::NotStarted,
            on_start: config.start,
            on_end: config.end,
            fields: config.fields,
        }
    }

    /// A leaf driven by its `run` hook. A missing hook is only reported when the leaf runs.
    pub fn leaf(mut config: TaskConfig<W>) -> Self {
        let name = config
            .name
            .take()
            .unwrap_or(Cow::Borrowed(TaskKindName::Leaf.as_str()));
        if config.task.take().is_some() {
            warn_ignored(&name, TaskKindName::Leaf, "task");
        }
        if config.tasks.take().is_some() {
            warn_ignored(&name, TaskKindName::Leaf, "tasks");
        }
        let run = config.run.take();
        Self::from_parts(TaskKind::Leaf(run), name, config)
    }

    pub fn sequence(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::composite(Composite::Sequence, config)
    }

    pub fn select(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::composite(Composite::Select, config)
    }

    pub fn invert(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::decorator(Decorator::Invert, config)
    }

    pub fn succeed(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::decorator(Decorator::Succeed, config)
    }

    pub fn fail(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::decorator(Decorator::Fail, config)
    }

    pub fn repeat(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::decorator(Decorator::Repeat, config)
    }

    pub fn repeat_until_fail(config: TaskConfig<W>) -> Result<Self, ConfigurationError> {
        Self::decorator(Decorator::RepeatUntilFail, config)
    }

    pub fn composite(
        kind: Composite,
        mut config: TaskConfig<W>,
    ) -> Result<Self, ConfigurationError> {
        let kind_name = TaskKindName::from(kind);
        let name = config
            .name
            .take()
            .unwrap_or(Cow::Borrowed(kind_name.as_str()));
        if config.run.take().is_some() {
            warn_ignored(&name, kind_name, "run");
        }
        if config.task.take().is_some() {
            warn_ignored(&name, kind_name, "task");
        }

        let children = match config.tasks.take() {
            Some(Children::List(children)) => children,
            Some(Children::Factory(factory)) => factory(&config),
            None => Vec::new(),
        };
        if children.is_empty() {
            return Err(ConfigurationError::NoChildren {
                kind: kind_name,
                task: name.into_owned(),
            });
        }

        let state = CompositeState::new(children);
        Ok(Self::from_parts(
            TaskKind::Composite(kind, state),
            name,
            config,
        ))
    }

    pub fn decorator(
        kind: Decorator,
        mut config: TaskConfig<W>,
    ) -> Result<Self, ConfigurationError> {
        let kind_name = TaskKindName::from(kind);
        let name = config
            .name
            .take()
            .unwrap_or(Cow::Borrowed(kind_name.as_str()));
        if config.run.take().is_some() {
            warn_ignored(&name, kind_name, "run");
        }
        if config.tasks.take().is_some() {
            warn_ignored(&name, kind_name, "tasks");
        }

        let Some(child) = config.task.take() else {
            return Err(ConfigurationError::NoChild {
                kind: kind_name,
                task: name.into_owned(),
            });
        };

        Ok(Self::from_parts(
            TaskKind::Decorator(kind, Box::new(child)),
            name,
            config,
        ))
    }

    /// Decorate `child` directly; infallible since the child is given.
    pub fn wrap(kind: Decorator, name: impl Into<Cow<'static, str>>, child: Task<W>) -> Self {
        Self::from_parts(
            TaskKind::Decorator(kind, Box::new(child)),
            name.into(),
            TaskConfig::new(),
        )
    }

    /// Rename an already-built task.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TaskKindName {
        match &self.kind {
            TaskKind::Leaf(_) => TaskKindName::Leaf,
            TaskKind::Composite(kind, _) => (*kind).into(),
            TaskKind::Decorator(kind, _) => (*kind).into(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether an activation is in progress (started and not yet terminal).
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Started
    }

    pub fn fields(&self) -> &Blackboard {
        &self.fields
    }

    pub fn field<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        self.fields.get(key)
    }

    /// Declared children of a composite; empty for other kinds.
    pub fn children(&self) -> &[Task<W>] {
        match &self.kind {
            TaskKind::Composite(_, state) => state.children(),
            _ => &[],
        }
    }

    /// Children of a composite not yet resolved in the current activation.
    pub fn remaining(&self) -> &[Task<W>] {
        match &self.kind {
            TaskKind::Composite(_, state) => state.remaining(),
            _ => &[],
        }
    }

    /// Wrapped child of a decorator.
    pub fn child(&self) -> Option<&Task<W>> {
        match &self.kind {
            TaskKind::Decorator(_, child) => Some(child),
            _ => None,
        }
    }

    /// Run the task for one tick.
    ///
    /// Starts a new activation first when none is in progress, and ends it when the result is
    /// terminal. Errors abort the tick and leave partial progress in place.
    pub fn run(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status, BehaviorError> {
        if !self.is_active() {
            self.start(ctx, world, blackboard);
        }

        let status = match &mut self.kind {
            TaskKind::Leaf(run) => {
                let Some(run) = run.as_mut() else {
                    return Err(BehaviorError::NoRunBehavior {
                        task: self.name.to_string(),
                    });
                };
                run(&mut Scope {
                    ctx,
                    world: &mut *world,
                    blackboard: &mut *blackboard,
                    fields: &self.fields,
                    task: &self.name,
                })
            }
            TaskKind::Composite(kind, state) => state.run(*kind, ctx, world, blackboard)?,
            TaskKind::Decorator(kind, child) => {
                let child_status = child.run(ctx, world, blackboard)?;
                if child_status.is_terminal() && kind.restarts_child_on_terminal() {
                    child.restart();
                }
                kind.apply(child_status)
            }
        };

        if let Some(outcome) = status.outcome() {
            self.end(outcome, ctx, world, blackboard);
        }
        Ok(status)
    }

    /// Drop any progress and return to `NotStarted`. Fires no hooks.
    pub fn restart(&mut self) {
        self.lifecycle = Lifecycle::NotStarted;
        match &mut self.kind {
            TaskKind::Leaf(_) => {}
            TaskKind::Composite(_, state) => state.reset(),
            TaskKind::Decorator(_, child) => child.restart(),
        }
    }

    fn start(&mut self, ctx: &TickContext, world: &mut W, blackboard: &mut Blackboard) {
        match &mut self.kind {
            TaskKind::Leaf(_) => {}
            TaskKind::Composite(_, state) => state.reset(),
            TaskKind::Decorator(_, child) => child.restart(),
        }
        self.lifecycle = Lifecycle::Started;

        tracing::trace!(tick = ctx.tick, task = %self.name, kind = %self.kind(), "task start");
        trace_emit(
            blackboard,
            TraceEvent::new(ctx.tick, TASK_START).with_task(self.name.clone()),
        );

        if let Some(hook) = self.on_start.as_mut() {
            hook(&mut Scope {
                ctx,
                world: &mut *world,
                blackboard: &mut *blackboard,
                fields: &self.fields,
                task: &self.name,
            });
        }
    }

    fn end(
        &mut self,
        outcome: Outcome,
        ctx: &TickContext,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.lifecycle = Lifecycle::Finished(outcome);

        let status = Status::from(outcome);
        tracing::trace!(tick = ctx.tick, task = %self.name, %status, "task end");
        trace_emit(
            blackboard,
            TraceEvent::new(ctx.tick, TASK_END)
                .with_task(self.name.clone())
                .with_status(status),
        );

        if let Some(hook) = self.on_end.as_mut() {
            hook(&mut Scope {
                ctx,
                world: &mut *world,
                blackboard: &mut *blackboard,
                fields: &self.fields,
                task: &self.name,
            });
        }
    }
}

impl<W> fmt::Debug for Task<W>
where
    W: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Task");
        s.field("name", &self.name)
            .field("kind", &self.kind())
            .field("lifecycle", &self.lifecycle);
        match &self.kind {
            TaskKind::Leaf(run) => s.field("has_run", &run.is_some()),
            TaskKind::Composite(_, state) => s
                .field("children", &state.children())
                .field("remaining", &state.remaining().len()),
            TaskKind::Decorator(_, child) => s.field("child", child),
        };
        s.finish()
    }
}
