#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use tickbt_core::{BbKey, Blackboard, Status};

/// A small trace event describing one lifecycle transition.
///
/// Plain data so it can be recorded during a tick and inspected afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub task: Cow<'static, str>,
    pub status: Option<Status>,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            task: Cow::Borrowed(""),
            status: None,
        }
    }

    pub fn with_task(mut self, task: impl Into<Cow<'static, str>>) -> Self {
        self.task = task.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Sink that stays readable after being boxed into the blackboard.
///
/// Clones share one event buffer: keep a clone, install the other under [`TRACE_SINK`].
#[derive(Debug, Clone, Default)]
pub struct SharedTraceSink {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl SharedTraceSink {
    /// Copy of every event received so far, oldest first.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Box a handle sharing this buffer, ready for [`TRACE_SINK`].
    pub fn boxed(&self) -> Box<dyn TraceSink> {
        Box::new(self.clone())
    }
}

impl TraceSink for SharedTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Events carrying `tag`, in emission order.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    /// Events emitted by the task called `task`, in emission order.
    pub fn for_task<'a>(&'a self, task: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.task == task)
    }

    /// Result of the most recent activation of `task` that ended.
    pub fn last_outcome(&self, task: &str) -> Option<Status> {
        self.events
            .iter()
            .rev()
            .find(|e| e.task == task && e.status.is_some())
            .and_then(|e| e.status)
    }

    /// Number of activations of `task` that were started.
    pub fn activations(&self, task: &str) -> usize {
        self.for_task(task).filter(|e| e.tag == TASK_START).count()
    }
}

/// Tag of the event emitted when a task starts a new activation.
pub const TASK_START: &str = "task.start";
/// Tag of the event emitted when an activation ends; carries the outcome.
pub const TASK_END: &str = "task.end";

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new("tickbt.trace.log");
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new("tickbt.trace.sink");

pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
