#![allow(dead_code)]

use std::collections::VecDeque;

use tickbt::{Status, Task, TaskConfig, TickContext};

/// World that records every hook invocation as `"<hook>:<task>"`.
#[derive(Debug, Default)]
pub struct Recorder {
    pub log: Vec<String>,
}

impl Recorder {
    pub fn count(&self, entry: &str) -> usize {
        self.log.iter().filter(|e| e.as_str() == entry).count()
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

/// Leaf that replays `script` one status per run, repeating the last one once exhausted.
pub fn scripted(name: &'static str, script: &[Status]) -> Task<Recorder> {
    let mut remaining: VecDeque<Status> = script.iter().copied().collect();
    let mut last = Status::Success;
    Task::leaf(
        TaskConfig::<Recorder>::new()
            .named(name)
            .start(move |scope| scope.world.log.push(format!("start:{}", scope.task)))
            .run(move |scope| {
                scope.world.log.push(format!("run:{}", scope.task));
                if let Some(next) = remaining.pop_front() {
                    last = next;
                }
                last
            })
            .end(move |scope| scope.world.log.push(format!("end:{}", scope.task))),
    )
}

pub fn always(name: &'static str, status: Status) -> Task<Recorder> {
    scripted(name, &[status])
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick)
}
