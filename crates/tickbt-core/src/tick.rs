/// Per-tick data handed to every hook.
///
/// The driver assigns tick numbers; the first tick is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickContext {
    pub tick: u64,
}

impl TickContext {
    pub fn new(tick: u64) -> Self {
        Self { tick }
    }
}
