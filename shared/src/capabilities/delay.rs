use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Ask the shell to wait `millis` and then answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelayOperation {
    pub millis: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DelayOutput {
    Elapsed,
}

impl Operation for DelayOperation {
    type Output = DelayOutput;
}

/// Simulated latency and debounce timers. The shell owns the clock, so
/// tests resolve delays by hand.
#[derive(crux_core::macros::Capability)]
pub struct Delay<Ev> {
    context: CapabilityContext<DelayOperation, Ev>,
}

impl<Ev> Delay<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<DelayOperation, Ev>) -> Self {
        Self { context }
    }

    /// Dispatches `event` once the shell reports that `millis` have passed.
    pub fn start(&self, millis: u64, event: Ev)
    where
        Ev: Send,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let DelayOutput::Elapsed = ctx.request_from_shell(DelayOperation { millis }).await;
            ctx.update_app(event);
        });
    }
}
