use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Screens the shell can push on top of the tab navigator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Route {
    Chat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LinkingOperation {
    /// Hand a URL (e.g. `tel:`) to the platform.
    OpenUrl { url: String },
    Navigate { route: Route },
}

impl Operation for LinkingOperation {
    type Output = ();
}

/// Fire-and-forget hand-offs to the platform. Nothing comes back.
#[derive(crux_core::macros::Capability)]
pub struct Linking<Ev> {
    context: CapabilityContext<LinkingOperation, Ev>,
}

impl<Ev> Linking<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<LinkingOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn open_url(&self, url: impl Into<String>) {
        self.notify(LinkingOperation::OpenUrl { url: url.into() });
    }

    pub fn navigate(&self, route: Route) {
        self.notify(LinkingOperation::Navigate { route });
    }

    fn notify(&self, operation: LinkingOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
