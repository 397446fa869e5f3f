use std::collections::HashMap;
use std::sync::Arc;

use tunnelapi_core::error::{ApiError, Result};
use tunnelapi_core::protocol::{Params, Payload, RequestName};

use crate::context::ApiContext;

/// Handler for one control request kind.
///
/// Handlers are synchronous and stateless: all inputs arrive through the
/// context and the decoded payload. `Ok` carries the exact response bytes,
/// which may be empty.
pub trait ApiHandler: Send + Sync {
    fn request(&self) -> RequestName;
    fn handle(&self, ctx: &ApiContext<'_>, params: Params<'_>) -> Result<Vec<u8>>;
}

/// Routes decoded requests to handlers by name. Built once at startup.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<RequestName, Arc<dyn ApiHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Dispatcher with the four built-in request handlers registered.
    pub fn with_builtin_handlers() -> Self {
        let mut d = Self::new();
        for h in crate::services::builtin_handlers() {
            d.register(h);
        }
        d
    }

    pub fn register(&mut self, handler: Arc<dyn ApiHandler>) {
        self.handlers.insert(handler.request(), handler);
    }

    pub fn registered(&self) -> Vec<RequestName> {
        let mut names: Vec<RequestName> = self.handlers.keys().copied().collect();
        names.sort();
        names
    }

    /// Decode `payload` and run the handler registered for `name`.
    ///
    /// The payload size ceiling is the caller's responsibility.
    pub fn dispatch(&self, ctx: &ApiContext<'_>, name: &str, payload: &[u8]) -> Result<Vec<u8>> {
        let payload = Payload::from_slice(payload)?;
        let request: RequestName = name.parse()?;
        let handler = self
            .handlers
            .get(&request)
            .ok_or_else(|| ApiError::UnknownRequest(name.to_string()))?;
        handler.handle(ctx, payload.params())
    }
}
