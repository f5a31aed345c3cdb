//! Scripted executor for façade tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use walmart_core::{CommandExecutor, Envelope, MarketplaceError, MarketplaceResult, Params};

/// Answers calls from a script and records `(operation, params)` pairs.
///
/// Scripted failures are HTTP statuses. An exhausted script answers 404.
#[derive(Debug, Default)]
pub(crate) struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<Value, u16>>>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl ScriptedExecutor {
    pub(crate) fn new(responses: Vec<Result<Value, u16>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, operation: &str, params: Params) -> MarketplaceResult<Envelope> {
        self.calls.lock().push((operation.to_owned(), params));
        match self.responses.lock().pop_front() {
            Some(Ok(body)) => Ok(Envelope::from_body(200, body)),
            Some(Err(status)) => {
                Err(MarketplaceError::transport(status, format!("status {status}")))
            }
            None => Err(MarketplaceError::transport(404, "")),
        }
    }
}
