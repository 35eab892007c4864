//! Canned [`CommandInvoker`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use registrar::{CommandError, CommandInvoker, CommandRequest, CommandResponse, Outcome};
use serde_json::Value;

#[derive(Default)]
pub(crate) struct StubInvoker {
    outcomes: HashMap<String, Outcome>,
    pub(crate) requests: Mutex<Vec<CommandRequest>>,
}

impl StubInvoker {
    pub(crate) fn ok(mut self, command: &str, body: Value) -> Self {
        let body = body.as_object().cloned().unwrap_or_default();
        self.outcomes
            .insert(command.to_string(), Ok(CommandResponse::new(body)));
        self
    }

    pub(crate) fn fail(mut self, command: &str, err: CommandError) -> Self {
        self.outcomes.insert(command.to_string(), Err(err));
        self
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        let mut seen: Vec<String> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.command().to_string())
            .collect();
        seen.sort();
        seen
    }
}

#[async_trait]
impl CommandInvoker for StubInvoker {
    async fn invoke(&self, request: CommandRequest) -> Outcome {
        let command = request.command().to_string();
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .get(&command)
            .cloned()
            .unwrap_or_else(|| Err(CommandError::transport(format!("no stub for {command}"))))
    }
}
