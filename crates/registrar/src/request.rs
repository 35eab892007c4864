//! Outbound command requests.
//!
//! A [`CommandRequest`] is a command name plus the parameters the caller
//! actually supplied. Omission is meaningful to the remote service: a key sent
//! with an empty value clears a setting, while an absent key leaves it alone.
//! The builder therefore drops absent and empty values and never invents one.
//!
//! List parameters fan out to zero-based positional fields (`domain0`,
//! `domain1`, ...). The remote service matches list items by index, not by a
//! generic list field.

use std::collections::BTreeMap;

use crate::{ApiKey, CommandName};

/// Query field carrying the credential.
pub const KEY_FIELD: &str = "key";

/// Query field carrying the command name.
pub const COMMAND_FIELD: &str = "command";

fn is_reserved(name: &str) -> bool {
    name == KEY_FIELD || name == COMMAND_FIELD
}

/// A single command invocation, ready to be attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    command: CommandName,
    params: BTreeMap<String, String>,
}

impl CommandRequest {
    /// Starts a request for `command` with no parameters.
    pub fn new(command: CommandName) -> Self {
        Self {
            command,
            params: BTreeMap::new(),
        }
    }

    /// Builds a request from name/value pairs, skipping absent and empty values.
    pub fn from_pairs<I, K, V>(command: CommandName, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::new(command);
        for (name, value) in pairs {
            request.insert_opt(name.as_ref(), value);
        }
        request
    }

    /// Adds `name=value` unless `value` is empty.
    pub fn param(mut self, name: &str, value: impl AsRef<str>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds `name=value` when `value` is present and non-empty.
    pub fn opt_param<V: AsRef<str>>(mut self, name: &str, value: Option<V>) -> Self {
        self.insert_opt(name, value);
        self
    }

    /// Fans `values` out to `name0`, `name1`, ... in input order.
    pub fn list_param<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        self.insert_list(name, values);
        self
    }

    /// In-place form of [`CommandRequest::param`].
    ///
    /// Parameters named `key` or `command` are discarded: those fields are
    /// always supplied by the client.
    pub fn insert(&mut self, name: &str, value: impl AsRef<str>) {
        let value = value.as_ref();
        if value.is_empty() {
            return;
        }
        if is_reserved(name) {
            tracing::debug!(
                command = %self.command,
                param = name,
                "Ignoring caller-supplied reserved parameter"
            );
            return;
        }
        self.params.insert(name.to_string(), value.to_string());
    }

    /// In-place form of [`CommandRequest::opt_param`].
    pub fn insert_opt<V: AsRef<str>>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// In-place form of [`CommandRequest::list_param`].
    ///
    /// Each item keeps its input position as its index. Empty items are not
    /// sent, leaving a gap, so parallel lists stay aligned by index.
    pub fn insert_list<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let items = values
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.as_ref().is_empty());
        for (index, value) in items {
            self.insert(&format!("{name}{index}"), value);
        }
    }

    /// The command this request invokes.
    pub fn command(&self) -> &CommandName {
        &self.command
    }

    /// Caller-supplied parameters, excluding the credential and command fields.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Serialises the request into query pairs.
    ///
    /// `key` and `command` always come first, followed by the parameters in
    /// name order.
    pub fn to_query(&self, credential: &ApiKey) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.params.len() + 2);
        query.push((KEY_FIELD.to_string(), credential.expose().to_string()));
        query.push((COMMAND_FIELD.to_string(), self.command.as_str().to_string()));
        query.extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        query
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
