use std::time::Duration;

use rstest::rstest;

use super::*;

#[test]
fn timeout_message_names_command_and_deadline() {
    let err = CommandError::Timeout {
        command: CommandName::new("search").unwrap(),
        deadline: Duration::from_secs(30),
    };
    assert_eq!(err.to_string(), "search timed out after 30s");
    assert_eq!(err.kind(), FailureKind::Timeout);
}

#[test]
fn status_message_carries_code_and_reason() {
    let err = CommandError::status(500, Some("Internal Server Error"));
    assert_eq!(err.to_string(), "500 Internal Server Error");
    assert_eq!(err.kind(), FailureKind::Transport);

    assert_eq!(CommandError::status(599, None).to_string(), "599");
}

#[rstest]
#[case::connection(CommandError::transport("connection refused"), RetryPolicy::Retryable)]
#[case::server_error(CommandError::status(503, Some("Service Unavailable")), RetryPolicy::Retryable)]
#[case::client_error(CommandError::status(403, Some("Forbidden")), RetryPolicy::NonRetryable)]
#[case::application(CommandError::application("bad domain"), RetryPolicy::NonRetryable)]
#[case::timeout(
    CommandError::Timeout { command: CommandName::new("renew").unwrap(), deadline: Duration::from_millis(50) },
    RetryPolicy::NonRetryable
)]
fn retry_policy_by_failure(#[case] err: CommandError, #[case] expected: RetryPolicy) {
    assert_eq!(err.retry_policy(), expected);
}
