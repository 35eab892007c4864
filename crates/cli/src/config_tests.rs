use std::time::Duration;

use super::*;

#[test]
fn flags_build_client_config() {
    let cli = Cli::try_parse_from([
        "dynadot-tools",
        "--api-key",
        "k",
        "--sandbox",
        "--timeout-secs",
        "5",
        "read",
        "dynadot://domains",
    ])
    .unwrap();

    let config = cli.client_config().unwrap();
    assert_eq!(config.endpoint(), Endpoint::Sandbox);
    assert_eq!(config.deadline(), Duration::from_secs(5));
    assert_eq!(config.credential().expose(), "k");
}

#[test]
fn zero_timeout_is_rejected() {
    let cli = Cli::try_parse_from(["dynadot-tools", "--api-key", "k", "--timeout-secs", "0", "resources"])
        .unwrap();
    assert_eq!(cli.client_config(), Err(ConfigError::InvalidDeadline));
}

#[test]
fn call_collects_repeated_args() {
    let cli = Cli::try_parse_from([
        "dynadot-tools",
        "call",
        "set_domain_nameservers",
        "--arg",
        "domain=example.com",
        "--arg",
        "nameservers=ns1.a.net,ns2.a.net",
    ])
    .unwrap();

    let Command::Call { operation, args, json } = cli.command else {
        panic!("expected call");
    };
    assert_eq!(operation, "set_domain_nameservers");
    assert_eq!(
        args,
        vec![
            ("domain".to_string(), "example.com".to_string()),
            ("nameservers".to_string(), "ns1.a.net,ns2.a.net".to_string()),
        ]
    );
    assert!(json.is_none());
}

#[test]
fn malformed_arg_is_a_parse_error() {
    assert!(Cli::try_parse_from(["dynadot-tools", "call", "list_domains", "--arg", "novalue"]).is_err());
    assert!(Cli::try_parse_from(["dynadot-tools", "call", "list_domains", "--arg", "=x"]).is_err());
}

#[test]
fn value_may_contain_equals() {
    assert_eq!(
        parse_key_value("forward_url=https://a.example/?x=1"),
        Ok(("forward_url".to_string(), "https://a.example/?x=1".to_string()))
    );
}

// Only this test touches DYNADOT_SANDBOX, and every value it sets is valid, so
// tests parsing in parallel never see a rejected value.
#[test]
fn sandbox_env_accepts_boolish_values() {
    let cases = [
        ("1", Endpoint::Sandbox),
        ("yes", Endpoint::Sandbox),
        ("true", Endpoint::Sandbox),
        ("false", Endpoint::Production),
        ("0", Endpoint::Production),
    ];
    for (value, expected) in cases {
        std::env::set_var("DYNADOT_SANDBOX", value);
        let parsed = Cli::try_parse_from(["dynadot-tools", "--api-key", "k", "resources"]);
        std::env::remove_var("DYNADOT_SANDBOX");

        let cli = parsed.unwrap_or_else(|err| panic!("DYNADOT_SANDBOX={value}: {err}"));
        assert_eq!(cli.client_config().unwrap().endpoint(), expected, "DYNADOT_SANDBOX={value}");
    }
}
