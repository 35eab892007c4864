use std::collections::HashSet;

use rstest::rstest;
use serde_json::{json, Map, Value};

use super::*;

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn op(name: &str) -> &'static Operation {
    Catalog::default().find(name).unwrap()
}

#[test]
fn names_are_unique_and_commands_non_empty() {
    let catalog = Catalog::default();
    let mut names = HashSet::new();
    for operation in catalog.iter() {
        assert!(names.insert(operation.name), "duplicate {}", operation.name);
        assert!(!operation.command.is_empty(), "{} has no command", operation.name);
        assert!(!operation.description.is_empty(), "{} has no description", operation.name);
    }
    assert!(catalog.len() >= 60);
}

#[test]
fn argument_names_are_unique_per_operation() {
    for operation in Catalog::default().iter() {
        let mut seen = HashSet::new();
        for param in operation.params {
            assert!(seen.insert(param.name), "{}: duplicate {}", operation.name, param.name);
            assert_ne!(param.wire, "key", "{}", operation.name);
            assert_ne!(param.wire, "command", "{}", operation.name);
        }
    }
}

#[test]
fn schema_lists_properties_and_required() {
    let schema = op("search_domains").input_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["domains"]["type"], "array");
    assert_eq!(schema["properties"]["domains"]["items"]["type"], "string");
    assert_eq!(schema["properties"]["show_price"]["type"], "boolean");
    assert_eq!(schema["required"], json!(["domains"]));
    assert_eq!(schema["additionalProperties"], false);
}

#[test]
fn list_arguments_fan_out() {
    let request = op("set_domain_nameservers")
        .request(&args(json!({
            "domain": "example.com",
            "nameservers": ["ns1.example.net", "ns2.example.net"]
        })))
        .unwrap();

    assert_eq!(request.command().as_str(), "set_ns");
    assert_eq!(request.params()["domain"], "example.com");
    assert_eq!(request.params()["ns0"], "ns1.example.net");
    assert_eq!(request.params()["ns1"], "ns2.example.net");
}

#[test]
fn comma_separated_list_is_accepted() {
    let request = op("search_domains")
        .request(&args(json!({"domains": "a.com, b.org"})))
        .unwrap();
    assert_eq!(request.params()["domain0"], "a.com");
    assert_eq!(request.params()["domain1"], "b.org");
}

#[test]
fn scalar_kinds_are_encoded() {
    let request = op("renew_domain")
        .request(&args(json!({
            "domain": "example.com",
            "duration": 2,
            "year": "2027",
            "price_check": true,
            "coupon": ""
        })))
        .unwrap();

    assert_eq!(request.params()["duration"], "2");
    assert_eq!(request.params()["year"], "2027");
    assert_eq!(request.params()["price_check"], "1");
    assert!(!request.params().contains_key("coupon"));
    assert!(!request.params().contains_key("currency"));
}

#[test]
fn wire_names_are_used() {
    let request = op("transfer_domain")
        .request(&args(json!({"domain": "example.com", "auth_code": "XyZ"})))
        .unwrap();
    assert_eq!(request.params()["auth"], "XyZ");
    assert!(!request.params().contains_key("auth_code"));
}

#[test]
fn null_counts_as_absent() {
    let request = op("search_domains")
        .request(&args(json!({"domains": ["a.com"], "currency": null})))
        .unwrap();
    assert!(!request.params().contains_key("currency"));
}

#[rstest]
#[case::missing(json!({}), ArgumentError::Missing { operation: "get_domain_info", argument: "domain" })]
#[case::empty(json!({"domain": ""}), ArgumentError::Missing { operation: "get_domain_info", argument: "domain" })]
#[case::null(json!({"domain": null}), ArgumentError::Missing { operation: "get_domain_info", argument: "domain" })]
#[case::unknown(json!({"domain": "a.com", "extra": 1}), ArgumentError::Unknown { operation: "get_domain_info", argument: "extra".into() })]
#[case::wrong_type(json!({"domain": ["a.com"]}), ArgumentError::InvalidType { operation: "get_domain_info", argument: "domain", expected: "string" })]
fn invalid_arguments_are_rejected(#[case] input: Value, #[case] expected: ArgumentError) {
    assert_eq!(op("get_domain_info").request(&args(input)), Err(expected));
}

#[test]
fn non_numeric_integer_is_rejected() {
    let err = op("register_domain")
        .request(&args(json!({"domain": "a.com", "duration": "two"})))
        .unwrap_err();
    assert!(matches!(err, ArgumentError::InvalidType { argument: "duration", .. }));
}

#[test]
fn empty_required_list_is_missing() {
    let err = op("search_domains")
        .request(&args(json!({"domains": []})))
        .unwrap_err();
    assert!(matches!(err, ArgumentError::Missing { argument: "domains", .. }));
}

#[test]
fn parameterless_operations_build_bare_requests() {
    let request = op("get_account_balance").request(&Map::new()).unwrap();
    assert_eq!(request.command().as_str(), "get_account_balance");
    assert!(request.params().is_empty());
    assert!(op("get_account_balance").is_read_only());
    assert!(!op("register_domain").is_read_only());
}

#[test]
fn parallel_dns_lists_stay_aligned_across_a_gap() {
    let request = op("set_dns")
        .request(&args(json!({
            "domain": "example.com",
            "main_record_types": ["a", "mx"],
            "main_records": ["1.2.3.4", "mail.example.com"],
            "main_record_priorities": ["", "10"]
        })))
        .unwrap();

    assert_eq!(request.command().as_str(), "set_dns2");
    assert_eq!(request.params()["main_record_type0"], "a");
    assert_eq!(request.params()["main_record0"], "1.2.3.4");
    assert!(!request.params().contains_key("main_recordx0"));
    assert_eq!(request.params()["main_record_type1"], "mx");
    assert_eq!(request.params()["main_record1"], "mail.example.com");
    assert_eq!(request.params()["main_recordx1"], "10");
}

#[test]
fn email_forward_targets_match_usernames_by_position() {
    let request = op("set_email_forwarding")
        .request(&args(json!({
            "domain": "example.com",
            "forward_type": "forward",
            "usernames": "info, , sales",
            "targets": ["info@host.net", "", "sales@host.net"]
        })))
        .unwrap();

    assert_eq!(request.params()["username0"], "info");
    assert_eq!(request.params()["exist_email0"], "info@host.net");
    assert!(!request.params().contains_key("username1"));
    assert!(!request.params().contains_key("exist_email1"));
    assert_eq!(request.params()["username2"], "sales");
    assert_eq!(request.params()["exist_email2"], "sales@host.net");
}

#[rstest]
#[case::empty(json!(""))]
#[case::blank(json!("  "))]
#[case::null(Value::Null)]
fn empty_required_integer_is_missing(#[case] duration: Value) {
    let err = op("register_domain")
        .request(&args(json!({"domain": "a.com", "duration": duration})))
        .unwrap_err();
    assert_eq!(
        err,
        ArgumentError::Missing { operation: "register_domain", argument: "duration" }
    );
}

#[test]
fn empty_optional_integer_is_omitted() {
    let request = op("renew_domain")
        .request(&args(json!({"domain": "a.com", "duration": 1, "year": ""})))
        .unwrap();
    assert!(!request.params().contains_key("year"));
}
