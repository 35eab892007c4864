//! The operation catalogue.
//!
//! Each [`Operation`] maps a tool-facing name and argument set onto one remote
//! command. The table is static; hosts enumerate it to register tools and look
//! operations up by name at call time.

use serde_json::{json, Map, Value};

use registrar::{CommandName, CommandRequest};

use crate::ArgumentError;

/// JSON type accepted for an argument, and how it is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// String (numbers are stringified). Sent verbatim.
    Text,
    /// Integer, or a string holding one.
    Integer,
    /// Boolean, sent as `1` or `0`.
    Flag,
    /// Array of strings (or one comma-separated string), fanned out to
    /// `wire0`, `wire1`, ...
    List,
}

impl ParamKind {
    fn schema_type(self) -> &'static str {
        match self {
            ParamKind::Text => "string",
            ParamKind::Integer => "integer",
            ParamKind::Flag => "boolean",
            ParamKind::List => "array",
        }
    }
}

/// One argument of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Argument name as the host sees it.
    pub name: &'static str,
    /// Query field name (list prefix for [`ParamKind::List`]).
    pub wire: &'static str,
    /// Accepted JSON type and wire encoding.
    pub kind: ParamKind,
    /// Whether a missing, null or empty value is rejected.
    pub required: bool,
    /// Human-readable description, copied into the input schema.
    pub description: &'static str,
}

impl Param {
    const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            wire: name,
            kind,
            required: false,
            description,
        }
    }

    /// Optional string argument sent under its own name.
    pub const fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Text, description)
    }

    /// Optional integer argument sent under its own name.
    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    /// Optional boolean argument sent as `1` or `0`.
    pub const fn flag(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Flag, description)
    }

    /// Optional list argument fanned out to `wire0`, `wire1`, ...
    pub const fn list(name: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self {
            wire,
            ..Self::new(name, ParamKind::List, description)
        }
    }

    /// Marks the argument as mandatory.
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Sends the argument under a different query field name.
    pub const fn wire(self, wire: &'static str) -> Self {
        Self { wire, ..self }
    }
}

/// Whether an operation changes state on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only reads remote state.
    Read,
    /// Changes remote state, possibly at a cost.
    Write,
}

/// A tool-facing operation backed by one remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Tool-facing name, unique within the catalogue.
    pub name: &'static str,
    /// Remote command sent as the `command` field.
    pub command: &'static str,
    /// Whether the operation changes remote state.
    pub access: Access,
    /// One-line summary shown to hosts.
    pub description: &'static str,
    /// Declared arguments, in schema order.
    pub params: &'static [Param],
}

impl Operation {
    /// Returns `true` if the operation only reads remote state.
    pub fn is_read_only(&self) -> bool {
        self.access == Access::Read
    }

    /// JSON Schema describing the operation's arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut property = json!({
                "type": param.kind.schema_type(),
                "description": param.description,
            });
            if param.kind == ParamKind::List {
                property["items"] = json!({"type": "string"});
            }
            properties.insert(param.name.to_string(), property);
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Converts host arguments into a [`CommandRequest`].
    ///
    /// `null` arguments count as absent. Unknown arguments, missing required
    /// arguments and values of the wrong JSON type are rejected before
    /// anything is sent.
    pub fn request(&self, args: &Map<String, Value>) -> Result<CommandRequest, ArgumentError> {
        if let Some(unknown) = args
            .keys()
            .find(|key| !self.params.iter().any(|p| p.name == key.as_str()))
        {
            return Err(ArgumentError::Unknown {
                operation: self.name,
                argument: unknown.clone(),
            });
        }

        let command = CommandName::new(self.command)
            .ok_or(ArgumentError::UnknownOperation(self.name.to_string()))?;
        let mut request = CommandRequest::new(command);

        for param in self.params {
            let value = match args.get(param.name) {
                Some(Value::Null) | None => None,
                Some(value) => Some(value),
            };
            let supplied = match value {
                Some(value) => self.apply(&mut request, param, value)?,
                None => false,
            };
            if param.required && !supplied {
                return Err(ArgumentError::Missing {
                    operation: self.name,
                    argument: param.name,
                });
            }
        }
        Ok(request)
    }

    // Returns whether a non-empty value was written.
    fn apply(
        &self,
        request: &mut CommandRequest,
        param: &Param,
        value: &Value,
    ) -> Result<bool, ArgumentError> {
        let invalid = || ArgumentError::InvalidType {
            operation: self.name,
            argument: param.name,
            expected: param.kind.schema_type(),
        };

        match param.kind {
            ParamKind::Text => {
                let text = scalar_text(value).ok_or_else(invalid)?;
                request.insert(param.wire, &text);
                Ok(!text.is_empty())
            }
            ParamKind::Integer => {
                let text = integer_text(value).ok_or_else(invalid)?;
                request.insert(param.wire, &text);
                Ok(!text.is_empty())
            }
            ParamKind::Flag => {
                let flag = value.as_bool().ok_or_else(invalid)?;
                request.insert(param.wire, if flag { "1" } else { "0" });
                Ok(true)
            }
            ParamKind::List => {
                let items = list_items(value).ok_or_else(invalid)?;
                let supplied = items.iter().any(|item| !item.is_empty());
                request.insert_list(param.wire, &items);
                Ok(supplied)
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(String::new());
            }
            trimmed.parse::<i64>().ok().map(|_| trimmed.to_string())
        }
        _ => None,
    }
}

fn list_items(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        Value::String(s) => Some(s.split(',').map(|item| item.trim().to_string()).collect()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// The table
// ---------------------------------------------------------------------------

macro_rules! op {
    ($access:ident $name:literal => $command:literal, $description:literal $(, [$($param:expr),* $(,)?])? $(,)?) => {
        Operation {
            name: $name,
            command: $command,
            access: Access::$access,
            description: $description,
            params: &[$($($param),*)?],
        }
    };
}

const DOMAIN: Param = Param::text("domain", "Fully qualified domain name, e.g. example.com").required();
const CURRENCY: Param = Param::text("currency", "Price currency, e.g. USD");
const COUPON: Param = Param::text("coupon", "Coupon code to apply");
const NAMESERVERS: Param = Param::list("nameservers", "ns", "Nameserver host names, in priority order").required();
const REGISTRANT: Param = Param::integer("registrant_contact", "Contact id for the registrant");
const ADMIN: Param = Param::integer("admin_contact", "Contact id for the administrative contact");
const TECHNICAL: Param = Param::integer("technical_contact", "Contact id for the technical contact");
const BILLING: Param = Param::integer("billing_contact", "Contact id for the billing contact");
const START_DATE: Param = Param::text("start_date", "Start of the range, YYYY-MM-DD");
const END_DATE: Param = Param::text("end_date", "End of the range, YYYY-MM-DD");

/// Every operation, grouped by area.
pub static OPERATIONS: &[Operation] = &[
    // Domains
    op!(Read "search_domains" => "search", "Check availability (and optionally price) of up to 100 domains.", [
        Param::list("domains", "domain", "Domains to check").required(),
        Param::flag("show_price", "Include registration prices"),
        CURRENCY,
    ]),
    op!(Write "register_domain" => "register", "Register an available domain.", [
        DOMAIN,
        Param::integer("duration", "Registration period in years").required(),
        CURRENCY,
        COUPON,
    ]),
    op!(Write "renew_domain" => "renew", "Renew a domain in the account.", [
        DOMAIN,
        Param::integer("duration", "Renewal period in years").required(),
        Param::integer("year", "Current expiry year, guards against double renewal"),
        CURRENCY,
        COUPON,
        Param::flag("price_check", "Only return the renewal price"),
    ]),
    op!(Write "delete_domain" => "delete", "Delete a domain still in its grace period.", [DOMAIN]),
    op!(Read "get_domain_info" => "domain_info", "Get registration details of one domain.", [DOMAIN]),
    op!(Read "list_domains" => "list_domain", "List all domains in the account."),
    op!(Write "lock_domain" => "lock_domain", "Lock a domain against transfer.", [DOMAIN]),
    op!(Write "push_domains" => "push", "Push domains to another account.", [
        Param::list("domains", "domain", "Domains to push").required(),
        Param::text("receiver_username", "Receiving account's push username").required().wire("receiver_push_username"),
    ]),
    op!(Write "set_domain_note" => "set_note", "Attach a private note to a domain.", [
        DOMAIN,
        Param::text("note", "Note text").required(),
    ]),
    op!(Write "set_domain_folder" => "set_folder", "Move a domain into a folder.", [
        DOMAIN,
        Param::text("folder", "Folder name").required(),
    ]),
    op!(Write "set_renew_option" => "set_renew_option", "Set the auto-renew behaviour of a domain.", [
        DOMAIN,
        Param::text("renew_option", "One of donot, auto, reset").required(),
    ]),
    op!(Write "set_privacy" => "set_privacy", "Set WHOIS privacy for a domain.", [
        DOMAIN,
        Param::text("option", "One of full, partial, off").required(),
        Param::text("whois_privacy_option", "Privacy option for WHOIS display"),
    ]),
    op!(Write "set_whois_contacts" => "set_whois", "Assign WHOIS contacts to a domain.", [
        DOMAIN, REGISTRANT, ADMIN, TECHNICAL, BILLING,
    ]),
    op!(Write "set_domain_nameservers" => "set_ns", "Replace a domain's nameservers.", [DOMAIN, NAMESERVERS]),
    op!(Read "get_domain_nameservers" => "get_ns", "Get a domain's nameservers.", [DOMAIN]),
    op!(Write "clear_domain_setting" => "set_clear_domain_setting", "Clear a service setting (forward, stealth, email_forwarding, dns, nameservers) on a domain.", [
        DOMAIN,
        Param::text("service", "Service to clear").required(),
    ]),
    op!(Write "set_forwarding" => "set_forwarding", "Forward a domain to a URL.", [
        DOMAIN,
        Param::text("forward_url", "Destination URL").required(),
        Param::flag("is_temp", "Use a temporary (302) redirect"),
    ]),
    op!(Write "set_stealth_forwarding" => "set_stealth", "Stealth-forward a domain to a URL.", [
        DOMAIN,
        Param::text("stealth_url", "Destination URL").required(),
        Param::text("stealth_title", "Page title shown in the browser"),
    ]),
    op!(Write "set_parking" => "set_parking", "Park a domain.", [
        DOMAIN,
        Param::text("with_ads", "yes or no"),
    ]),
    op!(Write "set_hosting" => "set_hosting", "Point a domain at registrar hosting.", [
        DOMAIN,
        Param::text("hosting_type", "advanced or basic").required(),
        Param::text("mobile_view_on", "yes or no"),
    ]),
    op!(Write "set_email_forwarding" => "set_email_forward", "Configure email forwarding for a domain.", [
        DOMAIN,
        Param::text("forward_type", "donot, mx or forward").required(),
        Param::list("usernames", "username", "Local parts to forward"),
        Param::list("targets", "exist_email", "Destination addresses, matched by position"),
    ]),
    op!(Read "get_dns" => "get_dns", "Get the DNS records of a domain.", [DOMAIN]),
    op!(Write "set_dns" => "set_dns2", "Set DNS records for a domain and its subdomains.", [
        DOMAIN,
        Param::list("main_record_types", "main_record_type", "Record types for the apex (a, aaaa, cname, mx, txt, ...)"),
        Param::list("main_records", "main_record", "Record values for the apex, matched by position"),
        Param::list("main_record_priorities", "main_recordx", "MX priorities for the apex, matched by position"),
        Param::list("subdomains", "subdomain", "Subdomain labels"),
        Param::list("sub_record_types", "sub_record_type", "Record types for each subdomain"),
        Param::list("sub_records", "sub_record", "Record values for each subdomain"),
        Param::list("sub_record_priorities", "sub_recordx", "MX priorities for each subdomain"),
        Param::integer("ttl", "Time to live in seconds"),
        Param::flag("add_to_current", "Append to existing records instead of replacing").wire("add_dns_to_current_setting"),
    ]),
    op!(Write "set_dnssec" => "set_dnssec", "Add a DNSSEC DS record to a domain.", [
        Param::text("domain", "Domain name").required().wire("domain_name"),
        Param::integer("key_tag", "Key tag").required(),
        Param::integer("digest_type", "Digest type").required(),
        Param::text("digest", "Digest").required(),
        Param::integer("algorithm", "Algorithm number").required(),
    ]),
    op!(Read "get_dnssec" => "get_dnssec", "Get the DNSSEC settings of a domain.", [
        Param::text("domain", "Domain name").required().wire("domain_name"),
    ]),
    op!(Write "clear_dnssec" => "clear_dnssec", "Remove DNSSEC from a domain.", [
        Param::text("domain", "Domain name").required().wire("domain_name"),
    ]),
    // Registered nameservers (hosts)
    op!(Write "register_nameserver" => "register_ns", "Register a glue nameserver under a domain you own.", [
        Param::text("host", "Nameserver host name").required(),
        Param::text("ip", "IP address").required(),
    ]),
    op!(Write "add_nameserver" => "add_ns", "Add an external nameserver to the account.", [
        Param::text("host", "Nameserver host name").required(),
    ]),
    op!(Write "set_nameserver_ips" => "set_ns_ip", "Replace the IP addresses of a registered nameserver.", [
        Param::integer("server_id", "Nameserver id").required(),
        Param::list("ips", "ip", "IP addresses").required(),
    ]),
    op!(Write "delete_nameserver" => "delete_ns", "Delete a nameserver by id.", [
        Param::integer("server_id", "Nameserver id").required(),
    ]),
    op!(Write "delete_nameserver_by_domain" => "delete_ns_by_domain", "Delete a nameserver by host name.", [
        Param::text("server_name", "Nameserver host name").required(),
    ]),
    op!(Read "list_nameservers" => "server_list", "List nameservers in the account."),
    // Contacts
    op!(Write "create_contact" => "create_contact", "Create a WHOIS contact.", [
        Param::text("name", "Full name").required(),
        Param::text("email", "Email address").required(),
        Param::text("phone_cc", "Phone country code").required().wire("phonecc"),
        Param::text("phone_number", "Phone number").required().wire("phonenum"),
        Param::text("address1", "Street address").required(),
        Param::text("address2", "Street address, second line"),
        Param::text("city", "City").required(),
        Param::text("state", "State or province"),
        Param::text("zip", "Postal code").required(),
        Param::text("country", "Two-letter country code").required(),
        Param::text("organization", "Organization"),
    ]),
    op!(Write "edit_contact" => "edit_contact", "Update fields of an existing contact.", [
        Param::integer("contact_id", "Contact id").required(),
        Param::text("name", "Full name"),
        Param::text("email", "Email address"),
        Param::text("phone_cc", "Phone country code").wire("phonecc"),
        Param::text("phone_number", "Phone number").wire("phonenum"),
        Param::text("address1", "Street address"),
        Param::text("address2", "Street address, second line"),
        Param::text("city", "City"),
        Param::text("state", "State or province"),
        Param::text("zip", "Postal code"),
        Param::text("country", "Two-letter country code"),
        Param::text("organization", "Organization"),
    ]),
    op!(Write "delete_contact" => "delete_contact", "Delete a contact that is not in use.", [
        Param::integer("contact_id", "Contact id").required(),
    ]),
    op!(Read "get_contact" => "get_contact", "Get one contact.", [
        Param::integer("contact_id", "Contact id").required(),
    ]),
    op!(Read "list_contacts" => "contact_list", "List contacts in the account."),
    // Folders
    op!(Write "create_folder" => "create_folder", "Create a domain folder.", [
        Param::text("folder_name", "Folder name").required(),
    ]),
    op!(Write "delete_folder" => "delete_folder", "Delete a domain folder.", [
        Param::integer("folder_id", "Folder id").required(),
    ]),
    op!(Read "list_folders" => "folder_list", "List domain folders."),
    op!(Write "set_folder_whois" => "set_folder_whois", "Set default WHOIS contacts for a folder.", [
        Param::integer("folder_id", "Folder id").required(),
        REGISTRANT, ADMIN, TECHNICAL, BILLING,
    ]),
    op!(Write "set_folder_nameservers" => "set_folder_ns", "Set default nameservers for a folder.", [
        Param::integer("folder_id", "Folder id").required(),
        NAMESERVERS,
    ]),
    // Transfers
    op!(Write "transfer_domain" => "transfer", "Start an inbound transfer.", [
        DOMAIN,
        Param::text("auth_code", "Transfer authorisation code").required().wire("auth"),
        CURRENCY,
        COUPON,
    ]),
    op!(Read "get_transfer_status" => "get_transfer_status", "Get the status of a transfer.", [
        DOMAIN,
        Param::text("transfer_type", "in or away").required(),
    ]),
    op!(Write "cancel_transfer" => "cancel_transfer", "Cancel a pending inbound transfer.", [
        DOMAIN,
        Param::integer("order_id", "Transfer order id").required(),
    ]),
    op!(Read "get_transfer_auth_code" => "get_transfer_auth_code", "Get the auth code for transferring a domain away.", [
        DOMAIN,
        Param::flag("new_code", "Generate a new code"),
        Param::flag("unlock", "Unlock the domain for transfer").wire("unlock_domain_for_transfer"),
    ]),
    op!(Write "set_transfer_auth_code" => "set_transfer_auth_code", "Update the auth code of a pending inbound transfer.", [
        DOMAIN,
        Param::text("auth_code", "New authorisation code").required(),
        Param::integer("order_id", "Transfer order id").required(),
    ]),
    op!(Write "authorize_transfer_away" => "authorize_transfer_away", "Approve or deny an outbound transfer.", [
        DOMAIN,
        Param::integer("order_id", "Transfer order id").required(),
        Param::text("authorize", "approve or deny").required(),
    ]),
    // Account
    op!(Read "get_account_info" => "account_info", "Get account details and defaults."),
    op!(Read "get_account_balance" => "get_account_balance", "Get the account balance."),
    op!(Write "set_default_whois" => "set_default_whois", "Set default WHOIS contacts for new domains.", [
        REGISTRANT, ADMIN, TECHNICAL, BILLING,
    ]),
    op!(Write "set_default_nameservers" => "set_default_ns", "Set default nameservers for new domains.", [NAMESERVERS]),
    op!(Write "set_default_renew_option" => "set_default_renew_option", "Set the default auto-renew behaviour.", [
        Param::text("renew_option", "One of donot, auto, reset").required(),
    ]),
    op!(Write "set_default_forwarding" => "set_default_forwarding", "Set default forwarding for new domains.", [
        Param::text("forward_url", "Destination URL").required(),
        Param::flag("is_temp", "Use a temporary (302) redirect"),
    ]),
    op!(Write "clear_default_setting" => "set_clear_default_setting", "Clear a default service setting.", [
        Param::text("service", "Service to clear").required(),
    ]),
    op!(Read "is_processing" => "is_processing", "Check whether the account has an operation in progress."),
    // Orders and pricing
    op!(Read "list_orders" => "get_order_list", "List orders in a date range.", [
        START_DATE.required(),
        END_DATE.required(),
        Param::text("payment_method", "Filter by payment method"),
    ]),
    op!(Read "get_order_status" => "get_order_status", "Get the status of an order.", [
        Param::integer("order_id", "Order id").required(),
    ]),
    op!(Read "list_coupons" => "list_coupons", "List available coupons.", [
        Param::text("coupon_type", "registration, renewal or transfer").required(),
    ]),
    op!(Read "get_tld_prices" => "tld_price", "List TLD prices.", [
        CURRENCY,
        Param::integer("count_per_page", "Page size"),
        Param::integer("page_index", "Page number, starting at 1"),
        Param::text("sort", "Sort column"),
    ]),
    // Backorders and aftermarket
    op!(Read "list_backorder_requests" => "backorder_request_list", "List backorder requests.", [
        START_DATE, END_DATE,
    ]),
    op!(Write "add_backorder_request" => "add_backorder_request", "Backorder a domain.", [DOMAIN]),
    op!(Write "delete_backorder_request" => "delete_backorder_request", "Remove a backorder request.", [DOMAIN]),
    op!(Read "list_open_auctions" => "get_open_auctions", "List open expired-domain auctions.", [
        CURRENCY,
        Param::text("auction_type", "expired, user or backorder").wire("type"),
    ]),
    op!(Read "get_auction_details" => "get_auction_details", "Get details of one auction.", [DOMAIN, CURRENCY]),
    op!(Write "place_auction_bid" => "place_auction_bid", "Bid on an auction.", [
        DOMAIN,
        Param::text("bid_amount", "Bid amount").required(),
        CURRENCY,
    ]),
    op!(Read "list_closed_auctions" => "get_closed_auctions", "List closed auctions in a date range.", [
        START_DATE.required(),
        END_DATE.required(),
    ]),
    op!(Read "list_expired_closeouts" => "get_expired_closeout_domains", "List expired closeout domains.", [CURRENCY]),
    op!(Write "buy_expired_closeout" => "buy_expired_closeout_domain", "Buy an expired closeout domain.", [DOMAIN, CURRENCY]),
    op!(Read "list_marketplace_listings" => "get_listings", "List marketplace listings.", [
        CURRENCY,
        Param::flag("exclude_pending_sale", "Hide listings with a pending sale"),
        Param::flag("show_other_registrar", "Include listings at other registrars"),
    ]),
    op!(Read "get_marketplace_listing" => "get_listing_item", "Get one marketplace listing.", [DOMAIN, CURRENCY]),
    op!(Write "buy_it_now" => "buy_it_now", "Buy a marketplace listing at its asking price.", [DOMAIN, CURRENCY]),
    op!(Write "set_for_sale" => "set_for_sale", "List a domain on the marketplace.", [
        DOMAIN,
        Param::text("for_sale_type", "marketplace, auction or not_for_sale").required(),
        Param::text("listing_type", "Listing type"),
        Param::text("price", "Asking price"),
    ]),
];

/// Lookup over [`OPERATIONS`].
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    operations: &'static [Operation],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            operations: OPERATIONS,
        }
    }
}

impl Catalog {
    /// Finds an operation by tool name.
    pub fn find(&self, name: &str) -> Option<&'static Operation> {
        let operations: &'static [Operation] = self.operations;
        operations.iter().find(|op| op.name == name)
    }

    /// Iterates over all operations in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Operation> {
        let operations: &'static [Operation] = self.operations;
        operations.iter()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the catalogue has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
