//! Shared command parameters for all CLI commands.
//!
//! This module defines common parameters that are used across multiple
//! command modules. It provides a centralized place to define parameter
//! names and common argument configurations.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};

// CRUD operations
pub const COMMAND_CREATE: &str = "create";
pub const COMMAND_GET: &str = "get";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_EDIT: &str = "edit";
pub const COMMAND_DELETE: &str = "delete";

// Auth commands
pub const COMMAND_AUTH: &str = "auth";
pub const COMMAND_LOGIN: &str = "login";
pub const COMMAND_LOGOUT: &str = "logout";
pub const COMMAND_STATUS: &str = "status";

// Space commands
pub const COMMAND_SPACE: &str = "space";
pub const COMMAND_USE: &str = "use";

// Thread and reply commands
pub const COMMAND_THREAD: &str = "thread";
pub const COMMAND_REPLY: &str = "reply";

// Session commands
pub const COMMAND_SESSION: &str = "session";

// Vault commands
pub const COMMAND_VAULT: &str = "vault";
pub const COMMAND_SEARCH: &str = "search";
pub const COMMAND_ASK: &str = "ask";
pub const COMMAND_PUBLISH: &str = "publish";
pub const COMMAND_UNPUBLISH: &str = "unpublish";
pub const COMMAND_UPDATE: &str = "update";
pub const COMMAND_POST: &str = "post";

// Context commands
pub const COMMAND_CONTEXT: &str = "context";
pub const COMMAND_CLEAR: &str = "clear";

// Config commands
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_EXPORT: &str = "export";
pub const COMMAND_PATH: &str = "path";

// Parameter names
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_ID: &str = "id";
pub const PARAMETER_THREAD_ID: &str = "thread-id";
pub const PARAMETER_SLUG: &str = "slug";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_SPACE: &str = "space";
pub const PARAMETER_VAULT: &str = "vault";
pub const PARAMETER_TITLE: &str = "title";
pub const PARAMETER_CONTENT: &str = "content";
pub const PARAMETER_QUERY: &str = "query";
pub const PARAMETER_QUESTION: &str = "question";
pub const PARAMETER_MODE: &str = "mode";
pub const PARAMETER_LIMIT: &str = "limit";
pub const PARAMETER_OFFSET: &str = "offset";
pub const PARAMETER_CURSOR: &str = "cursor";
pub const PARAMETER_MINE: &str = "mine";
pub const PARAMETER_OUTPUT: &str = "output";

/// Create the shared output format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("LATTICE_FORMAT")
        .default_value("json")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

/// Flag selecting pretty-printed JSON output.
pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

/// Flag adding a header row to CSV output.
pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output with headers")
}

/// Space slug override, falling back to the active space from the
/// configuration.
pub fn space_parameter() -> Arg {
    Arg::new(PARAMETER_SPACE)
        .short('s')
        .long(PARAMETER_SPACE)
        .num_args(1)
        .required(false)
        .help("Space slug (overrides the active space)")
}

/// Vault identifier override, falling back to the active vault from the
/// configuration.
pub fn vault_parameter() -> Arg {
    Arg::new(PARAMETER_VAULT)
        .long(PARAMETER_VAULT)
        .num_args(1)
        .required(false)
        .help("Vault ID (overrides the active vault)")
}

pub fn limit_parameter() -> Arg {
    Arg::new(PARAMETER_LIMIT)
        .long(PARAMETER_LIMIT)
        .num_args(1)
        .required(false)
        .default_value("20")
        .value_parser(clap::value_parser!(u32))
        .help("Items per page")
}

pub fn offset_parameter() -> Arg {
    Arg::new(PARAMETER_OFFSET)
        .long(PARAMETER_OFFSET)
        .num_args(1)
        .required(false)
        .default_value("0")
        .value_parser(clap::value_parser!(u32))
        .help("Offset for pagination")
}

pub fn cursor_parameter() -> Arg {
    Arg::new(PARAMETER_CURSOR)
        .long(PARAMETER_CURSOR)
        .num_args(1)
        .required(false)
        .help("Pagination cursor from a previous response")
}

pub fn title_parameter() -> Arg {
    Arg::new(PARAMETER_TITLE)
        .long(PARAMETER_TITLE)
        .num_args(1)
        .required(false)
        .help("Title (markdown not supported)")
}

pub fn content_parameter() -> Arg {
    Arg::new(PARAMETER_CONTENT)
        .long(PARAMETER_CONTENT)
        .num_args(1)
        .required(false)
        .help("Content (markdown supported)")
}
