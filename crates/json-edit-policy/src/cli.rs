//! Core logic of the `json-edit-policy` binary.
//!
//! Usage:
//!   json-edit-policy <policy-file> [--pointer <pointer>]
//!
//! The document is read from stdin. Every node (or only the node at
//! `--pointer`) is resolved against the policy and written as one JSON
//! object per line.

use crate::config::EditorConfig;
use crate::error::{ConfigurationError, PolicyError};
use crate::node::JsonNode;
use crate::walk::{resolve_node, resolve_tree, NodeReport};
use serde_json::Value;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: json-edit-policy <policy-file> [--pointer <pointer>]";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Json(serde_json::Error),
    Policy(PolicyError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(e)  => write!(f, "{e}\n{USAGE}"),
            CliError::Json(e)   => write!(f, "invalid document: {e}"),
            CliError::Policy(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Json(e) }
}

impl From<PolicyError> for CliError {
    fn from(e: PolicyError) -> Self { CliError::Policy(e) }
}

impl From<ConfigurationError> for CliError {
    fn from(e: ConfigurationError) -> Self { CliError::Policy(e.into()) }
}

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub policy: PathBuf,
    pub pointer: Option<String>,
}

/// Parses the arguments following the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut policy = None;
    let mut pointer = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--pointer" | "-p" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--pointer needs a value".into()))?;
                pointer = Some(value);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError::Usage(format!("unknown option {flag}")));
            }
            _ if policy.is_none() => policy = Some(PathBuf::from(arg)),
            _ => return Err(CliError::Usage(format!("unexpected argument {arg}"))),
        }
    }
    let policy = policy.ok_or_else(|| CliError::Usage("missing policy file".into()))?;
    Ok(CliArgs { policy, pointer })
}

// ── Resolution ────────────────────────────────────────────────────────────

/// Resolves `document` (JSON text) against `config`, one JSON line per node.
pub fn resolve_document(
    document: &str,
    config: &EditorConfig,
    pointer: Option<&str>,
) -> Result<Vec<String>, CliError> {
    let data: Value = serde_json::from_str(document)?;
    let reports: Vec<NodeReport> = match pointer {
        Some(pointer) => {
            let node = JsonNode::at_pointer(&data, pointer)?;
            vec![resolve_node(&node, config)?]
        }
        None => resolve_tree(&data, config)?,
    };
    reports
        .iter()
        .map(|report| serde_json::to_string(report).map_err(CliError::from))
        .collect()
}

/// Loads the policy named in `args` and resolves `document` against it.
pub fn run(args: &CliArgs, document: &str) -> Result<Vec<String>, CliError> {
    let config = EditorConfig::from_policy_file(&args.policy)?;
    resolve_document(document, &config, args.pointer.as_deref())
}
