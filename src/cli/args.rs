use crate::error::ErrtypeError;
use crate::factory::{MetaValue, Metadata};
use clap::Parser;
use serde_json::Value;

/// Command-line arguments for errtype
#[derive(Parser, Debug, Clone)]
#[command(name = "errtype")]
#[command(about = "Inspect error type catalogs and render sample error instances")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Catalog file path
    #[arg(long, value_name = "PATH", default_value = "./errtype.yaml")]
    pub catalog: String,

    /// Prefix for error type URIs (overrides ERRTYPE_TYPE_PREFIX and the catalog)
    #[arg(long = "type-prefix", value_name = "URI")]
    pub type_prefix: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// List every defined error type
    #[arg(long, conflicts_with = "code")]
    pub list: bool,

    /// Error to construct, as CODE or NAMESPACE/CODE
    #[arg(long, value_name = "KEY", required_unless_present = "list")]
    pub code: Option<String>,

    /// Message override for the constructed error
    #[arg(long, value_name = "TEXT", requires = "code")]
    pub message: Option<String>,

    /// String metadata in KEY=VALUE format (can be specified multiple times)
    #[arg(long = "meta", value_name = "KEY=VALUE", requires = "code")]
    pub meta: Vec<String>,

    /// Scalar metadata as JSON in KEY=JSON format (can be specified multiple times)
    /// Use this for numbers and booleans
    #[arg(long = "meta-json", value_name = "KEY=JSON", requires = "code")]
    pub meta_json: Vec<String>,

    /// Output format: text, json, inspect or stack
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: String,
}

impl Args {
    /// Parse metadata arguments, `--meta` first then `--meta-json`
    pub fn parse_metadata(&self) -> anyhow::Result<Metadata> {
        parse_metadata_args(&self.meta, &self.meta_json)
    }
}

/// Parse metadata arguments from CLI into ordered [`Metadata`]
/// Repeating a key replaces its value in place
fn parse_metadata_args(meta_args: &[String], meta_json_args: &[String]) -> anyhow::Result<Metadata> {
    let mut result = Metadata::new();

    for arg in meta_args {
        let (key, value) = parse_key_value(arg)?;
        result.insert(key, value)?;
    }

    for arg in meta_json_args {
        let (key, json_str) = parse_key_value(arg)?;
        let value: Value = serde_json::from_str(&json_str).map_err(|e| {
            return ErrtypeError::metadata(format!(
                "Invalid JSON in --meta-json for key '{key}': {e}\nValue: {json_str}"
            ));
        })?;
        result.insert(key, MetaValue::from_json(&value)?)?;
    }

    Ok(result)
}

/// Parse KEY=VALUE string
fn parse_key_value(arg: &str) -> Result<(String, String), ErrtypeError> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(ErrtypeError::metadata(format!(
            "Invalid metadata format '{arg}'. Expected KEY=VALUE"
        ))),
    }
}
