use anyhow::{anyhow, Result};
use atlassian_rest_api::{HttpMethod, ParamValue, Params, Transport};
use atlassian_rest_config::Product;
use clap::{Args, ValueEnum};

use crate::output::OutputFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProductArg {
    Jira,
    Crowd,
}

impl From<ProductArg> for Product {
    fn from(value: ProductArg) -> Self {
        match value {
            ProductArg::Jira => Product::Jira,
            ProductArg::Crowd => Product::Crowd,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
    Put,
    Delete,
}

impl From<MethodArg> for HttpMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Get => HttpMethod::Get,
            MethodArg::Post => HttpMethod::Post,
            MethodArg::Put => HttpMethod::Put,
            MethodArg::Delete => HttpMethod::Delete,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CallArgs {
    /// Which configured base URL to call
    #[arg(value_enum)]
    pub product: ProductArg,
    /// Endpoint path relative to the base URL (e.g. project/TEST)
    pub path: String,
    /// HTTP method
    #[arg(short = 'X', long, value_enum, default_value = "get")]
    pub method: MethodArg,
    /// Parameter as key=value; repeatable, order is kept.
    /// `true`/`false` and integers are sent as such.
    #[arg(short = 'P', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,
}

fn parse_param(raw: &str) -> Result<(String, ParamValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Parameter must look like key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(anyhow!("Parameter name cannot be empty"));
    }

    let value = match value {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        other => other
            .parse::<i64>()
            .map(ParamValue::Int)
            .unwrap_or_else(|_| ParamValue::String(other.to_string())),
    };
    Ok((key.to_string(), value))
}

pub async fn execute<T: Transport + ?Sized>(
    args: CallArgs,
    transport: &mut T,
    format: OutputFormat,
) -> Result<()> {
    let params: Params = args.params.into_iter().collect();
    let result = transport
        .call_endpoint(&args.path, params, args.method.into())
        .await;
    super::finish(transport, result, format)
}
