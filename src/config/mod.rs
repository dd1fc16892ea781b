use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const TOKEN_ENV_VAR: &str = "WISE_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "payout-pipeline")]
#[command(about = "Creates a sandbox SGD->GBP transfer through the payments API")]
pub struct CliConfig {
    #[arg(long, default_value = "https://api.sandbox.transferwise.tech")]
    pub api_base_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the bearer token once at startup. An absent variable is not a
    /// configuration error; the first API call fails with an authorization
    /// error instead.
    pub fn bearer_token(&self) -> String {
        std::env::var(TOKEN_ENV_VAR).unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)
    }
}
