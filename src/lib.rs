pub mod api;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::api::client::ApiClient;
pub use crate::api::ports::PayoutApi;
pub use crate::config::CliConfig;
pub use crate::core::pipeline::{TransferOrder, TransferPipeline, TransferReport};
pub use crate::utils::error::{PayoutError, Result};
