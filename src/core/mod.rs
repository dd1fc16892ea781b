pub mod pipeline;

pub use self::pipeline::{TransferOrder, TransferPipeline, TransferReport};
pub use crate::utils::error::Result;
