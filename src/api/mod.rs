pub mod client;
pub mod models;
pub mod ports;

pub use self::client::ApiClient;
pub use self::ports::PayoutApi;
