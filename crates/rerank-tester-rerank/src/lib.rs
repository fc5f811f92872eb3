pub mod config;
pub mod error;
pub mod providers;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::ProviderError;
pub use providers::CohereRerankProvider;
pub use traits::*;
pub use types::*;
