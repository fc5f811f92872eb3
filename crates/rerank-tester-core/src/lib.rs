pub mod batch;
pub mod error;
pub mod normalize;
pub mod ranking;
pub mod record;
pub mod table;

pub use batch::*;
pub use error::*;
pub use normalize::*;
pub use ranking::*;
pub use record::*;
pub use table::*;
