pub mod overview;
pub mod query;
pub mod response;

pub use overview::*;
pub use query::*;
pub use response::*;
