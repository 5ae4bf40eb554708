pub mod record;
pub mod request;
pub mod response;

pub use record::*;
pub use request::*;
pub use response::*;
