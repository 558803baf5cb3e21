mod contact;
mod error;
mod health_check;
mod newsletter;

pub use contact::*;
pub use error::*;
pub use health_check::*;
pub use newsletter::*;
