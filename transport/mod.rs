// Transport module: one blocking TCP connection with a timeout-bounded receive
pub mod config;
pub mod error;
pub mod resolver;
pub mod socket;
pub mod tcp;
pub mod traits;

pub use config::*;
pub use error::*;
pub use resolver::*;
pub use socket::*;
pub use tcp::*;
pub use traits::*;
