pub mod catalog;
pub mod error;
pub mod network;
pub mod registry;
pub mod transfer;

pub use catalog::Style;
pub use error::{Error, Result};
pub use network::{ScaleContract, StyleNetwork};
pub use registry::{SharedNetwork, StyleRegistry};
pub use transfer::{styled_path, transfer, transfer_with_cancel};
