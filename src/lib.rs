// Core modules
pub mod config;
pub mod convert;
pub mod inspect;

// Re-export commonly used types
pub use config::{Config, LogConfig, OutputConfig};
pub use convert::{hex_input, item_to_json, json_to_item};
pub use inspect::{inspect, Entry};

// Re-export crate modules
pub use web3_rlp as rlp;
pub use web3_types as types;
