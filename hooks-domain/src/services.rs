// Pure domain services
pub mod payload_decoder;

pub use payload_decoder::*;
