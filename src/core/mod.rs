// Core configuration shared by the transcoder and the CLI
pub mod constants;
pub mod options;

pub use constants::*;
pub use options::{Options, OptionsError};
