//

#[macro_use]
extern crate failure_derive;
extern crate failure;
#[macro_use]
extern crate log;

pub mod config;
pub mod core;
pub mod pipeline;
pub mod util;
pub mod workers;

pub use crate::config::{Cli, Config};
pub use crate::core::error::{Error, Result};
pub use crate::pipeline::{Pipeline, Report};
