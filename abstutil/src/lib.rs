//! Odds and ends shared by the map crates: logging setup, a phase timer, and reading/writing
//! serialized files.

#[macro_use]
extern crate log;

mod io;
pub mod logger;
mod time;
mod utils;

pub use crate::io::{
    maybe_read_binary, maybe_read_json, read_object, to_json, write_binary, write_json,
};
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::{basename, prettyprint_usize};
