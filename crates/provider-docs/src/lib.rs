#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![allow(clippy::module_inception)]

pub mod check;
pub mod cmark;
pub mod config;
pub mod contents;

pub mod error {
    pub use anyhow::{Error, Result};
}
