#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod error;
mod primitive;
mod special;

pub mod config;
pub mod format;
pub mod platform;
pub mod reader;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use dynamic::DynamicValue;
pub use error::{ParseError, Position};
pub use special::parse_duration;
