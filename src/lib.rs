#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use tc_reflect as reflect;
pub use tc_text as text;
pub use tc_utils as utils;
