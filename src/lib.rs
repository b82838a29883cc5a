#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use mg_plugin as plugin;
pub use mg_reflect as reflect;
pub use mg_utils as utils;
