#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Crates

// Links `std` for the descriptor cache's locks; everything else only needs
// `core` and `alloc`.
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod error;

pub mod descriptor;
pub mod factory;
pub mod navigator;
pub mod path;
pub mod value;
pub mod wrapper;

// -----------------------------------------------------------------------------
// Top-level exports

pub use context::{MetaContext, Reflection, ReflectionBuilder};
pub use error::ReflectionError;
pub use navigator::Navigator;
