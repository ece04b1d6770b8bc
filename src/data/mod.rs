//! Reading and writing font sources

pub mod conversions;
pub mod ufo;

pub use ufo::{load_ufo_from_path, UfoSource};
