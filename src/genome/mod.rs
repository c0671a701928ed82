//! Genotype representation
//!
//! This module provides chromosomes, encodings and the codec that decodes
//! chromosomes into variable vectors.

pub mod bounds;
pub mod chromosome;
pub mod codec;
pub mod encoding;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::chromosome::*;
    pub use super::codec::*;
    pub use super::encoding::*;
}
