pub mod bit_utils;
pub mod codec;
pub(crate) mod debug;
pub mod ec;
pub mod error;
pub mod iter;
pub mod mask;
pub mod metadata;
mod version_db;
