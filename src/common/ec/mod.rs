mod encoder;
mod galois;

pub(crate) use encoder::*;
pub(crate) use galois::*;
