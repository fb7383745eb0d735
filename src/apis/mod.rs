mod scratch;

pub use scratch::*;
