// Internal building blocks shared by all codecs

pub mod cursor;
pub mod diagnostic;
pub mod error;
