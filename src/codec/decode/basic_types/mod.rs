// Primitive codecs

pub mod int;
