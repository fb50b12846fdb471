// Composite codecs whose children are decoded through the any-value dispatcher

pub mod set;
