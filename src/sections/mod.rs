pub mod grouper;
pub mod taxonomy;
