pub mod aligner;
pub mod similarity;
