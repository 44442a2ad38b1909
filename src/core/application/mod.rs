pub mod fanout;
pub mod normalizer;
