pub mod insertion;
