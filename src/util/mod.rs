pub mod bench;
pub mod export;
pub mod frames;
