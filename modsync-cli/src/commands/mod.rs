pub mod hash;
pub mod resolve;
pub mod sync;
