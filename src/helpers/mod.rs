pub(crate) mod filter;
pub(crate) mod partition;
pub(crate) mod windows;

// Iterator types are named in public signatures
pub use partition::Chunks;
pub use windows::SlidingWindows;
