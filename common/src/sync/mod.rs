pub mod channel;
pub mod shutdown;
pub mod ticker;
