pub mod cors;
pub mod error;
pub mod note;
pub mod server;
pub mod storage;
pub mod store;
pub mod util;
