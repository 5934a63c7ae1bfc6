pub mod json_file_storage;
pub mod memory_storage;
pub mod storage_connector;
