pub mod client_api;
pub mod command;
pub mod http_client;
