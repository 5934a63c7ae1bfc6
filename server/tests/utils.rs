use notes_server::server::{ServerConfig, ServerNode, StorageMode};
use notes_server::storage::memory_storage::MemoryStorage;
use notes_server::store::PersistPolicy;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use std::path::Path;
use std::sync::Arc;

pub fn get_server_config(data_file: &Path) -> ServerConfig {
    ServerConfig {
        storage: StorageMode::JsonFile(data_file.to_path_buf()),
        frontend: data_file.with_file_name("frontend.html"),
        ..ServerConfig::default()
    }
}

pub fn launch_server_node(config: ServerConfig) -> (ServerNode, Client) {
    let node = rocket::execute(ServerNode::new(config));
    let client = Client::tracked(node.build()).expect("valid rocket instance");
    (node, client)
}

pub fn launch_memory_server_node(policy: PersistPolicy) -> (Arc<MemoryStorage>, Client) {
    let storage = Arc::new(MemoryStorage::new());
    let config = ServerConfig {
        storage: StorageMode::Ephemeral,
        persist_policy: policy,
        ..ServerConfig::default()
    };
    let node = rocket::execute(ServerNode::with_storage(config, storage.clone()));
    let client = Client::tracked(node.build()).expect("valid rocket instance");
    (storage, client)
}

pub fn post_note(client: &Client, body: &str) -> (Status, serde_json::Value) {
    let response = client
        .post("/notes")
        .header(ContentType::JSON)
        .body(body)
        .dispatch();
    let status = response.status();
    (status, response.into_json().expect("json body"))
}
