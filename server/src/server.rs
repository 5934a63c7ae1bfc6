use log::info;
use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{catch, catchers, delete, get, options, post, put, routes, Build, Request, Rocket, State};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cors::Cors;
use crate::error::{ApiError, ErrorBody};
use crate::note::{Note, NoteId, NoteInput};
use crate::storage::json_file_storage::JsonFileStorage;
use crate::storage::memory_storage::MemoryStorage;
use crate::storage::storage_connector::NoteStorage;
use crate::store::{NoteStore, PersistPolicy};
use crate::util::parse_id;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_FILE: &str = "notes.json";
pub const DEFAULT_FRONTEND: &str = "./frontend.html";

// A `null` body binds to an input with every field empty.
type NoteBody<'r> = Result<Json<Option<NoteInput>>, json::Error<'r>>;

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    notes: usize,
    next_id: NoteId,
}

#[derive(Debug, Serialize)]
struct EndpointDoc {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiDocs {
    title: &'static str,
    description: &'static str,
    endpoints: &'static [EndpointDoc],
}

static API_DOCS: ApiDocs = ApiDocs {
    title: "Notes API",
    description: "Simple REST API for managing notes",
    endpoints: &[
        EndpointDoc {
            method: "GET",
            path: "/notes",
            description: "Get all notes",
        },
        EndpointDoc {
            method: "POST",
            path: "/notes",
            description: "Create a new note",
        },
        EndpointDoc {
            method: "GET",
            path: "/notes/:id",
            description: "Get note by ID",
        },
        EndpointDoc {
            method: "PUT",
            path: "/notes/:id",
            description: "Update note by ID",
        },
        EndpointDoc {
            method: "DELETE",
            path: "/notes/:id",
            description: "Delete note by ID",
        },
    ],
};

/// Location of the page served at `/`.
struct Frontend(PathBuf);

fn note_input(body: NoteBody<'_>) -> Result<NoteInput, ApiError> {
    body.map(|json| json.into_inner().unwrap_or_default())
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[get("/health")]
async fn health_check(store: &State<Arc<NoteStore>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        notes: store.len().await,
        next_id: store.next_id().await,
    })
}

#[get("/")]
async fn frontend(frontend: &State<Frontend>) -> Result<NamedFile, ApiError> {
    NamedFile::open(&frontend.0)
        .await
        .map_err(|_| ApiError::NotFound(String::from("Frontend not found")))
}

#[get("/docs")]
fn docs() -> Json<&'static ApiDocs> {
    Json(&API_DOCS)
}

#[get("/notes")]
async fn list_notes(store: &State<Arc<NoteStore>>) -> Json<Vec<Note>> {
    Json(store.list_all().await)
}

#[post("/notes", data = "<body>")]
async fn create_note(
    body: NoteBody<'_>,
    store: &State<Arc<NoteStore>>,
) -> Result<(Status, Json<Note>), ApiError> {
    let input = note_input(body)?;
    let note = store.create(input).await?;
    Ok((Status::Created, Json(note)))
}

#[get("/notes/<id>")]
async fn get_note(id: &str, store: &State<Arc<NoteStore>>) -> Result<Json<Note>, ApiError> {
    let id = parse_id(id)?;
    Ok(Json(store.get_by_id(id).await?))
}

#[put("/notes/<id>", data = "<body>")]
async fn update_note(
    id: &str,
    body: NoteBody<'_>,
    store: &State<Arc<NoteStore>>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(id)?;
    let input = note_input(body)?;
    Ok(Json(store.update(id, input).await?))
}

#[delete("/notes/<id>")]
async fn delete_note(id: &str, store: &State<Arc<NoteStore>>) -> Result<Json<Message>, ApiError> {
    let id = parse_id(id)?;
    store.delete(id).await?;
    Ok(Json(Message {
        message: "Note deleted",
    }))
}

#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> (Status, Json<ErrorBody>) {
    (status, Json(ErrorBody::new(status.reason_lossy())))
}

/// Where the note collection is mirrored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    JsonFile(PathBuf),
    /// Kept in process memory only; nothing survives a restart.
    Ephemeral,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub storage: StorageMode,
    pub frontend: PathBuf,
    pub persist_policy: PersistPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            storage: StorageMode::JsonFile(PathBuf::from(DEFAULT_DATA_FILE)),
            frontend: PathBuf::from(DEFAULT_FRONTEND),
            persist_policy: PersistPolicy::default(),
        }
    }
}

pub struct ServerNode {
    config: ServerConfig,
    store: Arc<NoteStore>,
}

impl ServerNode {
    /// Opens the configured storage and loads the store from it.
    pub async fn new(config: ServerConfig) -> Self {
        let storage: Arc<dyn NoteStorage + Send + Sync> = match &config.storage {
            StorageMode::JsonFile(path) => {
                info!("Using notes file {}", path.display());
                Arc::new(JsonFileStorage::new(path.clone()))
            }
            StorageMode::Ephemeral => {
                info!("Using in-memory storage, notes will not survive a restart");
                Arc::new(MemoryStorage::new())
            }
        };
        Self::with_storage(config, storage).await
    }

    /// Like [`ServerNode::new`] but with a caller-supplied backend; the
    /// `storage` field of `config` is ignored.
    pub async fn with_storage(
        config: ServerConfig,
        storage: Arc<dyn NoteStorage + Send + Sync>,
    ) -> Self {
        let store = Arc::new(NoteStore::load(storage, config.persist_policy).await);
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<NoteStore> {
        self.store.clone()
    }

    pub fn build(&self) -> Rocket<Build> {
        rocket::build()
            .configure(
                rocket::Config::figment()
                    .merge(("address", self.config.address))
                    .merge(("port", self.config.port)),
            )
            .manage(self.store.clone())
            .manage(Frontend(self.config.frontend.clone()))
            .attach(Cors)
            .mount(
                "/",
                routes![
                    health_check,
                    frontend,
                    docs,
                    list_notes,
                    create_note,
                    get_note,
                    update_note,
                    delete_note,
                    preflight,
                ],
            )
            .register("/", catchers![default_catcher])
    }
}
