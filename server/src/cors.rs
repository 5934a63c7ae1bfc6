// cors.rs
use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Data, Request, Response};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Logs every request and stamps permissive cross-origin headers on every
/// response, including error responses produced by catchers.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS headers and request log",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        info!("{} {}", req.method(), req.uri().path());
    }

    async fn on_response<'r>(&self, _req: &'r Request<'_>, res: &mut Response<'r>) {
        res.set_header(Header::new("Access-Control-Allow-Origin", ALLOW_ORIGIN));
        res.set_header(Header::new("Access-Control-Allow-Methods", ALLOW_METHODS));
        res.set_header(Header::new("Access-Control-Allow-Headers", ALLOW_HEADERS));
    }
}
