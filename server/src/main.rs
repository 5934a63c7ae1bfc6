use clap::{App, Arg, ArgMatches, ErrorKind};
use log::{info, LevelFilter};
use notes_server::server::{
    ServerConfig, ServerNode, StorageMode, DEFAULT_DATA_FILE, DEFAULT_FRONTEND, DEFAULT_PORT,
};
use notes_server::store::PersistPolicy;
use std::fmt::Display;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

fn setup_logger(level: LevelFilter, log_file: &str) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .level_for("rocket", LevelFilter::Warn)
        .level_for("_", LevelFilter::Warn)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

// Command line first, then the environment, then the built-in default.
fn value_or_env(matches: &ArgMatches, name: &str, env: &str, default: &str) -> String {
    matches
        .value_of(name)
        .map(String::from)
        .or_else(|| std::env::var(env).ok())
        .unwrap_or_else(|| String::from(default))
}

fn parse_or_exit<T>(raw: &str, flag: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().unwrap_or_else(|e| {
        clap::Error::raw(
            ErrorKind::InvalidValue,
            format!("Invalid value '{}' for '--{}': {}\n", raw, flag, e),
        )
        .exit()
    })
}

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let matches = App::new("notes-server")
        .version("1.0")
        .about("A small REST service for short text notes, mirrored to a JSON file")
        .arg(
            Arg::with_name("address")
                .long("address")
                .takes_value(true)
                .help("Address to bind [env: NOTES_ADDRESS] [default: 0.0.0.0]"),
        )
        .arg(
            Arg::with_name("port")
                .long("port")
                .takes_value(true)
                .help("Port to listen on [env: NOTES_PORT] [default: 8080]"),
        )
        .arg(
            Arg::with_name("data_file")
                .long("data-file")
                .takes_value(true)
                .help("JSON file the notes are mirrored to [env: NOTES_DATA_FILE] [default: notes.json]"),
        )
        .arg(
            Arg::with_name("frontend")
                .long("frontend")
                .takes_value(true)
                .help("Page served at / [env: NOTES_FRONTEND] [default: ./frontend.html]"),
        )
        .arg(
            Arg::with_name("log_file")
                .long("log-file")
                .takes_value(true)
                .help("Log file, written in addition to stdout [env: NOTES_LOG_FILE] [default: output.log]"),
        )
        .arg(
            Arg::with_name("log_level")
                .long("log-level")
                .takes_value(true)
                .help("One of off, error, warn, info, debug, trace [env: NOTES_LOG_LEVEL] [default: info]"),
        )
        .arg(
            Arg::with_name("strict_persistence")
                .long("strict-persistence")
                .help("Answer 500 when a change could not be written to disk"),
        )
        .arg(
            Arg::with_name("ephemeral")
                .long("ephemeral")
                .conflicts_with("data_file")
                .help("Keep notes in memory only"),
        )
        .get_matches();

    let log_level = value_or_env(&matches, "log_level", "NOTES_LOG_LEVEL", "info");
    let log_level: LevelFilter = parse_or_exit(&log_level, "log-level");
    let log_file = value_or_env(&matches, "log_file", "NOTES_LOG_FILE", "output.log");
    if let Err(e) = setup_logger(log_level, &log_file) {
        eprintln!("Could not set up logging: {}", e);
    }

    let address = value_or_env(&matches, "address", "NOTES_ADDRESS", "0.0.0.0");
    let port = value_or_env(&matches, "port", "NOTES_PORT", &DEFAULT_PORT.to_string());
    let storage = if matches.is_present("ephemeral") {
        StorageMode::Ephemeral
    } else {
        StorageMode::JsonFile(PathBuf::from(value_or_env(
            &matches,
            "data_file",
            "NOTES_DATA_FILE",
            DEFAULT_DATA_FILE,
        )))
    };
    let persist_policy = if matches.is_present("strict_persistence") {
        PersistPolicy::Strict
    } else {
        PersistPolicy::BestEffort
    };
    let config = ServerConfig {
        address: parse_or_exit::<IpAddr>(&address, "address"),
        port: parse_or_exit::<u16>(&port, "port"),
        storage,
        frontend: PathBuf::from(value_or_env(
            &matches,
            "frontend",
            "NOTES_FRONTEND",
            DEFAULT_FRONTEND,
        )),
        persist_policy,
    };

    let server_node = ServerNode::new(config).await;
    info!(
        "Server listening on {}:{}",
        server_node.config().address,
        server_node.config().port
    );
    server_node.build().launch().await?;
    Ok(())
}
