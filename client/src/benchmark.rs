use anyhow::Result;
use clap::{App, Arg};
use notes_client::client_api::{NoteId, NoteInput, NotesClient};
use notes_client::http_client::{HttpNotesClient, DEFAULT_SERVER};
use std::time::Instant;

// Creates, reads back and deletes `count` notes one request at a time and
// reports how long each phase took.

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let matches = App::new("notes-benchmark")
        .about("Sequential create/get/delete load against a notes server")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .help("Server base URL (default http://127.0.0.1:8080)"),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .takes_value(true)
                .default_value("100")
                .help("Number of notes to create"),
        )
        .get_matches();

    let server = matches.value_of("server").unwrap_or(DEFAULT_SERVER);
    let count: usize = matches.value_of_t("count")?;
    let client = HttpNotesClient::new(server);

    println!("Start running workload against {}", client.base_url());
    let ids = load_run(&client, count).await?;
    read_run(&client, &ids).await?;
    delete_run(&client, &ids).await?;
    Ok(())
}

async fn load_run(client: &dyn NotesClient, count: usize) -> Result<Vec<NoteId>> {
    let start = Instant::now();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let input = NoteInput::new(format!("bench-{}", i), "benchmark payload");
        ids.push(client.create(&input).await?.id);
    }
    println!("Created {} notes in {:?}", count, start.elapsed());
    Ok(ids)
}

async fn read_run(client: &dyn NotesClient, ids: &[NoteId]) -> Result<()> {
    let start = Instant::now();
    for id in ids {
        client.get(*id).await?;
    }
    println!("Fetched {} notes in {:?}", ids.len(), start.elapsed());
    Ok(())
}

async fn delete_run(client: &dyn NotesClient, ids: &[NoteId]) -> Result<()> {
    let start = Instant::now();
    for id in ids {
        client.delete(*id).await?;
    }
    println!("Deleted {} notes in {:?}", ids.len(), start.elapsed());
    Ok(())
}
