// In src/main.rs

use clap::{App, Arg};
use notes_client::client_api::{Note, NotesClient};
use notes_client::command::{self, Command, HELP};
use notes_client::http_client::{HttpNotesClient, DEFAULT_SERVER};
use tokio::io::{self, AsyncBufReadExt, BufReader};

fn print_note(note: &Note) {
    println!("#{} {}: {}", note.id, note.title, note.content);
}

async fn run(client: &dyn NotesClient, command: Command) -> notes_client::client_api::Result<()> {
    match command {
        Command::List => {
            let notes = client.list().await?;
            if notes.is_empty() {
                println!("No notes");
            }
            notes.iter().for_each(print_note);
        }
        Command::Get(id) => print_note(&client.get(id).await?),
        Command::Create(input) => {
            let note = client.create(&input).await?;
            println!("Created note {}", note.id);
        }
        Command::Update(id, input) => print_note(&client.update(id, &input).await?),
        Command::Delete(id) => {
            client.delete(id).await?;
            println!("Deleted note {}", id);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let matches = App::new("Notes Client")
        .version("1.0")
        .about("Talks to a notes server")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .help("Server base URL (default http://127.0.0.1:8080)"),
        )
        .get_matches();

    let server = matches.value_of("server").unwrap_or(DEFAULT_SERVER);
    let client = HttpNotesClient::new(server);

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    println!("Notes Client ({})", client.base_url());
    println!("Type 'help' for a list of commands");

    while reader.read_line(&mut line).await? > 0 {
        match command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = run(&client, cmd).await {
                    eprintln!("Error: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
        line.clear();
    }

    Ok(())
}
