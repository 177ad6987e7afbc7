use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pasajes_client::command::{parse_command, Command, HELP};
use pasajes_client::config::DeskConfig;
use pasajes_client::desk::TicketDesk;
use pasajes_client::http::HttpRecordStore;
use pasajes_client::render;

type Lines = tokio::io::Lines<BufReader<tokio::io::Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing (stderr, so it does not mix with the desk output) ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pasajes_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = DeskConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        page_size = config.page_size,
        reload_policy = %config.reload_policy,
        prefill_selections = config.prefill_selections,
        "Loaded desk configuration"
    );

    let store = HttpRecordStore::new(config.api_url.clone());
    let today = chrono::Local::now().date_naive();
    let desk = TicketDesk::new(Arc::new(store), config, today);

    desk.start().await;
    print_notices(&desk).await;
    println!("{}", render::render_snapshot(&desk.snapshot().await));
    println!("\n{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("\n> ").await?;
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Lookups => {
                let snapshot = desk.snapshot().await;
                println!("{}", render::render_lookups(&snapshot.lookups, snapshot.filter));
                continue;
            }
            Command::Show => {}
            Command::Filter(filter) => {
                desk.apply_filter(filter).await;
            }
            Command::Page(page) => {
                if !desk.set_page(page).await {
                    println!("La página {page} no existe");
                }
            }
            Command::Next => {
                desk.next_page().await;
            }
            Command::Prev => {
                desk.prev_page().await;
            }
            Command::Edit(id) => {
                desk.begin_edit(id).await;
            }
            Command::Cancel => desk.cancel_edit().await,
            Command::Field(field, value) => {
                desk.update_form(field, &value).await;
            }
            Command::Save => {
                desk.submit().await;
            }
            Command::Delete(id) => {
                if confirm_delete(&mut lines).await? {
                    desk.delete(id).await;
                }
            }
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                if let Some(path) = desk.export_csv(&dir).await {
                    println!("Archivo: {}", path.display());
                }
            }
        }

        print_notices(&desk).await;
        println!("{}", render::render_snapshot(&desk.snapshot().await));
    }

    tracing::info!("Desk closed");
    Ok(())
}

async fn prompt(text: &str) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn print_notices(desk: &TicketDesk<HttpRecordStore>) {
    for notice in desk.take_notices().await {
        println!("{notice}");
    }
}

async fn confirm_delete(lines: &mut Lines) -> anyhow::Result<bool> {
    println!("¿Estás seguro? No podrás revertir esto.");
    prompt("Escriba 'si' para eliminar: ").await?;
    let answer = lines.next_line().await.context("Failed to read stdin")?;
    Ok(matches!(
        answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
        Some("si" | "sí" | "s")
    ))
}
