//! Terminal client for the Promptlens API. A typed line becomes the prompt
//! and is analyzed immediately; colon commands drive the rest of the
//! session. All state transitions live in `session`; this loop only does I/O.

mod clipboard;
mod http;
mod render;
mod session;

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;

use crate::clipboard::Osc52Clipboard;
use crate::http::HttpBackend;
use crate::session::Session;

const DEFAULT_API_URL: &str = "http://localhost:8080";

fn report(session: &Session) {
    match &session.last_error {
        Some(message) => println!("Error: {message}"),
        None => print!("{}", render::render_analysis(session.last_analysis.as_ref())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let base_url =
        std::env::var("PROMPTLENS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let backend = HttpBackend::new(base_url);
    let mut clipboard = Osc52Clipboard::new(io::stdout());
    let mut session = Session::new();

    println!("promptlens: type a prompt to analyze it.");
    println!("Commands: :analyze (re-run), :use (take the improved prompt), :copy, :show, :quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":show" => print!("{}", render::render_analysis(session.last_analysis.as_ref())),
            ":analyze" | ":a" => {
                session.analyze(&backend).await;
                report(&session);
            }
            ":use" => {
                session.use_improved_prompt();
                println!("Prompt is now:\n{}", session.prompt_text);
            }
            ":copy" => {
                session.copy_improved_prompt(&mut clipboard, Instant::now());
                if session.copied_indicator(Instant::now()) {
                    println!("Copied.");
                }
            }
            text => {
                session.prompt_text = text.to_string();
                session.analyze(&backend).await;
                report(&session);
            }
        }
    }

    Ok(())
}
