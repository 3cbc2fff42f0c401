use std::io::{self, BufRead, Write};
use tsuzuri_core::engine::{Engine, Profile};
use tsuzuri_core::parser;
use tsuzuri_core::syllable_table::{default_table, SyllableTable};
use tsuzuri_core::types::{InputStatus, Tag};

// Usage: typing_drill [--table FILE] [WORD...]
// Each stdin line is fed key by key; '<' is a backspace.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1).peekable();
    let custom: Option<SyllableTable> = if args.peek().map(String::as_str) == Some("--table") {
        args.next();
        let path = args
            .next()
            .ok_or_else(|| anyhow::anyhow!("--table needs a file"))?;
        Some(parser::load_table(&path)?)
    } else {
        None
    };
    let table: &SyllableTable = custom.as_ref().unwrap_or_else(|| default_table());

    let mut words: Vec<String> = args.collect();
    if words.is_empty() {
        words = vec!["konnichiwa".into(), "shinkansen".into(), "kan'i".into()];
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    for word in &words {
        let mut engine = Engine::with_table(word, table, Profile::default());
        while !engine.is_complete() {
            print!("{} | {}> ", render(&engine), engine.remaining_text());
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            for key in line?.chars() {
                if key == '<' {
                    println!("  backspace -> {:?}", engine.backspace());
                    continue;
                }
                let status = engine.input(key);
                if status != InputStatus::Ok {
                    println!("  {:?} -> {:?}", key, status);
                }
            }
        }
        let stats = engine.stats();
        println!(
            "{} done: {} keys, {} misses, accuracy {:.1}%",
            word,
            stats.keystrokes,
            stats.misses,
            stats.accuracy() * 100.0
        );
    }

    Ok(())
}

/// Typed text with misses in brackets.
fn render(engine: &Engine) -> String {
    engine
        .typed_chars()
        .map(|t| match t.tag {
            Tag::Correct => t.ch.to_string(),
            Tag::Incorrect => format!("[{}]", t.ch),
        })
        .collect()
}
