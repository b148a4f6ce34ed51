use std::io::Write;

use rustyline::{error::ReadlineError, history::FileHistory};
use tracing_subscriber::EnvFilter;

use crate::error::FidlError;

mod error;

#[derive(Debug, PartialEq)]
enum IterStatus {
    Continue,
    Break,
}

struct Repl {
    prompt: String,
    editor: rustyline::Editor<(), FileHistory>,
    out: Box<dyn Write>,
    buffer: String,
}

impl Repl {
    pub fn new() -> Self {
        Repl {
            out: Box::new(std::io::stderr()),
            editor: rustyline::DefaultEditor::new().expect("failed to start readline impl"),
            prompt: "fidl> ".into(),
            buffer: String::new(),
        }
    }

    fn iter(&mut self) -> Result<IterStatus, FidlError> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.trim());
                }

                self.handle_line(&line)
            }
            Err(ReadlineError::Interrupted) => {
                writeln!(&mut self.out, "SIGINT received; exiting...")?;
                Ok(IterStatus::Break)
            }
            Err(ReadlineError::Eof) => Ok(IterStatus::Break),
            Err(err) => {
                writeln!(&mut self.out, "Error: {err:?}")?;
                Ok(IterStatus::Continue)
            }
        }
    }

    fn process_buffer(&mut self) -> Result<IterStatus, FidlError> {
        let s: &str = self.buffer.trim();
        match s {
            "quit" => Ok(IterStatus::Break),
            _ => {
                let definitions = franca::parse(&self.buffer)?;
                println!("{definitions:#?}");

                Ok(IterStatus::Continue)
            }
        }
    }

    /// Lines accumulate until a blank line submits the buffer; Franca has no
    /// statement terminator, so a blank line stands in for one.
    fn handle_line(&mut self, line: &str) -> Result<IterStatus, FidlError> {
        if !line.trim().is_empty() {
            self.buffer.push_str(line);
            self.buffer.push('\n');

            return Ok(IterStatus::Continue);
        }

        if self.buffer.is_empty() {
            return Ok(IterStatus::Continue);
        }

        let status = match self.process_buffer() {
            Ok(s) => s,
            Err(FidlError::Parse(e)) => {
                println!("{e}");
                IterStatus::Continue
            }
            Err(e) => return Err(e),
        };

        self.buffer = String::new();

        Ok(status)
    }

    pub fn run(&mut self) -> Result<(), FidlError> {
        while self.iter()? == IterStatus::Continue {}
        Ok(())
    }
}

fn parse_file(path: &str) -> Result<(), FidlError> {
    let buf = std::fs::read_to_string(path)?;
    let definitions = franca::parse(&buf)?;
    println!("{definitions:#?}");

    Ok(())
}

fn main() -> Result<(), FidlError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    match std::env::args().nth(1) {
        Some(path) => parse_file(&path),
        None => Repl::new().run(),
    }
}
