//! # Console Shell
//!
//! Interactive front end for hiding and revealing messages. The secret lives
//! only in this process, so hide and reveal must happen in the same run.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego-gate
//! cargo run --bin stego-gate -- --config config/stego.toml
//! ```

use anyhow::Context;
use clap::Parser;
use log::error;
use std::io::{self, BufRead, Write};

use stego_gate::config::StegoConfig;
use stego_gate::logging::init_logger;
use stego_gate::Steganographer;

/// Command-line arguments for the shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<String>,
}

const HELP: &str = "Commands:
  hide    hide a message in an image
  reveal  reveal the hidden message with the password
  help    show this list
  quit    exit (the hidden message can no longer be revealed)";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StegoConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => StegoConfig::default(),
    };
    init_logger(config.logging.level_filter()?);

    let mut steganographer = Steganographer::new(config);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Image Steganography");
    println!("{}", HELP);

    loop {
        let Some(command) = prompt(&mut input, "\n> ")? else {
            break;
        };
        match command.trim() {
            "hide" | "encrypt" => run_hide(&mut input, &mut steganographer)?,
            "reveal" | "decrypt" => run_reveal(&mut input, &steganographer)?,
            "help" | "?" => println!("{}", HELP),
            "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    Ok(())
}

fn run_hide(input: &mut impl BufRead, steganographer: &mut Steganographer) -> io::Result<()> {
    let Some(image_path) = prompt(input, "Source image: ")? else {
        return Ok(());
    };
    let Some(message) = prompt(input, "Secret message: ")? else {
        return Ok(());
    };
    let Some(password) = prompt(input, "Password: ")? else {
        return Ok(());
    };

    match steganographer.hide(image_path.trim(), &message, &password) {
        Ok(path) => println!("Encryption completed successfully! Saved as {}", path.display()),
        Err(e) => {
            error!("Hide failed: {}", e);
            println!("Encryption failed: {}", e);
        }
    }
    Ok(())
}

fn run_reveal(input: &mut impl BufRead, steganographer: &Steganographer) -> io::Result<()> {
    let Some(image_path) = prompt(input, "Encrypted image: ")? else {
        return Ok(());
    };
    let Some(password) = prompt(input, "Password: ")? else {
        return Ok(());
    };

    match steganographer.reveal(image_path.trim(), &password) {
        Ok(message) => println!("Decrypted message: {}", message),
        Err(e) if e.is_not_authorized() => println!("{}", e),
        Err(e) => {
            error!("Reveal failed: {}", e);
            println!("Decryption failed: {}", e);
        }
    }
    Ok(())
}

/// Print `label` and read one line without its line ending.
///
/// Returns `None` at end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}
