//! Print the OpenAPI document as JSON.
//!
//! Writes to stdout, or to the file given with `--output`.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use drawing_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the drawing API OpenAPI document"
)]
struct CliArgs {
    /// Write the document to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|error| io::Error::other(format!("serialise OpenAPI document: {error}")))?;
    match args.output {
        Some(path) => std::fs::write(path, json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
