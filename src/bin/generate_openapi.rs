//! Dumps the REST API's OpenAPI document.
//!
//!   generate_openapi                      print to stdout
//!   generate_openapi -o openapi.json      write the file
//!   generate_openapi --check openapi.json fail if the file is out of date

use std::{fs, io::Write, path::PathBuf};

use anyhow::{bail, Context, Result};
use energia_backend::api::handlers::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, PartialEq)]
enum Mode {
    Stdout,
    Write(PathBuf),
    Check(PathBuf),
}

fn parse_mode(mut args: impl Iterator<Item = String>) -> Result<Mode> {
    let mode = match args.next().as_deref() {
        None => Mode::Stdout,
        Some("-o" | "--output") => Mode::Write(args.next().context("--output needs a path")?.into()),
        Some("--check") => Mode::Check(args.next().context("--check needs a path")?.into()),
        Some(other) => bail!("unexpected argument: {other}"),
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument: {extra}");
    }
    Ok(mode)
}

fn main() -> Result<()> {
    let mut doc = ApiDoc::openapi()
        .to_pretty_json()
        .context("serialising OpenAPI document")?;
    doc.push('\n');

    match parse_mode(std::env::args().skip(1))? {
        Mode::Stdout => std::io::stdout()
            .write_all(doc.as_bytes())
            .context("writing to stdout")?,
        Mode::Write(path) => {
            fs::write(&path, &doc).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        Mode::Check(path) => {
            let current =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            if current != doc {
                bail!("{} is stale; regenerate it with --output", path.display());
            }
        }
    }
    Ok(())
}
