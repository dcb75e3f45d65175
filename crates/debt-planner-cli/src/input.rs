use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

type InputResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Read the command's JSON input from `--input <file>`, else piped stdin.
pub fn read_input(path: Option<&str>, what: &str) -> InputResult<Value> {
    if let Some(path) = path {
        return read_file(path);
    }
    match read_stdin()? {
        Some(value) => Ok(value),
        None => Err(format!("--input <file.json> or stdin required for {what}").into()),
    }
}

fn read_file(path: &str) -> InputResult<Value> {
    let path = input_path(path)?;
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let value = parse_json(&contents, &path.display().to_string())?;
    log::debug!("read input from {}", path.display());
    Ok(value)
}

/// `None` when stdin is a terminal or the pipe carries only whitespace.
fn read_stdin() -> InputResult<Option<Value>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Ok(None);
    }
    let value = parse_json(&buffer, "stdin")?;
    log::debug!("read {} bytes of input from stdin", buffer.len());
    Ok(Some(value))
}

fn parse_json(text: &str, source: &str) -> InputResult<Value> {
    serde_json::from_str(text.trim())
        .map_err(|e| format!("Failed to parse {source}: {e}").into())
}

/// Relative paths resolve against the working directory. The target must be
/// an existing regular file.
fn input_path(path: &str) -> InputResult<PathBuf> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }
    Ok(resolved)
}
