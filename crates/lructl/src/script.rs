//! Script input and replay loop

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::command::parse_command;
use crate::handler::CommandHandler;

/// Open the script file, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Replay every command in `input`, writing one reply per command
///
/// Stops at the first malformed line.
///
/// # Returns
/// * `Result<usize>` - Number of commands executed
pub fn run<R: BufRead, W: Write>(
    handler: &CommandHandler,
    input: R,
    output: &mut W,
) -> Result<usize> {
    let mut executed = 0;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read line {}", line_no))?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => bail!("line {}: {}", line_no, e),
        };

        debug!(line = line_no, ?command, "executing command");
        let reply = handler.handle(command);
        writeln!(output, "{}", reply)?;
        executed += 1;
    }

    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrucache::SharedLruCache;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn replay(capacity: usize, script: &str) -> Result<(usize, String)> {
        let handler = CommandHandler::new(SharedLruCache::new(capacity).unwrap());
        let mut out = Vec::new();
        let executed = run(&handler, Cursor::new(script), &mut out)?;
        Ok((executed, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_run_recency_scenario() {
        let script = "\
# capacity 2
PUT 1 1
PUT 2 2
GET 1
PUT 3 3
GET 2
PUT 4 4
GET 1
GET 3
GET 4
";
        let (executed, out) = replay(2, script).unwrap();

        assert_eq!(executed, 9);
        assert_eq!(
            out,
            "OK\nOK\n\"1\"\nOK\n(nil)\nOK\n(nil)\n\"3\"\n\"4\"\n"
        );
    }

    #[test]
    fn test_run_reports_line_of_bad_command() {
        let err = replay(2, "PUT a 1\n\nGET\n").unwrap_err();
        assert!(err.to_string().starts_with("line 3:"), "{}", err);
    }

    #[test]
    fn test_open_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PUT k v").unwrap();
        writeln!(file, "LEN").unwrap();
        file.flush().unwrap();

        let handler = CommandHandler::new(SharedLruCache::new(4).unwrap());
        let input = open_input(Some(file.path())).unwrap();
        let mut out = Vec::new();
        let executed = run(&handler, input, &mut out).unwrap();

        assert_eq!(executed, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "OK\n(integer) 1\n");
    }

    #[test]
    fn test_open_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let result = open_input(Some(path.as_path()));
        assert!(result.is_err());
    }
}
