//! Script command parser using nom
//!
//! One command per line, command word case-insensitive:
//! ```text
//! # comment
//! PUT key some value with spaces
//! GET key
//! PEEK key
//! EXISTS key
//! LEN
//! DUMP
//! STATS
//! ```

use nom::{
    bytes::complete::take_till1,
    character::complete::{alpha1, space0, space1},
    combinator::{eof, map, rest},
    sequence::{pair, preceded, terminated},
    IResult,
};

/// A single script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a key, marking it most recently used
    Get(String),
    /// Insert or update a key
    Put {
        /// Key to write
        key: String,
        /// Rest of the line after the key
        value: String,
    },
    /// Read a key without touching recency
    Peek(String),
    /// Check whether a key is cached
    Exists(String),
    /// Number of cached entries
    Len,
    /// All entries, most recently used first
    Dump,
    /// Usage counters
    Stats,
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn end(input: &str) -> IResult<&str, ()> {
    map(pair(space0, eof), |_| ())(input)
}

/// Exactly one key argument
fn key_only(input: &str) -> IResult<&str, &str> {
    terminated(preceded(space1, word), end)(input)
}

/// A key followed by a value running to the end of the line
fn key_value(input: &str) -> IResult<&str, (&str, &str)> {
    pair(preceded(space1, word), preceded(space1, rest))(input)
}

/// Parse one script line
///
/// # Returns
/// * `Ok(None)` - Blank line or comment
/// * `Ok(Some(cmd))` - Parsed command
/// * `Err(msg)` - Unknown command or wrong arguments
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (args, name) = alpha1::<_, nom::error::Error<&str>>(line)
        .map_err(|_| format!("expected a command, got '{}'", line))?;
    let upper = name.to_ascii_uppercase();

    let parsed = match upper.as_str() {
        "GET" => key_only(args).map(|(_, key)| Command::Get(key.to_string())),
        "PEEK" => key_only(args).map(|(_, key)| Command::Peek(key.to_string())),
        "EXISTS" => key_only(args).map(|(_, key)| Command::Exists(key.to_string())),
        "PUT" => key_value(args).map(|(_, (key, value))| Command::Put {
            key: key.to_string(),
            value: value.to_string(),
        }),
        "LEN" => end(args).map(|_| Command::Len),
        "DUMP" => end(args).map(|_| Command::Dump),
        "STATS" => end(args).map(|_| Command::Stats),
        _ => return Err(format!("unknown command '{}'", name)),
    };

    parsed
        .map(Some)
        .map_err(|_| format!("wrong number of arguments for '{}' command", upper.to_lowercase()))
}
