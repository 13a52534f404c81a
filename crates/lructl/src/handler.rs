//! Command handler for script replay

use std::fmt;

use lrucache::SharedLruCache;
use serde::Serialize;

use crate::command::Command;

/// Reply to a single command, printed redis-cli style
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// New key stored
    Ok,
    /// Existing key overwritten; carries the old value
    Replaced(String),
    /// Lookup result; `None` is a miss
    Value(Option<String>),
    /// Count or boolean
    Integer(i64),
    /// Entries, most recently used first
    Entries(Vec<(String, String)>),
    /// Usage counters
    Stats(StatsReport),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Replaced(old) => write!(f, "(replaced) {:?}", old),
            Reply::Value(Some(value)) => write!(f, "{:?}", value),
            Reply::Value(None) => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Entries(entries) if entries.is_empty() => write!(f, "(empty list)"),
            Reply::Entries(entries) => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {:?} => {:?}", i + 1, key, value)?;
                }
                Ok(())
            }
            Reply::Stats(report) => write!(f, "{}", report),
        }
    }
}

/// Point-in-time view of cache size and usage counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub capacity: usize,
    pub len: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "capacity:{}", self.capacity)?;
        writeln!(f, "len:{}", self.len)?;
        writeln!(f, "hits:{}", self.hits)?;
        writeln!(f, "misses:{}", self.misses)?;
        writeln!(f, "inserts:{}", self.inserts)?;
        writeln!(f, "updates:{}", self.updates)?;
        writeln!(f, "evictions:{}", self.evictions)?;
        write!(f, "hit_ratio:{:.4}", self.hit_ratio)
    }
}

pub struct CommandHandler {
    cache: SharedLruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: SharedLruCache<String, String>) -> Self {
        Self { cache }
    }

    pub fn handle(&self, cmd: Command) -> Reply {
        match cmd {
            Command::Get(key) => Reply::Value(self.cache.get(&key)),
            Command::Put { key, value } => match self.cache.put(key, value) {
                Some(old) => Reply::Replaced(old),
                None => Reply::Ok,
            },
            Command::Peek(key) => Reply::Value(self.cache.peek(&key)),
            Command::Exists(key) => Reply::Integer(i64::from(self.cache.contains_key(&key))),
            Command::Len => Reply::Integer(self.cache.len() as i64),
            Command::Dump => Reply::Entries(self.cache.snapshot()),
            Command::Stats => Reply::Stats(self.stats_report()),
        }
    }

    pub fn stats_report(&self) -> StatsReport {
        let stats = self.cache.stats();
        StatsReport {
            capacity: self.cache.capacity(),
            len: self.cache.len(),
            hits: stats.hits(),
            misses: stats.misses(),
            inserts: stats.inserts(),
            updates: stats.updates(),
            evictions: stats.evictions(),
            hit_ratio: stats.hit_ratio(),
        }
    }
}
