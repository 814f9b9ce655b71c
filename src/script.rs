//! Read and run line-oriented command scripts against a queue
//!
//! One command per line; blank lines, lines starting with `#` and lines whose
//! first word is `c` are comments:
//!
//! ```text
//! enqueue <value> <priority>
//! update <value> <priority>
//! priority <value>
//! remove <value>
//! dequeue
//! peek
//! len
//! ```

use crate::error::QueueError;
use crate::priority_queue::AdaptivePriorityQueue;

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, prelude::*, BufReader};

pub type ScriptQueue = AdaptivePriorityQueue<String, i64>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    Enqueue(String, i64),
    Update(String, i64),
    Priority(String),
    Remove(String),
    Dequeue,
    Peek,
    Len,
}

/// What running one command produced
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    Done,
    Value(String, i64),
    Priority(i64),
    Len(usize),
    Nothing,
    Failed(QueueError),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Outcome::Done => f.write_str("ok"),
            Outcome::Value(v, p) => write!(f, "{} {}", v, p),
            Outcome::Priority(p) => write!(f, "{}", p),
            Outcome::Len(n) => write!(f, "{}", n),
            Outcome::Nothing => f.write_str("-"),
            Outcome::Failed(e) => write!(f, "error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    Io(io::Error),
    UnknownCommand(String),
    MissingArgument,
    BadPriority(String),
    TrailingArgument(String),
}

/// A script that could not be read, with the (1-based) line it failed on
#[derive(Debug)]
pub struct ScriptError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ErrorKind::Io(e) => write!(f, "{}", e),
            ErrorKind::UnknownCommand(c) => write!(f, "unknown command \"{}\"", c),
            ErrorKind::MissingArgument => f.write_str("missing argument"),
            ErrorKind::BadPriority(p) => write!(f, "bad priority \"{}\"", p),
            ErrorKind::TrailingArgument(a) => write!(f, "unexpected argument \"{}\"", a),
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub fn read_from_file(filename: &str) -> Result<Vec<Command>, ScriptError> {
    let file = File::open(filename).map_err(|e| ScriptError {
        line: 0,
        kind: ErrorKind::Io(e),
    })?;
    parse(BufReader::new(file))
}

pub fn parse<R: BufRead>(reader: R) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let fail = |kind| ScriptError { line: i + 1, kind };
        let line = line.map_err(|e| fail(ErrorKind::Io(e)))?;

        let mut parts = line.split_whitespace();
        let name = match parts.next() {
            Some(name) if !name.starts_with('#') && name != "c" => name,
            // blank or comment
            _ => continue,
        };

        let mut value = || {
            parts
                .next()
                .map(str::to_owned)
                .ok_or_else(|| fail(ErrorKind::MissingArgument))
        };
        let command = match name {
            "enqueue" | "update" => {
                let v = value()?;
                let p = value()?;
                let p = p.parse::<i64>().map_err(|_| fail(ErrorKind::BadPriority(p)))?;
                if name == "enqueue" {
                    Command::Enqueue(v, p)
                } else {
                    Command::Update(v, p)
                }
            }
            "priority" => Command::Priority(value()?),
            "remove" => Command::Remove(value()?),
            "dequeue" => Command::Dequeue,
            "peek" => Command::Peek,
            "len" => Command::Len,
            other => return Err(fail(ErrorKind::UnknownCommand(other.to_owned()))),
        };

        if let Some(extra) = parts.next() {
            return Err(fail(ErrorKind::TrailingArgument(extra.to_owned())));
        }
        commands.push(command);
    }

    Ok(commands)
}

/// Run every command in order; refused operations are recorded, not fatal
pub fn run(commands: &[Command], queue: &mut ScriptQueue) -> Vec<Outcome> {
    commands
        .iter()
        .map(|command| {
            log::debug!("Running {:?}", command);
            let result = match command {
                Command::Enqueue(v, p) => queue.enqueue(v.clone(), *p).map(|()| Outcome::Done),
                Command::Update(v, p) => queue.update_priority(v.as_str(), *p).map(|()| Outcome::Done),
                Command::Priority(v) => queue.get_priority(v.as_str()).map(Outcome::Priority),
                Command::Remove(v) => queue.remove(v.as_str()).map(Outcome::Priority),
                Command::Dequeue => queue
                    .dequeue_with_priority()
                    .map(|(v, p)| Outcome::Value(v, p)),
                Command::Peek => Ok(match queue.peek() {
                    Some((v, p)) => Outcome::Value(v.clone(), p),
                    None => Outcome::Nothing,
                }),
                Command::Len => Ok(Outcome::Len(queue.len())),
            };
            result.unwrap_or_else(Outcome::Failed)
        })
        .collect()
}
