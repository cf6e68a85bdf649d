use crate::media::Provider;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  add <path>...            select files to upload
  remove <index>           drop a pending file
  upload <cdn|storage>     upload all pending files
  show <cdn|storage>       measure load times and toggle the file list
  list                     show the session again
  help                     this text
  quit                     exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Remove(usize),
    Upload(Provider),
    Show(Provider),
    List,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb {
            "add" => {
                if args.is_empty() {
                    return Err(anyhow!("Usage: add <path>..."));
                }
                Self::Add(args.iter().map(PathBuf::from).collect())
            }
            "remove" | "rm" => {
                let index = single_arg(&args, "remove <index>")?;
                Self::Remove(
                    index
                        .parse()
                        .with_context(|| format!("Invalid index '{}'", index))?,
                )
            }
            "upload" => Self::Upload(single_arg(&args, "upload <cdn|storage>")?.parse()?),
            "show" => Self::Show(single_arg(&args, "show <cdn|storage>")?.parse()?),
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(anyhow!("Unknown command '{}', try `help`", other)),
        };

        Ok(Some(command))
    }
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str> {
    match args {
        [only] => Ok(*only),
        _ => Err(anyhow!("Usage: {}", usage)),
    }
}
