//! Line-oriented command session over several named repositories
//!
//! A [`Session`] keeps every repository created during one run, tracks which
//! one is active, and hands all of them the same id sequence so commit ids
//! stay unique across repositories.

use history::{DisplayConfig, HistoryError, Repository, SequentialIds};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub const HELP: &str = "\
Commands:
  create <name>        create a repository and make it active
  switch <name>        make an existing repository active
  list                 list all repositories
  head                 id of the active repository's head
  size                 number of commits in the active repository
  show                 summary of the active repository
  history <n>          the n most recent commits
  commit <message>     record a new commit
  drop <id>            remove a commit
  contains <id>        whether a commit exists
  synchronize <name>   move another repository's history onto the active one
  json                 the active repository as JSON
  help                 this text
  quit                 leave the session";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("Unknown command: {command} (try `help`)")]
    UnknownCommand { command: String },

    #[error("Missing argument for {command}: expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid number: {value}")]
    InvalidNumber { value: String },

    #[error("Repository not found: {name}")]
    RepositoryNotFound { name: String },

    #[error("Repository already exists: {name}")]
    RepositoryExists { name: String },

    #[error("No active repository, use `create <name>` first")]
    NoActiveRepository,

    #[error("Cannot synchronize repository {name} with itself")]
    SelfSynchronize { name: String },
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(String),
    Switch(String),
    List,
    Head,
    Size,
    Show,
    History(usize),
    Commit(String),
    Drop(String),
    Contains(String),
    Synchronize(String),
    Json,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> SessionResult<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        let command = match word {
            "create" => Command::Create(required(rest, "create", "<name>")?),
            "switch" => Command::Switch(required(rest, "switch", "<name>")?),
            "list" => Command::List,
            "head" => Command::Head,
            "size" => Command::Size,
            "show" => Command::Show,
            "history" => {
                let value = required(rest, "history", "<n>")?;
                let n = value
                    .parse()
                    .map_err(|_| SessionError::InvalidNumber { value })?;
                Command::History(n)
            }
            "commit" => Command::Commit(rest.to_string()),
            "drop" => Command::Drop(required(rest, "drop", "<id>")?),
            "contains" => Command::Contains(required(rest, "contains", "<id>")?),
            "synchronize" | "sync" => {
                Command::Synchronize(required(rest, "synchronize", "<name>")?)
            }
            "json" => Command::Json,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(SessionError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };

        Ok(command)
    }
}

fn required(rest: &str, command: &'static str, expected: &'static str) -> SessionResult<String> {
    if rest.is_empty() {
        Err(SessionError::MissingArgument { command, expected })
    } else {
        Ok(rest.to_string())
    }
}

pub struct Session {
    repositories: BTreeMap<String, Repository>,
    active: Option<String>,
    ids: SequentialIds,
    config: DisplayConfig,
}

impl Session {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            repositories: BTreeMap::new(),
            active: None,
            ids: SequentialIds::new(),
            config,
        }
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    /// Parse and run one line
    pub fn execute_line(&mut self, line: &str) -> SessionResult<String> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> SessionResult<String> {
        debug!(?command, "Executing command");

        match command {
            Command::Create(name) => self.create(name),
            Command::Switch(name) => {
                if !self.repositories.contains_key(&name) {
                    return Err(SessionError::RepositoryNotFound { name });
                }
                let output = format!("Switched to {}", name);
                self.active = Some(name);
                Ok(output)
            }
            Command::List => Ok(self.list()),
            Command::Head => Ok(self
                .active_repository()?
                .head_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "No commits".to_string())),
            Command::Size => Ok(self.active_repository()?.size().to_string()),
            Command::Show => Ok(self.active_repository()?.to_string()),
            Command::History(n) => Ok(self.active_repository()?.history(n)?),
            Command::Commit(message) => {
                let id = self.active_repository_mut()?.commit(message);
                Ok(format!("New commit: {}", id))
            }
            Command::Drop(id) => {
                if self.active_repository_mut()?.drop_commit(&id) {
                    Ok(format!("Dropped {}", id))
                } else {
                    Ok(format!("Commit {} not found", id))
                }
            }
            Command::Contains(id) => Ok(self.active_repository()?.contains(&id).to_string()),
            Command::Synchronize(name) => self.synchronize(name),
            Command::Json => Ok(self.active_repository()?.to_json()?),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok("Goodbye!".to_string()),
        }
    }

    fn create(&mut self, name: String) -> SessionResult<String> {
        if self.repositories.contains_key(&name) {
            return Err(SessionError::RepositoryExists { name });
        }

        let repository =
            Repository::with_config(name.clone(), Arc::new(self.ids.clone()), self.config.clone())?;
        let output = format!("Created repository {}", name);
        self.repositories.insert(name.clone(), repository);
        self.active = Some(name);
        Ok(output)
    }

    fn list(&self) -> String {
        if self.repositories.is_empty() {
            return "No repositories".to_string();
        }

        self.repositories
            .iter()
            .map(|(name, repository)| {
                let marker = if self.active.as_deref() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                format!("{} {}", marker, repository)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn synchronize(&mut self, name: String) -> SessionResult<String> {
        let active = self
            .active
            .clone()
            .ok_or(SessionError::NoActiveRepository)?;
        if active == name {
            return Err(SessionError::SelfSynchronize { name });
        }

        let mut other = self
            .repositories
            .remove(&name)
            .ok_or_else(|| SessionError::RepositoryNotFound { name: name.clone() })?;

        let result = self
            .repositories
            .get_mut(&active)
            .map(|repository| repository.synchronize(&mut other))
            .ok_or_else(|| SessionError::RepositoryNotFound {
                name: active.clone(),
            });
        self.repositories.insert(name.clone(), other);
        result?;

        Ok(format!("Synchronized {} into {}", name, active))
    }

    fn active_repository(&self) -> SessionResult<&Repository> {
        let name = self
            .active
            .as_deref()
            .ok_or(SessionError::NoActiveRepository)?;
        self.repositories
            .get(name)
            .ok_or_else(|| SessionError::RepositoryNotFound {
                name: name.to_string(),
            })
    }

    fn active_repository_mut(&mut self) -> SessionResult<&mut Repository> {
        let name = self
            .active
            .as_deref()
            .ok_or(SessionError::NoActiveRepository)?;
        self.repositories
            .get_mut(name)
            .ok_or_else(|| SessionError::RepositoryNotFound {
                name: name.to_string(),
            })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}
