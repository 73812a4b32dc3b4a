use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::domain::command::Command;
use crate::domain::matcher::{self, RankedCommand};

/// Produces the commands currently available from one place.
pub trait CommandSource: Send {
    fn name(&self) -> &str;

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>>;

    /// Sources with very large sets may pre-filter by the search term.
    fn enumerate_for(&self, _search_term: &str) -> Result<Vec<Arc<dyn Command>>> {
        self.enumerate()
    }
}

/// Aggregates command sources. Every query re-asks each source.
#[derive(Default)]
pub struct CommandRegistry {
    sources: Vec<Box<dyn CommandSource>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: Box<dyn CommandSource>) {
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Box<dyn CommandSource>) -> Self {
        self.register(source);
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn all_commands(&self, search_term: &str) -> Vec<Arc<dyn Command>> {
        let mut commands = Vec::new();

        for source in &self.sources {
            match source.enumerate_for(search_term) {
                Ok(found) => {
                    debug!(source = source.name(), count = found.len(), "source enumerated");
                    commands.extend(found.into_iter().filter(|command| command.is_valid()));
                }
                Err(err) => {
                    warn!(source = source.name(), error = ?err, "command source failed, skipping");
                }
            }
        }

        commands
    }

    pub fn sorted_by_match(&self, search_term: &str) -> Vec<RankedCommand> {
        matcher::rank(self.all_commands(search_term), search_term)
    }

    pub fn score_for(&self, command: &dyn Command, query: &str) -> f64 {
        matcher::score(command, query)
    }
}
