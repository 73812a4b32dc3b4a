use std::sync::Arc;

use anyhow::Result;

use crate::domain::command::Command;
use crate::domain::registry::CommandSource;

/// A fixed set of registered menu methods.
pub struct StaticSource {
    name: String,
    commands: Vec<Arc<dyn Command>>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: impl Command + 'static) -> Self {
        self.commands.push(Arc::new(command));
        self
    }

    pub fn push(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>> {
        Ok(self.commands.clone())
    }
}
