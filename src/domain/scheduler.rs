use std::collections::VecDeque;
use std::mem;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::domain::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Plain,
    WithArguments,
    /// Arguments were typed but the command does not accept them.
    FallbackWithoutArguments,
}

/// A confirmed command waiting for the host's next tick.
#[derive(Debug)]
pub struct PendingExecution {
    pub command: Arc<dyn Command>,
    pub arguments: Option<Vec<String>>,
}

impl PendingExecution {
    pub fn new(command: Arc<dyn Command>, arguments: Option<Vec<String>>) -> Self {
        Self { command, arguments }
    }

    pub fn title(&self) -> &str {
        self.command.title()
    }

    pub fn run(self) -> Result<DispatchMode> {
        let Some(arguments) = self.arguments else {
            self.command.execute()?;
            return Ok(DispatchMode::Plain);
        };

        match self.command.arguments() {
            Some(target) => {
                debug!(command = self.command.title(), ?arguments, "executing with arguments");
                target.execute_with_arguments(&arguments)?;
                Ok(DispatchMode::WithArguments)
            }
            None => {
                warn!(
                    command = self.command.title(),
                    "arguments were passed to a command that does not accept arguments"
                );
                self.command.execute()?;
                Ok(DispatchMode::FallbackWithoutArguments)
            }
        }
    }
}

/// Host-side queue of executions deferred to the next event-loop pass.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: VecDeque<PendingExecution>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: PendingExecution) {
        self.tasks.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drains the queue, running each task in the order it was pushed.
    pub fn run_pending(&mut self) -> Vec<(String, Result<DispatchMode>)> {
        let batch = mem::take(&mut self.tasks);
        batch
            .into_iter()
            .map(|task| {
                let title = task.title().to_string();
                (title, task.run())
            })
            .collect()
    }
}
