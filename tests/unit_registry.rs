use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use cmdpal::domain::command::{Command, MenuCommand};
use cmdpal::domain::registry::{CommandRegistry, CommandSource};
use cmdpal::integrations::menu_source::StaticSource;

struct ToggleCommand {
    title: String,
    alive: Arc<AtomicBool>,
}

impl Command for ToggleCommand {
    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        ""
    }

    fn is_valid(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn execute(&self) -> Result<()> {
        Ok(())
    }
}

struct CountingSource {
    calls: Arc<AtomicUsize>,
}

impl CommandSource for CountingSource {
    fn name(&self) -> &str {
        "counting"
    }

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok((0..n)
            .map(|i| Arc::new(MenuCommand::new(format!("Item {i}"), "", || Ok(()))) as Arc<dyn Command>)
            .collect())
    }
}

struct FailingSource;

impl CommandSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>> {
        Err(anyhow!("simulated scan failure"))
    }
}

fn menu(titles: &[&str]) -> StaticSource {
    let mut source = StaticSource::new("menu");
    for title in titles {
        source.push(Arc::new(MenuCommand::new(*title, "", || Ok(()))));
    }
    source
}

#[test]
fn all_commands_is_the_union_of_sources() {
    let registry = CommandRegistry::new()
        .with_source(Box::new(menu(&["Save Scene", "Load Scene"])))
        .with_source(Box::new(menu(&["Quit"])));

    let titles: Vec<String> = registry
        .all_commands("")
        .iter()
        .map(|c| c.title().to_string())
        .collect();
    assert_eq!(registry.source_count(), 2);
    assert_eq!(titles, vec!["Save Scene", "Load Scene", "Quit"]);
}

#[test]
fn invalid_commands_are_filtered_out() {
    let alive = Arc::new(AtomicBool::new(true));
    let mut source = menu(&["Keep"]);
    source.push(Arc::new(ToggleCommand {
        title: "Doomed".to_string(),
        alive: alive.clone(),
    }));
    let registry = CommandRegistry::new().with_source(Box::new(source));

    assert_eq!(registry.all_commands("").len(), 2);
    alive.store(false, Ordering::SeqCst);
    let remaining = registry.all_commands("");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title(), "Keep");
}

#[test]
fn sources_are_queried_live_every_time() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(CountingSource {
        calls: calls.clone(),
    }));

    assert_eq!(registry.all_commands("").len(), 1);
    assert_eq!(registry.all_commands("").len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_source_does_not_hide_others() {
    let registry = CommandRegistry::new()
        .with_source(Box::new(FailingSource))
        .with_source(Box::new(menu(&["Quit"])));

    let commands = registry.all_commands("q");
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].title(), "Quit");
}

#[test]
fn sorted_by_match_ranks_best_first() {
    let registry =
        CommandRegistry::new().with_source(Box::new(menu(&["Load Scene", "Save Scene"])));

    let ranked = registry.sorted_by_match("save");
    assert_eq!(ranked[0].command.title(), "Save Scene");
    assert_eq!(
        ranked[0].score,
        registry.score_for(ranked[0].command.as_ref(), "save")
    );
}
