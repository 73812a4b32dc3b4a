use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use cmdpal::domain::command::{ArgumentCommand, Command, MenuCommand};
use cmdpal::domain::scheduler::{DeferredQueue, DispatchMode, PendingExecution};

fn recording(title: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Command> {
    let log = log.clone();
    let name = title.to_string();
    Arc::new(MenuCommand::new(title, "", move || {
        log.lock().expect("lock log").push(name.clone());
        Ok(())
    }))
}

#[test]
fn run_pending_drains_in_push_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut queue = DeferredQueue::new();
    queue.push(PendingExecution::new(recording("First", &log), None));
    queue.push(PendingExecution::new(recording("Second", &log), None));
    queue.push(PendingExecution::new(recording("Third", &log), None));
    assert_eq!(queue.len(), 3);

    let outcomes = queue.run_pending();
    let titles: Vec<&str> = outcomes.iter().map(|(title, _)| title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(
        *log.lock().expect("lock log"),
        vec!["First", "Second", "Third"]
    );
    assert!(queue.is_empty());
    assert!(queue.run_pending().is_empty());
}

#[test]
fn a_failing_task_does_not_stop_the_rest() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut queue = DeferredQueue::new();
    queue.push(PendingExecution::new(
        Arc::new(MenuCommand::new("Broken", "", || Err(anyhow!("boom")))),
        None,
    ));
    queue.push(PendingExecution::new(recording("After", &log), None));

    let outcomes = queue.run_pending();
    assert_eq!(outcomes.len(), 2);
    let err = outcomes[0].1.as_ref().expect_err("first task fails");
    assert_eq!(err.to_string(), "boom");
    assert_eq!(
        *outcomes[1].1.as_ref().expect("second task runs"),
        DispatchMode::Plain
    );
    assert_eq!(*log.lock().expect("lock log"), vec!["After"]);
}

#[test]
fn dispatch_mode_follows_arguments_and_capability() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let with_args: Arc<dyn Command> = Arc::new(ArgumentCommand::new(
        "Create Empty",
        "",
        move |args: &[String]| {
            sink.lock().expect("lock received").push(args.to_vec());
            Ok(())
        },
    ));
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut queue = DeferredQueue::new();
    queue.push(PendingExecution::new(
        with_args.clone(),
        Some(vec!["Boss".to_string()]),
    ));
    queue.push(PendingExecution::new(with_args, None));
    queue.push(PendingExecution::new(
        recording("Quit", &log),
        Some(vec!["now".to_string()]),
    ));

    let modes: Vec<DispatchMode> = queue
        .run_pending()
        .into_iter()
        .map(|(_, outcome)| outcome.expect("task succeeds"))
        .collect();
    assert_eq!(
        modes,
        vec![
            DispatchMode::WithArguments,
            DispatchMode::Plain,
            DispatchMode::FallbackWithoutArguments,
        ]
    );
    assert_eq!(
        *received.lock().expect("lock received"),
        vec![vec!["Boss".to_string()], Vec::<String>::new()]
    );
    assert_eq!(*log.lock().expect("lock log"), vec!["Quit"]);
}
