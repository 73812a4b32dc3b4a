use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use crate::domain::command::{ArgumentCommand, Icon, MenuCommand};
use crate::domain::host::{ChannelHost, HostRequest};
use crate::domain::registry::CommandRegistry;
use crate::domain::scheduler::{DeferredQueue, DispatchMode};
use crate::domain::session::PaletteSession;
use crate::domain::view::PaletteSettings;
use crate::integrations::manifest_source::{ManifestSource, SceneAssetSource};
use crate::logging;
use crate::integrations::menu_source::StaticSource;
use crate::integrations::scene::{Scene, SceneEntity, SceneSource};
use crate::storage::config::RuntimeConfig;
use crate::ui::Tui;

const DEFAULT_ENTITY_NAME: &str = "GameObject";
const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    /// Scene objects and prefab assets.
    Open,
    /// Editor menu methods.
    Commands,
}

impl PaletteKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Open => "Open.. ",
            Self::Commands => "Command Palette.. ",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "commands" | "command-palette" => Ok(Self::Commands),
            _ => Err(anyhow!(
                "invalid palette '{value}' (expected open or commands)"
            )),
        }
    }
}

/// Things palette commands ask the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Select(u64),
    CreateEntity { name: String, parent: Option<String> },
    DeleteSelected,
    RenameSelected(String),
    InstantiatePrefab(PathBuf),
    OpenSceneAsset(PathBuf),
    ToggleDebugScores,
    OpenPalette(PaletteKind),
    ClearLog,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub settings: PaletteSettings,
    pub manifest_path: Option<PathBuf>,
    pub play_mode: bool,
}

/// A toy editor that hosts the palette: it owns the scene, the palette
/// window and the queue of executions deferred past window teardown.
pub struct App {
    pub running: bool,
    pub status_message: String,
    scene: Scene,
    selected_entity: Option<u64>,
    active_scene_asset: Option<PathBuf>,
    log: Vec<String>,
    settings: PaletteSettings,
    manifest_path: Option<PathBuf>,
    play_mode: bool,
    palette: Option<PaletteSession>,
    host_tx: Sender<HostRequest>,
    host_rx: Receiver<HostRequest>,
    action_tx: Sender<EditorAction>,
    action_rx: Receiver<EditorAction>,
    deferred: DeferredQueue,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        Self::new_with_scene(options, default_scene())
    }

    pub fn new_with_scene(options: AppOptions, scene: Scene) -> Self {
        let (host_tx, host_rx) = mpsc::channel();
        let (action_tx, action_rx) = mpsc::channel();

        Self {
            running: true,
            status_message: "Ready. Ctrl+P command palette, Ctrl+O open".to_string(),
            scene,
            selected_entity: None,
            active_scene_asset: None,
            log: Vec::new(),
            settings: options.settings,
            manifest_path: options.manifest_path,
            play_mode: options.play_mode,
            palette: None,
            host_tx,
            host_rx,
            action_tx,
            action_rx,
            deferred: DeferredQueue::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected_entity(&self) -> Option<u64> {
        self.selected_entity
    }

    /// The scene asset most recently opened from the Open palette.
    pub fn active_scene_asset(&self) -> Option<&Path> {
        self.active_scene_asset.as_deref()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    pub fn palette(&self) -> Option<&PaletteSession> {
        self.palette.as_ref()
    }

    pub fn palette_mut(&mut self) -> Option<&mut PaletteSession> {
        self.palette.as_mut()
    }

    pub fn pending_executions(&self) -> usize {
        self.deferred.len()
    }

    /// Opens a fresh palette session, closing any window already open.
    pub fn open_palette(&mut self, kind: PaletteKind) {
        if let Some(previous) = self.palette.as_mut() {
            previous.close();
        }
        self.pump_host_requests();

        let registry = self.registry_for(kind);
        let host = Box::new(ChannelHost::new(self.host_tx.clone()));
        self.palette = Some(PaletteSession::open(
            kind.title(),
            Some(registry),
            self.settings.clone(),
            host,
        ));
        self.status_message = kind.title().trim().to_string();
    }

    /// Applies window requests the palette made during the last event.
    pub fn pump_host_requests(&mut self) {
        while let Ok(request) = self.host_rx.try_recv() {
            match request {
                HostRequest::Close => {
                    self.palette = None;
                }
                HostRequest::Execute(task) => self.deferred.push(task),
            }
        }
    }

    /// One event-loop pass: runs executions deferred by earlier passes,
    /// then applies the editor actions they produced.
    pub fn tick(&mut self) {
        for (title, outcome) in self.deferred.run_pending() {
            match outcome {
                Ok(DispatchMode::FallbackWithoutArguments) => {
                    self.status_message =
                        format!("{title}: ignored arguments, command takes none");
                }
                Ok(_) => {
                    self.status_message = format!("Executed {title}");
                }
                Err(err) => {
                    warn!(command = %title, error = ?err, "command failed");
                    self.status_message = format!("Error: {err}");
                }
            }
        }

        while let Ok(action) = self.action_rx.try_recv() {
            if let Err(err) = self.apply_action(action) {
                self.status_message = format!("Error: {err}");
            }
        }
    }

    pub fn select_next_entity(&mut self) {
        self.step_entity_selection(1);
    }

    pub fn select_previous_entity(&mut self) {
        self.step_entity_selection(-1);
    }

    pub fn request_quit(&mut self) {
        if let Some(palette) = self.palette.as_mut() {
            palette.close();
        }
        self.running = false;
    }

    fn step_entity_selection(&mut self, delta: isize) {
        let entities = self.scene.entities();
        if entities.is_empty() {
            self.selected_entity = None;
            return;
        }

        let current = self
            .selected_entity
            .and_then(|id| entities.iter().position(|e| e.id == id));
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(entities.len() as isize) as usize,
            None => 0,
        };
        self.selected_entity = Some(entities[next].id);
    }

    fn apply_action(&mut self, action: EditorAction) -> Result<()> {
        match action {
            EditorAction::Select(id) => {
                let entity = self
                    .scene
                    .find(id)
                    .ok_or_else(|| anyhow!("entity {id} no longer exists"))?;
                self.selected_entity = Some(id);
                self.push_log(format!("Selected {}", entity.name));
            }
            EditorAction::CreateEntity { name, parent } => {
                let id = self.scene.spawn(name.clone(), parent);
                self.selected_entity = Some(id);
                self.push_log(format!("Created {name}"));
            }
            EditorAction::DeleteSelected => {
                let id = self
                    .selected_entity
                    .take()
                    .ok_or_else(|| anyhow!("no entity selected"))?;
                if let Some(entity) = self.scene.remove(id) {
                    self.push_log(format!("Deleted {}", entity.name));
                }
            }
            EditorAction::RenameSelected(name) => {
                let id = self
                    .selected_entity
                    .ok_or_else(|| anyhow!("no entity selected"))?;
                let entity = self
                    .scene
                    .rename(id, name)
                    .ok_or_else(|| anyhow!("entity {id} no longer exists"))?;
                self.push_log(format!("Renamed to {}", entity.name));
            }
            EditorAction::InstantiatePrefab(path) => {
                let name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .ok_or_else(|| anyhow!("prefab path has no file name: {}", path.display()))?;
                let id = self.scene.spawn(name.clone(), None);
                self.selected_entity = Some(id);
                self.push_log(format!("Instantiated {}", path.display()));
            }
            EditorAction::OpenSceneAsset(path) => {
                self.push_log(format!("Opened scene {}", path.display()));
                self.active_scene_asset = Some(path);
            }
            EditorAction::ToggleDebugScores => {
                self.settings.debug_scores = !self.settings.debug_scores;
                self.push_log(format!(
                    "Score debugging {}",
                    if self.settings.debug_scores { "on" } else { "off" }
                ));
            }
            EditorAction::OpenPalette(kind) => self.open_palette(kind),
            EditorAction::ClearLog => self.log.clear(),
            EditorAction::Quit => {
                self.running = false;
                self.status_message = "Bye".to_string();
            }
        }

        Ok(())
    }

    fn push_log(&mut self, line: String) {
        debug!(%line, "editor");
        self.log.push(line);
        if self.log.len() > LOG_CAPACITY {
            let overflow = self.log.len() - LOG_CAPACITY;
            self.log.drain(..overflow);
        }
    }

    fn registry_for(&self, kind: PaletteKind) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        match kind {
            PaletteKind::Open => {
                if !self.play_mode {
                    if let Some(path) = &self.manifest_path {
                        let tx = self.action_tx.clone();
                        registry.register(Box::new(ManifestSource::new(path, move |p: &Path| {
                            send_action(&tx, EditorAction::InstantiatePrefab(p.to_path_buf()))
                        })));
                        let tx = self.action_tx.clone();
                        registry.register(Box::new(SceneAssetSource::new(path, move |p: &Path| {
                            send_action(&tx, EditorAction::OpenSceneAsset(p.to_path_buf()))
                        })));
                    }
                }
                let tx = self.action_tx.clone();
                registry.register(Box::new(SceneSource::new(
                    self.scene.clone(),
                    move |entity: &SceneEntity| send_action(&tx, EditorAction::Select(entity.id)),
                )));
            }
            PaletteKind::Commands => {
                registry.register(Box::new(menu_commands(&self.action_tx)));
            }
        }
        registry
    }
}

fn send_action(tx: &Sender<EditorAction>, action: EditorAction) -> Result<()> {
    tx.send(action)
        .map_err(|_| anyhow!("editor is no longer accepting actions"))
}

fn menu_commands(tx: &Sender<EditorAction>) -> StaticSource {
    let create = tx.clone();
    let delete = tx.clone();
    let rename = tx.clone();
    let debug = tx.clone();
    let open = tx.clone();
    let clear = tx.clone();
    let quit = tx.clone();

    StaticSource::new("menu")
        .with_command(
            ArgumentCommand::new("Create Empty", "GameObject/Create Empty", move |args| {
                let name = args
                    .first()
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_ENTITY_NAME.to_string());
                let parent = args.get(1).cloned();
                send_action(&create, EditorAction::CreateEntity { name, parent })
            })
            .with_icon(Icon::new("menu")),
        )
        .with_command(
            MenuCommand::new("Delete Selected", "Edit/Delete", move || {
                send_action(&delete, EditorAction::DeleteSelected)
            })
            .with_icon(Icon::new("menu")),
        )
        .with_command(
            ArgumentCommand::new("Rename Selected", "Edit/Rename", move |args| {
                if args.is_empty() {
                    return Err(anyhow!("usage: Rename Selected;<new name>"));
                }
                send_action(&rename, EditorAction::RenameSelected(args.join(" ")))
            })
            .with_icon(Icon::new("menu")),
        )
        .with_command(
            MenuCommand::new(
                "Toggle Score Debugging",
                "Window/Command Palette/Debug",
                move || send_action(&debug, EditorAction::ToggleDebugScores),
            )
            .with_icon(Icon::new("menu")),
        )
        .with_command(
            MenuCommand::new("Open..", "Window/Open..", move || {
                send_action(&open, EditorAction::OpenPalette(PaletteKind::Open))
            })
            .with_icon(Icon::new("menu")),
        )
        .with_command(
            MenuCommand::new("Clear Console", "Window/Console/Clear", move || {
                send_action(&clear, EditorAction::ClearLog)
            })
            .with_icon(Icon::new("menu")),
        )
        .with_command(
            MenuCommand::new("Quit", "File/Quit", move || {
                send_action(&quit, EditorAction::Quit)
            })
            .with_icon(Icon::new("menu")),
        )
}

fn default_scene() -> Scene {
    let scene = Scene::new();
    scene.spawn("Main Camera", None);
    scene.spawn("Directional Light", None);
    scene.spawn("Player", None);
    scene.spawn("PlayerCamera", Some("Player".to_string()));
    scene.spawn("Enemy Spawner", Some("Level".to_string()));
    scene
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub debug_scores: bool,
    pub play_mode: bool,
    pub initial_palette: Option<PaletteKind>,
}

pub fn run(options: RunOptions) -> Result<()> {
    logging::init().context("initialize logging")?;

    let config = match &options.config_path {
        Some(path) => RuntimeConfig::load_from_path(path),
        None => RuntimeConfig::load(),
    }
    .context("load runtime config")?;

    let mut settings = config.settings();
    settings.debug_scores |= options.debug_scores;

    let mut app = App::new(AppOptions {
        settings,
        manifest_path: options.manifest_path.or(config.palette.manifest),
        play_mode: options.play_mode,
    });
    if let Some(kind) = options.initial_palette {
        app.open_palette(kind);
    }

    let mut tui = Tui::new()?;
    if let Err(err) = tui.run(&mut app) {
        warn!(error = ?err, "tui exited with error");
        return Err(err);
    }

    Ok(())
}
