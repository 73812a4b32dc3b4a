use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use anyhow::Result;

/// Opaque icon handle. The host decides what the key refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(String);

impl Icon {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Something the palette can list and execute.
pub trait Command: Send + Sync {
    fn title(&self) -> &str;
    fn subtitle(&self) -> &str;

    fn icon(&self) -> Option<&Icon> {
        None
    }

    /// Becomes false once the command's target is gone.
    fn is_valid(&self) -> bool {
        true
    }

    fn execute(&self) -> Result<()>;

    /// Commands that take `;`-separated arguments expose them here.
    fn arguments(&self) -> Option<&dyn AcceptsArguments> {
        None
    }
}

pub trait AcceptsArguments {
    fn execute_with_arguments(&self, arguments: &[String]) -> Result<()>;
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("title", &self.title())
            .field("subtitle", &self.subtitle())
            .field("valid", &self.is_valid())
            .finish()
    }
}

type Action = Box<dyn Fn() -> Result<()> + Send + Sync>;
type ArgumentAction = Box<dyn Fn(&[String]) -> Result<()> + Send + Sync>;

/// A plain editor menu method.
pub struct MenuCommand {
    title: String,
    subtitle: String,
    icon: Option<Icon>,
    action: Action,
}

impl MenuCommand {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        action: impl Fn() -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon: None,
            action: Box::new(action),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl Command for MenuCommand {
    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn execute(&self) -> Result<()> {
        (self.action)()
    }
}

/// A menu method that also accepts arguments typed after `;`.
pub struct ArgumentCommand {
    title: String,
    subtitle: String,
    icon: Option<Icon>,
    action: ArgumentAction,
}

impl ArgumentCommand {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        action: impl Fn(&[String]) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon: None,
            action: Box::new(action),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl Command for ArgumentCommand {
    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn execute(&self) -> Result<()> {
        (self.action)(&[])
    }

    fn arguments(&self) -> Option<&dyn AcceptsArguments> {
        Some(self)
    }
}

impl AcceptsArguments for ArgumentCommand {
    fn execute_with_arguments(&self, arguments: &[String]) -> Result<()> {
        (self.action)(arguments)
    }
}

/// A live object in the editor's scene hierarchy.
pub trait SceneObject: Send + Sync {
    fn name(&self) -> &str;
    fn hierarchy_path(&self) -> String;
}

/// Targets a scene object without keeping it alive.
pub struct SceneObjectCommand<T: SceneObject> {
    title: String,
    subtitle: String,
    icon: Option<Icon>,
    target: Weak<T>,
    action: Box<dyn Fn(&T) -> Result<()> + Send + Sync>,
}

impl<T: SceneObject> SceneObjectCommand<T> {
    pub fn new(
        target: &Arc<T>,
        action: impl Fn(&T) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: target.name().to_string(),
            subtitle: target.hierarchy_path(),
            icon: None,
            target: Arc::downgrade(target),
            action: Box::new(action),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl<T: SceneObject> Command for SceneObjectCommand<T> {
    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn is_valid(&self) -> bool {
        self.target.strong_count() > 0
    }

    fn execute(&self) -> Result<()> {
        match self.target.upgrade() {
            Some(target) => (self.action)(&target),
            None => Err(anyhow::anyhow!(
                "scene object '{}' no longer exists",
                self.title
            )),
        }
    }
}

/// A prefab asset identified by its path.
pub struct PrefabAssetCommand {
    title: String,
    subtitle: String,
    icon: Option<Icon>,
    path: PathBuf,
    action: Box<dyn Fn(&Path) -> Result<()> + Send + Sync>,
}

impl PrefabAssetCommand {
    pub fn new(
        path: impl Into<PathBuf>,
        action: impl Fn(&Path) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        let path = path.into();
        Self {
            title: asset_title(&path),
            subtitle: path.display().to_string(),
            icon: None,
            path,
            action: Box::new(action),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Command for PrefabAssetCommand {
    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn execute(&self) -> Result<()> {
        (self.action)(&self.path)
    }
}

/// A scene asset on disk. Executing it opens the scene in the editor.
pub struct SceneAssetCommand {
    title: String,
    subtitle: String,
    icon: Option<Icon>,
    path: PathBuf,
    action: Box<dyn Fn(&Path) -> Result<()> + Send + Sync>,
}

impl SceneAssetCommand {
    pub fn new(
        path: impl Into<PathBuf>,
        action: impl Fn(&Path) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        let path = path.into();
        Self {
            title: asset_title(&path),
            subtitle: path.display().to_string(),
            icon: None,
            path,
            action: Box::new(action),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Command for SceneAssetCommand {
    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn execute(&self) -> Result<()> {
        (self.action)(&self.path)
    }
}

fn asset_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
