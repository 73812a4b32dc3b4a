use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use crate::domain::command::{Command, Icon, SceneObject, SceneObjectCommand};
use crate::domain::registry::CommandSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEntity {
    pub id: u64,
    pub name: String,
    pub parent: Option<String>,
}

impl SceneObject for SceneEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn hierarchy_path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{parent}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct SceneInner {
    entities: Vec<Arc<SceneEntity>>,
    next_id: u64,
}

/// Shared handle to the live scene. The scene owns its entities; commands
/// only hold weak references to them.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    inner: Arc<Mutex<SceneInner>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, name: impl Into<String>, parent: Option<String>) -> u64 {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entities.push(Arc::new(SceneEntity {
            id,
            name: name.into(),
            parent,
        }));
        id
    }

    pub fn remove(&self, id: u64) -> Option<Arc<SceneEntity>> {
        let mut inner = self.lock();
        let idx = inner.entities.iter().position(|e| e.id == id)?;
        Some(inner.entities.remove(idx))
    }

    /// Entities are immutable, so a rename swaps in a fresh one under the
    /// same id. Commands that pointed at the old entity go stale.
    pub fn rename(&self, id: u64, name: impl Into<String>) -> Option<Arc<SceneEntity>> {
        let mut inner = self.lock();
        let slot = inner.entities.iter_mut().find(|e| e.id == id)?;
        let renamed = Arc::new(SceneEntity {
            id,
            name: name.into(),
            parent: slot.parent.clone(),
        });
        *slot = renamed.clone();
        Some(renamed)
    }

    pub fn find(&self, id: u64) -> Option<Arc<SceneEntity>> {
        self.lock().entities.iter().find(|e| e.id == id).cloned()
    }

    pub fn entities(&self) -> Vec<Arc<SceneEntity>> {
        self.lock().entities.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, SceneInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type EntityAction = Arc<dyn Fn(&SceneEntity) -> Result<()> + Send + Sync>;

/// One command per entity currently in the scene, rebuilt on every scan.
pub struct SceneSource {
    scene: Scene,
    on_select: EntityAction,
}

impl SceneSource {
    pub fn new(
        scene: Scene,
        on_select: impl Fn(&SceneEntity) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            scene,
            on_select: Arc::new(on_select),
        }
    }
}

impl CommandSource for SceneSource {
    fn name(&self) -> &str {
        "scene"
    }

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>> {
        let commands = self
            .scene
            .entities()
            .iter()
            .map(|entity| {
                let on_select = self.on_select.clone();
                let command = SceneObjectCommand::new(entity, move |e: &SceneEntity| on_select(e))
                    .with_icon(Icon::new("game-object"));
                Arc::new(command) as Arc<dyn Command>
            })
            .collect();
        Ok(commands)
    }
}
