use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::command::{Command, Icon, PrefabAssetCommand, SceneAssetCommand};
use crate::domain::registry::CommandSource;

const DEFAULT_PREFAB_ICON: &str = "prefab";
const SCENE_ASSET_ICON: &str = "scene";

/// Project assets the Open palette can list. A bare JSON array of paths
/// is read as a prefab-only manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetManifest {
    #[serde(default)]
    pub prefabs: Vec<PrefabEntry>,
    #[serde(default)]
    pub scenes: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrefabEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub icon: Option<String>,
}

type AssetAction = Arc<dyn Fn(&Path) -> Result<()> + Send + Sync>;

/// Prefab assets listed in a JSON asset manifest. The file is re-read on every
/// enumeration so edits show up the next time the palette reloads.
pub struct ManifestSource {
    path: PathBuf,
    on_instantiate: AssetAction,
}

impl ManifestSource {
    pub fn new(
        path: impl AsRef<Path>,
        on_instantiate: impl Fn(&Path) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            on_instantiate: Arc::new(on_instantiate),
        }
    }

    pub fn load(&self) -> Result<AssetManifest> {
        load_manifest(&self.path)
    }
}

/// Scene assets listed in the same manifest.
pub struct SceneAssetSource {
    path: PathBuf,
    on_open: AssetAction,
}

impl SceneAssetSource {
    pub fn new(
        path: impl AsRef<Path>,
        on_open: impl Fn(&Path) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            on_open: Arc::new(on_open),
        }
    }
}

pub fn load_manifest(path: &Path) -> Result<AssetManifest> {
    if !path.exists() {
        return Ok(AssetManifest::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read asset manifest: {}", path.display()))?;

    if let Ok(paths) = serde_json::from_str::<Vec<PathBuf>>(&content) {
        return Ok(AssetManifest {
            prefabs: paths
                .into_iter()
                .map(|path| PrefabEntry { path, icon: None })
                .collect(),
            scenes: Vec::new(),
        });
    }

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse asset manifest: {}", path.display()))
}

impl CommandSource for ManifestSource {
    fn name(&self) -> &str {
        "prefab-manifest"
    }

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>> {
        let manifest = self.load()?;
        let commands = manifest
            .prefabs
            .into_iter()
            .map(|entry| {
                let on_instantiate = self.on_instantiate.clone();
                let icon = entry.icon.as_deref().unwrap_or(DEFAULT_PREFAB_ICON);
                let command =
                    PrefabAssetCommand::new(entry.path, move |path: &Path| on_instantiate(path))
                        .with_icon(Icon::new(icon));
                Arc::new(command) as Arc<dyn Command>
            })
            .collect();
        Ok(commands)
    }
}

impl CommandSource for SceneAssetSource {
    fn name(&self) -> &str {
        "scene-assets"
    }

    fn enumerate(&self) -> Result<Vec<Arc<dyn Command>>> {
        let manifest = load_manifest(&self.path)?;
        let commands = manifest
            .scenes
            .into_iter()
            .map(|path| {
                let on_open = self.on_open.clone();
                let command = SceneAssetCommand::new(path, move |path: &Path| on_open(path))
                    .with_icon(Icon::new(SCENE_ASSET_ICON));
                Arc::new(command) as Arc<dyn Command>
            })
            .collect();
        Ok(commands)
    }
}
