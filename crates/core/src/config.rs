//! Asset type table and run configuration.
//!
//! Every recognized extension maps to exactly one [`AssetGroup`], which names
//! the MGCB importer, processor and processor parameters used for files of
//! that type. The built-in groups cover textures and sound effects; a JSON
//! file can replace them.

use crate::error::{MgcbError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_MGCB_FILE: &str = "content.mgcb";

static STANDARD_TABLE: Lazy<AssetTypeTable> =
    Lazy::new(|| AssetTypeTable::build(default_groups()));

/// A single `/processorParam:<key>=<value>` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorParam {
    pub key: String,
    pub value: String,
}

impl ProcessorParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A family of extensions sharing one importer/processor setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroup {
    pub name: String,
    pub extensions: Vec<String>,
    pub importer: String,
    pub processor: String,
    #[serde(default)]
    pub params: Vec<ProcessorParam>,
    /// Files of this group are only picked up below this relative prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_prefix: Option<String>,
}

impl AssetGroup {
    /// Whether an asset identifier passes this group's directory rule.
    pub fn accepts(&self, asset: &str) -> bool {
        match &self.required_prefix {
            Some(prefix) => asset.starts_with(prefix.as_str()),
            None => true,
        }
    }
}

pub fn default_groups() -> Vec<AssetGroup> {
    vec![
        AssetGroup {
            name: "image".to_string(),
            extensions: vec![".png".into(), ".jpg".into(), ".jpeg".into()],
            importer: "TextureImporter".to_string(),
            processor: "TextureProcessor".to_string(),
            params: vec![
                ProcessorParam::new("ColorKeyColor", "255,0,255,255"),
                ProcessorParam::new("ColorKeyEnabled", "False"),
                ProcessorParam::new("GenerateMipmaps", "False"),
                ProcessorParam::new("PremultiplyAlpha", "True"),
                ProcessorParam::new("ResizeToPowerOfTwo", "False"),
                ProcessorParam::new("MakeSquare", "False"),
                ProcessorParam::new("TextureFormat", "Color"),
            ],
            required_prefix: None,
        },
        AssetGroup {
            name: "sound".to_string(),
            extensions: vec![".wav".into()],
            importer: "WavImporter".to_string(),
            processor: "SoundEffectProcessor".to_string(),
            params: vec![ProcessorParam::new("Quality", "Best")],
            required_prefix: Some("sounds/sfx/".to_string()),
        },
    ]
}

/// Lowercased extension of an asset identifier, leading dot included.
///
/// Dotfiles such as `.png` have no extension.
pub fn extension_of(asset: &str) -> Option<String> {
    Path::new(asset)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Immutable lookup from extension to asset group.
#[derive(Debug, Clone)]
pub struct AssetTypeTable {
    groups: Vec<AssetGroup>,
    by_extension: HashMap<String, usize>,
}

impl AssetTypeTable {
    /// The built-in image and sound table, constructed once per process.
    pub fn standard() -> &'static AssetTypeTable {
        &STANDARD_TABLE
    }

    /// Build a table from user supplied groups, rejecting ambiguous setups.
    pub fn from_groups(groups: Vec<AssetGroup>) -> Result<Self> {
        {
            let mut seen: HashMap<String, &str> = HashMap::new();
            for group in &groups {
                if group.importer.trim().is_empty() || group.processor.trim().is_empty() {
                    return Err(MgcbError::Config(format!(
                        "group '{}' needs both an importer and a processor",
                        group.name
                    )));
                }
                for ext in &group.extensions {
                    if !ext.starts_with('.') || ext.len() < 2 {
                        return Err(MgcbError::Config(format!(
                            "extension '{}' in group '{}' must look like '.ext'",
                            ext, group.name
                        )));
                    }
                    if let Some(other) = seen.insert(ext.to_lowercase(), &group.name) {
                        return Err(MgcbError::Config(format!(
                            "extension '{}' is claimed by both '{}' and '{}'",
                            ext, other, group.name
                        )));
                    }
                }
            }
        }
        Ok(Self::build(groups))
    }

    fn build(groups: Vec<AssetGroup>) -> Self {
        let mut by_extension = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for ext in &group.extensions {
                by_extension.insert(ext.to_lowercase(), idx);
            }
        }
        Self {
            groups,
            by_extension,
        }
    }

    /// Look up a group by extension (`.png`, case-insensitive).
    pub fn get(&self, extension: &str) -> Option<&AssetGroup> {
        self.by_extension
            .get(&extension.to_lowercase())
            .map(|&idx| &self.groups[idx])
    }

    /// Look up the group an asset identifier belongs to.
    pub fn group_for(&self, asset: &str) -> Option<&AssetGroup> {
        extension_of(asset).and_then(|ext| self.get(&ext))
    }

    pub fn groups(&self) -> &[AssetGroup] {
        &self.groups
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.by_extension.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

/// Pick the default content root: `./content` when present, otherwise a
/// `content` directory beside the executable, otherwise `./content` again.
pub fn locate_content_dir(cwd: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if cwd.join(DEFAULT_CONTENT_DIR).is_dir() {
        return PathBuf::from(DEFAULT_CONTENT_DIR);
    }
    exe_dir
        .map(|dir| dir.join(DEFAULT_CONTENT_DIR))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR))
}

pub fn default_content_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_default();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    locate_content_dir(&cwd, exe_dir.as_deref())
}

/// Settings for one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Root of the asset tree; identifiers are relative to it.
    pub content_dir: PathBuf,
    /// Defaults to `content.mgcb` inside `content_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mgcb_file: Option<PathBuf>,
    pub groups: Vec<AssetGroup>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            mgcb_file: None,
            groups: default_groups(),
        }
    }
}

impl SyncConfig {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Relative paths inside it resolve against the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MgcbError::io(path, e))?;
        let mut config: SyncConfig = serde_json::from_str(&text)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        if config.content_dir.is_relative() {
            config.content_dir = base.join(&config.content_dir);
        }
        if let Some(mgcb) = config.mgcb_file.as_mut() {
            if mgcb.is_relative() {
                *mgcb = base.join(&*mgcb);
            }
        }

        tracing::debug!(
            "Loaded config from {} ({} groups)",
            path.display(),
            config.groups.len()
        );
        Ok(config)
    }

    pub fn with_mgcb_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mgcb_file = Some(path.into());
        self
    }

    pub fn mgcb_path(&self) -> PathBuf {
        self.mgcb_file
            .clone()
            .unwrap_or_else(|| self.content_dir.join(DEFAULT_MGCB_FILE))
    }

    pub fn table(&self) -> Result<AssetTypeTable> {
        AssetTypeTable::from_groups(self.groups.clone())
    }
}
