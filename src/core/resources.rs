use std::fs;
use std::path::Path;

use anyhow::Context;
use bevy::prelude::*;
use serde_derive::Deserialize;

/// 默认背包承重（与旧版存档保持一致）
pub const DEFAULT_MAX_WEIGHT: u32 = 1000;
/// 默认物品表路径（相对 assets/）
pub const DEFAULT_ITEMS_PATH: &str = "data/items.ron";

/// 全局配置，来自 assets/config.toml
#[derive(Resource, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub inventory: InventoryConfig,
    pub data: DataConfig,
    pub player: PlayerConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    pub max_weight: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub items: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub level: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS_PATH.to_string(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Trailblazer".to_string(),
            level: 1,
        }
    }
}

impl GameConfig {
    /// 解析 TOML 文本
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid config.toml")
    }

    /// 读取配置文件；文件不存在时退回默认值
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("配置文件 {} 不存在，使用默认配置", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}
