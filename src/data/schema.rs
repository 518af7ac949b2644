use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;

use crate::items::{EquipmentData, Item};

/// 物品表条目（静态数据），通过 instantiate 生成带 ID 的运行时实例
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub stackable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub enum EntryKind {
    Basic,
    Material {
        material_type: String,
        rarity: u8,
    },
    Equipment {
        slot: String,
        required_level: u32,
        #[serde(default)]
        atk: i32,
        #[serde(default)]
        def: i32,
        #[serde(default)]
        hp: i32,
    },
}

fn default_weight() -> u32 {
    1
}

impl ItemEntry {
    pub fn instantiate(&self, id: u32) -> Item {
        let item = match &self.kind {
            EntryKind::Basic => Item::basic(id, &self.name, "misc"),
            EntryKind::Material {
                material_type,
                rarity,
            } => Item::material(id, &self.name, material_type, *rarity, self.value),
            EntryKind::Equipment {
                slot,
                required_level,
                atk,
                def,
                hp,
            } => Item::equipment(
                id,
                &self.name,
                EquipmentData::new(slot, *required_level).with_stats(*atk, *def, *hp),
            ),
        };
        let mut item = item.with_weight(self.weight).with_value(self.value);
        if let Some(item_type) = &self.item_type {
            item = item.with_type(item_type);
        }
        if let Some(stackable) = self.stackable {
            item = item.stackable(stackable);
        }
        item
    }

    /// 按 id / 名称 / v5 UUID 匹配，忽略大小写
    pub fn matches_token(&self, token: &str) -> bool {
        self.id.eq_ignore_ascii_case(token)
            || self.name.eq_ignore_ascii_case(token)
            || super::uuid_from_id(&self.id).to_string() == token.to_lowercase()
    }
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}

impl ItemList {
    pub fn find(&self, token: &str) -> Option<&ItemEntry> {
        self.items.iter().find(|entry| entry.matches_token(token))
    }
}
