use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

pub const STAT_ATTACK: &str = "attack";
pub const STAT_DEFENSE: &str = "defense";
pub const STAT_HP: &str = "hp";

/// 装备专有数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentData {
    pub slot: String,
    pub required_level: u32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub base_hp: i32,
    /// 由 calculate_stats 派生，不参与存档校验
    #[serde(default)]
    pub stats: BTreeMap<String, i32>,
}

impl EquipmentData {
    pub fn new(slot: impl Into<String>, required_level: u32) -> Self {
        Self {
            slot: slot.into(),
            required_level,
            base_attack: 0,
            base_defense: 0,
            base_hp: 0,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stats(mut self, attack: i32, defense: i32, hp: i32) -> Self {
        self.base_attack = attack;
        self.base_defense = defense;
        self.base_hp = hp;
        self
    }

    /// 重新计算属性表
    pub fn calculate_stats(&mut self) -> &BTreeMap<String, i32> {
        self.stats.clear();
        self.stats.insert(STAT_ATTACK.to_string(), self.base_attack);
        self.stats.insert(STAT_DEFENSE.to_string(), self.base_defense);
        self.stats.insert(STAT_HP.to_string(), self.base_hp);
        &self.stats
    }

    /// 未计算过的属性按 0 处理
    pub fn stat(&self, name: &str) -> i32 {
        self.stats.get(name).copied().unwrap_or(0)
    }

    pub fn bonus(&self) -> StatBonus {
        StatBonus {
            attack: self.stat(STAT_ATTACK),
            defense: self.stat(STAT_DEFENSE),
            hp: self.stat(STAT_HP),
        }
    }
}

/// 穿脱装备时施加到角色上的加成
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatBonus {
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
}
