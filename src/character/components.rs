use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy::prelude::*;
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

use crate::items::StatBonus;

static NEXT_CHARACTER: AtomicU64 = AtomicU64::new(1);

/// 角色 ID：每个角色实例一个。名字只用于显示，同名角色也是不同的 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// 进程内序号 + 名字生成 v5 UUID，每次调用都不同
    pub fn fresh(name: &str) -> Self {
        let serial = NEXT_CHARACTER.fetch_add(1, Ordering::Relaxed);
        let mut seed = serial.to_le_bytes().to_vec();
        seed.extend_from_slice(name.as_bytes());
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed))
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 角色属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub atk: i32,
    pub def: i32,
    pub lv: u32,
    pub exp: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hp: 20,
            max_hp: 20,
            atk: 2,
            def: 1,
            lv: 1,
            exp: 0,
        }
    }
}

impl Stats {
    /// 计算升级所需经验：exp_to_next = 10 × lv²
    pub fn exp_to_next(&self) -> u32 {
        self.lv.saturating_mul(self.lv).saturating_mul(10)
    }

    pub fn can_level_up(&self) -> bool {
        self.exp >= self.exp_to_next()
    }

    /// 执行升级：+2 max_hp, +1 atk, +1 def，并回满血
    pub fn level_up(&mut self) {
        if self.can_level_up() {
            self.exp -= self.exp_to_next();
            self.lv += 1;
            self.max_hp += 2;
            self.atk += 1;
            self.def += 1;
            self.hp = self.max_hp;
        }
    }

    /// 获得经验，连续升级直到无法升级
    pub fn gain_exp(&mut self, amount: u32) {
        self.exp = self.exp.saturating_add(amount);
        while self.can_level_up() {
            self.level_up();
        }
    }
}

/// 持有装备的角色
#[derive(Component, Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub stats: Stats,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: CharacterId::fresh(&name),
            name,
            stats: Stats::default(),
        }
    }

    /// 从存档恢复时沿用原来的 ID，装备表才能对上
    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.stats.lv = level.max(1);
        self
    }

    pub fn level(&self) -> u32 {
        self.stats.lv
    }

    /// 穿上装备时的回调：叠加属性
    pub fn apply_equipment(&mut self, bonus: &StatBonus) {
        self.stats.atk += bonus.attack;
        self.stats.def += bonus.defense;
        self.stats.max_hp += bonus.hp;
        self.stats.hp += bonus.hp;
    }

    /// 卸下装备时的回调：扣回属性，当前血量落在 1..=上限
    pub fn remove_equipment(&mut self, bonus: &StatBonus) {
        self.stats.atk -= bonus.attack;
        self.stats.def -= bonus.defense;
        self.stats.max_hp -= bonus.hp;
        self.stats.hp = (self.stats.hp - bonus.hp).min(self.stats.max_hp).max(1);
    }
}

/// 玩家标记组件
#[derive(Component)]
pub struct Player;
