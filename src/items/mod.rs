//! 物品模型：基础物品、材料、装备

pub mod equipment;
pub mod model;

pub use equipment::{EquipmentData, StatBonus};
pub use model::{Item, ItemId, ItemKind};
