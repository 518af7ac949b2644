//! 回合制 RPG 的背包 / 装备引擎。
//!
//! - `items`：物品模型（基础物品、材料、装备）
//! - `algorithms`：四种排序与三种查找
//! - `inventory`：按重量限容的背包，堆叠合并、导出与统计
//! - `equipment`：角色装备表与穿戴规则
//! - 其余模块是 Bevy 宿主：配置、物品表加载、角色、调试命令行

pub mod algorithms;
pub mod character;
pub mod core;
pub mod data;
pub mod equipment;
pub mod interface;
pub mod inventory;
pub mod items;

pub use crate::core::error::{InventoryError, InventoryResult};
pub use character::components::{Character, CharacterId};
pub use inventory::components::{AddOutcome, Inventory, InventoryStatistics, ItemRef};
pub use inventory::snapshot::InventorySnapshot;
pub use items::{EquipmentData, Item, ItemId, ItemKind};
