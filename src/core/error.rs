use thiserror::Error;

use crate::items::ItemId;

/// 背包 / 装备操作的可恢复错误，失败时状态不变
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("capacity exceeded: {current} + {incoming} > {max}")]
    CapacityExceeded { current: u32, incoming: u32, max: u32 },
    #[error("item not found: {0}")]
    ItemNotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{character} is level {level}, {item} requires level {required}")]
    LevelTooLow {
        character: String,
        item: String,
        level: u32,
        required: u32,
    },
    #[error("item {0} is not in the inventory")]
    NotInInventory(ItemId),
    #[error("{0} has no free equipment slots")]
    SlotsFull(String),
    #[error("slot {slot} is already occupied by {occupant}")]
    SlotOccupied { slot: String, occupant: String },
    #[error("item {item} is not equipped by {character}")]
    NotEquipped { character: String, item: ItemId },
    #[error("slot {0} is empty")]
    SlotEmpty(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;
