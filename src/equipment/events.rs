use bevy::prelude::*;

use crate::items::ItemId;

/// 玩家装备背包里的某件物品
#[derive(Event)]
pub struct EquipEvent {
    pub item: ItemId,
}

/// 卸下指定槽位
#[derive(Event)]
pub struct UnequipEvent {
    pub slot: String,   // weapon / head / body / accessory
}

#[derive(Event)]
pub struct ShowEquipmentEvent;
