//! 穿戴规则：等级门槛、槽位唯一、件数上限。
//! 物品在背包与装备表之间转移所有权，永远不会同时存在于两边

use bevy::prelude::*;

use super::components::MAX_EQUIPPED;
use crate::character::components::Character;
use crate::core::error::{InventoryError, InventoryResult};
use crate::inventory::components::Inventory;
use crate::items::{Item, ItemId, StatBonus};

impl Inventory {
    /// 为角色装备物品。按顺序检查，第一个不满足的条件即为错误
    pub fn equip(&mut self, character: &mut Character, equipment: &Item) -> InventoryResult<()> {
        let Some(data) = equipment.as_equipment() else {
            return Err(InventoryError::InvalidArgument(format!(
                "{} is not equipment",
                equipment.name
            )));
        };
        if data.slot.is_empty() || character.name.is_empty() {
            return Err(InventoryError::InvalidArgument(
                "character and slot must be named".to_string(),
            ));
        }

        if character.level() < data.required_level {
            return Err(InventoryError::LevelTooLow {
                character: character.name.clone(),
                item: equipment.name.clone(),
                level: character.level(),
                required: data.required_level,
            });
        }

        let Some(index) = self.position_of(equipment.id) else {
            return Err(InventoryError::NotInInventory(equipment.id));
        };
        // 恢复的快照里可能已有同 ID 的装备，不动别人的
        if self.equipped.get(equipment.id).is_some() {
            return Err(InventoryError::InvalidArgument(format!(
                "item {} is already equipped",
                equipment.id
            )));
        }
        // 以背包里的实例为准
        let Some(slot) = self.items[index]
            .as_equipment()
            .map(|owned| owned.slot.clone())
        else {
            return Err(InventoryError::InvalidArgument(format!(
                "{} is not equipment",
                equipment.id
            )));
        };

        if self.equipped.count(character.id) >= MAX_EQUIPPED {
            return Err(InventoryError::SlotsFull(character.name.clone()));
        }

        if let Some(occupant) = self.equipped.in_slot(character.id, &slot) {
            return Err(InventoryError::SlotOccupied {
                slot,
                occupant: occupant.name.clone(),
            });
        }

        let mut item = self.detach(index);
        let bonus = item
            .as_equipment_mut()
            .map(|data| {
                data.calculate_stats();
                data.bonus()
            })
            .unwrap_or_default();
        let name = item.name.clone();
        if let Err(item) = self.equipped.bind(character.id, item, index) {
            self.current_weight += item.weight;
            self.items.insert(index, item);
            return Err(InventoryError::InvalidArgument(format!(
                "item {} is already equipped",
                equipment.id
            )));
        }
        info!("{} 装备了 {name} 在 {slot} 槽位", character.name);
        character.apply_equipment(&bonus);
        Ok(())
    }

    /// 卸下装备并放回背包（尽量回到原位）。背包放不下时失败，装备保持不动
    pub fn unequip(&mut self, character: &mut Character, item: ItemId) -> InventoryResult<()> {
        let Some(entry) = self
            .equipped
            .get(item)
            .filter(|entry| entry.owner == character.id)
        else {
            return Err(InventoryError::NotEquipped {
                character: character.name.clone(),
                item,
            });
        };

        let returned = entry.item.clone();
        let origin = entry.origin;
        let bonus = returned
            .as_equipment()
            .map(|data| data.bonus())
            .unwrap_or_default();

        self.insert_at(returned, Some(origin))?;
        if let Some(entry) = self.equipped.unbind(character.id, item) {
            info!("{} 卸下了 {}", character.name, entry.item.name);
        }
        character.remove_equipment(&bonus);
        Ok(())
    }

    /// 卸下指定槽位的装备，返回被卸下的物品 ID
    pub fn unequip_slot(&mut self, character: &mut Character, slot: &str) -> InventoryResult<ItemId> {
        let Some(id) = self
            .equipped
            .in_slot(character.id, slot)
            .map(|item| item.id)
        else {
            return Err(InventoryError::SlotEmpty(slot.to_string()));
        };
        self.unequip(character, id)?;
        Ok(id)
    }

    /// 角色当前装备（按装备顺序）
    pub fn equipped(&self, character: &Character) -> Vec<&Item> {
        self.equipped.equipped(character.id)
    }

    pub fn equipped_in_slot(&self, character: &Character, slot: &str) -> Option<&Item> {
        self.equipped.in_slot(character.id, slot)
    }

    /// 角色身上全部装备的加成之和
    pub fn equipment_bonus(&self, character: &Character) -> StatBonus {
        self.equipped(character)
            .into_iter()
            .filter_map(Item::as_equipment)
            .map(|data| data.bonus())
            .fold(StatBonus::default(), |acc, b| StatBonus {
                attack: acc.attack + b.attack,
                defense: acc.defense + b.defense,
                hp: acc.hp + b.hp,
            })
    }
}
