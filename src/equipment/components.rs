use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde_derive::{Deserialize, Serialize};

use crate::character::components::CharacterId;
use crate::items::{Item, ItemId};

/// 每个角色最多同时装备的件数
pub const MAX_EQUIPPED: usize = 4;

/// 已装备的实例，记录它离开背包前的位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedEntry {
    pub owner: CharacterId,
    pub item: Item,
    pub origin: usize,
}

/// 角色 → 已装备物品 ID（有序，每槽一件）；实例本身存放在按 ID 索引的表中。
/// 同一实例不会同时出现在背包和这里
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedItems {
    by_character: BTreeMap<CharacterId, Vec<ItemId>>,
    table: BTreeMap<ItemId, EquippedEntry>,
}

impl EquippedItems {
    pub fn count(&self, character: CharacterId) -> usize {
        self.by_character.get(&character).map_or(0, Vec::len)
    }

    /// 按装备顺序列出
    pub fn equipped(&self, character: CharacterId) -> Vec<&Item> {
        self.by_character
            .get(&character)
            .into_iter()
            .flatten()
            .filter_map(|id| self.table.get(id))
            .map(|entry| &entry.item)
            .collect()
    }

    pub fn in_slot(&self, character: CharacterId, slot: &str) -> Option<&Item> {
        self.equipped(character).into_iter().find(|item| {
            item.as_equipment()
                .is_some_and(|data| data.slot == slot)
        })
    }

    pub fn is_equipped_by(&self, character: CharacterId, item: ItemId) -> bool {
        self.table
            .get(&item)
            .is_some_and(|entry| entry.owner == character)
    }

    pub fn get(&self, item: ItemId) -> Option<&EquippedEntry> {
        self.table.get(&item)
    }

    /// 装备了该物品的角色
    pub fn owners_of(&self, item: ItemId) -> Vec<CharacterId> {
        self.by_character
            .iter()
            .filter(|(_, ids)| ids.contains(&item))
            .map(|(owner, _)| *owner)
            .collect()
    }

    pub fn characters(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.by_character
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(owner, _)| *owner)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 登记一件装备。ID 已被登记时原样退回，不覆盖别人的实例
    pub(crate) fn bind(&mut self, owner: CharacterId, item: Item, origin: usize) -> Result<(), Item> {
        let id = item.id;
        match self.table.entry(id) {
            Entry::Occupied(_) => Err(item),
            Entry::Vacant(slot) => {
                slot.insert(EquippedEntry { owner, item, origin });
                self.by_character.entry(owner).or_default().push(id);
                Ok(())
            }
        }
    }

    pub(crate) fn unbind(&mut self, owner: CharacterId, item: ItemId) -> Option<EquippedEntry> {
        if !self.is_equipped_by(owner, item) {
            return None;
        }
        if let Some(ids) = self.by_character.get_mut(&owner) {
            ids.retain(|id| *id != item);
            if ids.is_empty() {
                self.by_character.remove(&owner);
            }
        }
        self.table.remove(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::EquipmentData;

    fn gear(id: u32, slot: &str) -> Item {
        Item::equipment(id, format!("gear-{id}"), EquipmentData::new(slot, 1))
    }

    #[test]
    fn bind_and_unbind_keep_order() {
        let kafka = CharacterId::fresh("Kafka");
        let mut equipped = EquippedItems::default();
        equipped.bind(kafka, gear(1, "weapon"), 0).unwrap();
        equipped.bind(kafka, gear(2, "head"), 3).unwrap();
        equipped.bind(kafka, gear(3, "body"), 1).unwrap();

        let ids: Vec<u32> = equipped.equipped(kafka).iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(equipped.in_slot(kafka, "head").map(|i| i.id), Some(ItemId(2)));

        let entry = equipped.unbind(kafka, ItemId(2)).unwrap();
        assert_eq!(entry.origin, 3);
        assert_eq!(equipped.count(kafka), 2);
        assert!(equipped.in_slot(kafka, "head").is_none());
    }

    #[test]
    fn unbind_checks_owner() {
        let kafka = CharacterId::fresh("Kafka");
        let blade = CharacterId::fresh("Blade");
        let mut equipped = EquippedItems::default();
        equipped.bind(kafka, gear(7, "weapon"), 0).unwrap();

        assert!(equipped.unbind(blade, ItemId(7)).is_none());
        assert_eq!(equipped.owners_of(ItemId(7)), vec![kafka]);
        assert!(equipped.unbind(kafka, ItemId(7)).is_some());
        assert!(equipped.is_empty());
        assert_eq!(equipped.characters().count(), 0);
    }

    #[test]
    fn bound_id_is_not_overwritten() {
        let kafka = CharacterId::fresh("Kafka");
        let blade = CharacterId::fresh("Blade");
        let mut equipped = EquippedItems::default();
        equipped.bind(kafka, gear(1, "weapon"), 0).unwrap();

        let rejected = equipped.bind(blade, gear(1, "head"), 2).unwrap_err();
        assert_eq!(rejected.name, "gear-1");
        assert_eq!(equipped.owners_of(ItemId(1)), vec![kafka]);
        assert_eq!(equipped.get(ItemId(1)).map(|e| e.owner), Some(kafka));
        assert_eq!(equipped.count(blade), 0);
    }
}
