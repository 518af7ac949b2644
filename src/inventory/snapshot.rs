use bevy::prelude::*;
use serde_derive::{Deserialize, Serialize};

use super::components::Inventory;
use crate::equipment::components::EquippedItems;
use crate::items::Item;

/// 交给存档层的完整快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub items: Vec<Item>,
    pub current_weight: u32,
    pub max_weight: u32,
    #[serde(default)]
    pub equipped: EquippedItems,
}

impl Inventory {
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.items.clone(),
            current_weight: self.current_weight,
            max_weight: self.max_weight,
            equipped: self.equipped.clone(),
        }
    }

    /// 原样恢复，不做校验；校验是存档层的事，这里只记一条警告
    pub fn restore(&mut self, snapshot: InventorySnapshot) {
        let sum: u32 = snapshot.items.iter().map(|item| item.weight).sum();
        if sum != snapshot.current_weight || snapshot.current_weight > snapshot.max_weight {
            warn!(
                "快照重量不一致: 记录 {} / 实际 {} / 上限 {}",
                snapshot.current_weight, sum, snapshot.max_weight
            );
        }
        self.items = snapshot.items;
        self.current_weight = snapshot.current_weight;
        self.max_weight = snapshot.max_weight;
        self.equipped = snapshot.equipped;
    }

    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        let mut inventory = Self::new(snapshot.max_weight);
        inventory.restore(snapshot);
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::components::Character;
    use crate::items::EquipmentData;

    #[test]
    fn snapshot_survives_json() {
        let mut inv = Inventory::new(200);
        inv.add_item(Item::material(1, "Ore", "metal", 3, 9)).unwrap();
        let blade = Item::equipment(2, "Blade", EquipmentData::new("weapon", 1).with_stats(9, 0, 0));
        inv.add_item(blade.clone()).unwrap();
        let mut hero = Character::new("Stelle");
        inv.equip(&mut hero, &blade).unwrap();

        let json = serde_json::to_string(&inv.snapshot()).unwrap();
        let restored = Inventory::from_snapshot(serde_json::from_str(&json).unwrap());

        assert_eq!(restored, inv);
        assert_eq!(
            restored.equipped_in_slot(&hero, "weapon").map(|i| i.id),
            Some(blade.id)
        );

        // 重建角色时沿用原 ID，同名新角色对不上
        let rebuilt = Character::new("Stelle").with_id(hero.id);
        assert_eq!(restored.equipped(&rebuilt).len(), 1);
        assert!(restored.equipped(&Character::new("Stelle")).is_empty());
    }

    #[test]
    fn corrupted_snapshot_is_taken_as_is() {
        let snapshot = InventorySnapshot {
            items: vec![Item::basic(1, "Ghost", "misc").with_weight(50)],
            current_weight: 7,
            max_weight: 10,
            equipped: EquippedItems::default(),
        };
        let inv = Inventory::from_snapshot(snapshot);
        assert_eq!(inv.current_weight(), 7);
        assert_eq!(inv.max_weight(), 10);
        assert_eq!(inv.len(), 1);
    }
}
