use std::fmt;
use std::mem;

use serde_derive::{Deserialize, Serialize};

use super::equipment::EquipmentData;

/// 物品实例 ID，由外部（物品表 / 掉落）分配，背包内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 物品种类（封闭集合），合并与显示逻辑按种类穷举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Basic,
    Material { material_type: String, rarity: u8 },
    Equipment(EquipmentData),
}

/// 运行时物品实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub item_type: String,
    pub weight: u32,
    pub value: u32,
    pub stackable: bool,
    pub kind: ItemKind,
}

impl Item {
    pub fn basic(id: u32, name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            item_type: item_type.into(),
            weight: 1,
            value: 0,
            stackable: false,
            kind: ItemKind::Basic,
        }
    }

    /// 材料默认可堆叠，稀有度钳制在 1..=5
    pub fn material(
        id: u32,
        name: impl Into<String>,
        material_type: impl Into<String>,
        rarity: u8,
        value: u32,
    ) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            item_type: "material".to_string(),
            weight: 1,
            value,
            stackable: true,
            kind: ItemKind::Material {
                material_type: material_type.into(),
                rarity: rarity.clamp(1, 5),
            },
        }
    }

    pub fn equipment(id: u32, name: impl Into<String>, data: EquipmentData) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            item_type: "equipment".to_string(),
            weight: 5,
            value: 0,
            stackable: false,
            kind: ItemKind::Equipment(data),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = item_type.into();
        self
    }

    pub fn stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    pub fn material_type(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Material { material_type, .. } => Some(material_type),
            _ => None,
        }
    }

    pub fn as_equipment(&self) -> Option<&EquipmentData> {
        match &self.kind {
            ItemKind::Equipment(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_equipment_mut(&mut self) -> Option<&mut EquipmentData> {
        match &mut self.kind {
            ItemKind::Equipment(data) => Some(data),
            _ => None,
        }
    }

    /// 同一具体种类（不比较种类内部数据）
    pub fn same_kind(&self, other: &Item) -> bool {
        mem::discriminant(&self.kind) == mem::discriminant(&other.kind)
    }

    /// 显示星级：材料取稀有度；装备按需求等级分档；其他固定两星
    pub fn tier(&self) -> u8 {
        match &self.kind {
            ItemKind::Material { rarity, .. } => *rarity,
            ItemKind::Equipment(data) if data.required_level >= 60 => 5,
            ItemKind::Equipment(data) if data.required_level >= 20 => 4,
            ItemKind::Equipment(_) => 3,
            ItemKind::Basic => 2,
        }
    }

    pub fn stars(&self) -> String {
        "★".repeat(self.tier() as usize)
    }

    /// 模糊条件：名称包含 / 类型相等 / 材料类型相等
    pub fn matches_criteria(&self, criteria: &str) -> bool {
        self.name.contains(criteria)
            || self.item_type == criteria
            || self.material_type() == Some(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_kind() {
        assert_eq!(Item::material(1, "Ore", "metal", 4, 10).tier(), 4);
        assert_eq!(Item::material(2, "Dust", "arcane", 9, 10).tier(), 5);
        assert_eq!(Item::basic(3, "Rope", "tool").tier(), 2);
        assert_eq!(
            Item::equipment(4, "Sword", EquipmentData::new("weapon", 70)).tier(),
            5
        );
        assert_eq!(
            Item::equipment(5, "Cap", EquipmentData::new("head", 20)).tier(),
            4
        );
        assert_eq!(
            Item::equipment(6, "Stick", EquipmentData::new("weapon", 1)).stars(),
            "★★★"
        );
    }

    #[test]
    fn criteria_checks_name_type_and_material() {
        let ore = Item::material(1, "Iron Ore", "metal", 2, 5);
        assert!(ore.matches_criteria("Iron"));
        assert!(ore.matches_criteria("material"));
        assert!(ore.matches_criteria("metal"));
        assert!(!ore.matches_criteria("met"));
        assert!(!ore.matches_criteria("wood"));
    }

    #[test]
    fn same_kind_ignores_payload() {
        let a = Item::material(1, "Ore", "metal", 2, 5);
        let b = Item::material(2, "Ore", "stone", 3, 5);
        let c = Item::basic(3, "Ore", "misc");
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&c));
    }
}
