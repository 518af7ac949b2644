use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use bevy::prelude::*;

use crate::algorithms::search::{binary_search, recursive_search, sequential_search};
use crate::algorithms::sort::{by_name, insertion_sort};
use crate::algorithms::SortKey;
use crate::character::components::{Character, CharacterId};
use crate::core::error::{InventoryError, InventoryResult};
use crate::core::resources::{GameConfig, DEFAULT_MAX_WEIGHT};
use crate::equipment::components::EquippedItems;
use crate::items::{Item, ItemId, ItemKind};

pub const CSV_HEADER: &str = "ID,Name,Type,Rarity,Weight,Value,Stackable";

/// 玩家背包（挂在 Resource）：按重量限容的物品序列 + 角色装备表
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Inventory {
    pub(crate) items: Vec<Item>,
    pub(crate) current_weight: u32,
    pub(crate) max_weight: u32,
    pub(crate) equipped: EquippedItems,
}

impl FromWorld for Inventory {
    fn from_world(world: &mut World) -> Self {
        let max_weight = world
            .get_resource::<GameConfig>()
            .map_or(DEFAULT_MAX_WEIGHT, |config| config.inventory.max_weight);
        Self::new(max_weight)
    }
}

/// 添加成功后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(ItemId),
    /// 与已有堆叠合并，`into` 是保留下来的那一件
    Merged { into: ItemId },
}

/// 按 ID 或名称定位物品
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef<'a> {
    Id(ItemId),
    Name(&'a str),
}

impl From<ItemId> for ItemRef<'_> {
    fn from(id: ItemId) -> Self {
        ItemRef::Id(id)
    }
}

impl<'a> From<&'a str> for ItemRef<'a> {
    fn from(name: &'a str) -> Self {
        ItemRef::Name(name)
    }
}

/// 背包统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStatistics {
    pub by_type: BTreeMap<String, usize>,
    pub total_count: usize,
    pub total_weight: u32,
    pub total_value: u64,
}

impl InventoryStatistics {
    /// 扁平化：类型计数 + total_count / total_weight / total_value
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        let mut map: BTreeMap<String, u64> = self
            .by_type
            .iter()
            .map(|(k, v)| (k.clone(), *v as u64))
            .collect();
        map.insert("total_count".to_string(), self.total_count as u64);
        map.insert("total_weight".to_string(), u64::from(self.total_weight));
        map.insert("total_value".to_string(), self.total_value);
        map
    }
}

impl Inventory {
    pub fn new(max_weight: u32) -> Self {
        Self {
            items: Vec::new(),
            current_weight: 0,
            max_weight,
            equipped: EquippedItems::default(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn current_weight(&self) -> u32 {
        self.current_weight
    }

    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.max_weight.saturating_sub(self.current_weight)
    }

    pub fn equipped_items(&self) -> &EquippedItems {
        &self.equipped
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub(crate) fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn total_weight(&self) -> u32 {
        self.items.iter().map(|item| item.weight).sum()
    }

    /// 添加物品。超重时拒绝且不改动任何状态；可堆叠物品优先与同名同类合并。
    /// ID 已在背包或装备表里的实例一律拒绝
    pub fn add_item(&mut self, item: Item) -> InventoryResult<AddOutcome> {
        if self.contains(item.id) || self.equipped.get(item.id).is_some() {
            return Err(InventoryError::InvalidArgument(format!(
                "item {} is already held",
                item.id
            )));
        }
        self.insert_at(item, None)
    }

    /// `position` 为追加位置提示（卸装备时放回原位），合并时忽略
    pub(crate) fn insert_at(
        &mut self,
        item: Item,
        position: Option<usize>,
    ) -> InventoryResult<AddOutcome> {
        let fits = self
            .current_weight
            .checked_add(item.weight)
            .is_some_and(|total| total <= self.max_weight);
        if !fits {
            warn!(
                "背包已满，无法添加 {} (当前 {}/{})",
                item.name, self.current_weight, self.max_weight
            );
            return Err(InventoryError::CapacityExceeded {
                current: self.current_weight,
                incoming: item.weight,
                max: self.max_weight,
            });
        }

        if item.stackable {
            if let Some(existing) = self.items.iter_mut().find(|existing| {
                existing.stackable && existing.name == item.name && existing.same_kind(&item)
            }) {
                let into = existing.id;
                merge_into(existing, item);
                self.current_weight = self.total_weight();
                debug!("合并堆叠 {into}，当前 {}/{}", self.current_weight, self.max_weight);
                return Ok(AddOutcome::Merged { into });
            }
        }

        let id = item.id;
        self.current_weight += item.weight;
        info!(
            "添加物品 {} (重量 {})，当前 {}/{}",
            item.name, item.weight, self.current_weight, self.max_weight
        );
        match position {
            Some(index) if index < self.items.len() => self.items.insert(index, item),
            _ => self.items.push(item),
        }
        Ok(AddOutcome::Added(id))
    }

    /// 移除第一个匹配的物品并返回
    pub fn remove_item<'a>(&mut self, target: impl Into<ItemRef<'a>>) -> InventoryResult<Item> {
        let target = target.into();
        let index = match target {
            ItemRef::Id(id) => self.position_of(id),
            ItemRef::Name(name) => self.items.iter().position(|item| item.name == name),
        };
        let Some(index) = index else {
            let label = match target {
                ItemRef::Id(id) => id.to_string(),
                ItemRef::Name(name) => name.to_string(),
            };
            return Err(InventoryError::ItemNotFound(label));
        };
        Ok(self.detach(index))
    }

    pub(crate) fn detach(&mut self, index: usize) -> Item {
        let item = self.items.remove(index);
        self.current_weight = self.current_weight.saturating_sub(item.weight);
        info!(
            "移除物品 {}，当前 {}/{}",
            item.name, self.current_weight, self.max_weight
        );
        item
    }

    /// 按键排序后整体替换工作序列
    pub fn sort(&mut self, key: SortKey) {
        self.items = key.apply(&self.items);
        debug!("按 {key} 排序（{}）", key.algorithm());
    }

    /// 不改动背包的排序副本
    pub fn sorted(&self, key: SortKey) -> Vec<Item> {
        key.apply(&self.items)
    }

    /// 二分查找名称。每次都先按名称插入排序一份副本，比较规则与排序一致
    pub fn search(&self, name: &str) -> Option<&Item> {
        let refs: Vec<&Item> = self.items.iter().collect();
        let sorted = insertion_sort(&refs, |a, b| by_name(a, b));
        binary_search(&sorted, |item| item.name.as_str().cmp(name)).copied()
    }

    /// 顺序查找全部同类型物品
    pub fn search_by_type(&self, item_type: &str) -> Vec<&Item> {
        sequential_search(&self.items, |item| item.item_type == item_type)
    }

    /// 递归查找：名称包含、类型或材料类型相等
    pub fn recursive_search(&self, criteria: &str) -> Option<&Item> {
        recursive_search(&self.items, 0, &|item: &Item| item.matches_criteria(criteria))
    }

    /// 从指定下标开始按同样的条件查找
    pub fn search_from(&self, criteria: &str, start: usize) -> InventoryResult<Option<&Item>> {
        if start >= self.items.len() {
            return Err(InventoryError::InvalidArgument(format!(
                "start index {start} out of range (len {})",
                self.items.len()
            )));
        }
        Ok(recursive_search(&self.items, start, &|item: &Item| {
            item.matches_criteria(criteria)
        }))
    }

    pub fn calculate_total_value(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.value)).sum()
    }

    pub fn statistics(&self) -> InventoryStatistics {
        let mut by_type = BTreeMap::new();
        for item in &self.items {
            *by_type.entry(item.item_type.clone()).or_insert(0) += 1;
        }
        InventoryStatistics {
            by_type,
            total_count: self.items.len(),
            total_weight: self.current_weight,
            total_value: self.calculate_total_value(),
        }
    }

    /// 导出为 CSV，按当前顺序
    pub fn export_to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        for item in &self.items {
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{},{}",
                item.id.0,
                csv_field(&item.name),
                csv_field(&item.item_type),
                item.stars(),
                item.weight,
                item.value,
                item.stackable
            );
        }
        csv
    }

    /// 清空物品（不影响已装备的）
    pub fn clear(&mut self) {
        self.items.clear();
        self.current_weight = 0;
        info!("背包已清空");
    }

    pub fn expand_capacity(&mut self, additional: u32) {
        self.max_weight = self.max_weight.saturating_add(additional);
        info!("背包扩容 {additional}，新容量 {}", self.max_weight);
    }

    /// 装备了该物品的角色
    pub fn characters_with_equipment(&self, item: ItemId) -> Vec<CharacterId> {
        self.equipped.owners_of(item)
    }

    /// 文字版背包清单
    pub fn render(&self) -> String {
        let mut out = String::from("=== 背包信息 ===\n");
        let _ = writeln!(out, "物品数量: {}", self.items.len());
        let _ = writeln!(out, "当前重量: {}/{}", self.current_weight, self.max_weight);
        let _ = writeln!(out, "空余重量: {}", self.remaining_capacity());
        if self.items.is_empty() {
            out.push_str("  (empty)\n");
            return out;
        }
        for (idx, item) in self.items.iter().enumerate() {
            let _ = writeln!(
                out,
                "[{idx}] {} {} (id={}, 重量: {}, 价值: {})",
                item.stars(),
                item.name,
                item.id.0,
                item.weight,
                item.value
            );
        }
        out
    }

    /// 文字版角色装备
    pub fn render_equipment(&self, character: &Character) -> String {
        let mut out = format!("=== {} 的装备 ===\n", character.name);
        let equipped = self.equipped.equipped(character.id);
        if equipped.is_empty() {
            out.push_str("  没有装备任何物品\n");
            return out;
        }
        for item in equipped {
            if let Some(data) = item.as_equipment() {
                let bonus = data.bonus();
                let _ = writeln!(
                    out,
                    "{}: {} (需求等级 {}) 攻击 {} / 防御 {} / HP {}",
                    data.slot, item.name, data.required_level, bonus.attack, bonus.defense, bonus.hp
                );
            }
        }
        out
    }
}

/// 材料：生成新实例（保留原 ID），价值相加、重量取大；其他种类：价值叠加到原实例
fn merge_into(existing: &mut Item, incoming: Item) {
    let both_material = matches!(existing.kind, ItemKind::Material { .. })
        && matches!(incoming.kind, ItemKind::Material { .. });
    if both_material {
        let merged = Item {
            weight: existing.weight.max(incoming.weight),
            value: existing.value.saturating_add(incoming.value),
            stackable: true,
            ..existing.clone()
        };
        *existing = merged;
    } else {
        existing.value = existing.value.saturating_add(incoming.value);
    }
}

fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ore(id: u32, value: u32, weight: u32) -> Item {
        Item::material(id, "Iron Ore", "metal", 2, value).with_weight(weight)
    }

    fn assert_weight_invariant(inv: &Inventory) {
        let sum: u32 = inv.items().iter().map(|i| i.weight).sum();
        assert_eq!(inv.current_weight(), sum);
        assert!(inv.current_weight() <= inv.max_weight());
    }

    #[test]
    fn capacity_is_enforced_without_side_effects() {
        let mut inv = Inventory::new(100);
        assert_eq!(
            inv.add_item(Item::basic(1, "Anchor", "misc").with_weight(60)),
            Ok(AddOutcome::Added(ItemId(1)))
        );
        assert_eq!(inv.current_weight(), 60);

        let before = inv.clone();
        let err = inv
            .add_item(Item::basic(2, "Boulder", "misc").with_weight(50))
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::CapacityExceeded {
                current: 60,
                incoming: 50,
                max: 100
            }
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn exact_fit_is_allowed() {
        let mut inv = Inventory::new(10);
        assert!(inv.add_item(Item::basic(1, "Crate", "misc").with_weight(10)).is_ok());
        assert_eq!(inv.remaining_capacity(), 0);
        assert!(inv.add_item(Item::basic(2, "Feather", "misc").with_weight(1)).is_err());
    }

    #[test]
    fn materials_stack_into_one() {
        let mut inv = Inventory::new(100);
        inv.add_item(ore(1, 10, 3)).unwrap();
        inv.add_item(Item::basic(2, "Torch", "tool")).unwrap();
        let outcome = inv.add_item(ore(3, 15, 5)).unwrap();

        assert_eq!(outcome, AddOutcome::Merged { into: ItemId(1) });
        assert_eq!(inv.len(), 2);
        let stack = &inv.items()[0];
        assert_eq!(stack.id, ItemId(1));
        assert_eq!(stack.value, 25);
        assert_eq!(stack.weight, 5);
        assert!(stack.stackable);
        assert_weight_invariant(&inv);
    }

    #[test]
    fn other_stackables_add_value_in_place() {
        let mut inv = Inventory::new(100);
        let coin = |id| Item::basic(id, "Credit", "currency").with_value(100).stackable(true);
        inv.add_item(coin(1)).unwrap();
        inv.add_item(coin(2)).unwrap();

        assert_eq!(inv.len(), 1);
        assert_eq!(inv.items()[0].value, 200);
        assert_eq!(inv.current_weight(), 1);
    }

    #[test]
    fn different_kinds_do_not_stack() {
        let mut inv = Inventory::new(100);
        inv.add_item(ore(1, 10, 1)).unwrap();
        inv.add_item(Item::basic(2, "Iron Ore", "misc").stackable(true)).unwrap();
        inv.add_item(ore(3, 10, 1).stackable(false)).unwrap();
        assert_eq!(inv.len(), 3);
        assert_weight_invariant(&inv);
    }

    #[test]
    fn remove_by_id_and_name() {
        let mut inv = Inventory::new(100);
        inv.add_item(Item::basic(1, "Rope", "tool").with_weight(4)).unwrap();
        inv.add_item(Item::basic(2, "Rope", "tool").with_weight(6)).unwrap();
        inv.add_item(Item::basic(3, "Lamp", "tool").with_weight(2)).unwrap();

        assert_eq!(inv.remove_item("Rope").unwrap().id, ItemId(1));
        assert_eq!(inv.remove_item(ItemId(3)).unwrap().name, "Lamp");
        assert_eq!(inv.current_weight(), 6);

        let before = inv.clone();
        assert_eq!(
            inv.remove_item("Lamp"),
            Err(InventoryError::ItemNotFound("Lamp".to_string()))
        );
        assert!(matches!(
            inv.remove_item(ItemId(42)),
            Err(InventoryError::ItemNotFound(_))
        ));
        assert_eq!(inv, before);
    }

    fn sample() -> Inventory {
        let mut inv = Inventory::new(1000);
        for item in [
            Item::basic(1, "Torch", "tool"),
            Item::material(2, "Star Jade", "gem", 5, 50),
            Item::basic(3, "Bread", "food"),
            Item::material(4, "Copper", "metal", 1, 2),
            Item::basic(5, "Antidote", "consumable"),
        ] {
            inv.add_item(item).unwrap();
        }
        inv
    }

    fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.id.0).collect()
    }

    #[test]
    fn sort_replaces_sequence_but_keeps_weight() {
        let mut inv = sample();
        let weight = inv.current_weight();

        inv.sort(SortKey::Name);
        assert_eq!(ids(inv.items()), vec![5, 3, 4, 2, 1]);
        inv.sort(SortKey::Type);
        assert_eq!(ids(inv.items()), vec![5, 3, 4, 2, 1]);
        inv.sort(SortKey::Rarity);
        assert_eq!(ids(inv.items())[0], 2);
        assert_eq!(inv.current_weight(), weight);
    }

    #[test]
    fn name_sorts_agree_on_every_rotation() {
        let inv = sample();
        let mut items = inv.items().to_vec();
        for _ in 0..items.len() {
            items.rotate_left(1);
            let mut shuffled = Inventory::new(1000);
            for item in &items {
                shuffled.add_item(item.clone()).unwrap();
            }
            assert_eq!(
                ids(&shuffled.sorted(SortKey::Name)),
                ids(&shuffled.sorted(SortKey::Advanced))
            );
        }
    }

    #[test]
    fn search_agrees_with_remove() {
        let inv = sample();
        for name in ["Torch", "Star Jade", "Bread", "Copper", "Antidote"] {
            let found = inv.search(name).map(|i| i.id);
            let mut scratch = inv.clone();
            assert_eq!(found, scratch.remove_item(name).ok().map(|i| i.id));
        }
        assert!(inv.search("Excalibur").is_none());

        let mut sorted = inv.clone();
        sorted.sort(SortKey::Name);
        assert_eq!(sorted.search("Copper").map(|i| i.id), Some(ItemId(4)));
    }

    #[test]
    fn search_prefers_first_of_duplicates() {
        let mut inv = Inventory::new(100);
        inv.add_item(Item::basic(1, "Rope", "tool")).unwrap();
        inv.add_item(Item::basic(2, "Apple", "food")).unwrap();
        inv.add_item(Item::basic(3, "Rope", "tool")).unwrap();
        assert_eq!(inv.search("Rope").map(|i| i.id), Some(ItemId(1)));
    }

    #[test]
    fn type_and_recursive_search() {
        let inv = sample();
        let tools: Vec<u32> = inv.search_by_type("tool").iter().map(|i| i.id.0).collect();
        assert_eq!(tools, vec![1]);
        assert!(inv.search_by_type("weapon").is_empty());

        assert_eq!(inv.recursive_search("Jade").map(|i| i.id), Some(ItemId(2)));
        assert_eq!(inv.recursive_search("metal").map(|i| i.id), Some(ItemId(4)));
        assert_eq!(inv.recursive_search("material").map(|i| i.id), Some(ItemId(2)));
        assert!(inv.recursive_search("nothing").is_none());

        assert_eq!(
            inv.search_from("material", 2).unwrap().map(|i| i.id),
            Some(ItemId(4))
        );
        assert!(matches!(
            inv.search_from("material", 9),
            Err(InventoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn csv_export() {
        let mut inv = Inventory::new(100);
        inv.add_item(Item::material(7, "Star Jade", "gem", 3, 40).with_weight(2))
            .unwrap();
        inv.add_item(Item::basic(8, "Salt, coarse", "food").with_value(1))
            .unwrap();

        let csv = inv.export_to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                CSV_HEADER,
                "7,Star Jade,material,★★★,2,40,true",
                "8,\"Salt, coarse\",food,★★,1,1,false",
            ]
        );
        assert_eq!(Inventory::new(5).export_to_csv(), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn statistics_and_value() {
        let mut inv = sample();
        inv.add_item(Item::basic(9, "Lantern", "tool").with_value(7)).unwrap();
        assert_eq!(inv.calculate_total_value(), 59);

        let stats = inv.statistics();
        assert_eq!(stats.by_type.get("tool"), Some(&2));
        assert_eq!(stats.by_type.get("material"), Some(&2));
        assert_eq!(stats.total_count, 6);

        let map = stats.to_map();
        assert_eq!(map["total_count"], 6);
        assert_eq!(map["total_weight"], 6);
        assert_eq!(map["total_value"], 59);
        assert_eq!(map["food"], 1);
    }

    #[test]
    fn clear_and_expand() {
        let mut inv = sample();
        inv.expand_capacity(500);
        assert_eq!(inv.max_weight(), 1500);
        inv.clear();
        assert!(inv.is_empty());
        assert_eq!(inv.current_weight(), 0);
        assert!(inv.render().contains("(empty)"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut inv = Inventory::new(100);
        inv.add_item(Item::basic(1, "Lantern", "tool")).unwrap();

        let before = inv.clone();
        let err = inv.add_item(Item::basic(1, "Rope", "tool")).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));
        assert_eq!(inv, before);

        // 堆叠物品同样不能借用已有 ID
        inv.add_item(ore(2, 10, 1)).unwrap();
        assert!(inv.add_item(ore(2, 10, 1)).is_err());
        assert_eq!(inv.items()[1].value, 10);
    }

    #[test]
    fn criteria_search_scans_large_inventories() {
        let mut inv = Inventory::new(1000);
        inv.items = (1..=300_000)
            .map(|id| Item::basic(id, format!("Pebble {id}"), "misc").with_weight(0))
            .collect();

        assert!(inv.recursive_search("zzz").is_none());
        assert_eq!(
            inv.recursive_search("Pebble 300000").map(|item| item.id),
            Some(ItemId(300_000))
        );
        assert_eq!(inv.search_from("zzz", 299_999), Ok(None));
    }
}
