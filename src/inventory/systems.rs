use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::data::{ItemAssets, ItemIdAllocator, schema::ItemList};
use crate::items::ItemId;
use bevy::prelude::*;

/// 处理 give 事件，按物品表生成实例放入背包
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut inventory: ResMut<Inventory>,
    mut ids: ResMut<ItemIdAllocator>,
    mut log: EventWriter<LogEvent>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    for ev in ev_give.read() {
        let Some(list) = item_assets.list(&lists) else {
            log.write(LogEvent("物品表尚未加载".to_string()));
            continue;
        };
        let Some(entry) = list.find(&ev.id) else {
            log.write(LogEvent(format!("不存在物品 ID {}", ev.id)));
            continue;
        };

        let mut added = 0;
        for _ in 0..ev.count {
            let item = entry.instantiate(ids.allocate());
            match inventory.add_item(item) {
                Ok(_) => added += 1,
                Err(err) => {
                    log.write(LogEvent(format!("无法获得 {}: {err}", entry.name)));
                    break;
                }
            }
        }
        if added > 0 {
            log.write(LogEvent(format!(
                "获得 {} ×{added}，当前重量 {}/{}",
                entry.name,
                inventory.current_weight(),
                inventory.max_weight()
            )));
        }
    }
}

pub fn remove_item(
    mut ev_remove: EventReader<RemoveItemEvent>,
    mut inventory: ResMut<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_remove.read() {
        let result = match ev {
            RemoveItemEvent::Id(id) => inventory.remove_item(*id),
            RemoveItemEvent::Name(name) => inventory.remove_item(name.as_str()),
            RemoveItemEvent::IdOrName(token) => {
                let by_id = token
                    .parse()
                    .ok()
                    .map(ItemId)
                    .filter(|id| inventory.contains(*id));
                match by_id {
                    Some(id) => inventory.remove_item(id),
                    None => inventory.remove_item(token.as_str()),
                }
            }
        };
        match result {
            Ok(item) => log.write(LogEvent(format!(
                "丢弃 {}，当前重量 {}/{}",
                item.name,
                inventory.current_weight(),
                inventory.max_weight()
            ))),
            Err(err) => log.write(LogEvent(err.to_string())),
        };
    }
}

pub fn sort_inventory(
    mut ev_sort: EventReader<SortInventoryEvent>,
    mut inventory: ResMut<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    for SortInventoryEvent(key) in ev_sort.read() {
        inventory.sort(*key);
        log.write(LogEvent(format!("按 {key} 排序（{}）", key.algorithm())));
        log.write(LogEvent(inventory.render()));
    }
}

pub fn search_items(
    mut ev_search: EventReader<SearchItemEvent>,
    inventory: Res<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_search.read() {
        let found: Vec<_> = match ev {
            SearchItemEvent::Name(name) => inventory.search(name).into_iter().collect(),
            SearchItemEvent::Type(item_type) => inventory.search_by_type(item_type),
            SearchItemEvent::Criteria(criteria) => {
                inventory.recursive_search(criteria).into_iter().collect()
            }
        };
        if found.is_empty() {
            log.write(LogEvent(format!("未找到: {ev:?}")));
            continue;
        }
        for item in found {
            log.write(LogEvent(format!(
                "  - {} {} (id={}, 类型 {})",
                item.stars(),
                item.name,
                item.id.0,
                item.item_type
            )));
        }
    }
}

pub fn export_csv(
    mut ev_export: EventReader<ExportCsvEvent>,
    inventory: Res<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_export.is_empty() {
        return;
    }
    ev_export.clear();
    log.write(LogEvent(inventory.export_to_csv()));
}

pub fn show_statistics(
    mut ev_stats: EventReader<ShowStatisticsEvent>,
    inventory: Res<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_stats.is_empty() {
        return;
    }
    ev_stats.clear();
    for (key, value) in inventory.statistics().to_map() {
        log.write(LogEvent(format!("{key}: {value}")));
    }
}

pub fn show_snapshot(
    mut ev_snapshot: EventReader<SnapshotEvent>,
    inventory: Res<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_snapshot.is_empty() {
        return;
    }
    ev_snapshot.clear();
    match serde_json::to_string_pretty(&inventory.snapshot()) {
        Ok(json) => log.write(LogEvent(json)),
        Err(err) => log.write(LogEvent(format!("快照序列化失败: {err}"))),
    };
}

/// 打印背包内容
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    inventory: Res<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();
    log.write(LogEvent(inventory.render()));
}
