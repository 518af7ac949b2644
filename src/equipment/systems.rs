use super::events::*;
use crate::character::components::{Character, Player};
use crate::character::events::EquipmentChanged;
use crate::core::error::InventoryError;
use crate::core::events::LogEvent;
use crate::inventory::components::Inventory;
use bevy::prelude::*;

pub fn equip_item(
    mut ev_equip: EventReader<EquipEvent>,
    mut inventory: ResMut<Inventory>,
    mut equipment_changed: EventWriter<EquipmentChanged>,
    mut log_event: EventWriter<LogEvent>,
    mut player_query: Query<(Entity, &mut Character), With<Player>>,
) {
    for ev in ev_equip.read() {
        let Ok((entity, mut character)) = player_query.single_mut() else {
            log_event.write(LogEvent("未找到玩家角色".to_string()));
            continue;
        };

        // 先检查背包里是否有这件物品
        let Some(item) = inventory.find(ev.item).cloned() else {
            log_event.write(LogEvent(InventoryError::NotInInventory(ev.item).to_string()));
            continue;
        };

        match inventory.equip(&mut character, &item) {
            Ok(()) => {
                let slot = item.as_equipment().map_or("", |data| data.slot.as_str());
                log_event.write(LogEvent(format!("已装备 {slot}: {}", item.name)));
                equipment_changed.write(EquipmentChanged { entity });
            }
            Err(err) => {
                log_event.write(LogEvent(format!("无法装备 {}: {err}", item.name)));
            }
        }
    }
}

/// 卸下装备
pub fn unequip_item(
    mut ev_unequip: EventReader<UnequipEvent>,
    mut inventory: ResMut<Inventory>,
    mut equipment_changed: EventWriter<EquipmentChanged>,
    mut log_event: EventWriter<LogEvent>,
    mut player_query: Query<(Entity, &mut Character), With<Player>>,
) {
    for ev in ev_unequip.read() {
        let Ok((entity, mut character)) = player_query.single_mut() else {
            log_event.write(LogEvent("未找到玩家角色".to_string()));
            continue;
        };

        match inventory.unequip_slot(&mut character, &ev.slot) {
            Ok(id) => {
                let name = inventory.find(id).map_or("?", |item| item.name.as_str());
                log_event.write(LogEvent(format!("已卸下 {}: {name}", ev.slot)));
                equipment_changed.write(EquipmentChanged { entity });
            }
            // 背包满了，装备留在身上
            Err(err) => {
                log_event.write(LogEvent(format!("无法卸下 {}: {err}", ev.slot)));
            }
        }
    }
}

pub fn show_equipment(
    mut ev_show: EventReader<ShowEquipmentEvent>,
    inventory: Res<Inventory>,
    mut log_event: EventWriter<LogEvent>,
    player_query: Query<&Character, With<Player>>,
) {
    if ev_show.is_empty() {
        return;
    }
    ev_show.clear();
    if let Ok(character) = player_query.single() {
        log_event.write(LogEvent(inventory.render_equipment(character)));
    }
}
