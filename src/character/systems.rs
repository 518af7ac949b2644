use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use bevy::prelude::*;

/// 处理获得经验事件
pub fn handle_gain_exp(
    mut ev_gain_exp: EventReader<GainExp>,
    mut ev_level_up: EventWriter<LevelUp>,
    mut ev_log: EventWriter<LogEvent>,
    player_query: Query<Entity, With<Player>>,
    mut characters: Query<&mut Character>,
) {
    for ev in ev_gain_exp.read() {
        // 未指定实体时查找玩家
        let Some(target) = ev.entity.or_else(|| player_query.single().ok()) else {
            continue;
        };

        if let Ok(mut character) = characters.get_mut(target) {
            let old_level = character.level();
            character.stats.gain_exp(ev.amount);

            ev_log.write(LogEvent(format!("{} 获得 {} 经验", character.name, ev.amount)));

            if character.level() > old_level {
                ev_level_up.write(LevelUp {
                    entity: target,
                    new_level: character.level(),
                });
                ev_log.write(LogEvent(format!(
                    "升级！等级 {} → {}，生命值 +2，攻击力 +1，防御力 +1",
                    old_level,
                    character.level()
                )));
            }
        }
    }
}

/// 装备变更后输出最新属性
pub fn handle_equipment_changed(
    mut ev_equipment_changed: EventReader<EquipmentChanged>,
    mut ev_log: EventWriter<LogEvent>,
    characters: Query<&Character>,
) {
    for ev in ev_equipment_changed.read() {
        if let Ok(character) = characters.get(ev.entity) {
            let stats = &character.stats;
            ev_log.write(LogEvent(format!(
                "{} 属性: 生命 {}/{} 攻击 {} 防御 {}",
                character.name, stats.hp, stats.max_hp, stats.atk, stats.def
            )));
        }
    }
}

/// 显示属性信息
pub fn show_stats(
    mut ev_show_stats: EventReader<ShowStats>,
    mut ev_log: EventWriter<LogEvent>,
    player_query: Query<&Character, With<Player>>,
    characters: Query<&Character>,
) {
    for ev in ev_show_stats.read() {
        let character = if let Some(entity) = ev.entity {
            characters.get(entity).ok()
        } else {
            player_query.single().ok()
        };

        if let Some(character) = character {
            let stats = &character.stats;
            ev_log.write(LogEvent(format!(
                "=== {} 的属性 ===
生命值: {}/{}
攻击力: {}
防御力: {}
等级: {} (经验: {}/{})
================",
                character.name,
                stats.hp,
                stats.max_hp,
                stats.atk,
                stats.def,
                stats.lv,
                stats.exp,
                stats.exp_to_next(),
            )));
        } else {
            ev_log.write(LogEvent("未找到角色属性".to_string()));
        }
    }
}

/// 初始化玩家实体
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    let player = Character::new(config.player.name.clone()).with_level(config.player.level);
    commands.spawn((Player, player));
}
