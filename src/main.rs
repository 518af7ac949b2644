use anyhow::Context;
use bevy::prelude::*;

use satchel::character::CharacterPlugin;
use satchel::core::{CorePlugin, events::LogEvent, resources::GameConfig, states};
use satchel::data::DataPlugin;
use satchel::equipment::EquipmentPlugin;
use satchel::interface::debug_cli::DebugCliPlugin;
use satchel::inventory::InventoryPlugin;

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load("assets/config.toml").context("loading game config")?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }), // 隐藏窗口，只用命令行交互
            ..default()
        }))
        .insert_resource(config)
        .add_plugins(CorePlugin)
        .add_plugins(DataPlugin)
        .add_plugins(CharacterPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(EquipmentPlugin)
        .add_plugins(DebugCliPlugin)
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
    Ok(())
}

fn forward_log_event(mut reader: EventReader<LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
