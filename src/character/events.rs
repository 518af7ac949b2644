use bevy::prelude::*;

/// 装备变更事件
#[derive(Event)]
pub struct EquipmentChanged {
    pub entity: Entity,
}

/// 获得经验事件（升级会放开更高需求等级的装备）
#[derive(Event)]
pub struct GainExp {
    pub entity: Option<Entity>,   // None 表示玩家
    pub amount: u32,
}

/// 升级事件
#[derive(Event)]
pub struct LevelUp {
    pub entity: Entity,
    pub new_level: u32,
}

/// 显示属性事件（用于命令行）
#[derive(Event)]
pub struct ShowStats {
    pub entity: Option<Entity>,  // None 表示显示玩家属性
}
