pub mod loader;
pub mod schema;

use bevy::prelude::*;
use schema::ItemList;
use uuid::Uuid;

use crate::core::{events::LogEvent, resources::GameConfig, states::AppState};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    pub handle: Option<Handle<ItemList>>,
}

impl ItemAssets {
    pub fn list<'a>(&self, lists: &'a Assets<ItemList>) -> Option<&'a ItemList> {
        self.handle.as_ref().and_then(|h| lists.get(h))
    }
}

/// 运行时物品 ID 分配器，从 1 开始递增
#[derive(Resource, Debug)]
pub struct ItemIdAllocator {
    next: u32,
}

impl Default for ItemIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ItemIdAllocator {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
pub fn uuid_from_id(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .register_asset_loader(loader::RonItemLoader)
            .init_resource::<ItemAssets>()
            .init_resource::<ItemIdAllocator>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(Update, check_loaded.run_if(in_state(AppState::Loading)));
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    let handle: Handle<ItemList> = asset_server.load(config.data.items.clone());
    item_assets.handle = Some(handle);
}

fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    if let Some(list) = item_assets.list(&lists) {
        log.write(LogEvent(format!("✔ Items loaded: {}", list.items.len())));
        next.set(AppState::InGame);
    }
}
