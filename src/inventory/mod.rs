pub mod components;
pub mod events;
pub mod snapshot;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<Inventory>()
            .add_event::<GiveItemEvent>()
            .add_event::<ListInventoryEvent>()
            .add_event::<RemoveItemEvent>()
            .add_event::<SortInventoryEvent>()
            .add_event::<SearchItemEvent>()
            .add_event::<ExportCsvEvent>()
            .add_event::<ShowStatisticsEvent>()
            .add_event::<SnapshotEvent>()
            .add_systems(
                Update,
                (
                    give_item,
                    remove_item,
                    sort_inventory,
                    search_items,
                    export_csv,
                    show_statistics,
                    show_snapshot,
                    print_inventory,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
