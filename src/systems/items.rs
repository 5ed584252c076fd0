use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use glam::Vec2;
use tracing::trace;

use crate::config::SimConfig;
use crate::entity::circles_overlap;
use crate::entity::item::{Item, ItemKind};
use crate::entity::{EntityId, IdAllocator};
use crate::systems::components::DeltaTime;

/// Owns the pickups currently on the field.
#[derive(Resource, Debug)]
pub struct ItemManager {
    items: Vec<Item>,
    ids: IdAllocator,
    lifetime_ms: f32,
    blink_start_ms: f32,
}

impl ItemManager {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            items: Vec::new(),
            ids: IdAllocator::default(),
            lifetime_ms: config.item_lifetime_ms,
            blink_start_ms: config.item_blink_start_ms,
        }
    }

    pub fn spawn(&mut self, kind: ItemKind, position: Vec2) -> EntityId {
        let id = self.ids.allocate();
        trace!(id = %id, %kind, x = position.x, y = position.y, "Item dropped");
        self.items
            .push(Item::new(id, kind, position, self.lifetime_ms, self.blink_start_ms));
        id
    }

    /// Ages every item and drops the ones that expired or drifted off the left edge.
    pub fn update(&mut self, dt_ms: f32) {
        for item in self.items.iter_mut() {
            item.update(dt_ms);
        }
        self.items.retain(|item| {
            let keep = !item.is_expired() && !item.is_off_screen();
            if !keep {
                trace!(id = %item.id, expired = item.is_expired(), "Item removed");
            }
            keep
        });
    }

    /// Removes and returns the first item overlapping the player, if any.
    ///
    /// Call repeatedly to collect several items touched in the same frame.
    pub fn check_player_pickup(&mut self, player: Vec2, radius: f32) -> Option<ItemKind> {
        let index = self
            .items
            .iter()
            .position(|item| circles_overlap(player, radius, item.position, item.radius()))?;
        Some(self.items.remove(index).kind)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

pub fn item_system(delta_time: Res<DeltaTime>, mut items: ResMut<ItemManager>) {
    items.update(delta_time.ms);
}
