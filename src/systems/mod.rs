//! The scheduled systems and the resources they operate on.
//!
//! Each manager is a resource that owns its collection outright; the systems here are
//! thin adapters that pull the frame inputs out of the world and call into them.

pub mod bullets;
pub mod collision;
pub mod components;
pub mod items;
pub mod monsters;
pub mod player;
pub mod session;

pub use self::bullets::{bullet_system, BulletManager, PatternSequence, SequenceKind};
pub use self::collision::{collision_system, resolve_collisions, CollisionReport};
pub use self::components::{DeltaTime, InputState, PickupBonus, SessionState, SimRng, Viewport};
pub use self::items::{item_system, ItemManager};
pub use self::monsters::{monster_system, MonsterManager, MonsterUpdate};
pub use self::player::{fire_volley, player_system};
pub use self::session::{clock_system, end_condition_system};
