//! Entity pools
//!
//! One pool per entity kind. Coins and obstacles keep their slots when
//! deactivated so spawning can reuse them; missiles are removed outright.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::consts::LANE_COUNT;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Coin,
    Obstacle,
    Missile,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Coin, EntityKind::Obstacle, EntityKind::Missile];

    /// Coins and obstacles wrap back to the top; missiles are single use
    pub fn recycles(&self) -> bool {
        !matches!(self, EntityKind::Missile)
    }

    /// Whether spawning avoids the lane used by the previous spawn
    pub fn avoids_repeat_lane(&self) -> bool {
        !matches!(self, EntityKind::Missile)
    }
}

/// A moving thing on the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub lane: usize,
    /// Distance from the top edge (pixels, grows downward)
    pub y: f32,
    pub active: bool,
    pub scale: f32,
    /// Downward speed (pixels/second)
    pub velocity: f32,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, lane: usize, y: f32, velocity: f32, scale: f32) -> Self {
        Self {
            id,
            kind,
            lane,
            y,
            active: true,
            scale,
            velocity,
        }
    }
}

/// Size-capped set of entities of one kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub kind: EntityKind,
    pub max_active: usize,
    /// Lane of the most recent successful spawn
    pub previous_lane: Option<usize>,
    /// Sorted by id for determinism
    pub entities: Vec<Entity>,
}

impl Pool {
    pub fn new(kind: EntityKind, max_active: usize) -> Self {
        Self {
            kind,
            max_active,
            previous_lane: None,
            entities: Vec::with_capacity(max_active),
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn is_full(&self) -> bool {
        self.active_count() >= self.max_active
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Put an entity on the road, reusing an inactive slot when one exists.
    ///
    /// Returns `false` (and drops the entity) if the pool is already full.
    pub fn activate(&mut self, entity: Entity) -> bool {
        if self.is_full() {
            return false;
        }
        match self.entities.iter_mut().find(|e| !e.active) {
            Some(slot) => *slot = entity,
            None => self.entities.push(entity),
        }
        self.previous_lane = Some(entity.lane);
        true
    }

    /// Take an active entity off the road. Missiles are destroyed.
    pub fn deactivate(&mut self, id: u32) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id && e.active)?;
        if self.kind.recycles() {
            let entity = &mut self.entities[index];
            entity.active = false;
            Some(*entity)
        } else {
            Some(self.entities.remove(index))
        }
    }

    /// Move every active entity down by `speed * dt`.
    ///
    /// Entities that pass `bottom` are either wrapped to the top on a fresh
    /// random lane or, for missiles, destroyed.
    pub fn advance(
        &mut self,
        dt: f32,
        speed: f32,
        bottom: f32,
        rng: &mut Pcg32,
        events: &mut Vec<GameEvent>,
    ) {
        let kind = self.kind;
        for entity in self.entities.iter_mut().filter(|e| e.active) {
            entity.velocity = speed;
            entity.y += entity.velocity * dt;

            if entity.y > bottom && kind.recycles() {
                entity.y = 0.0;
                entity.lane = rng.random_range(0..LANE_COUNT);
                events.push(GameEvent::Recycled {
                    kind,
                    id: entity.id,
                    lane: entity.lane,
                });
            }
        }

        if !kind.recycles() {
            self.entities.retain(|e| {
                let gone = e.active && e.y > bottom;
                if gone {
                    events.push(GameEvent::Despawned { kind, id: e.id });
                }
                !gone
            });
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.previous_lane = None;
    }

    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_activate_respects_cap() {
        let mut pool = Pool::new(EntityKind::Coin, 2);
        assert!(pool.activate(Entity::new(1, EntityKind::Coin, 0, 0.0, 100.0, 1.0)));
        assert!(pool.activate(Entity::new(2, EntityKind::Coin, 1, 0.0, 100.0, 1.0)));
        assert!(!pool.activate(Entity::new(3, EntityKind::Coin, 2, 0.0, 100.0, 1.0)));
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.previous_lane, Some(1));
    }

    #[test]
    fn test_deactivated_coin_slot_is_reused() {
        let mut pool = Pool::new(EntityKind::Coin, 2);
        pool.activate(Entity::new(1, EntityKind::Coin, 0, 0.0, 100.0, 1.0));
        pool.deactivate(1).unwrap();
        assert_eq!(pool.entities.len(), 1);
        assert_eq!(pool.active_count(), 0);

        pool.activate(Entity::new(2, EntityKind::Coin, 2, 0.0, 100.0, 1.0));
        assert_eq!(pool.entities.len(), 1);
        assert_eq!(pool.entities[0].id, 2);
    }

    #[test]
    fn test_deactivate_missile_removes_it() {
        let mut pool = Pool::new(EntityKind::Missile, 1);
        pool.activate(Entity::new(5, EntityKind::Missile, 1, 10.0, 200.0, 0.6));
        let gone = pool.deactivate(5).unwrap();
        assert_eq!(gone.id, 5);
        assert!(pool.entities.is_empty());
        assert!(pool.deactivate(5).is_none());
    }

    #[test]
    fn test_advance_wraps_obstacle() {
        let mut pool = Pool::new(EntityKind::Obstacle, 3);
        pool.activate(Entity::new(1, EntityKind::Obstacle, 0, 595.0, 100.0, 1.0));
        let mut events = Vec::new();

        pool.advance(0.1, 100.0, 600.0, &mut rng(), &mut events);

        let obstacle = pool.get(1).unwrap();
        assert!(obstacle.active);
        assert_eq!(obstacle.y, 0.0);
        assert!(obstacle.lane < LANE_COUNT);
        assert!(matches!(events[0], GameEvent::Recycled { id: 1, .. }));
    }

    #[test]
    fn test_advance_wraps_coin() {
        let mut pool = Pool::new(EntityKind::Coin, 2);
        pool.activate(Entity::new(4, EntityKind::Coin, 1, 598.0, 100.0, 1.0));
        pool.activate(Entity::new(5, EntityKind::Coin, 0, 100.0, 100.0, 1.0));
        let mut events = Vec::new();

        pool.advance(0.1, 100.0, 600.0, &mut rng(), &mut events);

        let coin = pool.get(4).unwrap();
        assert!(coin.active);
        assert_eq!(coin.y, 0.0);
        assert!(coin.lane < LANE_COUNT);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::Recycled {
                kind: EntityKind::Coin,
                id: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_advance_destroys_missile_past_bottom() {
        let mut pool = Pool::new(EntityKind::Missile, 1);
        pool.activate(Entity::new(9, EntityKind::Missile, 2, 599.0, 200.0, 0.6));
        let mut events = Vec::new();

        pool.advance(0.1, 200.0, 600.0, &mut rng(), &mut events);

        assert!(pool.entities.is_empty());
        assert!(matches!(
            events[0],
            GameEvent::Despawned {
                kind: EntityKind::Missile,
                id: 9
            }
        ));
    }

    #[test]
    fn test_advance_applies_current_speed() {
        let mut pool = Pool::new(EntityKind::Coin, 1);
        pool.activate(Entity::new(1, EntityKind::Coin, 1, 0.0, 100.0, 1.0));
        let mut events = Vec::new();

        pool.advance(0.5, 140.0, 600.0, &mut rng(), &mut events);

        let coin = pool.get(1).unwrap();
        assert_eq!(coin.velocity, 140.0);
        assert_eq!(coin.y, 70.0);
        assert!(events.is_empty());
    }
}
