//! Registries of live entities grouped by the role they play in a frame.
//!
//! The component data itself lives in the ECS world, pools only keep handles. An entity gets
//! despawned by the game only after it has been unregistered from every pool.

use hecs::Entity;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PoolRole {
    Updatable,
    Drawable,
    Asteroids,
    Shots
}

pub const PLAYER_ROLES: &[PoolRole] = &[PoolRole::Updatable, PoolRole::Drawable];
pub const ASTEROID_ROLES: &[PoolRole] = &[PoolRole::Updatable, PoolRole::Drawable, PoolRole::Asteroids];
pub const SHOT_ROLES: &[PoolRole] = &[PoolRole::Updatable, PoolRole::Drawable, PoolRole::Shots];

/// Ordered set of entity handles
#[derive(Default, Debug, Clone)]
pub struct Pool {
    entities: Vec<Entity>
}

impl Pool {
    /// Returns false if the entity was already registered
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Returns false if the entity was not registered
    pub fn unregister(&mut self, entity: Entity) -> bool {
        match self.entities.iter().position(|&it| it == entity) {
            Some(idx) => {
                self.entities.remove(idx);
                true
            },
            None => false
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[derive(Default, Debug, Clone)]
pub struct Pools {
    pub updatable: Pool,
    pub drawable: Pool,
    pub asteroids: Pool,
    pub shots: Pool
}

impl Pools {
    pub fn pool_mut(&mut self, role: PoolRole) -> &mut Pool {
        match role {
            PoolRole::Updatable => &mut self.updatable,
            PoolRole::Drawable => &mut self.drawable,
            PoolRole::Asteroids => &mut self.asteroids,
            PoolRole::Shots => &mut self.shots
        }
    }

    pub fn register(&mut self, entity: Entity, roles: &[PoolRole]) {
        for &role in roles {
            self.pool_mut(role).register(entity);
        }
    }

    pub fn unregister_all(&mut self, entity: Entity) {
        for pool in [&mut self.updatable, &mut self.drawable, &mut self.asteroids, &mut self.shots] {
            pool.unregister(entity);
        }
    }

    pub fn contains_anywhere(&self, entity: Entity) -> bool {
        [&self.updatable, &self.drawable, &self.asteroids, &self.shots]
            .iter()
            .any(|pool| pool.contains(entity))
    }

    pub fn clear(&mut self) {
        self.updatable.clear();
        self.drawable.clear();
        self.asteroids.clear();
        self.shots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> (hecs::World, Vec<Entity>) {
        let mut world = hecs::World::new();
        let spawned = (0..count).map(|i| world.spawn((i as u32,))).collect();
        (world, spawned)
    }

    #[test]
    fn pool_keeps_registration_order_and_ignores_duplicates() {
        let (_world, e) = entities(3);
        let mut pool = Pool::default();
        assert!(pool.register(e[2]));
        assert!(pool.register(e[0]));
        assert!(!pool.register(e[2]));
        assert!(pool.register(e[1]));
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![e[2], e[0], e[1]]);

        assert!(pool.unregister(e[0]));
        assert!(!pool.unregister(e[0]));
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![e[2], e[1]]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn roles_put_entities_in_matching_pools() {
        let (_world, e) = entities(3);
        let mut pools = Pools::default();
        pools.register(e[0], PLAYER_ROLES);
        pools.register(e[1], ASTEROID_ROLES);
        pools.register(e[2], SHOT_ROLES);

        assert_eq!(pools.updatable.len(), 3);
        assert_eq!(pools.drawable.len(), 3);
        assert_eq!(pools.asteroids.iter().collect::<Vec<_>>(), vec![e[1]]);
        assert_eq!(pools.shots.iter().collect::<Vec<_>>(), vec![e[2]]);
    }

    #[test]
    fn unregister_all_clears_every_membership() {
        let (_world, e) = entities(2);
        let mut pools = Pools::default();
        pools.register(e[0], ASTEROID_ROLES);
        pools.register(e[1], ASTEROID_ROLES);

        pools.unregister_all(e[0]);

        assert!(!pools.contains_anywhere(e[0]));
        assert!(pools.contains_anywhere(e[1]));
        assert!(pools.asteroids.contains(e[1]));
    }
}
