use glam::Vec2;
use hecs::Entity;
use log::trace;
use crate::game::{
    asteroid_field::AsteroidField,
    components::*,
    pools::{ASTEROID_ROLES, PLAYER_ROLES, SHOT_ROLES},
    AsteroidGame
};

impl AsteroidGame {
    pub fn spawn_player(&mut self, position: Vec2) -> Entity {
        let body = MovingBody::new(position, Vec2::ZERO, self.config.player.radius);
        let player_entity = self.ecs_world.spawn((
            Player,
            body,
            FireCoolDown(0.0)
        ));
        self.attach_spatial_handle(player_entity, position);
        self.pools.register(player_entity, PLAYER_ROLES);
        self.player_entity = Some(player_entity);
        player_entity
    }

    pub fn spawn_shot(&mut self, position: Vec2, velocity: Vec2) -> Entity {
        let body = MovingBody::new(position, velocity, self.config.shot.radius);
        let shot_entity = self.ecs_world.spawn((
            Shot,
            body,
            LifeSpan(self.config.shot.life_span)
        ));
        self.attach_spatial_handle(shot_entity, position);
        self.pools.register(shot_entity, SHOT_ROLES);
        trace!("Shot fired from {:?}", position);
        shot_entity
    }

    pub fn spawn_asteroid(&mut self, position: Vec2, velocity: Vec2, tier: AsteroidTier) -> Entity {
        let body = MovingBody::new(position, velocity, tier.radius(self.config.asteroid.min_radius));
        self.spawn_asteroid_body(Asteroid { tier }, body)
    }

    pub(crate) fn spawn_asteroid_body(&mut self, asteroid: Asteroid, body: MovingBody) -> Entity {
        let asteroid_entity = self.ecs_world.spawn((asteroid, body));
        self.attach_spatial_handle(asteroid_entity, body.position);
        self.pools.register(asteroid_entity, ASTEROID_ROLES);
        trace!("{:?} asteroid spawned at {:?}", asteroid.tier, body.position);
        asteroid_entity
    }

    pub fn update_asteroid_field(&mut self, dt: f32) {
        let due = self.asteroid_field.tick(dt, self.config.asteroid_field.spawn_interval);
        for _ in 0..due {
            let body = AsteroidField::plan_spawn(&self.config, &mut self.rng);
            self.spawn_asteroid_body(Asteroid { tier: AsteroidTier::Large }, body);
        }
    }

    fn attach_spatial_handle(&mut self, entity: Entity, position: Vec2) {
        let handle = self.spatial_map.insert(position.to_array(), entity);
        let _ = self.ecs_world.insert(entity, (SpatialHandle { handle },));
    }
}
