use hecs::Entity;
use log::{debug, trace};
use rand::Rng;
use crate::game::{
    components::*,
    AsteroidGame,
    FrameOutcome
};

impl AsteroidGame {
    /// Every shot consumes at most one asteroid (the closest it touches) and every asteroid is
    /// consumed by at most one shot.
    pub fn update_shot_collisions(&mut self) {
        let query_radius = self.config.shot.radius + self.largest_asteroid_radius();

        let bump_allocator = std::mem::take(&mut self.bump_allocator);
        self.bump_allocator = {
            {
                let mut hit_asteroids = bumpalo::collections::Vec::new_in(&bump_allocator);
                let mut hit_shots = bumpalo::collections::Vec::new_in(&bump_allocator);
                for shot_entity in self.pools.shots.iter() {
                    let shot_body = match self.ecs_world.get::<MovingBody>(shot_entity) {
                        Ok(body) => *body,
                        Err(_) => continue
                    };
                    let mut closest_hit: Option<(Entity, f32)> = None;
                    for (other_h, _) in self.spatial_map.query_around(
                        shot_body.position.to_array(),
                        query_radius
                    ) {
                        if let Some((_, &other_entity)) = self.spatial_map.get(other_h) {
                            if self.ecs_world.get::<Asteroid>(other_entity).is_err() ||
                                hit_asteroids.contains(&other_entity)
                            {
                                continue;
                            }
                            if let Ok(asteroid_body) = self.ecs_world.get::<MovingBody>(other_entity) {
                                if shot_body.collides_with(&asteroid_body) {
                                    let distance = shot_body.position.distance(asteroid_body.position);
                                    if closest_hit.map_or(true, |(_, closest)| distance < closest) {
                                        closest_hit = Some((other_entity, distance));
                                    }
                                }
                            }
                        }
                    }
                    if let Some((asteroid_entity, _)) = closest_hit {
                        hit_asteroids.push(asteroid_entity);
                        hit_shots.push(shot_entity);
                    }
                }
                for shot_entity in hit_shots.drain(..) {
                    self.kill_entity(shot_entity);
                }
                for asteroid_entity in hit_asteroids.drain(..) {
                    self.blow_asteroid(asteroid_entity);
                }
            }
            bump_allocator
        };
    }

    /// Any asteroid touching the player ends the session
    pub fn update_player_collisions(&mut self) -> FrameOutcome {
        let player_entity = match self.player_entity {
            Some(entity) => entity,
            None => return FrameOutcome::Continue
        };
        let player_body = match self.ecs_world.get::<MovingBody>(player_entity) {
            Ok(body) => *body,
            Err(_) => return FrameOutcome::Continue
        };

        let query_radius = player_body.radius + self.largest_asteroid_radius();
        for (_, &other_entity) in self.spatial_map
            .query_around(player_body.position.to_array(), query_radius)
            .filter_map(|it| self.spatial_map.get(it.0)) {
            if self.ecs_world.get::<Asteroid>(other_entity).is_err() {
                continue;
            }
            if let Ok(asteroid_body) = self.ecs_world.get::<MovingBody>(other_entity) {
                if player_body.collides_with(&asteroid_body) {
                    debug!("Player hit by {:?}", other_entity);
                    return FrameOutcome::GameOver;
                }
            }
        }
        FrameOutcome::Continue
    }

    /// Scores the asteroid, replaces it with its children if it has any and removes it
    fn blow_asteroid(&mut self, asteroid_entity: Entity) {
        let asteroid = self.ecs_world.get::<Asteroid>(asteroid_entity).map(|it| *it);
        let body = self.ecs_world.get::<MovingBody>(asteroid_entity).map(|it| *it);
        let (asteroid, body) = match (asteroid, body) {
            (Ok(asteroid), Ok(body)) => (asteroid, body),
            _ => return
        };

        self.score += asteroid.tier.points();

        let asteroid_config = &self.config.asteroid;
        let angle = self.rng.gen_range(asteroid_config.split_angle_min..=asteroid_config.split_angle_max);
        match asteroid.split(&body, angle, asteroid_config) {
            Some(children) => {
                trace!("{:?} asteroid split by {} degrees", asteroid.tier, angle);
                for (child, child_body) in children {
                    self.spawn_asteroid_body(child, child_body);
                }
            },
            None => trace!("{:?} asteroid destroyed", asteroid.tier)
        }

        self.kill_entity(asteroid_entity);
    }
}
