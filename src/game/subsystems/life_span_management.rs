use crate::game::{
    components::*,
    AsteroidGame
};

impl AsteroidGame {
    pub fn update_life_spans(&mut self, dt: f32) {
        let bump_allocator = std::mem::take(&mut self.bump_allocator);
        self.bump_allocator = {
            {
                let mut dead_entities = bumpalo::collections::Vec::new_in(&bump_allocator);
                for (entity, (LifeSpan(amount),)) in self.ecs_world
                    .query_mut::<(&mut LifeSpan,)>() {
                    *amount -= dt;
                    if *amount <= 0.0 {
                        dead_entities.push(entity);
                    }
                }
                for entity in dead_entities.drain(..) {
                    self.kill_entity(entity);
                }
            }
            bump_allocator
        };
    }
}
