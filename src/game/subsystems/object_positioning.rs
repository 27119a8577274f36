use log::trace;
use crate::game::{
    components::*,
    AsteroidGame
};

impl AsteroidGame {
    /// Moves every updatable body. The player wraps around the screen, anything else that
    /// leaves it is gone for good.
    pub fn update_object_positions(&mut self, dt: f32) {
        let width = self.config.screen.width as f32;
        let height = self.config.screen.height as f32;

        let bump_allocator = std::mem::take(&mut self.bump_allocator);
        self.bump_allocator = {
            {
                let mut escaped = bumpalo::collections::Vec::new_in(&bump_allocator);
                for entity in self.pools.updatable.iter() {
                    if let Ok(body) = self.ecs_world.query_one_mut::<&mut MovingBody>(entity) {
                        body.advance(dt);
                        if Some(entity) == self.player_entity {
                            body.wrap_around(width, height);
                        } else if body.is_outside(width, height) {
                            escaped.push(entity);
                        }
                    }
                }
                for entity in escaped.drain(..) {
                    trace!("{:?} left the screen", entity);
                    self.kill_entity(entity);
                }
            }
            bump_allocator
        };
    }
}
