use crate::game::{
    components::*,
    AsteroidGame
};

impl AsteroidGame {
    pub fn update_fire_cool_downs(&mut self, dt: f32) {
        for (_, (FireCoolDown(amount),)) in self.ecs_world
            .query_mut::<(&mut FireCoolDown,)>() {
            if *amount > 0.0 {
                *amount -= dt;
            }
        }
    }
}
