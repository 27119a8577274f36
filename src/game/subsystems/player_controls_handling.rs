use crate::game::{components::*, AsteroidGame};
use crate::math_utils::{heading, CapLength};
use crate::window::{KeyCode, RetroBlitContext};

impl AsteroidGame {
    pub fn update_player_controls(&mut self, ctx: &RetroBlitContext, dt: f32) {
        if let Some(player_entity) = self.player_entity {
            let player_config = &self.config.player;

            let mut angle_change = 0.0;
            if ctx.is_key_pressed(KeyCode::A) || ctx.is_key_pressed(KeyCode::Left) {
                angle_change -= dt * player_config.turn_speed;
            }
            if ctx.is_key_pressed(KeyCode::D) || ctx.is_key_pressed(KeyCode::Right) {
                angle_change += dt * player_config.turn_speed;
            }

            let mut throttle = 0.0;
            if ctx.is_key_pressed(KeyCode::W) || ctx.is_key_pressed(KeyCode::Up) {
                throttle += 1.0;
            }
            if ctx.is_key_pressed(KeyCode::S) || ctx.is_key_pressed(KeyCode::Down) {
                throttle -= 1.0;
            }

            if let Ok((_, body)) = self.ecs_world
                .query_one_mut::<(&Player, &mut MovingBody)>(player_entity) {
                body.rotation = (body.rotation + angle_change).rem_euclid(360.0);

                if throttle != 0.0 {
                    body.velocity += heading(body.rotation) * throttle * player_config.acceleration * dt;
                } else {
                    body.velocity *= (1.0 - player_config.drag * dt).max(0.0);
                }
                body.velocity = body.velocity.capped_length(player_config.max_speed);
            }
        }
    }

    pub fn update_player_fire(&mut self, ctx: &RetroBlitContext) {
        if !ctx.is_key_pressed(KeyCode::Space) {
            return;
        }

        if let Some(player_entity) = self.player_entity {
            let fire_cool_down = self.config.player.fire_cool_down;
            let nose_and_direction = self.ecs_world
                .query_one_mut::<(&Player, &MovingBody, &mut FireCoolDown)>(player_entity)
                .ok()
                .and_then(|(_, body, FireCoolDown(amount))| {
                    if *amount <= 0.0 {
                        *amount = fire_cool_down;
                        let direction = heading(body.rotation);
                        Some((body.position + direction * body.radius, direction))
                    } else {
                        None
                    }
                });

            if let Some((position, direction)) = nose_and_direction {
                let velocity = direction * self.config.shot.speed;
                self.spawn_shot(position, velocity);
            }
        }
    }
}
