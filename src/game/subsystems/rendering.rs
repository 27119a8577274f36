use crate::game::{
    components::*,
    constants::*,
    AsteroidGame,
    SessionState
};
use crate::rendering::bresenham::{BresenhamCircleDrawer, LineStripRasterizer};
use crate::rendering::fonts::font_align::{HorizontalAlignment, VerticalAlignment};
use crate::rendering::fonts::vector_font::TextDrawer;
use crate::rendering::shapes::fill_rectangle;
use crate::rendering::transform::Transform;
use crate::window::RetroBlitContext;

const HUD_MARGIN: i32 = 4;

impl AsteroidGame {
    /// Draws the current frame. Runs every frame, paused or not.
    pub fn render(&mut self, ctx: &mut RetroBlitContext) {
        ctx.clear(BACKGROUND_COLOR);

        for entity in self.pools.drawable.iter() {
            let body = match self.ecs_world.get::<MovingBody>(entity) {
                Ok(body) => *body,
                Err(_) => continue
            };

            if self.ecs_world.get::<Player>(entity).is_ok() {
                LineStripRasterizer::create(ctx)
                    .with_color(PLAYER_COLOR)
                    .with_transform(
                        Transform::from_angle_translation_scale(
                            body.rotation,
                            body.position,
                            body.radius
                        )
                    )
                    .rasterize_slice(true, PLAYER_POINTS);
            } else {
                let color = if self.ecs_world.get::<Shot>(entity).is_ok() {
                    SHOT_COLOR
                } else {
                    ASTEROID_COLOR
                };
                BresenhamCircleDrawer::create(ctx)
                    .with_position((body.position.x.round() as i32, body.position.y.round() as i32))
                    .with_radius(body.radius.round() as i32)
                    .draw(color);
            }
        }

        { // draw score
            let score_text = format!("SCORE {}", self.score);
            self.font.draw_text(ctx, HUD_MARGIN, HUD_MARGIN, &score_text, TEXT_COLOR);
        }

        let (width, height) = (self.config.screen.width, self.config.screen.height);
        let banner = match (self.session_state, self.paused) {
            (SessionState::GameOver, _) => Some("GAME OVER\nPRESS ENTER TO RESTART"),
            (SessionState::Running, true) => Some("PAUSED"),
            (SessionState::Running, false) => None
        };
        if let Some(banner) = banner {
            let (text_width, text_height) = self.font.measure_text(banner);
            let (box_width, box_height) = (text_width + HUD_MARGIN * 4, text_height + HUD_MARGIN * 4);
            let box_x = (width as i32 - box_width) / 2;
            let box_y = (height as i32 - box_height) / 2;
            fill_rectangle(
                ctx,
                box_x as i16, box_y as i16,
                box_width.max(0) as u16, box_height.max(0) as u16,
                OVERLAY_COLOR
            );
            self.font.draw_text_in_box(
                ctx,
                0, 0,
                width, height,
                HorizontalAlignment::Center,
                VerticalAlignment::Center,
                banner,
                TEXT_COLOR
            );
        }

        self.frames_rendered += 1;
    }
}
