use crate::game::{
    components::*,
    AsteroidGame
};

impl AsteroidGame {
    pub fn update_space_partitioning(&mut self) {
        for (_, (body, spatial_handle)) in self.ecs_world
            .query::<(&MovingBody, &SpatialHandle)>()
            .iter() {
            self.spatial_map.set_position(spatial_handle.handle, body.position.to_array());
        }
        self.spatial_map.maintain();
    }
}
