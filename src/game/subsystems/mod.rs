mod collision_handling;
mod cool_down_handling;
mod entity_spawning;
mod life_span_management;
mod object_positioning;
mod player_controls_handling;
mod rendering;
mod space_partitioning;
