pub const SCREEN_WIDTH: usize = 640;
pub const SCREEN_HEIGHT: usize = 360;
pub const MAX_FPS: u32 = 60;

pub const ASTEROID_MIN_RADIUS: f32 = 10.0;
pub const ASTEROID_SPLIT_ANGLE_MIN: f32 = 20.0;
pub const ASTEROID_SPLIT_ANGLE_MAX: f32 = 50.0;
pub const ASTEROID_SPLIT_SPEED_MULTIPLIER: f32 = 1.2;

pub const ASTEROID_SPAWN_INTERVAL: f32 = 0.8;
pub const ASTEROID_MIN_SPEED: f32 = 20.0;
pub const ASTEROID_MAX_SPEED: f32 = 50.0;
pub const ASTEROID_DIRECTION_JITTER: f32 = 30.0;

pub const PLAYER_RADIUS: f32 = 10.0;
pub const PLAYER_TURN_SPEED: f32 = 300.0;
pub const PLAYER_ACCELERATION: f32 = 200.0;
pub const MAX_PLAYER_VELOCITY: f32 = 150.0;
pub const PLAYER_DRAG: f32 = 0.5;
pub const PLAYER_FIRE_COOL_DOWN: f32 = 0.3;

pub const SHOT_RADIUS: f32 = 2.5;
pub const SHOT_VELOCITY: f32 = 250.0;
pub const SHOT_LIFE_SPAN: f32 = 2.0;

pub const SPATIAL_CELL_SIZE: i32 = 64;

pub const BACKGROUND_COLOR: u8 = 0;
pub const PLAYER_COLOR: u8 = 1;
pub const ASTEROID_COLOR: u8 = 2;
pub const SHOT_COLOR: u8 = 3;
pub const TEXT_COLOR: u8 = 4;
pub const OVERLAY_COLOR: u8 = 5;

pub const PALETTE: &[[u8; 3]] = &[
    [0, 0, 0],
    [255, 255, 255],
    [180, 180, 190],
    [255, 214, 110],
    [130, 255, 170],
    [20, 22, 48]
];

pub const FONT_SCALE: f32 = 2.0;

// ship outline in units of the player radius, nose up
pub const PLAYER_POINTS: &[(f32, f32)] = &[
    (0.0, -1.0),
    (0.667, 1.0),
    (-0.667, 1.0)
];
