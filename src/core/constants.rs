// Tick and timing
/// Longest frame a single `update` will simulate (seconds).
pub const MAX_TICK_SECONDS: f64 = 0.1;
/// Frame interval the terminal host aims for (~60 FPS).
pub const FRAME_INTERVAL_MS: u64 = 16;

// Jump physics (pixels, seconds; y grows downward)
pub const DEFAULT_GRAVITY: f64 = 1300.0;
pub const DEFAULT_JUMP_FORCE: f64 = -600.0;
pub const DEFAULT_JUMP_HOLD_IMPULSE: f64 = -400.0;
pub const DEFAULT_MAX_JUMP_HOLD_DURATION: f64 = 0.25;
pub const DEFAULT_MAX_FALL_SPEED: f64 = 720.0;

// Obstacles and difficulty
pub const DEFAULT_BASE_OBSTACLE_SPEED: f64 = 200.0;
pub const DEFAULT_MAX_OBSTACLE_SPEED: f64 = 640.0;
pub const DEFAULT_OBSTACLE_SPEED_TIME_RAMP: f64 = 2.0;
pub const DEFAULT_OBSTACLE_SPEED_SCORE_FACTOR: f64 = 50.0;
pub const DEFAULT_OBSTACLE_SPAWN_MIN_DELAY: f64 = 0.5;
pub const DEFAULT_OBSTACLE_SPAWN_MAX_DELAY: f64 = 1.5;
pub const DEFAULT_OBSTACLE_SPAWN_Y_OFFSET: f64 = 2.0;
pub const DEFAULT_STYLE_SCORE_STEP: u32 = 100;

// Collision boxes as a fraction of the visual size
pub const DEFAULT_COLLIDER_WIDTH_RATIO: f64 = 0.65;
pub const DEFAULT_COLLIDER_HEIGHT_RATIO: f64 = 0.82;

// Scoring
pub const DEFAULT_SCORE_RATE_PER_SECOND: f64 = 10.0;
pub const DEFAULT_SCORE_POSITION_WEIGHT: f64 = 1.0;

// Run-in after the countdown
pub const DEFAULT_RUN_IN_SPEED: f64 = 300.0;
pub const DEFAULT_RUN_IN_TARGET_RATIO: f64 = 0.5;

// Visual sizes (pixels)
pub const DEFAULT_PLAYER_WIDTH: f64 = 72.0;
pub const DEFAULT_PLAYER_HEIGHT: f64 = 72.0;
pub const DEFAULT_OBSTACLE_WIDTH: f64 = 38.0;
pub const DEFAULT_OBSTACLE_HEIGHT: f64 = 58.0;
pub const DEFAULT_FLOOR_HEIGHT: f64 = 32.0;

// Cosmetics
pub const DEFAULT_BACKGROUND_SPEED_FACTOR: f64 = 0.3;
pub const DEFAULT_DAY_NIGHT_CYCLE_SECONDS: f64 = 60.0;

// Match flow
pub const DEFAULT_COUNTDOWN_SECONDS: f64 = 3.0;
pub const DEFAULT_READY_DELAY_SECONDS: f64 = 1.0;

// Default lane geometry for the terminal host (one lane per player)
pub const LANE_WIDTH: f64 = 1280.0;
pub const LANE_HEIGHT: f64 = 352.0;
