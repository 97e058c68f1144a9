use glam::{Vec2, Vec3};

use crate::arena::{Aabb, Arena, ArenaError, RampRise};

pub const PLAYER_SPAWN: &str = "player";
pub const BOT_SPAWNS: [&str; 3] = ["bot_east", "bot_west", "deck"];
pub const PATROL_SPAWN: &str = "patrol";

const HALF_SIZE: f32 = 20.0;
const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 0.5;

/// Build the sandbox arena: a walled square with a corridor, cover, a ramp up
/// to a raised deck and a low step.
pub fn build_test_arena() -> Result<Arena, ArenaError> {
    let mut builder = Arena::builder().floor(0.0);

    // Perimeter
    let (h, t) = (HALF_SIZE, WALL_THICKNESS);
    for (min, max) in [
        (Vec3::new(-h, 0.0, -h - t), Vec3::new(h, WALL_HEIGHT, -h)),
        (Vec3::new(-h, 0.0, h), Vec3::new(h, WALL_HEIGHT, h + t)),
        (Vec3::new(-h - t, 0.0, -h), Vec3::new(-h, WALL_HEIGHT, h)),
        (Vec3::new(h, 0.0, -h), Vec3::new(h + t, WALL_HEIGHT, h)),
    ] {
        builder = builder.block(Aabb::new(min, max));
    }

    // Corridor two units wide running along -Z
    builder = builder
        .block(Aabb::new(Vec3::new(1.0, 0.0, -12.0), Vec3::new(1.5, 3.0, -4.0)))
        .block(Aabb::new(Vec3::new(-1.5, 0.0, -12.0), Vec3::new(-1.0, 3.0, -4.0)));

    // Cover: a jumpable crate and two full-height pillars
    let grey_boxes = [
        (Vec3::new(4.75, 0.5, 2.75), Vec3::new(0.75, 0.5, 0.75)),
        (Vec3::new(-2.5, 2.0, -1.5), Vec3::new(0.5, 2.0, 0.5)),
        (Vec3::new(-8.0, 2.0, 6.0), Vec3::new(0.5, 2.0, 1.0)),
    ];
    for (center, half) in grey_boxes {
        builder = builder.block(Aabb::from_center_half_extents(center, half));
    }

    // Ramp up to a raised deck. The deck is stand-on only so the top of the
    // ramp does not push entities back.
    builder = builder
        .ramp(
            Vec2::new(6.0, -2.0),
            Vec2::new(10.0, 2.0),
            0.0,
            2.0,
            RampRise::PosX,
        )
        .platform(Aabb::new(Vec3::new(10.0, 0.0, -2.0), Vec3::new(14.0, 2.0, 2.0)));

    // Kerb within step height
    builder = builder.platform(Aabb::new(Vec3::new(-6.0, 0.0, 2.0), Vec3::new(-4.0, 0.3, 4.0)));

    builder
        .spawn(PLAYER_SPAWN, Vec3::new(0.0, 0.0, 8.0))
        .spawn(BOT_SPAWNS[0], Vec3::new(12.0, 0.0, 12.0))
        .spawn(BOT_SPAWNS[1], Vec3::new(-12.0, 0.0, 12.0))
        .spawn(BOT_SPAWNS[2], Vec3::new(12.0, 2.0, 0.0))
        .spawn(PATROL_SPAWN, Vec3::new(0.0, 0.0, -2.0))
        .build()
}

/// Loop through the corridor and back around its east side.
pub fn patrol_waypoints() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(0.0, 0.0, -14.0),
        Vec3::new(8.0, 0.0, -14.0),
        Vec3::new(8.0, 0.0, -6.0),
    ]
}
