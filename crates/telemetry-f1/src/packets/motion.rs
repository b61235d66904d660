//! Motion packet (id 0).
//!
//! 22 × 60-byte car blocks followed by a 120-byte block describing the
//! player's car only. The player block is selected by `player_car_index`.

use serde::Serialize;

use super::{player_slot, require_block};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{CAR_MOTION_ENTRY_SIZE, HEADER_SIZE, NUM_CARS, PacketKind};

/// Offset of the player-only block.
pub const EXTRA_OFFSET: usize = HEADER_SIZE + NUM_CARS * CAR_MOTION_ENTRY_SIZE;
/// Bytes of the extra block that must be present; `front_wheels_angle` after
/// them is optional.
pub const EXTRA_REQUIRED: usize = 116;

/// Scale of the fixed-point direction components.
const DIRECTION_SCALE: f32 = 32767.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GForce {
    pub lateral: f32,
    pub longitudinal: f32,
    pub vertical: f32,
}

/// Orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Motion of the player's car.
///
/// Wheel arrays are ordered RL, RR, FL, FR.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotionData {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit vector, each component in [-1, 1].
    pub forward_dir: Vec3,
    /// Unit vector, each component in [-1, 1].
    pub right_dir: Vec3,
    pub g_force: GForce,
    pub rotation: Rotation,
    pub suspension_position: [f32; 4],
    pub suspension_velocity: [f32; 4],
    pub suspension_acceleration: [f32; 4],
    pub wheel_speed: [f32; 4],
    pub wheel_slip: [f32; 4],
    pub local_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub angular_acceleration: Vec3,
    /// `None` when the record ends before the last float.
    pub front_wheels_angle: Option<f32>,
}

/// Convert a fixed-point direction component to a float in [-1, 1].
pub fn normalize_direction(raw: i16) -> f32 {
    (f32::from(raw) / DIRECTION_SCALE).clamp(-1.0, 1.0)
}

fn vec3(cursor: &ByteCursor<'_>, offset: usize) -> DecodeResult<Vec3> {
    let [x, y, z] = cursor.f32_array::<3>(offset)?;
    Ok(Vec3 { x, y, z })
}

fn direction(cursor: &ByteCursor<'_>, offset: usize) -> DecodeResult<Vec3> {
    Ok(Vec3 {
        x: normalize_direction(cursor.i16(offset)?),
        y: normalize_direction(cursor.i16(offset + 2)?),
        z: normalize_direction(cursor.i16(offset + 4)?),
    })
}

pub fn decode(cursor: &ByteCursor<'_>, header: &RecordHeader) -> DecodeResult<MotionData> {
    let slot = player_slot(PacketKind::Motion, header)?;
    let car = HEADER_SIZE + slot * CAR_MOTION_ENTRY_SIZE;
    require_block(PacketKind::Motion, cursor, EXTRA_OFFSET, EXTRA_REQUIRED)?;

    let [lateral, longitudinal, vertical] = cursor.f32_array::<3>(car + 36)?;
    let [yaw, pitch, roll] = cursor.f32_array::<3>(car + 48)?;

    let extra = EXTRA_OFFSET;
    let front_wheels_angle = if cursor.fits(extra + 116, 4) {
        Some(cursor.f32(extra + 116)?)
    } else {
        None
    };

    Ok(MotionData {
        position: vec3(cursor, car)?,              // 0-11
        velocity: vec3(cursor, car + 12)?,         // 12-23
        forward_dir: direction(cursor, car + 24)?, // 24-29
        right_dir: direction(cursor, car + 30)?,   // 30-35
        g_force: GForce {
            lateral,
            longitudinal,
            vertical,
        },
        rotation: Rotation { yaw, pitch, roll },
        suspension_position: cursor.f32_array::<4>(extra)?,
        suspension_velocity: cursor.f32_array::<4>(extra + 16)?,
        suspension_acceleration: cursor.f32_array::<4>(extra + 32)?,
        wheel_speed: cursor.f32_array::<4>(extra + 48)?,
        wheel_slip: cursor.f32_array::<4>(extra + 64)?,
        local_velocity: vec3(cursor, extra + 80)?,
        angular_velocity: vec3(cursor, extra + 92)?,
        angular_acceleration: vec3(cursor, extra + 104)?,
        front_wheels_angle,
    })
}
