//! Synthetic record builders.
//!
//! Each `encode_*` function writes a full-size record for one packet kind from
//! the same value type the decoder returns, so tests, benches and fuzz seeds
//! can build inputs without captured logs. Player-selected kinds write the
//! value into the `player_car_index` slot and leave the other slots zeroed.

use crate::cursor::ByteOrder;
use crate::packets::event::DETAILS_OFFSET;
use crate::packets::session_history::{LAPS_OFFSET, STINTS_OFFSET};
use crate::packets::{
    CarDamageData, CarSetupsData, CarStatusData, CarTelemetryData, EventData, EventDetails,
    FinalClassificationData, LapData, MotionData, PacketData, ParticipantsData, SessionData,
    SessionHistoryData, Vec3,
};
use crate::protocol::{
    CAR_DAMAGE_ENTRY_SIZE, CAR_MOTION_ENTRY_SIZE, CAR_SETUP_ENTRY_SIZE, CAR_STATUS_ENTRY_SIZE,
    CAR_TELEMETRY_ENTRY_SIZE, CAR_TELEMETRY_PACKET_SIZE, EVENT_CODE_SIZE,
    FINAL_CLASSIFICATION_ENTRY_SIZE, HEADER_SIZE, LAP_DATA_ENTRY_SIZE, LAP_HISTORY_ENTRY_SIZE,
    MAX_LAP_HISTORY, MAX_TYRE_STINTS, MOTION_PACKET_SIZE, NUM_CARS, PACKET_FORMAT_2021,
    PARTICIPANT_ENTRY_SIZE, PARTICIPANT_NAME_SIZE, SESSION_ASSIST_SIZE,
    SESSION_HISTORY_PACKET_SIZE, TYRE_STINT_ENTRY_SIZE,
};

/// Size of a Session record as written by F1 2021.
pub const SESSION_PACKET_SIZE: usize = 625;
/// Size of an Event record.
pub const EVENT_PACKET_SIZE: usize = 36;
pub const LAP_DATA_PACKET_SIZE: usize = HEADER_SIZE + NUM_CARS * LAP_DATA_ENTRY_SIZE;
pub const PARTICIPANTS_PACKET_SIZE: usize = HEADER_SIZE + 1 + NUM_CARS * PARTICIPANT_ENTRY_SIZE;
pub const CAR_SETUPS_PACKET_SIZE: usize = HEADER_SIZE + NUM_CARS * CAR_SETUP_ENTRY_SIZE;
pub const CAR_STATUS_PACKET_SIZE: usize = HEADER_SIZE + NUM_CARS * CAR_STATUS_ENTRY_SIZE;
pub const FINAL_CLASSIFICATION_PACKET_SIZE: usize =
    HEADER_SIZE + 1 + NUM_CARS * FINAL_CLASSIFICATION_ENTRY_SIZE;
pub const CAR_DAMAGE_PACKET_SIZE: usize = HEADER_SIZE + NUM_CARS * CAR_DAMAGE_ENTRY_SIZE;

/// Header field values for a synthetic record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderSpec {
    pub packet_format: u16,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    pub packet_type: u8,
    pub session_uid: u64,
    pub session_time: f32,
    pub frame_id: u32,
    pub player_car_index: u8,
    pub secondary_player_car_index: u8,
}

impl Default for HeaderSpec {
    fn default() -> Self {
        Self {
            packet_format: PACKET_FORMAT_2021,
            game_major_version: 1,
            game_minor_version: 0,
            packet_version: 1,
            packet_type: 0,
            session_uid: 0,
            session_time: 0.0,
            frame_id: 0,
            player_car_index: 0,
            secondary_player_car_index: 255,
        }
    }
}

impl HeaderSpec {
    /// Copy with a different packet type and frame.
    pub fn for_frame(&self, packet_type: u8, frame_id: u32) -> Self {
        Self {
            packet_type,
            frame_id,
            ..*self
        }
    }

    fn player_slot(&self) -> usize {
        usize::from(self.player_car_index)
    }
}

/// Offset-addressed writer that grows its buffer as fields are placed.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    buf: Vec<u8>,
    order: ByteOrder,
}

macro_rules! put_num {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(&mut self, offset: usize, value: $ty) -> &mut Self {
                let bytes = match self.order {
                    ByteOrder::LittleEndian => value.to_le_bytes(),
                    ByteOrder::BigEndian => value.to_be_bytes(),
                };
                self.bytes(offset, &bytes)
            }
        )*
    };
}

impl RecordBuilder {
    /// Header only, `HEADER_SIZE` bytes.
    pub fn new(spec: &HeaderSpec, order: ByteOrder) -> Self {
        let mut builder = Self {
            buf: Vec::with_capacity(HEADER_SIZE),
            order,
        };
        builder
            .u16(0, spec.packet_format)
            .u8(2, spec.game_major_version)
            .u8(3, spec.game_minor_version)
            .u8(4, spec.packet_version)
            .u8(5, spec.packet_type)
            .u64(6, spec.session_uid)
            .f32(14, spec.session_time)
            .u32(18, spec.frame_id)
            .u8(22, spec.player_car_index)
            .u8(23, spec.secondary_player_car_index);
        builder
    }

    /// Little-endian record with the buffer zero-filled to `len`.
    pub fn sized(spec: &HeaderSpec, len: usize) -> Self {
        let mut builder = Self::new(spec, ByteOrder::LittleEndian);
        builder.resize(len);
        builder
    }

    /// Grow with zeros or cut to exactly `len` bytes.
    pub fn resize(&mut self, len: usize) -> &mut Self {
        self.buf.resize(len, 0);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn bytes(&mut self, offset: usize, bytes: &[u8]) -> &mut Self {
        let end = offset.saturating_add(bytes.len());
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        if let Some(dst) = self.buf.get_mut(offset..end) {
            dst.copy_from_slice(bytes);
        }
        self
    }

    pub fn u8(&mut self, offset: usize, value: u8) -> &mut Self {
        self.bytes(offset, &[value])
    }

    pub fn i8(&mut self, offset: usize, value: i8) -> &mut Self {
        self.bytes(offset, &value.to_le_bytes())
    }

    put_num!(u16: u16, i16: i16, u32: u32, u64: u64, f32: f32, f64: f64);

    pub fn f32s(&mut self, offset: usize, values: &[f32]) -> &mut Self {
        for (i, v) in values.iter().enumerate() {
            self.f32(offset + i * 4, *v);
        }
        self
    }

    pub fn u16s(&mut self, offset: usize, values: &[u16]) -> &mut Self {
        for (i, v) in values.iter().enumerate() {
            self.u16(offset + i * 2, *v);
        }
        self
    }

    pub fn vec3(&mut self, offset: usize, v: &Vec3) -> &mut Self {
        self.f32s(offset, &[v.x, v.y, v.z])
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// The 24 header bytes alone.
pub fn header_bytes(spec: &HeaderSpec, order: ByteOrder) -> Vec<u8> {
    RecordBuilder::new(spec, order).build()
}

fn direction_raw(v: f32) -> i16 {
    (v.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

pub fn encode_motion(spec: &HeaderSpec, data: &MotionData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, MOTION_PACKET_SIZE);
    let car = HEADER_SIZE + spec.player_slot() * CAR_MOTION_ENTRY_SIZE;
    b.vec3(car, &data.position).vec3(car + 12, &data.velocity);
    for (i, v) in [data.forward_dir, data.right_dir].iter().enumerate() {
        let o = car + 24 + i * 6;
        b.i16(o, direction_raw(v.x))
            .i16(o + 2, direction_raw(v.y))
            .i16(o + 4, direction_raw(v.z));
    }
    let g = data.g_force;
    let r = data.rotation;
    b.f32s(car + 36, &[g.lateral, g.longitudinal, g.vertical])
        .f32s(car + 48, &[r.yaw, r.pitch, r.roll]);

    let extra = HEADER_SIZE + NUM_CARS * CAR_MOTION_ENTRY_SIZE;
    b.f32s(extra, &data.suspension_position)
        .f32s(extra + 16, &data.suspension_velocity)
        .f32s(extra + 32, &data.suspension_acceleration)
        .f32s(extra + 48, &data.wheel_speed)
        .f32s(extra + 64, &data.wheel_slip)
        .vec3(extra + 80, &data.local_velocity)
        .vec3(extra + 92, &data.angular_velocity)
        .vec3(extra + 104, &data.angular_acceleration);
    match data.front_wheels_angle {
        Some(angle) => {
            b.f32(extra + 116, angle);
        }
        None => {
            b.resize(extra + 116);
        }
    }
    b.build()
}

pub fn encode_session(spec: &HeaderSpec, data: &SessionData) -> Vec<u8> {
    encode_session_with_len(spec, data, SESSION_PACKET_SIZE)
}

/// Session record of `len` bytes; the assist block goes at `len - 9`.
pub fn encode_session_with_len(spec: &HeaderSpec, data: &SessionData, len: usize) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, len);
    let o = HEADER_SIZE;
    b.u8(o, data.weather)
        .i8(o + 1, data.track_temp)
        .i8(o + 2, data.air_temp)
        .u8(o + 3, data.total_laps)
        .u16(o + 4, data.track_length)
        .u8(o + 6, data.session_type)
        .i8(o + 7, data.track_id)
        .u8(o + 8, data.formula)
        .u16(o + 9, data.session_time_left)
        .u16(o + 11, data.session_duration)
        .u8(o + 13, data.pit_speed_limit)
        .u8(o + 14, data.game_paused)
        .u8(o + 15, data.is_spectating)
        .u8(o + 16, data.spectator_car_index)
        .u8(o + 17, data.sli_pro_native_support)
        .u8(o + 18, data.num_marshal_zones);
    let a = data.assist_settings;
    let assist = [
        a.steering_assist,
        a.braking_assist,
        a.gearbox_assist,
        a.pit_assist,
        a.pit_release_assist,
        a.ers_assist,
        a.drs_assist,
        a.racing_line,
        a.racing_line_type,
    ];
    b.bytes(len.saturating_sub(SESSION_ASSIST_SIZE), &assist);
    b.build()
}

pub fn encode_lap_data(spec: &HeaderSpec, data: &LapData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, LAP_DATA_PACKET_SIZE);
    let o = HEADER_SIZE + spec.player_slot() * LAP_DATA_ENTRY_SIZE;
    b.u32(o, data.last_lap_time_in_ms)
        .u32(o + 4, data.current_lap_time_in_ms)
        .u16(o + 8, data.sector1_time_in_ms)
        .u16(o + 10, data.sector2_time_in_ms)
        .f32s(
            o + 12,
            &[data.lap_distance, data.total_distance, data.safety_car_delta],
        )
        .bytes(
            o + 24,
            &[
                data.car_position,
                data.current_lap_num,
                data.pit_status,
                data.num_pit_stops,
                data.sector,
                data.current_lap_invalid,
                data.penalties,
                data.warnings,
                data.num_unserved_drive_through_pens,
                data.num_unserved_stop_go_pens,
                data.grid_position,
                data.driver_status,
                data.result_status,
                data.pit_lane_timer_active,
            ],
        )
        .u16(o + 38, data.pit_lane_time_in_lane_in_ms)
        .u16(o + 40, data.pit_stop_timer_in_ms)
        .u8(o + 42, data.pit_stop_should_serve_pen);
    b.build()
}

pub fn encode_event(spec: &HeaderSpec, data: &EventData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, EVENT_PACKET_SIZE);
    let mut code = [0u8; EVENT_CODE_SIZE];
    for (dst, src) in code.iter_mut().zip(data.code.bytes()) {
        *dst = src;
    }
    b.bytes(HEADER_SIZE, &code);

    let o = DETAILS_OFFSET;
    match data.details {
        Some(EventDetails::FastestLap {
            vehicle_idx,
            lap_time,
        }) => {
            b.u8(o, vehicle_idx).f32(o + 1, lap_time);
        }
        Some(
            EventDetails::Retirement { vehicle_idx }
            | EventDetails::RaceWinner { vehicle_idx }
            | EventDetails::TeamMateInPits { vehicle_idx },
        ) => {
            b.u8(o, vehicle_idx);
        }
        Some(EventDetails::Penalty {
            penalty_type,
            infringement_type,
            vehicle_idx,
            other_vehicle_idx,
            time,
            lap_num,
            places_gained,
        }) => {
            b.bytes(
                o,
                &[
                    penalty_type,
                    infringement_type,
                    vehicle_idx,
                    other_vehicle_idx,
                    time,
                    lap_num,
                    places_gained,
                ],
            );
        }
        Some(EventDetails::SpeedTrap {
            vehicle_idx,
            speed,
            is_overall_fastest_in_session,
        }) => {
            b.u8(o, vehicle_idx)
                .f32(o + 1, speed)
                .u8(o + 5, is_overall_fastest_in_session);
        }
        Some(EventDetails::StartLights { num_lights }) => {
            b.u8(o, num_lights);
        }
        Some(EventDetails::Buttons { button_status }) => {
            b.u32(o, button_status);
        }
        None => {}
    }
    b.build()
}

pub fn encode_participants(spec: &HeaderSpec, data: &ParticipantsData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, PARTICIPANTS_PACKET_SIZE);
    b.u8(HEADER_SIZE, data.num_active_cars);
    for (i, p) in data.participants.iter().take(NUM_CARS).enumerate() {
        let o = HEADER_SIZE + 1 + i * PARTICIPANT_ENTRY_SIZE;
        b.bytes(
            o,
            &[
                p.ai_controlled,
                p.driver_id,
                p.network_id,
                p.team_id,
                p.my_team,
                p.race_number,
                p.nationality,
            ],
        );
        let mut name = [0u8; PARTICIPANT_NAME_SIZE];
        for (dst, src) in name
            .iter_mut()
            .take(PARTICIPANT_NAME_SIZE - 1)
            .zip(p.name.bytes())
        {
            *dst = src;
        }
        b.bytes(o + 7, &name);
    }
    b.build()
}

pub fn encode_car_setups(spec: &HeaderSpec, data: &CarSetupsData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, CAR_SETUPS_PACKET_SIZE);
    for (i, s) in data.car_setups.iter().take(NUM_CARS).enumerate() {
        let o = HEADER_SIZE + i * CAR_SETUP_ENTRY_SIZE;
        b.bytes(o, &[s.front_wing, s.rear_wing, s.on_throttle, s.off_throttle])
            .f32s(
                o + 4,
                &[s.front_camber, s.rear_camber, s.front_toe, s.rear_toe],
            )
            .bytes(
                o + 20,
                &[
                    s.front_suspension,
                    s.rear_suspension,
                    s.front_anti_roll_bar,
                    s.rear_anti_roll_bar,
                    s.front_suspension_height,
                    s.rear_suspension_height,
                    s.brake_pressure,
                    s.brake_bias,
                ],
            )
            .f32s(
                o + 28,
                &[
                    s.rear_left_tyre_pressure,
                    s.rear_right_tyre_pressure,
                    s.front_left_tyre_pressure,
                    s.front_right_tyre_pressure,
                ],
            )
            .u8(o + 44, s.ballast)
            .f32(o + 45, s.fuel_load);
    }
    b.build()
}

pub fn encode_car_telemetry(spec: &HeaderSpec, data: &CarTelemetryData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, CAR_TELEMETRY_PACKET_SIZE);
    let o = HEADER_SIZE + spec.player_slot() * CAR_TELEMETRY_ENTRY_SIZE;
    b.u16(o, data.speed)
        .f32s(o + 2, &[data.throttle, data.steer, data.brake])
        .u8(o + 14, data.clutch)
        .i8(o + 15, data.gear)
        .u16(o + 16, data.engine_rpm)
        .u8(o + 18, data.drs)
        .u8(o + 19, data.rev_lights_percent)
        .u16(o + 20, data.rev_lights_bit_value)
        .u16s(o + 22, &data.brakes_temperature)
        .bytes(o + 30, &data.tyres_surface_temperature)
        .bytes(o + 34, &data.tyres_inner_temperature)
        .u16(o + 38, data.engine_temperature)
        .f32s(o + 40, &data.tyres_pressure)
        .bytes(o + 56, &data.surface_type);
    let footer = HEADER_SIZE + NUM_CARS * CAR_TELEMETRY_ENTRY_SIZE;
    b.u8(footer, data.mfd_panel_index)
        .u8(footer + 1, data.mfd_panel_index_secondary_player)
        .i8(footer + 2, data.suggested_gear);
    b.build()
}

pub fn encode_car_status(spec: &HeaderSpec, data: &CarStatusData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, CAR_STATUS_PACKET_SIZE);
    let o = HEADER_SIZE + spec.player_slot() * CAR_STATUS_ENTRY_SIZE;
    b.bytes(
        o,
        &[
            data.traction_control,
            data.anti_lock_brakes,
            data.fuel_mix,
            data.front_brake_bias,
            data.pit_limiter_status,
        ],
    )
    .f32s(
        o + 5,
        &[data.fuel_in_tank, data.fuel_capacity, data.fuel_remaining_laps],
    )
    .u16(o + 17, data.max_rpm)
    .u16(o + 19, data.idle_rpm)
    .u8(o + 21, data.max_gears)
    .u8(o + 22, data.drs_allowed)
    .u16(o + 23, data.drs_activation_distance)
    .u8(o + 25, data.actual_tyre_compound)
    .u8(o + 26, data.visual_tyre_compound)
    .u8(o + 27, data.tyres_age_laps)
    .i8(o + 28, data.vehicle_fia_flags)
    .f32(o + 29, data.ers_store_energy)
    .u8(o + 33, data.ers_deploy_mode)
    .f32s(
        o + 34,
        &[
            data.ers_harvested_this_lap_mguk,
            data.ers_harvested_this_lap_mguh,
            data.ers_deployed_this_lap,
        ],
    )
    .u8(o + 46, data.network_paused);
    b.build()
}

pub fn encode_final_classification(spec: &HeaderSpec, data: &FinalClassificationData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, FINAL_CLASSIFICATION_PACKET_SIZE);
    b.u8(HEADER_SIZE, data.num_cars);
    let o = HEADER_SIZE + 1 + spec.player_slot() * FINAL_CLASSIFICATION_ENTRY_SIZE;
    b.bytes(
        o,
        &[
            data.position,
            data.num_laps,
            data.grid_position,
            data.points,
            data.num_pit_stops,
            data.result_status,
        ],
    )
    .u32(o + 6, data.best_lap_time_in_ms)
    .f64(o + 10, data.total_race_time)
    .u8(o + 18, data.penalties_time)
    .u8(o + 19, data.num_penalties)
    .u8(o + 20, data.num_tyre_stints)
    .bytes(o + 21, &data.tyre_stints_actual)
    .bytes(o + 29, &data.tyre_stints_visual)
    .bytes(o + 37, &data.tyre_stints_end_laps);
    b.build()
}

pub fn encode_car_damage(spec: &HeaderSpec, data: &CarDamageData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, CAR_DAMAGE_PACKET_SIZE);
    let o = HEADER_SIZE + spec.player_slot() * CAR_DAMAGE_ENTRY_SIZE;
    b.f32s(o, &data.tyres_wear)
        .bytes(o + 16, &data.tyres_damage)
        .bytes(o + 20, &data.brakes_damage)
        .bytes(
            o + 24,
            &[
                data.front_left_wing_damage,
                data.front_right_wing_damage,
                data.rear_wing_damage,
                data.floor_damage,
                data.diffuser_damage,
                data.sidepod_damage,
                data.drs_fault,
                data.gear_box_damage,
                data.engine_damage,
                data.engine_mguh_wear,
                data.engine_es_wear,
                data.engine_ce_wear,
                data.engine_ice_wear,
                data.engine_mguk_wear,
                data.engine_tc_wear,
            ],
        );
    b.build()
}

pub fn encode_session_history(spec: &HeaderSpec, data: &SessionHistoryData) -> Vec<u8> {
    let mut b = RecordBuilder::sized(spec, SESSION_HISTORY_PACKET_SIZE);
    b.bytes(
        HEADER_SIZE,
        &[
            data.car_idx,
            data.num_laps,
            data.num_tyre_stints,
            data.best_lap_time_lap_num,
            data.best_sector1_lap_num,
            data.best_sector2_lap_num,
            data.best_sector3_lap_num,
        ],
    );
    for (i, lap) in data.lap_history.iter().take(MAX_LAP_HISTORY).enumerate() {
        let o = LAPS_OFFSET + i * LAP_HISTORY_ENTRY_SIZE;
        b.u32(o, lap.lap_time_in_ms)
            .u16s(
                o + 4,
                &[
                    lap.sector1_time_in_ms,
                    lap.sector2_time_in_ms,
                    lap.sector3_time_in_ms,
                ],
            )
            .u8(o + 10, lap.valid_bit_flags());
    }
    for (i, stint) in data.tyre_stints.iter().take(MAX_TYRE_STINTS).enumerate() {
        b.bytes(
            STINTS_OFFSET + i * TYRE_STINT_ENTRY_SIZE,
            &[
                stint.end_lap,
                stint.tyre_actual_compound,
                stint.tyre_visual_compound,
            ],
        );
    }
    b.build()
}

/// Encode any decodable payload under `spec`.
///
/// The header's packet type is taken from the payload, not from `spec`.
pub fn encode_packet(spec: &HeaderSpec, data: &PacketData) -> Vec<u8> {
    let spec = HeaderSpec {
        packet_type: data.kind().id(),
        ..*spec
    };
    match data {
        PacketData::Motion(d) => encode_motion(&spec, d),
        PacketData::Session(d) => encode_session(&spec, d),
        PacketData::LapData(d) => encode_lap_data(&spec, d),
        PacketData::Event(d) => encode_event(&spec, d),
        PacketData::Participants(d) => encode_participants(&spec, d),
        PacketData::CarSetups(d) => encode_car_setups(&spec, d),
        PacketData::CarTelemetry(d) => encode_car_telemetry(&spec, d),
        PacketData::CarStatus(d) => encode_car_status(&spec, d),
        PacketData::FinalClassification(d) => encode_final_classification(&spec, d),
        PacketData::CarDamage(d) => encode_car_damage(&spec, d),
        PacketData::SessionHistory(d) => encode_session_history(&spec, d),
    }
}

/// Length-prefix each record into one log buffer. Records longer than
/// `u16::MAX` are skipped.
pub fn framed<I, R>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut out = Vec::new();
    for record in records {
        let record = record.as_ref();
        if let Ok(len) = u16::try_from(record.len()) {
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(record);
        }
    }
    out
}
