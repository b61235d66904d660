//! Decode throughput over a synthetic race session.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use f1_telemetry::fixtures::{HeaderSpec, encode_packet, framed};
use f1_telemetry::packets::{
    CarDamageData, CarStatusData, CarTelemetryData, LapData, MotionData, PacketData, SessionData,
};
use f1_telemetry::{ByteOrder, DecodeOptions, census, decode_record, decode_stream};
use std::hint::black_box;

/// One minute of 60 Hz packets for the player's car.
fn session_log() -> Vec<u8> {
    let spec = HeaderSpec {
        player_car_index: 3,
        ..HeaderSpec::default()
    };
    let per_frame = [
        PacketData::Motion(MotionData::default()),
        PacketData::LapData(LapData::default()),
        PacketData::CarTelemetry(CarTelemetryData::default()),
        PacketData::CarStatus(CarStatusData::default()),
        PacketData::CarDamage(CarDamageData::default()),
    ];
    let mut records = Vec::new();
    for frame in 0..3_600u32 {
        if frame % 120 == 0 {
            records.push(encode_packet(
                &spec.for_frame(1, frame),
                &PacketData::Session(SessionData::default()),
            ));
        }
        for data in &per_frame {
            records.push(encode_packet(&spec.for_frame(0, frame), data));
        }
    }
    framed(&records)
}

fn bench_decode_stream(c: &mut Criterion) {
    let log = session_log();
    let mut group = c.benchmark_group("decode_stream");
    group.throughput(Throughput::Bytes(log.len() as u64));
    group.bench_function("full_session", |b| {
        b.iter(|| black_box(decode_stream(black_box(log.as_slice()), &DecodeOptions::default())));
    });
    group.bench_function("census", |b| {
        b.iter(|| black_box(census(black_box(log.as_slice()), ByteOrder::LittleEndian)));
    });
    group.finish();
}

fn bench_single_records(c: &mut Criterion) {
    let spec = HeaderSpec::default();
    let motion = encode_packet(&spec, &PacketData::Motion(MotionData::default()));
    let telemetry = encode_packet(&spec, &PacketData::CarTelemetry(CarTelemetryData::default()));

    c.bench_function("decode_motion_record", |b| {
        b.iter(|| black_box(decode_record(black_box(&motion), ByteOrder::LittleEndian)));
    });
    c.bench_function("decode_car_telemetry_record", |b| {
        b.iter(|| black_box(decode_record(black_box(&telemetry), ByteOrder::LittleEndian)));
    });
}

criterion_group!(benches, bench_decode_stream, bench_single_records);
criterion_main!(benches);
