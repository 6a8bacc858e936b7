use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voxsculpt::codec;
use voxsculpt::codec::SceneMetadata;
use voxsculpt::core::types::{DVec3, IVec3, Vec3};
use voxsculpt::mesh::{MeshBuilder, Palette};
use voxsculpt::voxel::{ChunkCoord, VoxelWorld};

/// Solid sphere of radius `radius` centered in chunk (0,0,0)
fn sphere_world(chunk_size: u32, radius: f32) -> VoxelWorld {
    let mut world = VoxelWorld::new(chunk_size).expect("valid chunk size");
    let n = chunk_size as i32;
    let center = chunk_size as f32 * 0.5;
    for y in 0..n {
        for z in 0..n {
            for x in 0..n {
                let d = Vec3::new(x as f32, y as f32, z as f32) + 0.5 - center;
                if d.length() <= radius {
                    world.set_voxel(IVec3::new(x, y, z), ((x + y + z) % 11 + 1) as u8, true);
                }
            }
        }
    }
    world
}

fn bench_mesh_sphere_32(c: &mut Criterion) {
    let world = sphere_world(32, 14.0);
    let palette = Palette::base();

    c.bench_function("mesh_sphere_32", |b| {
        b.iter(|| {
            let builder = MeshBuilder::new(black_box(&world), &palette);
            builder.build_chunk(ChunkCoord::new(0, 0, 0))
        });
    });
}

fn bench_mesh_full_chunk_32(c: &mut Criterion) {
    let world = sphere_world(32, 64.0);
    let palette = Palette::base();

    c.bench_function("mesh_full_chunk_32", |b| {
        b.iter(|| {
            let builder = MeshBuilder::new(black_box(&world), &palette);
            builder.build_chunk(ChunkCoord::new(0, 0, 0))
        });
    });
}

fn bench_raycast_hit(c: &mut Criterion) {
    let world = sphere_world(32, 14.0);

    c.bench_function("raycast_sphere_hit", |b| {
        b.iter(|| {
            world.intersect_ray(
                black_box(DVec3::new(-20.0, 16.3, 15.7)),
                black_box(DVec3::new(60.0, 16.1, 16.2)),
            )
        });
    });
}

fn bench_raycast_miss(c: &mut Criterion) {
    let world = sphere_world(32, 14.0);

    c.bench_function("raycast_long_miss", |b| {
        b.iter(|| {
            world.intersect_ray(
                black_box(DVec3::new(-200.0, 40.5, -200.0)),
                black_box(DVec3::new(200.0, 40.5, 200.0)),
            )
        });
    });
}

fn bench_codec_round_trip(c: &mut Criterion) {
    let world = sphere_world(32, 14.0);
    let metadata = SceneMetadata::default();

    c.bench_function("codec_round_trip_32", |b| {
        b.iter(|| {
            let text = codec::serialize(black_box(&world), &metadata).expect("serialize");
            codec::decode(&text).expect("decode")
        });
    });
}

criterion_group!(
    benches,
    bench_mesh_sphere_32,
    bench_mesh_full_chunk_32,
    bench_raycast_hit,
    bench_raycast_miss,
    bench_codec_round_trip,
);
criterion_main!(benches);
