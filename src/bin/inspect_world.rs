//! World inspector: loads a saved world file and reports on it.
//!
//! Usage: cargo run --release --bin inspect_world -- --file <PATH> [OPTIONS]
//!
//! Options:
//!   --file <PATH>            Saved world payload (required)
//!   --config <PATH>          Session config JSON (default: built-in defaults)
//!   --ray <X,Y,Z:X,Y,Z>      Pick along the segment and report the hit
//!   --obj <PATH>             Export all chunk meshes as Wavefront OBJ with vertex colors

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use voxsculpt::codec::disk_io;
use voxsculpt::core::logging;
use voxsculpt::core::types::DVec3;
use voxsculpt::math::Aabb;
use voxsculpt::mesh::{ChunkMesh, MeshBuilder};
use voxsculpt::session::{Session, SessionConfig};

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(file) = parse_str_arg(&args, "--file").map(PathBuf::from) else {
        eprintln!("Usage: inspect_world --file <PATH> [--config <PATH>] [--ray X,Y,Z:X,Y,Z] [--obj <PATH>]");
        return ExitCode::FAILURE;
    };
    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match SessionConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to read config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };
    let ray = match parse_str_arg(&args, "--ray").map(|s| parse_segment(&s)) {
        Some(Some(segment)) => Some(segment),
        Some(None) => {
            log::error!("--ray expects X,Y,Z:X,Y,Z");
            return ExitCode::FAILURE;
        }
        None => None,
    };
    let obj_path = parse_str_arg(&args, "--obj").map(PathBuf::from);

    let start = Instant::now();
    let session = match disk_io::load_world(&file)
        .and_then(|(world, metadata)| Session::from_world(config, world, metadata))
    {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to load {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let world = session.world();

    println!("=== World: {} ===", file.display());
    println!("Chunk size: {}", world.chunk_size());
    println!("Chunks:     {}", world.chunk_count());
    println!("Voxels:     {}", world.solid_count());
    if let Some(background) = &session.metadata().background {
        println!("Background: {}", background);
    }
    if !session.metadata().custom_colors.is_empty() {
        println!("Custom colors: {}", session.metadata().custom_colors.join(" "));
    }
    println!();

    let palette = session.palette();
    let meshes = MeshBuilder::new(world, &palette).build_all();
    for mesh in &meshes {
        let solid = world.chunk(mesh.coord).map(|c| c.solid_count()).unwrap_or(0);
        println!(
            "  chunk {:>12}  voxels {:>7}  faces {:>7}",
            mesh.coord.key(),
            solid,
            mesh.face_count()
        );
    }
    let total_faces: usize = meshes.iter().map(ChunkMesh::face_count).sum();
    let bounds = meshes
        .iter()
        .filter_map(|m| m.world_bounds(world.chunk_size()))
        .flat_map(|b| [b.min, b.max])
        .collect::<Vec<_>>();
    println!();
    println!("Faces: {} ({:.1}ms)", total_faces, start.elapsed().as_secs_f64() * 1000.0);
    if let Some(extent) = Aabb::from_points(bounds) {
        println!("Bounds: {} .. {} (extent {})", extent.min, extent.max, extent.extent());
    }

    if let Some((from, to)) = ray {
        match session.pick(from, to) {
            Ok(Some(hit)) => println!(
                "Hit: voxel {} at ({:.3}, {:.3}, {:.3}) normal {}",
                hit.voxel, hit.position.x, hit.position.y, hit.position.z, hit.normal
            ),
            Ok(None) => println!("Hit: none"),
            Err(e) => {
                log::error!("Pick failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = obj_path {
        if let Err(e) = write_obj(&path, &meshes, world.chunk_size()) {
            log::error!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        log::info!("Wrote {} meshes to {}", meshes.len(), path.display());
    }

    ExitCode::SUCCESS
}

/// Vertices carry their color as `v x y z r g b`
fn write_obj(path: &Path, meshes: &[ChunkMesh], chunk_size: u32) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# voxsculpt export")?;

    let mut base = 1u32;
    for mesh in meshes.iter().filter(|m| !m.is_empty()) {
        let origin = mesh.translation(chunk_size);
        writeln!(out, "o chunk_{}_{}_{}", mesh.coord.x, mesh.coord.y, mesh.coord.z)?;
        for vertex in mesh.interleaved() {
            let [x, y, z] = vertex.position;
            let [r, g, b] = vertex.color;
            writeln!(out, "v {} {} {} {} {} {}", x + origin.x, y + origin.y, z + origin.z, r, g, b)?;
        }
        for vertex in mesh.interleaved() {
            let [x, y, z] = vertex.normal;
            writeln!(out, "vn {} {} {}", x, y, z)?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] + base, tri[1] + base, tri[2] + base];
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        base += mesh.vertex_count() as u32;
    }
    out.flush()
}

fn parse_vec3(s: &str) -> Option<DVec3> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<f64>());
    let v = DVec3::new(parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    parts.next().is_none().then_some(v)
}

fn parse_segment(s: &str) -> Option<(DVec3, DVec3)> {
    let (from, to) = s.split_once(':')?;
    Some((parse_vec3(from)?, parse_vec3(to)?))
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
