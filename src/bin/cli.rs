// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Clip CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use polyframe_clip::{clip_mesh, io, ClipConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "polyframe-clip")]
#[command(about = "Polyframe Clip - split mesh faces along an opposing mesh", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the faces of TARGET along the triangles of CUTTER
    Clip {
        /// Mesh whose faces are split (.stl or .json)
        target: PathBuf,

        /// Mesh providing the cutting triangles (.stl or .json)
        cutter: PathBuf,

        /// Output file (.stl or .json)
        #[arg(short, long)]
        output: PathBuf,

        /// Tolerance file, defaults to ./clip.toml when present
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Clip normal groups on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Print mesh statistics
    Info {
        /// Mesh file (.stl or .json)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match &cli.command {
        Commands::Clip {
            target,
            cutter,
            output,
            config,
            sequential,
        } => clip_command(target, cutter, output, config.as_deref(), *sequential),
        Commands::Info { file } => info_command(file),
    }
}

fn clip_command(
    target: &Path,
    cutter: &Path,
    output: &Path,
    config: Option<&Path>,
    sequential: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => ClipConfig::from_file(path)?,
        None => ClipConfig::load()?,
    };
    if sequential {
        config.parallel = false;
    }

    let target_mesh = io::read_mesh(target, config.weld_epsilon)
        .with_context(|| format!("Failed to read target mesh: {:?}", target))?;
    let cutter_mesh = io::read_mesh(cutter, config.weld_epsilon)
        .with_context(|| format!("Failed to read cutter mesh: {:?}", cutter))?;

    let start = Instant::now();
    let result = clip_mesh(&target_mesh, &cutter_mesh, &config).context("Clipping failed")?;
    let elapsed = start.elapsed();

    io::write_mesh(output, &result.triangles)
        .with_context(|| format!("Failed to write output: {:?}", output))?;

    println!("{} {}", "Target:".bold(), target.display().to_string().cyan());
    println!("{} {}", "Cutter:".bold(), cutter.display().to_string().cyan());
    println!(
        "  {} faces -> {} fragments in {} normal groups ({} coplanar)",
        target_mesh.face_count(),
        result.triangles.len().to_string().green(),
        result.groups,
        result.coplanar_groups
    );
    println!(
        "  area {:.6} -> {:.6}",
        target_mesh.surface_area(),
        result.surface_area()
    );
    println!("  clipped in {:.2?}", elapsed);
    println!("{} {}", "✅".green(), output.display().to_string().green().bold());

    Ok(())
}

fn info_command(file: &Path) -> Result<()> {
    let mesh = io::read_mesh(file, ClipConfig::default().weld_epsilon)
        .with_context(|| format!("Failed to read mesh: {:?}", file))?;
    let aabb = mesh.bounding_box();
    let groups = mesh.group_by_normal(ClipConfig::default().normal_epsilon);

    println!("{} {}", "File:".bold(), file.display().to_string().cyan());
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Faces: {}", mesh.face_count());
    println!("  Normal groups: {}", groups.len());
    println!("  Surface area: {:.6}", mesh.surface_area());
    if mesh.vertex_count() > 0 {
        println!(
            "  Bounds: [{:.4}, {:.4}, {:.4}] - [{:.4}, {:.4}, {:.4}]",
            aabb.mins.x, aabb.mins.y, aabb.mins.z, aabb.maxs.x, aabb.maxs.y, aabb.maxs.z
        );
    }

    Ok(())
}
