use std::fs;
use std::path::{Path, PathBuf};

use airship::scene::Scene;
use airship::{AirshipAnimator, AnimatorConfig, TrajectorySummary, load_trajectories};
use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::{DVec3, EulerRot};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "airship_cli")]
#[command(about = "Inspect trajectories and bake airship/camera keyframes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summaries of the trajectories in a .npy or .json file
    Inspect {
        file: PathBuf,
        /// Only summarise this trajectory
        #[arg(long)]
        index: Option<usize>,
    },
    /// Animate the airship and chase camera and print the keyframes as JSON
    Animate {
        /// JSON animator configuration; unspecified fields use defaults
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        trajectory: Option<PathBuf>,
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, allow_hyphen_values = true)]
        start_frame: Option<i64>,
        #[arg(long)]
        airship: Option<String>,
        /// Skip the path preview curve
        #[arg(long)]
        no_curve: bool,
        /// Write JSON here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the default configuration as JSON
    DefaultConfig,
}

#[derive(Serialize)]
struct BakedKey {
    frame: i64,
    location: DVec3,
    rotation_euler: DVec3,
}

#[derive(Serialize)]
struct BakedAnimation {
    frame_start: i64,
    frame_end: i64,
    airship: Vec<BakedKey>,
    camera: Vec<BakedKey>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file, index } => inspect(&file, index),
        Commands::Animate {
            config,
            trajectory,
            index,
            start_frame,
            airship,
            no_curve,
            output,
        } => {
            let mut cfg = match config {
                Some(path) => AnimatorConfig::from_json_file(&path)
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => AnimatorConfig::default(),
            };
            if let Some(trajectory) = trajectory {
                cfg.trajectory_file = trajectory;
            }
            if let Some(index) = index {
                cfg.trajectory_index = index;
            }
            if let Some(start_frame) = start_frame {
                cfg.start_frame = start_frame;
            }
            if let Some(airship) = airship {
                cfg.airship_name = airship;
            }
            if no_curve {
                cfg.create_path_curve = false;
            }
            animate(cfg, output)
        }
        Commands::DefaultConfig => {
            println!("{}", AnimatorConfig::default().to_json_string()?);
            Ok(())
        }
    }
}

fn inspect(file: &Path, index: Option<usize>) -> anyhow::Result<()> {
    let set = load_trajectories(file)?;
    println!("{}: {} trajectories", file.display(), set.len());

    let selected: Vec<usize> = match index {
        Some(index) => {
            set.get(index)?;
            vec![index]
        }
        None => (0..set.len()).collect(),
    };

    for i in selected {
        let trajectory = set.get(i)?;
        println!("\n[{i}]");
        match TrajectorySummary::from_trajectory(trajectory) {
            Some(summary) => println!("{summary}"),
            None => println!("(empty)"),
        }
    }
    Ok(())
}

fn animate(config: AnimatorConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let animator = AirshipAnimator::new(config);
    let trajectory = animator
        .load_trajectory()
        .with_context(|| format!("loading {}", animator.config().trajectory_file.display()))?;

    // Stand-in for the host scene: just the airship model.
    let mut scene = Scene::new();
    scene.add_mesh(&animator.config().airship_name);

    let report = animator.run(&mut scene, &trajectory)?;
    log::info!("Baked {} frames", report.frame_count());

    let airship = scene
        .get(report.airship)
        .context("airship vanished from the scene")?;
    let airship_keys = airship
        .location_track
        .iter()
        .zip(airship.rotation_track.iter())
        .map(|((frame, location), (_, rotation_euler))| BakedKey {
            frame,
            location,
            rotation_euler,
        })
        .collect();

    let camera_keys = report
        .frames
        .clone()
        .filter_map(|frame| {
            let pose = scene.evaluate(report.camera, frame as f64)?;
            let (x, y, z) = pose.rotation.to_euler(EulerRot::XYZ);
            Some(BakedKey {
                frame,
                location: pose.position,
                rotation_euler: DVec3::new(x, y, z),
            })
        })
        .collect();

    let (frame_start, frame_end) = scene.frame_range();
    let baked = BakedAnimation {
        frame_start,
        frame_end,
        airship: airship_keys,
        camera: camera_keys,
    };
    let json = serde_json::to_string_pretty(&baked)?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
