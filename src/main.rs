//! Command line driver: runs one unit through a locomotor template on flat
//! ground and reports where it ends up.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glam::Vec3;
use locomotor::{init_logging, FlatTerrain, Locomotor, MovementState, TemplateRegistry};
use log::{debug, info};

const BUNDLED_TEMPLATES: &str = include_str!("../demos/templates.json");

/// Drive a single unit with a locomotor template on flat ground
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file of template definitions; the bundled demo set when omitted
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Template to drive
    #[arg(short, long, default_value = "TankLocomotor")]
    template: String,

    /// Unit base speed; 100 uses template values unscaled
    #[arg(long, default_value_t = 100.0)]
    base_speed: f32,

    /// Destination as three coordinates
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true,
          default_values_t = [40.0_f32, 20.0, 0.0])]
    target: Vec<f32>,

    /// Logic ticks to simulate
    #[arg(long, default_value_t = 300)]
    ticks: u32,

    /// Keep station instead of driving to the target
    #[arg(long)]
    maintain: bool,

    /// Height of the flat ground
    #[arg(long, default_value_t = 0.0)]
    ground: f32,

    /// Simulate the unit as damaged
    #[arg(long)]
    damaged: bool,

    /// Write the persisted locomotor state here when done
    #[arg(long)]
    save: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_registry(path: Option<&PathBuf>) -> Result<TemplateRegistry> {
    path.map_or_else(
        || TemplateRegistry::from_json_str(BUNDLED_TEMPLATES).context("loading bundled templates"),
        |file| {
            TemplateRegistry::from_path(file)
                .with_context(|| format!("loading templates from {}", file.display()))
        },
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let registry = load_registry(args.templates.as_ref())?;
    let template = registry.get(&args.template).ok_or_else(|| {
        anyhow!(
            "unknown template `{}`; available: {}",
            args.template,
            registry.names().join(", ")
        )
    })?;
    let target = match args.target.as_slice() {
        [x, y, z] => Vec3::new(*x, *y, *z),
        other => return Err(anyhow!("expected three target coordinates, got {}", other.len())),
    };

    let locomotor = Locomotor::new(template, args.base_speed);
    let terrain = FlatTerrain::new(args.ground);
    let mut state = MovementState {
        translation: Vec3::new(0.0, 0.0, args.ground),
        damaged: args.damaged,
        ..MovementState::default()
    };
    info!(
        "driving `{}` ({:?}) at base speed {}",
        args.template,
        locomotor.template().appearance,
        args.base_speed
    );

    for tick in 1..=args.ticks {
        if args.maintain {
            locomotor.maintain_position(&mut state, &terrain);
        } else if locomotor.move_towards_position(&mut state, &terrain, target, None) {
            info!("arrived at {target} after {} ticks", tick - 1);
            break;
        }
        debug!(
            "tick {tick}: position {} yaw {:.3} speed {:.3} lift {:.3}",
            state.translation, state.yaw, state.speed, state.lift
        );
    }
    info!(
        "final position {} yaw {:.3} speed {:.3}",
        state.translation, state.yaw, state.speed
    );

    if let Some(path) = args.save {
        let bytes = locomotor.save()?;
        fs::write(&path, &bytes)
            .with_context(|| format!("writing locomotor state to {}", path.display()))?;
        info!("wrote {} bytes to {}", bytes.len(), path.display());
    }
    Ok(())
}
