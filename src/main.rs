use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tilelight::{
    Compositor, EditorState, GpuViewerConfig, Grid, InteractiveViewer, InverseQuadratic, Light, LightRegistry,
    ViewerConfig, color::LIGHT_MARKER, level, mark_lights, run_gpu_viewer, save_ppm,
};

#[derive(Parser)]
#[command(name = "tilelight", about = "Grid line-of-sight lighting editor")]
struct Cli {
    /// Level file (`#` = wall). Defaults to a built-in sample level
    #[arg(short, long, global = true)]
    level: Option<PathBuf>,

    /// Linear falloff coefficient `a` in 1 / (1 + a*d + b*d^2)
    #[arg(long, global = true, default_value_t = tilelight::attenuation::inverse_quadratic::DEFAULT_LINEAR)]
    linear: f32,

    /// Quadratic falloff coefficient `b`
    #[arg(long, global = true, default_value_t = tilelight::attenuation::inverse_quadratic::DEFAULT_QUADRATIC)]
    quadratic: f32,

    /// Light as `x,y` or `x,y,r,g,b` (repeatable). Defaults to one light in
    /// the middle of the level
    #[arg(long = "light", global = true)]
    lights: Vec<Light>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive editor in a software (minifb) window
    View {
        /// Window pixels per cell
        #[arg(short, long, default_value_t = 16)]
        scale: usize,
    },
    /// Interactive editor presented through wgpu
    Gpu {
        /// Initial window pixels per cell
        #[arg(short, long, default_value_t = 16.0)]
        scale: f64,
    },
    /// Compute one frame and write it as a PPM image
    Render {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
        /// Image pixels per cell
        #[arg(short, long, default_value_t = 8)]
        scale: usize,
    },
    /// Time sequential vs parallel compositing
    Bench {
        #[arg(short, long, default_value_t = 20)]
        iterations: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let grid = match &cli.level {
        Some(path) => level::load_level(path).with_context(|| format!("loading {}", path.display()))?,
        None => level::parse_level(level::SAMPLE_LEVEL)?,
    };
    let lights = initial_lights(&grid, &cli.lights);
    let compositor = Compositor::with_falloff(InverseQuadratic::with_coefficients(cli.linear, cli.quadratic));

    match cli.command {
        Commands::View { scale } => {
            let editor = editor_state(grid, lights, compositor, cli.level);
            let config = ViewerConfig { scale, ..ViewerConfig::default() };
            InteractiveViewer::new(config, editor)?.run()?;
        }
        Commands::Gpu { scale } => {
            let editor = editor_state(grid, lights, compositor, cli.level);
            let config = GpuViewerConfig { scale, ..GpuViewerConfig::default() };
            run_gpu_viewer(config, editor)?;
        }
        Commands::Render { out, scale } => {
            let mut buffer = compositor.parallel(true).compute(&grid, &lights);
            mark_lights(&mut buffer, &grid, &lights, LIGHT_MARKER);
            save_ppm(&buffer, &out, scale).with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        Commands::Bench { iterations } => run_benchmark(compositor, iterations.max(1))?,
    }

    Ok(())
}

fn initial_lights(grid: &Grid, lights: &[Light]) -> LightRegistry {
    if lights.is_empty() {
        let center = (grid.width() as f32 / 2.0, grid.height() as f32 / 2.0);
        [Light::new(center, (1.0, 0.8, 0.4))].into_iter().collect()
    } else {
        lights.iter().copied().collect()
    }
}

fn editor_state(grid: Grid, lights: LightRegistry, compositor: Compositor, level: Option<PathBuf>) -> EditorState {
    let editor = EditorState::new(grid, lights, compositor);
    match level {
        Some(path) => editor.with_level_path(path),
        None => editor,
    }
}

fn run_benchmark(compositor: Compositor, iterations: u32) -> anyhow::Result<()> {
    println!("=== Compositor Benchmark ===\n");

    let sizes = [(40, 24), (100, 100), (200, 200)];
    let light_counts = [1, 4, 16];

    for (width, height) in sizes {
        // Scattered pillars so rays actually hit walls
        let mut grid = Grid::new(width, height)?;
        for y in (3..height).step_by(7) {
            for x in (3..width).step_by(7) {
                grid.set(x, y, tilelight::CellKind::Wall);
            }
        }

        for count in light_counts {
            let lights: LightRegistry = (0..count)
                .map(|i| {
                    let t = i as f32 / count as f32 * std::f32::consts::TAU;
                    let x = width as f32 / 2.0 + t.cos() * width as f32 / 4.0;
                    let y = height as f32 / 2.0 + t.sin() * height as f32 / 4.0;
                    Light::white((x, y))
                })
                .collect();

            let sequential = compositor.clone().parallel(false);
            let start = Instant::now();
            for _ in 0..iterations {
                let _ = sequential.compute(&grid, &lights);
            }
            let avg_seq_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

            let parallel = compositor.clone().parallel(true);
            let start = Instant::now();
            for _ in 0..iterations {
                let _ = parallel.compute(&grid, &lights);
            }
            let avg_par_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;

            println!("Grid {}x{}, {} lights", width, height, count);
            println!("  Sequential: {:.3} ms/frame ({:.1} FPS)", avg_seq_ms, 1000.0 / avg_seq_ms);
            println!("  Parallel:   {:.3} ms/frame ({:.1} FPS)", avg_par_ms, 1000.0 / avg_par_ms);
            println!("  Speedup: {:.2}x", avg_seq_ms / avg_par_ms);
            println!();
        }
    }

    Ok(())
}
