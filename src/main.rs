//! Spheregen CLI - procedural cube-sphere planet generator.
//!
//! Generates the height, normal and biome splat cubemaps plus the sphere
//! mesh, and writes them out for a renderer to pick up.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;

use spheregen::config::{ConfigError, TerrainConfig};
use spheregen::export::{ExportError, export_planet, mesh_file_size};
use spheregen::logging::init_logging;
use spheregen::mesh::{MeshVertex, UvMode, build_sphere_mesh, sphere_mesh_counts};
use spheregen::pipeline::{Pipeline, PipelineError};
use spheregen::terrain::{HEIGHT_CHANNELS, NORMAL_CHANNELS, Planet, SPLAT_CHANNELS};

/// Procedural cube-sphere planet generator.
#[derive(Parser)]
#[command(name = "spheregen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate planet maps and mesh.
    Generate {
        /// TOML configuration file; flags below override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Per-face resolution in pixels.
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of erosion particles.
        #[arg(long)]
        particles: Option<usize>,

        /// Number of erosion timesteps.
        #[arg(long)]
        iterations: Option<u32>,

        /// Box-filter smoothing passes after erosion.
        #[arg(long)]
        smooth: Option<u32>,

        /// Skip hydraulic erosion.
        #[arg(long)]
        skip_erosion: bool,

        /// Mesh vertices along each face edge.
        #[arg(short, long)]
        divisions: Option<u32>,

        /// Texture coordinates written to mesh vertices.
        #[arg(long, value_enum)]
        uv_mode: Option<UvModeArg>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,
    },

    /// Display buffer sizes for a resolution and mesh division count.
    Info {
        /// Per-face resolution in pixels.
        #[arg(short, long, default_value = "512")]
        resolution: u32,

        /// Mesh vertices along each face edge.
        #[arg(short, long, default_value = "64")]
        divisions: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum UvModeArg {
    /// Face-local coordinates for a 6-layer texture array.
    Face,
    /// Coordinates in the 4x3 cross atlas.
    Atlas,
}

impl From<UvModeArg> for UvMode {
    fn from(arg: UvModeArg) -> Self {
        match arg {
            UvModeArg::Face => UvMode::Face,
            UvModeArg::Atlas => UvMode::Atlas,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

struct Overrides {
    resolution: Option<u32>,
    seed: Option<u64>,
    particles: Option<usize>,
    iterations: Option<u32>,
    smooth: Option<u32>,
    skip_erosion: bool,
    divisions: Option<u32>,
    uv_mode: Option<UvModeArg>,
}

impl Overrides {
    fn apply(self, config: &mut TerrainConfig) {
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(particles) = self.particles {
            config.erosion.particles = particles;
        }
        if let Some(iterations) = self.iterations {
            config.erosion.iterations = iterations;
        }
        if let Some(passes) = self.smooth {
            config.smoothing_passes = passes;
        }
        if self.skip_erosion {
            config.erosion.enabled = false;
        }
        if let Some(divisions) = self.divisions {
            config.mesh_divisions = divisions;
        }
        if let Some(mode) = self.uv_mode {
            config.uv_mode = mode.into();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            config,
            resolution,
            seed,
            particles,
            iterations,
            smooth,
            skip_erosion,
            divisions,
            uv_mode,
            output,
            name,
        } => {
            let overrides = Overrides {
                resolution,
                seed,
                particles,
                iterations,
                smooth,
                skip_erosion,
                divisions,
                uv_mode,
            };
            run_generate(config, overrides, output, name)
        }
        Commands::Info {
            resolution,
            divisions,
        } => {
            run_info(resolution, divisions);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_generate(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    output: PathBuf,
    name: String,
) -> Result<(), CliError> {
    let mut config = match &config_path {
        Some(path) => TerrainConfig::load_from_file(path)?,
        None => TerrainConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    println!("Spheregen - Procedural Planet Generator");
    println!("=======================================");
    println!("Resolution: {}x{} per face", config.resolution, config.resolution);
    println!("Seed: {}", config.seed);
    println!("Mesh divisions: {}", config.mesh_divisions);
    if config.erosion.enabled {
        println!(
            "Erosion: {} particles x {} steps",
            config.erosion.particles, config.erosion.iterations
        );
    } else {
        println!("Erosion: SKIPPED");
    }
    println!("Output: {}", output.display());

    let start = Instant::now();

    println!("\nRunning generation pipeline...");
    let mut planet = Planet::new(config.resolution, config.seed);
    Pipeline::from_config(&config).run_with_callbacks(
        &mut planet,
        |name, i, total| println!("  [{}/{}] Starting: {}", i + 1, total, name),
        |name, i, total| println!("  [{}/{}] Completed: {}", i + 1, total, name),
    )?;

    let mesh = build_sphere_mesh(config.mesh_divisions, config.uv_mode);
    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);

    let (min_h, max_h) = planet.height_range();
    println!("Height range: [{:.4}, {:.4}]", min_h, max_h);
    println!(
        "Mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    println!("\nExporting...");
    let export_start = Instant::now();
    let mesh_path = export_planet(&planet, &mesh, &output, &name)?;
    println!("  Exported 18 PNG files: {}_{{height,normal,splat}}_*.png", name);
    println!("  Exported mesh: {}", mesh_path.display());
    println!("Export completed in {:.2?}", export_start.elapsed());

    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
    Ok(())
}

fn run_info(resolution: u32, divisions: u32) {
    let pixels_per_face = resolution as u64 * resolution as u64;
    let total_pixels = pixels_per_face * 6;
    let float_bytes = std::mem::size_of::<f32>() as u64;

    let bytes_height = total_pixels * HEIGHT_CHANNELS as u64 * float_bytes;
    let bytes_normal = total_pixels * NORMAL_CHANNELS as u64 * float_bytes;
    let bytes_splat = total_pixels * SPLAT_CHANNELS as u64 * float_bytes;
    let total_maps = bytes_height + bytes_normal + bytes_splat;

    let (vertices, triangles) = sphere_mesh_counts(divisions.max(2));
    let bytes_vertices = (vertices * std::mem::size_of::<MeshVertex>()) as u64;
    let bytes_indices = (triangles * 3 * std::mem::size_of::<u32>()) as u64;

    let mb = |b: u64| b as f64 / 1024.0 / 1024.0;

    println!("Spheregen - Planet Configuration Info");
    println!("=====================================");
    println!();
    println!("Resolution: {}x{} per face", resolution, resolution);
    println!("Total faces: 6");
    println!();
    println!("Pixel counts:");
    println!("  Per face:  {:>12} pixels", pixels_per_face);
    println!("  Total:     {:>12} pixels", total_pixels);
    println!();
    println!("Map memory (f32 channels):");
    println!("  Height (1):  {:>12} bytes ({:.2} MB)", bytes_height, mb(bytes_height));
    println!("  Normal (3):  {:>12} bytes ({:.2} MB)", bytes_normal, mb(bytes_normal));
    println!("  Splat (4):   {:>12} bytes ({:.2} MB)", bytes_splat, mb(bytes_splat));
    println!("  Total:       {:>12} bytes ({:.2} MB)", total_maps, mb(total_maps));
    println!();
    println!("Mesh ({} divisions):", divisions.max(2));
    println!("  Vertices:    {:>12}", vertices);
    println!("  Triangles:   {:>12}", triangles);
    println!("  Vertex buf:  {:>12} bytes ({:.2} MB)", bytes_vertices, mb(bytes_vertices));
    println!("  Index buf:   {:>12} bytes ({:.2} MB)", bytes_indices, mb(bytes_indices));
    println!(
        "  mesh.bin:    {:>12} bytes",
        mesh_file_size(vertices, triangles)
    );
}
