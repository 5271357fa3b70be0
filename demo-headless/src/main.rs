use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wildfire_core::grid::TerrainLayout;
use wildfire_core::{ScenarioConfig, Simulation, Terrain};

/// Terrain layout selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    Uniform,
    Noise,
    Partitioned,
}

impl From<Layout> for TerrainLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Uniform => TerrainLayout::Uniform,
            Layout::Noise => TerrainLayout::Noise,
            Layout::Partitioned => TerrainLayout::Partitioned,
        }
    }
}

/// Wildfire spread demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wildfire-demo")]
#[command(about = "Step-driven wildfire spread demo", long_about = None)]
struct Args {
    /// TOML scenario file; command-line flags override its values
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<usize>,

    /// Seed for terrain and weather
    #[arg(short, long)]
    seed: Option<u64>,

    /// Terrain layout
    #[arg(short, long, value_enum)]
    layout: Option<Layout>,

    /// Ignition threshold (higher = harder to ignite)
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Maximum number of spread steps to run
    #[arg(long, default_value_t = 200)]
    steps: u64,

    /// Simulated seconds per clock advance
    #[arg(long, default_value_t = 5.0)]
    dt: f32,

    /// Print the final map as ASCII
    #[arg(short, long)]
    map: bool,
}

fn build_config(args: &Args) -> wildfire_core::Result<ScenarioConfig> {
    let mut config = match &args.config {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(layout) = args.layout {
        config.terrain.layout = layout.into();
    }
    if let Some(threshold) = args.threshold {
        config.spread.ignition_threshold = threshold;
    }
    // Flags may have moved the grid under configured ignition points
    config
        .ignition
        .retain(|&[x, y]| x < config.width && y < config.height);
    config.validate()?;
    Ok(config)
}

fn tile_glyph(sim: &Simulation, x: usize, y: usize) -> char {
    use wildfire_core::BurnStatus;
    let Some(tile) = sim.grid().get(x, y) else {
        return ' ';
    };
    match tile.burn_status() {
        BurnStatus::Burning => '*',
        BurnStatus::Burnt => '#',
        BurnStatus::Extinguished => 'x',
        BurnStatus::Unburned => match tile.terrain() {
            Terrain::Grass => '.',
            Terrain::Shrub => ',',
            Terrain::Tree => 'T',
            Terrain::Water => '~',
        },
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if !args.dt.is_finite() || args.dt <= 0.0 {
        error!("--dt must be positive, got {}", args.dt);
        std::process::exit(1);
    }

    println!("=== Wildfire Spread Demo ===\n");

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid scenario: {}", e);
            std::process::exit(1);
        }
    };
    let needs_center_ignition = config.ignition.is_empty();

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Failed to build simulation: {}", e);
            std::process::exit(1);
        }
    };

    let grid = sim.grid();
    println!(
        "Map: {}x{} tiles, layout {:?}, seed {}",
        grid.width(),
        grid.height(),
        sim.config().terrain.layout,
        sim.config().seed
    );
    for terrain in Terrain::ALL {
        println!("  {:<6} {:>6} tiles", terrain.name(), grid.terrain_count(terrain));
    }

    if needs_center_ignition {
        let (cx, cy) = grid.center();
        // Nearest flammable tile to the centre
        let start = grid
            .iter()
            .filter(|t| t.is_ignitable())
            .min_by_key(|t| t.x().abs_diff(cx) + t.y().abs_diff(cy))
            .map(|t| t.position());
        match start {
            Some((x, y)) => {
                info!("Igniting ({}, {})", x, y);
                sim.ignite(x, y);
            }
            None => {
                println!("\nNothing on this map can burn.");
                return;
            }
        }
    }

    let centre = sim.weather().local_weather(
        (sim.grid().width() / 2) as f32,
        (sim.grid().height() / 2) as f32,
    );
    println!("\nWeather at centre: {}", centre);
    println!(
        "Global risk: {:.2} ({})\n",
        sim.global_risk(),
        sim.risk_level()
    );

    println!(" Step | Time(s) | Ignited | Burning |  Burnt | Risk");
    println!("------|---------|---------|---------|--------|--------------");

    let mut last_step = 0;
    while sim.stats().steps < args.steps {
        let ignited = sim.advance(args.dt);
        let stats = sim.stats();
        if stats.steps == last_step {
            continue;
        }
        last_step = stats.steps;
        println!(
            "{:>5} | {:>7.0} | {:>7} | {:>7} | {:>6} | {:.2} {}",
            stats.steps,
            stats.simulated_time,
            ignited,
            stats.counts.burning,
            stats.counts.burnt,
            sim.global_risk(),
            sim.risk_level()
        );
        if !sim.is_active() {
            break;
        }
    }

    let stats = sim.stats();
    println!("\n=== Summary ===");
    println!("Steps run:      {}", stats.steps);
    println!("Simulated time: {:.0}s", stats.simulated_time);
    println!("Tiles ignited:  {}", stats.total_ignited);
    println!(
        "Final state:    {} unburned, {} burning, {} burnt, {} extinguished",
        stats.counts.unburned, stats.counts.burning, stats.counts.burnt, stats.counts.extinguished
    );
    if sim.is_active() {
        println!("Fire still active after {} steps", args.steps);
    } else {
        println!("Fire burned out");
    }

    if args.map {
        println!();
        for y in 0..sim.grid().height() {
            let row: String = (0..sim.grid().width())
                .map(|x| tile_glyph(&sim, x, y))
                .collect();
            println!("{}", row);
        }
    }
}
