use crate::config::StudioConfig;
use crate::print_json;
use studio_perf::AnimationConfig;
use studio_perf::OptimizationLevel;
use studio_perf::PerformanceAdvisor;
use studio_perf::probe::DeviceClass;
use studio_perf::probe::StaticProbe;
use studio_perf::probe::SystemProbe;

/// CLI for inspecting the animation budget.
#[derive(Debug, clap::Parser)]
pub struct PerfCli {
    #[command(subcommand)]
    pub cmd: PerfCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum PerfCommand {
    /// Feed a sequence of per-window FPS readings through the advisor and
    /// print the decision after each one.
    Simulate(SimulateArgs),
    /// Report what this host looks like to the device classifier.
    Probe {
        /// Effective connection type to assume, e.g. `4g`.
        #[arg(long)]
        network: Option<String>,
    },
}

#[derive(Debug, clap::Args)]
pub struct SimulateArgs {
    /// Comma-separated FPS readings, one per sampling window.
    #[arg(long, value_delimiter = ',', required = true)]
    pub fps: Vec<u32>,
    #[arg(long)]
    pub memory_gb: Option<f64>,
    #[arg(long)]
    pub cores: Option<u32>,
    #[arg(long)]
    pub network: Option<String>,
    #[arg(long)]
    pub reduced_motion: bool,
    /// Base particle budget to scale.
    #[arg(long, default_value_t = 100)]
    pub particles: u32,
    /// Image URL to decorate with size/quality hints at the end of the run.
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub width: Option<u32>,
}

#[derive(Debug, serde::Serialize)]
struct WindowReport {
    fps: u32,
    level: OptimizationLevel,
    animation: AnimationConfig,
    particles: u32,
}

#[derive(Debug, serde::Serialize)]
struct SimulationReport {
    device: DeviceClass,
    windows: Vec<WindowReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

pub fn run(cli: PerfCli, config: &StudioConfig) -> anyhow::Result<()> {
    match cli.cmd {
        PerfCommand::Simulate(args) => print_json(&simulate(args, config)),
        PerfCommand::Probe { network } => {
            let class = DeviceClass::detect(&SystemProbe { network });
            print_json(&class)
        }
    }
}

fn simulate(args: SimulateArgs, config: &StudioConfig) -> SimulationReport {
    let mut advisor = PerformanceAdvisor::with_system_clock(config.performance.clone());
    let probe = StaticProbe {
        memory_gb: args.memory_gb,
        cores: args.cores,
        network: args.network,
        reduced_motion: args.reduced_motion.then_some(true),
    };
    let device = advisor.detect_device_class(&probe).clone();
    let windows = args
        .fps
        .iter()
        .map(|&fps| {
            advisor.observe_fps(fps);
            WindowReport {
                fps,
                level: advisor.level(),
                animation: advisor.animation_config(),
                particles: advisor.optimal_particle_count(args.particles),
            }
        })
        .collect();
    let image_url = args
        .image
        .as_deref()
        .map(|url| advisor.optimized_image_url(url, args.width, None));
    SimulationReport {
        device,
        windows,
        image_url,
    }
}
