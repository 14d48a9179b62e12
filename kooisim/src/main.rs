use kooisim::{Scenario, ScenarioConfig, TrajectoryWriter};
use kooisim::bench_ensemble_step;

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Biofouling and vertical transport of microplastic particles")]
struct Args {
    /// Scenario YAML, looked up under scenarios/ when not found as given
    #[arg(short, long, default_value = "npsg.yaml")]
    file: String,

    /// Override the trajectory CSV path of the scenario
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Time ensemble steps instead of running a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let given = PathBuf::from(file_name);
    if given.exists() {
        return given;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    log::info!("loaded scenario {}", config_path.display());
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_ensemble_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file)?;
    let output_path = args.output.or_else(|| scenario_cfg.output.as_ref().map(|o| PathBuf::from(&o.path)));

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    match output_path {
        Some(path) => {
            let mut writer = TrajectoryWriter::create(&path)?;
            scenario.run(|ens| writer.record(ens))?;
            writer.finish()?;
        }
        None => {
            log::warn!("no output path configured, trajectories are not recorded");
            scenario.run(|_| Ok(()))?;
        }
    }

    Ok(())
}
