use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use antcolony_input::Action;
use antcolony_kernel::{AntColonyEnv, EnvConfig, Environment, TimeLimit};
use antcolony_policy::{FixedPolicy, ForagerPolicy, Policy, RandomPolicy};
use antcolony_tools::{WorldInspector, WorldSummary};

#[derive(Parser)]
#[command(name = "antcolony-cli", about = "CLI tool for the ant colony environment")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML environment configuration; missing keys keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, effective configuration and spaces
    Info,
    /// Run episodes with a scripted policy
    Run {
        /// Number of episodes
        #[arg(short, long, default_value = "1")]
        episodes: u64,
        /// Step cap per episode
        #[arg(short, long, default_value = "1000")]
        max_steps: u64,
        /// Seed of the first episode; episode `i` uses `seed + i`
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(short, long, value_enum, default_value = "trail-follower")]
        policy: PolicyChoice,
        /// Print one JSON object per episode instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the same seeded episode twice and compare final state hashes
    Replay {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "500")]
        ticks: u64,
        /// RNG seed for the environment and policy
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(short, long, value_enum, default_value = "explorer")]
        policy: PolicyChoice,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyChoice {
    TrailFollower,
    Explorer,
    Random,
    Forward,
}

impl PolicyChoice {
    fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyChoice::TrailFollower => Box::new(ForagerPolicy::trail_follower(seed)),
            PolicyChoice::Explorer => Box::new(ForagerPolicy::explorer(seed)),
            PolicyChoice::Random => Box::new(RandomPolicy::new(seed)),
            PolicyChoice::Forward => Box::new(FixedPolicy(Action::MoveForward)),
        }
    }
}

#[derive(Debug, Serialize)]
struct EpisodeReport {
    episode: u64,
    seed: u64,
    policy: String,
    steps: u64,
    max_steps: u64,
    reward: f64,
    terminated: bool,
    truncated: bool,
    summary: WorldSummary,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EnvConfig> {
    match path {
        Some(path) => EnvConfig::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EnvConfig::default()),
    }
}

fn run_episode(
    env: &mut TimeLimit<AntColonyEnv>,
    policy: &mut dyn Policy,
    episode: u64,
    seed: u64,
) -> EpisodeReport {
    let _span = tracing::info_span!("episode", episode, seed).entered();
    let (mut obs, _) = env.reset(Some(seed));
    let last = loop {
        let step = env.step(policy.act(&obs));
        obs = step.observation;
        if step.terminated || step.truncated {
            break step;
        }
    };
    let report = EpisodeReport {
        episode,
        seed,
        policy: policy.name().to_string(),
        steps: env.elapsed_steps(),
        max_steps: env.max_episode_steps(),
        reward: last.reward,
        terminated: last.terminated,
        truncated: last.truncated,
        summary: WorldInspector::summary(env.inner().world()),
    };
    tracing::info!(
        steps = report.steps,
        reward = report.reward,
        terminated = report.terminated,
        "episode finished"
    );
    report
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            let env = AntColonyEnv::new(config)?;
            println!("antcolony-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("configuration:");
            print!("{}", env.config().to_yaml_string()?);
            println!("action space: discrete({})", env.action_space().n);
            let space = env.observation_space();
            println!("observation space: low={:?}", space.low);
            println!("                   high={:?}", space.high);
            println!("{}", WorldInspector::summary(env.world()));
        }
        Commands::Run {
            episodes,
            max_steps,
            seed,
            policy,
            json,
        } => {
            let env = AntColonyEnv::new(config)?;
            let mut env = TimeLimit::new(env, max_steps)?;
            let mut total = 0.0;
            for episode in 0..episodes {
                let episode_seed = seed.wrapping_add(episode);
                let mut agent = policy.build(episode_seed);
                let report = run_episode(&mut env, agent.as_mut(), episode, episode_seed);
                total += report.reward;
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    println!(
                        "episode {} ({}): steps={}/{} reward={} terminated={} truncated={}",
                        report.episode,
                        report.policy,
                        report.steps,
                        report.max_steps,
                        report.reward,
                        report.terminated,
                        report.truncated
                    );
                    println!("  {}", report.summary);
                    for info in WorldInspector::colonies(env.inner().world()) {
                        println!("  {info}");
                    }
                }
            }
            if !json && episodes > 0 {
                println!("mean reward: {:.2}", total / episodes as f64);
            }
        }
        Commands::Replay {
            ticks,
            seed,
            policy,
        } => {
            println!("Deterministic replay: seed={seed}, ticks={ticks}");

            let mut hashes = Vec::with_capacity(2);
            for run in 1..=2 {
                let env = AntColonyEnv::new(config.clone())?;
                let mut env = TimeLimit::new(env, ticks)?;
                let mut agent = policy.build(seed);
                let report = run_episode(&mut env, agent.as_mut(), 0, seed);
                let hash = env.inner().world().state_hash();
                println!(
                    "Run {run}: tick={}, reward={}, hash={hash:#x}",
                    env.inner().world().tick(),
                    report.reward
                );
                hashes.push(hash);
            }

            if hashes[0] != hashes[1] {
                anyhow::bail!("replay diverged: {:#x} != {:#x}", hashes[0], hashes[1]);
            }
            println!("Match: OK");
        }
    }

    Ok(())
}
