//! Eightball AI command line
//!
//! Computes one AI shot for a board layout and prints it as JSON. Useful
//! for tuning difficulty profiles against recorded layouts.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};
    use glam::Vec2;

    use eightball_ai::{AiPlayer, Ball, Difficulty, Result, Settings, ShotRequest, TargetGroup};

    #[derive(Parser, Debug)]
    #[command(name = "eightball-ai")]
    #[command(about = "Compute an 8-ball AI shot for a table layout")]
    struct Cli {
        /// Settings file (JSON); defaults apply when missing
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Overrides the settings difficulty (easy, medium, medium-hard, hard, expert)
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Overrides the settings seed
        #[arg(long)]
        seed: Option<u64>,
        /// Shot request JSON: {"balls": [...], "pockets": [...], "target": "solid"}
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Overrides the request's target group
        #[arg(long, value_enum)]
        target: Option<CliTarget>,
        /// Also print the simulated thinking time
        #[arg(long)]
        thinking_time: bool,
        #[arg(long)]
        pretty: bool,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum CliTarget {
        Open,
        Solid,
        Stripe,
    }

    impl From<CliTarget> for TargetGroup {
        fn from(t: CliTarget) -> Self {
            match t {
                CliTarget::Open => TargetGroup::Open,
                CliTarget::Solid => TargetGroup::Solid,
                CliTarget::Stripe => TargetGroup::Stripe,
            }
        }
    }

    /// Mid-game layout used when no file is given
    fn demo_request() -> ShotRequest {
        let balls = [
            (0, 220.0, 260.0),
            (1, 520.0, 180.0),
            (3, 700.0, 390.0),
            (5, 330.0, 120.0),
            (8, 470.0, 300.0),
            (10, 610.0, 250.0),
            (12, 780.0, 120.0),
            (14, 150.0, 400.0),
        ]
        .iter()
        .map(|&(id, x, y)| Ball::new(id, Vec2::new(x, y)))
        .collect();
        ShotRequest {
            balls,
            pockets: None,
            target: TargetGroup::Solid,
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let mut settings = match &cli.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if let Some(difficulty) = cli.difficulty {
            settings.difficulty = difficulty;
        }
        if cli.seed.is_some() {
            settings.seed = cli.seed;
        }

        let mut request = match &cli.layout {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => {
                log::info!("No layout given, using the demo table");
                demo_request()
            }
        };
        if let Some(target) = cli.target {
            request.target = target.into();
        }

        let mut player = AiPlayer::from_settings(&settings);
        let shot = player.calculate_request(&request)?;
        let json = if cli.pretty {
            serde_json::to_string_pretty(&shot)?
        } else {
            serde_json::to_string(&shot)?
        };
        println!("{}", json);

        if cli.thinking_time {
            println!("thinking time: {} ms", player.thinking_time().as_millis());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = cli::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm::start`, this is just to satisfy the compiler
}
