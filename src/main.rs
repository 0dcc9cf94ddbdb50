// Experiment runner: loads the sign images once, then trains and evaluates
// each requested network kind on the same split.
//
//   signnet [--config run.json] MLP CNN CNN-CONCAT
//
// Set RUST_LOG=debug for per-class loading and network construction details.

use std::path::Path;
use std::process::ExitCode;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use signnet::{
    config::RunConfig,
    data::{balanced_subset, load_sign_images, shuffle_split, Example},
    error::{NetError, Result},
    filter::edge_filters,
    network::{Cnn, CnnConfig, Combination, Mlp, Network},
    train::{train_loop, TrainConfig, TrainReport},
};

#[derive(Debug, Clone, Copy)]
enum Mode {
    Mlp,
    Cnn(Combination),
}

impl Mode {
    fn parse(arg: &str) -> Option<Mode> {
        match arg.to_uppercase().as_str() {
            "MLP" => Some(Mode::Mlp),
            "CNN" | "CNN-AVG" => Some(Mode::Cnn(Combination::Average)),
            "CNN-CONCAT" => Some(Mode::Cnn(Combination::Concatenate)),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Mode::Mlp => "MLP",
            Mode::Cnn(Combination::Average) => "CNN (averaged filters)",
            Mode::Cnn(Combination::Concatenate) => "CNN (concatenated filters)",
        }
    }
}

fn usage() {
    eprintln!("usage: signnet [--config <run.json>] <MLP|CNN|CNN-CONCAT>...");
}

fn parse_args(args: &[String]) -> Result<(RunConfig, Vec<Mode>)> {
    let mut config = RunConfig::default();
    let mut modes = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next()
                .ok_or_else(|| NetError::configuration("--config needs a path"))?;
            config = RunConfig::load_json(path)?;
        } else {
            let mode = Mode::parse(arg)
                .ok_or_else(|| NetError::configuration(format!("unknown network kind '{arg}'")))?;
            modes.push(mode);
        }
    }
    Ok((config, modes))
}

fn build_network(mode: Mode, config: &RunConfig, input_size: usize, rng: &mut StdRng) -> Result<Box<dyn Network>> {
    let mlp = config.mlp_config(input_size);
    let network: Box<dyn Network> = match mode {
        Mode::Mlp => Box::new(Mlp::new(mlp, rng)?),
        Mode::Cnn(combination) => {
            let cnn = CnnConfig { mlp, combination, pipeline: config.pipeline };
            Box::new(Cnn::new(cnn, edge_filters(), rng)?)
        }
    };
    Ok(network)
}

fn run_mode(
    mode: Mode,
    config: &RunConfig,
    train: &[Example],
    test: &[Example],
    rng: &mut StdRng,
) -> Result<TrainReport> {
    let input_size = train.first().map_or(0, Example::len);
    let mut network = build_network(mode, config, input_size, rng)?;

    let mut train_config = TrainConfig::new(config.epochs, config.encoding);
    train_config.error_driven = config.error_driven;

    info!("running {} for {} epochs", mode.name(), config.epochs);
    let report = train_loop(&mut network, train, Some(test), &train_config)?;

    println!("\n{}: total training confusion matrix (rows predicted, columns actual)\n", mode.name());
    print!("{}", report.total_train);
    println!("\n{}: total testing confusion matrix\n", mode.name());
    print!("{}", report.total_test);
    Ok(report)
}

fn run(args: &[String]) -> Result<()> {
    let (config, modes) = parse_args(args)?;
    if modes.is_empty() {
        usage();
        return Ok(());
    }

    info!(
        "hidden units {}, epochs {}, filters {}, filter applications {}",
        config.hidden_size,
        config.epochs,
        edge_filters().len(),
        config.pipeline.applications,
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut examples = load_sign_images(Path::new(&config.images_dir), config.classes, config.downsize)?;
    if let Some(divisor) = config.subset_divisor {
        let total = examples.len();
        examples = balanced_subset(&examples, divisor, config.classes, &mut rng)?;
        info!("using a balanced subset of {} out of {} images", examples.len(), total);
    }
    let (train, test) = shuffle_split(examples, config.test_fraction, &mut rng)?;
    info!("{} training and {} testing examples", train.len(), test.len());

    let mut reports = Vec::with_capacity(modes.len());
    for mode in modes {
        let report = run_mode(mode, &config, &train, &test, &mut rng)?;
        reports.push((mode.name(), report));
    }

    if let Some(path) = &config.report_path {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &reports)?;
        info!("wrote {}", path);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
