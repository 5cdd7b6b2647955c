use jungle_engine::{SessionConfig, SimulationSession, load_config, load_default_config};
use jungle_runner::{JsonFileSink, RunSummary};

const DEFAULT_TICKS: u64 = 1_000;

fn print_help() {
    eprintln!(
        r#"Jungle Runner - headless Monkey Jungle session

USAGE:
    jungle-runner [OPTIONS]

OPTIONS:
    --config <PATH>       Load session configuration from JSON file
    --ticks <N>           Number of ticks to run (default: config max_ticks or 1000)
    --seed <N>            Override the configured seed
    --save <DIR>          Write JSON snapshots into DIR
    --save-every <N>      Snapshot every N ticks (default: only at the end)
    --resume <PATH>       Continue from a saved snapshot
    --json                Print the final summary as JSON on stdout
    --help                Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG              Log level filter (default: info)

EXAMPLES:
    # Run the default jungle for 500 ticks
    jungle-runner --ticks 500

    # Reproducible run with periodic saves
    jungle-runner --seed 7 --save saves --save-every 100
"#
    );
}

struct Options {
    config_path: Option<String>,
    ticks: Option<u64>,
    seed: Option<u64>,
    save_dir: Option<String>,
    save_every: Option<u64>,
    resume: Option<String>,
    json: bool,
}

fn next_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("Error: {} requires an argument", flag);
        std::process::exit(1);
    }
    args[*i].clone()
}

fn next_number(args: &[String], i: &mut usize, flag: &str) -> u64 {
    let raw = next_value(args, i, flag);
    match raw.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: {} expects a non-negative integer, got '{}'", flag, raw);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        config_path: None,
        ticks: None,
        seed: None,
        save_dir: None,
        save_every: None,
        resume: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" | "-c" => options.config_path = Some(next_value(&args, &mut i, "--config")),
            "--ticks" | "-n" => options.ticks = Some(next_number(&args, &mut i, "--ticks")),
            "--seed" => options.seed = Some(next_number(&args, &mut i, "--seed")),
            "--save" => options.save_dir = Some(next_value(&args, &mut i, "--save")),
            "--save-every" => {
                options.save_every = Some(next_number(&args, &mut i, "--save-every"))
            }
            "--resume" => options.resume = Some(next_value(&args, &mut i, "--resume")),
            "--json" => options.json = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args();

    let mut config: SessionConfig = match &options.config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            load_config(path)?
        }
        None => {
            log::info!("Using default configuration");
            load_default_config()?
        }
    };
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    let ticks = options.ticks.or(config.max_ticks).unwrap_or(DEFAULT_TICKS);

    let mut session = match &options.resume {
        Some(path) => {
            log::info!("Resuming from: {}", path);
            let snapshot = JsonFileSink::load(path)?;
            let mut session = SimulationSession::restore(config, snapshot)?;
            session.resume()?;
            session
        }
        None => SimulationSession::new(config)?,
    };

    log::info!(
        "Jungle ready: seed={} strikes={} spot={:.2} tick={}",
        session.seed(),
        session.market().len(),
        session.market().spot(),
        session.market().tick()
    );

    let mut sink = match &options.save_dir {
        Some(dir) => Some(JsonFileSink::new(dir)?),
        None => None,
    };

    // Chunked so periodic saves land on tick boundaries
    let chunk = match (&sink, options.save_every) {
        (Some(_), Some(every)) if every > 0 => every,
        _ => ticks.max(1),
    };
    let mut remaining = ticks;
    let mut run_error = None;
    while remaining > 0 {
        let step = remaining.min(chunk);
        match session.run(step) {
            Ok(done) => {
                remaining -= step;
                if let Some(sink) = sink.as_mut() {
                    if remaining > 0 && done == step {
                        session.persist(sink)?;
                    }
                }
                if done < step {
                    log::info!("Session stopped early: {}", session.status());
                    break;
                }
            }
            Err(e) => {
                log::error!("Run aborted: {}", e);
                run_error = Some(e);
                break;
            }
        }
    }

    if let Some(sink) = sink.as_mut() {
        session.persist(sink)?;
    }

    let summary = RunSummary::from_session(&session);
    summary.log_report();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    match run_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
