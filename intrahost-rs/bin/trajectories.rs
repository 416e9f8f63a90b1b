use intrahost::{
    infection::{uniform_loads, Exposure},
    prelude::*,
    utils::{random_ages, TrajectoryProfile, ACTIVE, INFECTIVITY, SYMPTOMATIC},
};
use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{env, error::Error, fs, process};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    params_file: String,
    disease: DiseaseId,
    num_infections: usize,
    seed: Option<u64>,
    strains: Vec<StrainId>,
    age_distribution: AgeDistribution10,
    output: String,
    profile_output: Option<String>,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            params_file: "params.toml".to_string(),
            disease: 0,
            num_infections: 10_000,
            seed: None,
            strains: vec![0],
            age_distribution: [1.0; 11],
            output: "trajectories.csv".to_string(),
            profile_output: None,
            verbose: true,
        }
    }
}

pub fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "conf.toml".to_string());
    let cfg = match read_config(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("cannot read {}: {}", path, err);
            process::exit(1);
        }
    };

    let level = if cfg.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("cannot install logger: {}", err);
    }

    if let Err(err) = run(&cfg) {
        error!("{}", err);
        process::exit(1);
    }
}

fn read_config(path: &str) -> Result<Config, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    Ok(toml::from_str(&data)?)
}

fn run(cfg: &Config) -> Result<(), Box<dyn Error>> {
    let store = ParamFile::from_path(&cfg.params_file)?;
    let registry = DiseaseRegistry::setup(&store)?;
    let model = registry
        .get(cfg.disease)
        .ok_or(DrawError::UnknownDisease(cfg.disease))?;
    info!(
        "using '{}' model for {}",
        model.kind(),
        model.progression().name()
    );

    let seed = cfg.seed.unwrap_or_else(|| default_rng().gen());
    let mut rng = seeded_rng(seed);
    let ages = random_ages(cfg.num_infections, &mut rng, &cfg.age_distribution)
        .ok_or("age_distribution must have a positive weight")?;
    let infections: Vec<Exposure> = ages
        .into_iter()
        .map(|age| Exposure::new(age, cfg.disease))
        .collect();

    let loads = uniform_loads(&cfg.strains, 1.0);
    let trajectories = generate_batch(model, &infections, &loads, seed)?;

    let mut writer = csv::Writer::from_path(&cfg.output)?;
    for (i, trajectory) in trajectories.iter().enumerate() {
        for row in trajectory.rows(i) {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    info!("wrote {} trajectories to {}", trajectories.len(), cfg.output);

    let mut profile = TrajectoryProfile::new(model.max_duration());
    profile.add_many(&trajectories);
    info!(
        "duration {:.2} +- {:.2} days, incubation {:.2} +- {:.2} days",
        profile.duration().mean(),
        profile.duration().std(),
        profile.incubation().mean(),
        profile.incubation().std()
    );
    for (day, ((active, infectivity), symptomatic)) in profile
        .curve(ACTIVE)
        .iter()
        .zip(profile.curve(INFECTIVITY).iter())
        .zip(profile.curve(SYMPTOMATIC).iter())
        .enumerate()
    {
        debug!(
            target: "profile",
            "day {}: active {:.3}, infectivity {:.3}, symptomatic {:.3}",
            day, active, infectivity, symptomatic
        );
    }
    if let Some(path) = &cfg.profile_output {
        fs::write(path, profile.render_csv()?)?;
    }
    return Ok(());
}
