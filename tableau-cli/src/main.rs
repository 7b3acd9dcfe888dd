use std::env;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Error};
use clap::{values_t, App, AppSettings, Arg, ArgMatches};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};

use tableau::config::{SolverConfig, SolverConfigUpdate};
use tableau::{Expr, Model, Solver};

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{:#}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("TABLEAU_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is tableau {}", env!("TABLEAU_VERSION"));
    info!(
        "  {} build - {}",
        env!("TABLEAU_PROFILE"),
        env!("TABLEAU_RUSTC_VERSION")
    );
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("tableau")
        .version(env!("TABLEAU_VERSION"))
        .about("Decides satisfiability of propositional formulas using semantic tableaux.")
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[INPUT] 'The JSON encoded formula to solve (stdin if omitted)'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'tableau -C help' for a list of options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .arg_from_usage("--self-check 'Verify the model against the input formula'")
        .get_matches();

    if values_t!(matches, "config-option", String)
        .unwrap_or_default()
        .iter()
        .any(|option| option == "help")
    {
        print!("{}", SolverConfig::help());
        return Ok(0);
    }

    init_logging();
    banner();

    let mut solver = Solver::new();

    solver.config(&config_update(&matches)?);

    if matches.is_present("self-check") {
        solver.enable_self_checking();
    }

    let stdin = io::stdin();

    let mut locked_stdin;
    let mut opened_file;

    let file = match matches.value_of("INPUT") {
        Some(path) => {
            info!("Reading file '{}'", path);
            opened_file = fs::File::open(path)
                .with_context(|| format!("Failed to open '{}'", path))?;
            &mut opened_file as &mut dyn io::Read
        }
        None => {
            info!("Reading from stdin");
            locked_stdin = stdin.lock();
            &mut locked_stdin as &mut dyn io::Read
        }
    };

    let formula = read_formula(file)?;

    info!(
        "Parsed formula with {} atoms and {} connectives",
        formula.atoms().len(),
        formula.connective_count()
    );

    let result = solver.solve(&formula)?;

    let stats = solver.stats();
    info!(
        "{} expansions, {} pruned alternatives, {} dead ends",
        stats.expansions, stats.pruned, stats.dead_ends
    );

    let stdout = io::stdout();
    Ok(report(result.as_ref(), &mut stdout.lock())?)
}

/// Config from the config file and command line options, later options take precedence.
fn config_update(matches: &ArgMatches) -> Result<SolverConfigUpdate, Error> {
    let mut config_update = SolverConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        let mut config_contents = String::new();
        fs::File::open(config_path)?.read_to_string(&mut config_contents)?;

        config_update.merge(toml::from_str(&config_contents)?);
    }

    for config_option in values_t!(matches, "config-option", String).unwrap_or_default() {
        config_update.merge(toml::from_str(&config_option)?);
    }

    Ok(config_update)
}

fn read_formula(input: impl io::Read) -> Result<Expr, Error> {
    serde_json::from_reader(io::BufReader::new(input)).context("Invalid formula encoding")
}

/// Print the result and return the exit code.
fn report(result: Option<&Model>, out: &mut impl Write) -> io::Result<i32> {
    match result {
        Some(model) => {
            writeln!(out, "s SATISFIABLE")?;
            write!(out, "v")?;
            for literal in model.iter() {
                write!(out, " {}", literal)?;
            }
            writeln!(out)?;
            Ok(10)
        }
        None => {
            writeln!(out, "s UNSATISFIABLE")?;
            Ok(20)
        }
    }
}
