//! drsa-select: pick decision rules from an induced DRSA rule set.
//!
//! Reads a JSON array of rules from a file or stdin, selects with the
//! configured strategy and prints the chosen rules' explanations (or the
//! rules themselves as JSON with `--json`).
//!
//! Usage: drsa-select [--strategy automated|interactive] [--json] [RULES.json]

use std::io::Read;
use std::process::ExitCode;

use drsa_select::config::{Config, Strategy};
use drsa_select::oracle::{ConsoleOracle, Oracle};
use drsa_select::rule::{RuleSpec, Validator};
use drsa_select::{logging, maker, ruleset};

#[derive(Debug, Default)]
struct Args {
    strategy: Option<Strategy>,
    json: bool,
    path: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--strategy" => {
                let value = args.next().ok_or("--strategy needs a value")?;
                parsed.strategy = Some(value.parse()?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            path => {
                if parsed.path.replace(path.to_string()).is_some() {
                    return Err("only one rules file may be given".into());
                }
            }
        }
    }
    Ok(parsed)
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| format!("cannot read {p}: {e}")),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(input)
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let (mut config, warnings) = Config::read();
    if let Some(strategy) = args.strategy {
        config.settings.strategy = strategy;
    }
    logging::init(&config.logging);
    for warning in &warnings {
        eprintln!("drsa-select: {warning}");
    }
    drsa_select::config::report(&warnings);

    let interactive = config.settings.strategy == Strategy::Interactive;
    if interactive && args.path.is_none() {
        return Err("interactive selection needs a rules file; stdin is used for answers".into());
    }

    let input = read_input(args.path.as_deref())?;
    let specs: Vec<RuleSpec> =
        serde_json::from_str(&input).map_err(|e| format!("JSON parse error: {e}"))?;
    let rules = Validator::new(config.validation.clone())
        .validate_all(specs)
        .map_err(|e| e.to_string())?;

    let oracle: Option<Box<dyn Oracle>> = if interactive {
        Some(Box::new(ConsoleOracle::stdio()))
    } else {
        None
    };
    let maker = maker::from_config(&config, oracle);

    let chosen = maker.select(&rules).map_err(|e| {
        log::error!("{} selection failed ({}): {e}", maker.name(), e.kind());
        e.to_string()
    })?;

    if args.json {
        let out = serde_json::to_string_pretty(&chosen).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        ruleset::write_explanations(&mut std::io::stdout().lock(), &chosen)
            .map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("drsa-select: {e}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("drsa-select: {e}");
            ExitCode::FAILURE
        }
    }
}
