use clap::{Args, Parser, Subcommand};
use iban_check::bank::{BankRecord, BankRegistry};
use iban_check::batch::validate_csv;
use iban_check::generator::{generate_ibans, GeneratorConfig};
use iban_check::logging;
use iban_check::validation::{ErrorKind, ValidationOutcome, Validator};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "iban-check")]
#[command(about = "IBAN validator with bank lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Validate(ValidateArgs),
    Batch(BatchArgs),
    Generate(GenerateArgs),
    Banks(BanksArgs),
}

#[derive(Args)]
struct BankSourceArgs {
    #[arg(long)]
    banks: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    no_default_banks: bool,
}

#[derive(Parser)]
struct ValidateArgs {
    iban: String,
    #[arg(long, default_value_t = false)]
    json: bool,
    #[command(flatten)]
    source: BankSourceArgs,
}

#[derive(Parser)]
struct BatchArgs {
    #[arg(long, default_value = "data/ibans.csv")]
    input: PathBuf,
    #[arg(long, default_value = "data/output/ibans_validated.csv")]
    output: PathBuf,
    #[command(flatten)]
    source: BankSourceArgs,
}

#[derive(Parser)]
struct GenerateArgs {
    #[arg(long, default_value = "DE")]
    country: String,
    #[arg(long, default_value_t = 10)]
    count: usize,
    #[arg(long)]
    bank_code: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct BanksArgs {
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = false)]
    json: bool,
    #[command(flatten)]
    source: BankSourceArgs,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("iban-check")?;
    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Batch(args) => run_batch(args),
        Command::Generate(args) => run_generate(args),
        Command::Banks(args) => run_banks(args),
    }
}

fn load_registry(source: &BankSourceArgs) -> Result<BankRegistry, String> {
    let mut registry = if source.no_default_banks {
        BankRegistry::new()
    } else {
        BankRegistry::with_defaults()
    };
    if let Some(path) = &source.banks {
        let added = registry.load_csv(path)?;
        log::info!("Loaded {} bank(s) from {}", added, path.display());
    }
    Ok(registry)
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;
    let validator = Validator::with_banks(&registry);
    let outcome = validator.validate(Some(&args.iban));

    if args.json {
        let json = serde_json::to_string_pretty(&outcome.to_response())
            .map_err(|err| err.to_string())?;
        println!("{json}");
    } else {
        print_outcome(&outcome);
    }

    match outcome {
        ValidationOutcome::Valid(_) => Ok(()),
        ValidationOutcome::Invalid(err) => Err(format!("IBAN is invalid ({})", err.kind)),
    }
}

fn print_outcome(outcome: &ValidationOutcome) {
    match outcome {
        ValidationOutcome::Valid(valid) => {
            println!("valid: yes");
            println!("iban: {}", valid.iban);
            println!("country: {}", valid.country_code);
            println!("check digits: {}", valid.check_digits);
            println!("bank code: {}", valid.bank_code);
            println!("account number: {}", valid.account_number);
            match &valid.bank {
                Some(bank) => println!("bank: {} ({})", bank.name, bank.bic),
                None => println!("bank: unknown"),
            }
        }
        ValidationOutcome::Invalid(err) => {
            println!("valid: no");
            println!("reason: {}", err.kind);
            println!("message: {}", err.detail);
        }
    }
}

fn run_batch(args: BatchArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;
    let validator = Validator::with_banks(&registry);

    let start = Instant::now();
    let summary = validate_csv(&args.input, &args.output, &validator)?;
    let elapsed = start.elapsed();

    emit_info_line(&format!(
        "Batch: input={} output={} banks={}",
        args.input.display(),
        args.output.display(),
        registry.len()
    ));
    emit_info_line(&format!(
        "Validated {} IBAN(s): valid={} invalid={} with_bank={}",
        summary.total, summary.valid, summary.invalid, summary.with_bank
    ));
    for kind in ErrorKind::ALL {
        if let Some(count) = summary.by_error.get(&kind) {
            emit_info_line(&format!("Invalid {}: {}", kind, count));
        }
    }
    emit_info_line(&format!("Validation time: {} ms", elapsed.as_millis()));
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let config = GeneratorConfig {
        country: args.country,
        count: args.count,
        bank_code: args.bank_code,
    };
    let ibans = generate_ibans(&config, seed)?;

    match &args.output {
        Some(path) => {
            write_ibans(path, &ibans)?;
            emit_info_line(&format!(
                "Generated {} {} IBAN(s) (seed {}) to {}",
                ibans.len(),
                config.country.to_uppercase(),
                seed,
                path.display()
            ));
        }
        None => {
            log::info!("Generated {} IBAN(s) with seed {}", ibans.len(), seed);
            println!("iban");
            for iban in &ibans {
                println!("{iban}");
            }
        }
    }
    Ok(())
}

fn write_ibans(path: &Path, ibans: &[String]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
        }
    }
    let mut writer = csv::Writer::from_path(path).map_err(|err| err.to_string())?;
    writer.write_record(["iban"]).map_err(|err| err.to_string())?;
    for iban in ibans {
        writer.write_record([iban]).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

fn run_banks(args: BanksArgs) -> Result<(), String> {
    let registry = load_registry(&args.source)?;

    let mut banks: Vec<&BankRecord> = match &args.search {
        Some(needle) => registry.search_by_name(needle),
        None => registry.all().iter().collect(),
    };
    if let Some(country) = &args.country {
        banks.retain(|bank| bank.country_code.eq_ignore_ascii_case(country.trim()));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&banks).map_err(|err| err.to_string())?;
        println!("{json}");
        return Ok(());
    }

    for bank in &banks {
        println!(
            "{} | {} | {} | {}",
            bank.country_code, bank.bank_code, bank.bic, bank.name
        );
    }
    emit_info_line(&format!("{} of {} bank(s) listed", banks.len(), registry.len()));
    Ok(())
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        println!("{message}");
    }
}
