//! Command-line launch options for the desktop app.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    pub config_path: Option<PathBuf>,
}

static SEED_CALLS: AtomicU64 = AtomicU64::new(0);

/// A fresh seed for runs launched without `--seed`.
pub fn generate_runtime_seed() -> u64 {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |d| d.as_nanos());
    let calls = SEED_CALLS.fetch_add(1, Ordering::Relaxed);
    let entropy = (nanos as u64)
        ^ ((nanos >> 64) as u64)
        ^ u64::from(process::id()).rotate_left(17)
        ^ calls.rotate_left(7);
    splitmix(entropy)
}

/// Parses `--seed N` / `--seed=N` and `--config PATH` / `--config=PATH`.
///
/// Unknown arguments are ignored; each flag may appear at most once.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchOptions, String> {
    let mut seed = None;
    let mut config_path = None;
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        if let Some(raw) = flag_value("--seed", arg, &mut rest)? {
            set_once("--seed", &mut seed, parse_seed(&raw)?)?;
        } else if let Some(raw) = flag_value("--config", arg, &mut rest)? {
            set_once("--config", &mut config_path, PathBuf::from(raw))?;
        }
    }

    Ok(LaunchOptions {
        seed: seed.map_or(SeedChoice::Generated(generated_seed), SeedChoice::Cli),
        config_path,
    })
}

fn flag_value<'a>(
    flag: &str,
    arg: &str,
    rest: &mut impl Iterator<Item = &'a String>,
) -> Result<Option<String>, String> {
    if arg == flag {
        return match rest.next() {
            Some(value) => Ok(Some(value.clone())),
            None => Err(format!("missing value for {flag}")),
        };
    }
    Ok(arg.strip_prefix(flag).and_then(|tail| tail.strip_prefix('=')).map(str::to_string))
}

fn set_once<T>(flag: &str, slot: &mut Option<T>, value: T) -> Result<(), String> {
    if slot.is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>().map_err(|_| format!("seed value '{raw}' must be a number"))
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
