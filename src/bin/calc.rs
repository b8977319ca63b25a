//! Calc binary - prints an age breakdown for a birth date in the terminal
//!
//! Usage:
//!   cargo run --bin calc -- 1990-05-20
//!   cargo run --bin calc -- 1990-05-20 --time 08:30 --locale id --name Budi
//!   cargo run --bin calc -- 1990-05-20 --json
//!
//! Optional environment variables:
//! - DEFAULT_LOCALE (defaults to en)
//! - UTC_OFFSET_MINUTES (defaults to 0)

use ageinfo::age::{compute_age, render_age_summary};
use ageinfo::clock::{Clock, SystemClock};
use ageinfo::config::Config;
use ageinfo::i18n::{format_locale_date, Locale, LocaleStrings};
use ageinfo::validation::{validate, AgeInput};
use anyhow::{bail, Context, Result};
use tracing::info;

struct CalcArgs {
    birth_date: String,
    birth_time: Option<String>,
    name: Option<String>,
    locale: Option<String>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<CalcArgs> {
    let mut birth_date = None;
    let mut birth_time = None;
    let mut name = None;
    let mut locale = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--time" => birth_time = Some(iter.next().context("--time needs a value")?.clone()),
            "--name" => name = Some(iter.next().context("--name needs a value")?.clone()),
            "--locale" => locale = Some(iter.next().context("--locale needs a value")?.clone()),
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            value if birth_date.is_none() => birth_date = Some(value.to_string()),
            value => bail!("Unexpected argument: {}", value),
        }
    }

    Ok(CalcArgs {
        birth_date: birth_date
            .context("Usage: calc <YYYY-MM-DD> [--time HH:MM] [--locale en|id] [--name NAME] [--json]")?,
        birth_time,
        name,
        locale,
        json,
    })
}

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("calc=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;
    let config = Config::from_env()?;

    let locale = match args.locale.as_deref() {
        Some(code) => Locale::from_code(code)?,
        None => config.default_locale,
    };

    let input = AgeInput {
        birth_date: args.birth_date,
        birth_time: args.birth_time,
        name: args.name,
    };

    let now = SystemClock.now();
    let validated = match validate(&input, config.utc_offset(), now) {
        Ok(validated) => validated,
        Err(errors) => {
            for message in errors.messages(locale) {
                eprintln!("✗ {}", message);
            }
            bail!("Invalid input: {}", errors);
        }
    };

    let now = now.with_timezone(&config.utc_offset());
    let age = compute_age(&validated.birth, &now);
    let formatted = age.localize(locale);
    info!("Computed age for {}", validated.birth);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&formatted)?);
        return Ok(());
    }

    let strings = LocaleStrings::for_locale(locale);
    println!("{}", format_locale_date(&validated.birth, locale));
    println!("{}", render_age_summary(&formatted, locale, validated.name.as_deref()));
    println!();
    println!(
        "{:>2} {}, {:>2} {}, {:>2} {}",
        formatted.hours,
        strings.hour.pick(i64::from(formatted.hours)),
        formatted.minutes,
        strings.minute.pick(i64::from(formatted.minutes)),
        formatted.seconds,
        strings.second.pick(i64::from(formatted.seconds)),
    );
    println!("{} {}", formatted.total_days, strings.day.other);
    println!("{} {}", formatted.total_hours, strings.hour.other);
    println!("{} {}", formatted.total_minutes, strings.minute.other);
    println!("{} {}", formatted.total_seconds, strings.second.other);

    Ok(())
}
