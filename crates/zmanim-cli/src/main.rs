//! # shul
//!
//! Command-line front end for a synagogue display.
//!
//! ## Usage
//!
//! ```bash
//! # Resolve a synagogue's schedule against a saved zmanim response (offline)
//! shul resolve --synagogue shul.json --astro zmanim.json
//!
//! # Today's zmanim for a city
//! shul times --city נתיבות
//!
//! # Everything the display shows, as JSON
//! shul display --synagogue shul.json
//!
//! # Move the third weekday entry to the top and print the updated record
//! shul edit --synagogue shul.json move weekday 2 0
//! ```
//!
//! Set `RUST_LOG` to change log verbosity (logs go to stderr).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use zmanim_engine::{
    daily_times_panel, messages_for_city, move_entry, remove_entry, resolve_with_options,
    sabbath_panel, validate_entry, DailyAstronomicalTimes, DayType, EmergencyMessage,
    ResolveOptions, ResolvedSchedule, ResolvedScheduleLine, SabbathPanel, SynagogueRecord,
};
use zmanim_hebcal::config::DEFAULT_TIMEOUT_SECONDS;
use zmanim_hebcal::wire::parse_zmanim;
use zmanim_hebcal::{AstroCache, HebcalClient, HebcalConfig, Location};

#[derive(Parser, Debug)]
#[command(name = "shul")]
#[command(about = "Synagogue display schedules and zmanim")]
#[command(version)]
struct Cli {
    /// IANA timezone used for displayed clock times
    #[arg(long, global = true, env = "SHUL_TIMEZONE", default_value = "Asia/Jerusalem")]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a synagogue's prayer schedule from local files
    Resolve {
        /// Synagogue record (JSON)
        #[arg(short, long)]
        synagogue: PathBuf,
        /// Zmanim for the day: a Hebcal /zmanim response or a bare times object
        #[arg(short, long)]
        astro: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check every prayer time in a synagogue record
    Validate {
        #[arg(short, long)]
        synagogue: PathBuf,
    },
    /// Edit a synagogue's prayer times and print the updated record
    Edit {
        #[arg(short, long)]
        synagogue: PathBuf,
        #[command(subcommand)]
        action: EditAction,
    },
    /// Emergency messages for a city, newest first
    Alerts {
        /// Messages file (JSON array)
        #[arg(short, long)]
        messages: PathBuf,
        #[arg(short, long, env = "SHUL_CITY")]
        city: String,
    },
    /// Fetch the day's zmanim for a city
    Times {
        #[command(flatten)]
        net: NetArgs,
        /// City name or location code
        #[arg(short, long, env = "SHUL_CITY")]
        city: Option<String>,
        /// Civil date (YYYY-MM-DD), defaults to today at the location
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Fetch everything a display shows for one synagogue, as JSON
    Display {
        #[command(flatten)]
        net: NetArgs,
        #[arg(short, long)]
        synagogue: PathBuf,
        /// City name or location code, defaults to the synagogue's city
        #[arg(short, long, env = "SHUL_CITY")]
        city: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Emergency messages file (JSON array)
        #[arg(short, long)]
        messages: Option<PathBuf>,
    },
    /// List supported locations
    Locations,
}

#[derive(Subcommand, Debug)]
enum EditAction {
    /// Remove the entry with this id
    Remove { id: String },
    /// Move an entry within its day type, by position
    Move {
        #[arg(value_parser = parse_day_type)]
        day_type: DayType,
        from: usize,
        to: usize,
    },
}

#[derive(clap::Args, Debug)]
struct NetArgs {
    /// Hebcal base URL
    #[arg(long, env = "SHUL_HEBCAL_URL", default_value = zmanim_hebcal::config::DEFAULT_BASE_URL)]
    hebcal_url: String,
    /// Per-request timeout in seconds
    #[arg(long, env = "SHUL_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout_secs: u64,
}

impl NetArgs {
    fn cache(&self) -> Result<AstroCache<HebcalClient>> {
        let config = HebcalConfig::default()
            .with_base_url(self.hebcal_url.clone())
            .with_timeout_seconds(self.timeout_secs);
        let client = HebcalClient::new(config).context("failed to build HTTP client")?;
        Ok(AstroCache::new(client).with_fetch_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Everything the display renders in one refresh.
#[derive(Serialize, Debug)]
struct DisplaySnapshot {
    synagogue: String,
    location: &'static Location,
    date: NaiveDate,
    hebrew_date: Option<String>,
    schedule: ResolvedSchedule,
    daily_times: Vec<ResolvedScheduleLine>,
    sabbath: SabbathPanel,
    alerts: Vec<EmergencyMessage>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = ResolveOptions::with_timezone(&cli.timezone)?;

    match cli.command {
        Command::Resolve {
            synagogue,
            astro,
            json,
        } => {
            let record = read_synagogue(&synagogue)?;
            let astro = astro.as_deref().map(read_astro).transpose()?;
            let schedule = resolve_with_options(&record.entries(), astro.as_ref(), &options);
            if json {
                print_json(&schedule)?;
            } else {
                print_schedule(&schedule);
            }
        }
        Command::Validate { synagogue } => {
            let record = read_synagogue(&synagogue)?;
            let mut problems: Vec<String> = record
                .unplaced()
                .into_iter()
                .map(|(stored, e)| format!("{}: {e}", stored.id))
                .collect();
            problems.extend(
                record
                    .entries()
                    .iter()
                    .filter_map(|entry| validate_entry(entry).err().map(|e| format!("{}: {e}", entry.id))),
            );
            if !problems.is_empty() {
                for problem in &problems {
                    eprintln!("{problem}");
                }
                bail!("{} invalid prayer time(s)", problems.len());
            }
            println!("ok: {} prayer times", record.prayer_times.len());
        }
        Command::Edit { synagogue, action } => {
            let mut record = read_synagogue(&synagogue)?;
            let mut entries = record.entries();
            match action {
                EditAction::Remove { id } => {
                    remove_entry(&mut entries, &id)?;
                }
                EditAction::Move { day_type, from, to } => {
                    move_entry(&mut entries, day_type, from, to)?;
                }
            }
            record.set_entries(entries);
            print_json(&record)?;
        }
        Command::Alerts { messages, city } => {
            let messages = read_messages(&messages)?;
            for message in messages_for_city(&messages, &city) {
                println!("{}", message.content);
            }
        }
        Command::Times {
            net,
            city,
            date,
            json,
        } => {
            let location = resolve_location(city.as_deref());
            let cache = net.cache()?;
            let date = date.unwrap_or_else(|| cache.today(location));
            let astro = cache.get_times_on(location, date).await;
            if astro.is_none() {
                tracing::warn!(city = location.name, %date, "no zmanim available");
            }
            let panel = daily_times_panel(astro.as_ref(), &options);
            if json {
                print_json(&panel)?;
            } else {
                println!("{} {}", location.name, date);
                print_lines(&panel);
            }
        }
        Command::Display {
            net,
            synagogue,
            city,
            date,
            messages,
        } => {
            let record = read_synagogue(&synagogue)?;
            let location = resolve_location(city.as_deref().or(Some(record.city.as_str())));
            let alerts = match messages {
                Some(path) => read_messages(&path)?,
                None => Vec::new(),
            };
            let cache = net.cache()?;
            let date = date.unwrap_or_else(|| cache.today(location));
            let offset = record.candle_offset();

            let (astro, sabbath, hebrew_date) = tokio::join!(
                cache.get_times_on(location, date),
                cache.get_sabbath_times_on(location, date, offset),
                cache.get_hebrew_date_on(date),
            );
            let sabbath = sabbath
                .unwrap_or_default()
                .with_sunset_fallback(astro.as_ref(), offset);

            let snapshot = DisplaySnapshot {
                synagogue: record.name.clone(),
                location,
                date,
                hebrew_date: hebrew_date.map(|d| d.to_string()),
                schedule: resolve_with_options(&record.entries(), astro.as_ref(), &options),
                daily_times: daily_times_panel(astro.as_ref(), &options),
                sabbath: sabbath_panel(&sabbath, &options),
                alerts: messages_for_city(&alerts, location.name)
                    .into_iter()
                    .cloned()
                    .collect(),
            };
            print_json(&snapshot)?;
        }
        Command::Locations => {
            for location in &zmanim_hebcal::location::LOCATIONS {
                println!(
                    "{}\t{}\t{}\t{}",
                    location.code,
                    location.name,
                    location.geonameid,
                    location.timezone.name()
                );
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_day_type(s: &str) -> Result<DayType, String> {
    DayType::parse(s).ok_or_else(|| format!("unknown day type '{s}' (expected weekday or sabbath)"))
}

/// City name or numeric code; anything unknown falls back to the default location.
fn resolve_location(city: Option<&str>) -> &'static Location {
    let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) else {
        return Location::default_location();
    };
    if let Ok(code) = city.parse::<u32>() {
        return Location::by_code(code);
    }
    Location::by_name(city).unwrap_or_else(|| {
        tracing::warn!(city, "unknown city, using default location");
        Location::default_location()
    })
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn read_synagogue(path: &Path) -> Result<SynagogueRecord> {
    serde_json::from_value(read_json(path)?)
        .with_context(|| format!("{} is not a synagogue record", path.display()))
}

fn read_messages(path: &Path) -> Result<Vec<EmergencyMessage>> {
    serde_json::from_value(read_json(path)?)
        .with_context(|| format!("{} is not a list of messages", path.display()))
}

/// Accepts a full Hebcal `/zmanim` response or just its `times` object.
fn read_astro(path: &Path) -> Result<DailyAstronomicalTimes> {
    let body = read_json(path)?;
    if body.get("times").is_some() {
        return parse_zmanim(&body).with_context(|| format!("bad zmanim in {}", path.display()));
    }
    serde_json::from_value(body).with_context(|| format!("bad zmanim in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_schedule(schedule: &ResolvedSchedule) {
    for day_type in DayType::ALL {
        println!("{}", day_type.label());
        print_lines(schedule.lines(day_type));
    }
}

fn print_lines(lines: &[ResolvedScheduleLine]) {
    for line in lines {
        println!("  {}\t{}", line.clock_time, line.description);
    }
}

