//! Fitness Tracker
//!
//! Terminal front end for the assessment form: collects measurements, shows
//! BMI, daily calories and AI fitness tips, and remembers the dark-mode
//! preference between runs.

use anyhow::Result;
use fitness_tracker_app::{
    advice::{AdviceClient, AdviceProvider, GeminiProvider},
    config::AppConfig,
    controller::{AppController, CalculationPolicy, SubmitError},
    preferences::FileStore,
    state::Dropdown,
};
use fitness_tracker_shared::{
    bmi_gauge_percent, FitnessResult, FormInput, PreferenceStore, ACTIVITY_LEVEL_OPTIONS,
    DEFAULT_LANGUAGE, HEIGHT_UNIT_OPTIONS, SUPPORTED_LANGUAGES,
};
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

const GAUGE_WIDTH: usize = 30;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        model = %config.advice.model,
        "Starting Fitness Tracker"
    );

    let store = FileStore::open(&config.preferences.path);
    let provider = GeminiProvider::new(&config.advice)?;
    if !provider.has_credential() {
        warn!("No Gemini API key configured; fitness tips will be unavailable");
    }

    let mut app = AppController::new(
        store,
        AdviceClient::new(provider),
        CalculationPolicy::from_config(&config.ui),
    );
    let mut input = BufReader::new(stdin()).lines();

    loop {
        print_header(app.state().dark_mode);
        let Some(choice) = ask(&mut input, "[n] New assessment  [t] Toggle dark mode  [q] Quit > ").await? else {
            break;
        };

        match choice.trim().to_lowercase().as_str() {
            "" | "n" => {
                if !run_assessment(&mut app, &mut input).await? {
                    break;
                }
            }
            "t" => {
                let dark = app.toggle_dark_mode();
                println!("Dark mode {}", if dark { "on" } else { "off" });
            }
            "q" => break,
            other => println!("Unknown choice: {}", other),
        }
    }

    info!("Fitness Tracker closed");
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with the form.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "fitness_tracker_app=info".into()
        } else {
            "fitness_tracker_app=debug,reqwest=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

/// Collect one form, submit it and show the result
///
/// Returns `false` when input ended.
async fn run_assessment<S, P>(app: &mut AppController<S, P>, input: &mut Input) -> Result<bool>
where
    S: PreferenceStore,
    P: AdviceProvider,
{
    let Some(form) = read_form(app, input).await? else {
        return Ok(false);
    };

    let dark = app.state().dark_mode;
    println!("Calculating...");
    match app.submit(&form).await {
        Ok(result) => print_result(result, dark),
        Err(SubmitError::Invalid(errors)) => {
            for (_, message) in errors.messages() {
                println!("  ! {}", message);
            }
            return Ok(true);
        }
        Err(SubmitError::Busy) => {
            println!("A calculation is already running, please wait.");
            return Ok(true);
        }
    }

    let more = ask(input, "Press Enter for a new assessment > ").await?.is_some();
    app.reset();
    Ok(more)
}

async fn read_form<S, P>(app: &mut AppController<S, P>, input: &mut Input) -> Result<Option<FormInput>>
where
    S: PreferenceStore,
    P: AdviceProvider,
{
    let Some(weight) = ask(input, "Weight (kg): ").await? else {
        return Ok(None);
    };
    let Some(height) = ask(input, "Height: ").await? else {
        return Ok(None);
    };

    let units: Vec<(String, String)> = HEIGHT_UNIT_OPTIONS
        .iter()
        .map(|unit| (unit.to_string(), unit.to_string()))
        .collect();
    let Some(height_unit) = choose(app, input, Dropdown::HeightUnit, "Unit", &units, "cm").await? else {
        return Ok(None);
    };

    let activities: Vec<(String, String)> = ACTIVITY_LEVEL_OPTIONS
        .iter()
        .map(|level| (level.label().to_string(), level.description().to_string()))
        .collect();
    let Some(activity_level) =
        choose(app, input, Dropdown::ActivityLevel, "Activity Level", &activities, "").await?
    else {
        return Ok(None);
    };

    let languages: Vec<(String, String)> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();
    let Some(language) =
        choose(app, input, Dropdown::Language, "Language", &languages, DEFAULT_LANGUAGE).await?
    else {
        return Ok(None);
    };

    Ok(Some(FormInput {
        weight,
        height,
        height_unit,
        activity_level,
        language,
    }))
}

/// Show a dropdown's options and read a selection
///
/// Accepts an option number or free text; an empty answer picks `default`.
async fn choose<S, P>(
    app: &mut AppController<S, P>,
    input: &mut Input,
    dropdown: Dropdown,
    label: &str,
    options: &[(String, String)],
    default: &str,
) -> Result<Option<String>>
where
    S: PreferenceStore,
    P: AdviceProvider,
{
    app.toggle_dropdown(dropdown);
    for (i, (_, description)) in options.iter().enumerate() {
        println!("  {}) {}", i + 1, description);
    }
    let answer = ask(input, &format!("{}: ", label)).await?;
    app.close_dropdowns();

    Ok(answer.map(|answer| pick_option(answer.trim(), options, default)))
}

fn pick_option(answer: &str, options: &[(String, String)], default: &str) -> String {
    if answer.is_empty() {
        return default.to_string();
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map(|(value, _)| value.clone())
        .unwrap_or_else(|| answer.to_string())
}

async fn ask(input: &mut Input, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn print_header(dark: bool) {
    let (accent, reset) = palette(dark);
    println!();
    println!("{}AI Fitness Tracker{} - Personalized health insights", accent, reset);
}

fn print_result(result: &FitnessResult, dark: bool) {
    let (accent, reset) = palette(dark);
    let filled = (bmi_gauge_percent(result.bmi) / 100.0 * GAUGE_WIDTH as f64).round() as usize;

    println!();
    println!("{}Your Results{}", accent, reset);
    println!("  BMI Analysis     {} ({})", result.bmi, result.bmi_category);
    println!("  [{}{}]", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled));
    println!(
        "  Daily Calories   {} kcal/day",
        format_thousands(result.daily_calories)
    );
    println!();
    println!("{}AI Recommendations{}", accent, reset);
    for suggestion in &result.suggestions {
        println!("  - {}", suggestion);
    }
}

fn palette(dark: bool) -> (&'static str, &'static str) {
    if dark {
        ("\x1b[1;95m", "\x1b[0m")
    } else {
        ("\x1b[1;35m", "\x1b[0m")
    }
}

fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(2628), "2,628");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_pick_option() {
        let options = vec![
            ("cm".to_string(), "cm".to_string()),
            ("ft".to_string(), "ft".to_string()),
        ];
        assert_eq!(pick_option("", &options, "cm"), "cm");
        assert_eq!(pick_option("2", &options, "cm"), "ft");
        assert_eq!(pick_option("0", &options, "cm"), "0");
        assert_eq!(pick_option("inch", &options, "cm"), "inch");
    }
}
