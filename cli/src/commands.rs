//! Command implementations.

use chrono::DateTime;

use rota_core::GqlClient;
use rota_core::pipeline::{Rotation, RotationBuilder};
use rota_types::{AnalysisRequest, ApiConfig, PlayerBuild};

const DEFAULT_API_URL: &str = "https://www.fflogs.com/api/v2/client";
const CONFIG_APP: &str = "rota";
const CONFIG_NAME: &str = "config";

pub fn load_config() -> Result<ApiConfig, String> {
    let mut config: ApiConfig =
        confy::load(CONFIG_APP, CONFIG_NAME).map_err(|e| format!("failed to load config: {e}"))?;
    if config.api_url.is_empty() {
        config.api_url = DEFAULT_API_URL.to_string();
    }
    Ok(config)
}

pub fn set_token(token: &str, url: Option<&str>) -> Result<(), String> {
    let config = ApiConfig {
        api_token: token.to_string(),
        api_url: url.unwrap_or("").to_string(),
    };
    confy::store(CONFIG_APP, CONFIG_NAME, &config)
        .map_err(|e| format!("failed to save config: {e}"))?;
    println!("API token saved");
    Ok(())
}

pub async fn analyze(request: AnalysisRequest) -> Result<(), String> {
    let config = load_config()?;
    if config.api_token.is_empty() {
        return Err("no API token configured; run `rota set-token` first".to_string());
    }

    let builder = RotationBuilder::new(GqlClient::new(&config));
    let rotation = builder
        .build(&request)
        .await
        .map_err(|e| format!("analysis failed: {e}"))?;
    print_rotation(&rotation);
    Ok(())
}

fn print_rotation(rotation: &Rotation) {
    let ctx = &rotation.context;
    let when = DateTime::from_timestamp_millis(ctx.fight_start)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string());
    let duration_s = (ctx.window_end - ctx.window_start) as f64 / 1000.0;

    println!(
        "{} on encounter {} ({when}), patch {}, {duration_s:.1}s analyzed",
        ctx.job, ctx.encounter_id, ctx.patch
    );
    println!(
        "{:<48} {:>4} {:>9} {:>7}  {:>6} {:>6} {:>6} {:>6}",
        "action", "n", "potency", "mult", "p_n", "p_c", "p_d", "p_cd"
    );
    for row in &rotation.rows {
        println!(
            "{:<48} {:>4} {:>9.1} {:>7.4}  {:>6.4} {:>6.4} {:>6.4} {:>6.4}",
            row.action_name,
            row.n,
            row.potency,
            row.multiplier,
            row.probabilities[0],
            row.probabilities[1],
            row.probabilities[2],
            row.probabilities[3],
        );
    }
}

pub fn build_args(
    critical_hit: u32,
    direct_hit: u32,
    determination: u32,
    level: u8,
) -> PlayerBuild {
    PlayerBuild {
        critical_hit,
        direct_hit,
        determination,
        level,
    }
}
