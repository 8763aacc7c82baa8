use std::path::PathBuf;

use agromap::{init_logging, replay, EditorConfig, NominatimGeocoder, NullMap, SessionScript};
use anyhow::Context;

const USAGE: &str = "usage: agromap <session.json> [--config <editor.toml>] [--offline]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("agromap {} (built {})", agromap::VERSION, agromap::BUILD_DATE);

    let mut session = None;
    let mut config_path = None;
    let mut offline = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(PathBuf::from(args.next().context(USAGE)?));
            }
            "--offline" => offline = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => session = Some(PathBuf::from(arg)),
        }
    }
    let session = session.context(USAGE)?;

    let config = match config_path {
        Some(path) => EditorConfig::load_from_file(&path)?,
        None => EditorConfig::load_or_default()?,
    };
    let script = SessionScript::from_file(&session)
        .with_context(|| format!("failed to load session {}", session.display()))?;

    let geocoder = if offline {
        None
    } else {
        Some(NominatimGeocoder::new(&config.search)?)
    };
    let geocoder = geocoder.as_ref().map(|g| g as &dyn agromap::Geocoder);

    let summary = replay(script, &config, Box::new(NullMap), geocoder).await;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.error.is_some() {
        std::process::exit(2);
    }
    Ok(())
}
