use character_forge::{app::App, logging, ruleset::Ruleset, settings::Settings};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let (settings, settings_error) = Settings::load_or_default();
    if let Err(e) = logging::init(settings.debug_mode) {
        eprintln!("Logging disabled: {e}");
    }
    if let Some(e) = settings_error {
        log::warn!("Falling back to default settings: {e}");
    }
    log::info!(
        "Character Forge v{} start: {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now()
    );

    let mut app = App::new(settings, Ruleset::default())?;
    app.run().await?;

    Ok(())
}
