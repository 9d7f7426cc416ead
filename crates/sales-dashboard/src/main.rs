mod bootstrap;

use anyhow::Result;
use dashboard_core::config::DashboardPage;
use dashboard_core::settings::Settings;
use dashboard_data::analysis::analyze_deals;
use dashboard_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    // The TUI owns the terminal, so it always logs to a file.
    let log_file = match settings.output.as_str() {
        "json" => settings.log_file.clone(),
        _ => Some(
            settings
                .log_file
                .clone()
                .unwrap_or_else(bootstrap::default_log_file),
        ),
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Page: {}, Amount format: {}, Currency policy: {}, Theme: {}",
        settings.page,
        settings.amount_format,
        settings.currency_policy,
        settings.theme
    );

    let page = settings.dashboard_page();
    let query = settings.view_query()?;
    let raw = bootstrap::load_input(settings.file.as_deref())?;

    match settings.output.as_str() {
        "json" => {
            let view = analyze_deals(&raw, settings.pipeline_config(page)?, &query)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        _ => {
            let configs = DashboardPage::ALL
                .into_iter()
                .map(|p| Ok((p, settings.pipeline_config(p)?)))
                .collect::<dashboard_core::Result<Vec<_>>>()?;
            let app = App::new(&settings.theme, page, &raw, configs, query);
            let shutdown = app.shutdown_handle();

            // The event loop blocks on terminal input, so it gets its own
            // thread and the runtime stays free to watch for SIGINT.
            let mut ui = tokio::task::spawn_blocking(move || app.run());

            tokio::select! {
                joined = &mut ui => joined??,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                    shutdown.request();
                    // Wait for the loop to restore the terminal.
                    ui.await??;
                }
            }
        }
    }

    Ok(())
}
