mod app;
mod components;
mod screens;
mod theme;
mod utils;

use anyhow::Context;
use codepad_app_core::{
    AppCommand, AppKernel, AppStore, FilePreviewSink, HttpProjectGateway, MemorySink,
    PlatformClientStore, RenderSink,
};
use codepad_infra::PreviewFile;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub(crate) type DesktopKernel =
    AppKernel<HttpProjectGateway, PlatformClientStore, Box<dyn RenderSink>>;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Preview sink plus the URL the browser should open, if the sink is file backed.
fn preview_sink() -> (Box<dyn RenderSink>, Option<String>) {
    match PreviewFile::in_cache_dir().and_then(|file| Ok((file.url()?, file))) {
        Ok((url, file)) => (Box::new(FilePreviewSink::new(file)), Some(url)),
        Err(e) => {
            tracing::warn!("browser preview disabled: {e}");
            (Box::new(MemorySink::new()), None)
        }
    }
}

fn build_kernel() -> anyhow::Result<(DesktopKernel, Option<String>)> {
    let api = codepad_config::api_url();
    let gateway = HttpProjectGateway::new(&api)
        .with_context(|| format!("Failed to set up project store client for {api}"))?;
    let client_store = PlatformClientStore::new()?;
    let (sink, preview_url) = preview_sink();

    tracing::info!(%api, "starting codepad");
    let mut kernel = AppKernel::new(
        AppStore::default(),
        gateway,
        client_store,
        sink,
        codepad_config::DEFAULT_QUIET_PERIOD,
    );
    kernel.dispatch(AppCommand::LoadInitialState);
    Ok((kernel, preview_url))
}

pub fn run() -> eframe::Result<()> {
    setup_logging();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Codepad"),
        ..Default::default()
    };

    eframe::run_native(
        "Codepad",
        options,
        Box::new(|cc| {
            theme::setup(&cc.egui_ctx, false);

            let (kernel, preview_url) = build_kernel().map_err(|e| {
                tracing::error!("Failed to start: {e:#}");
                e
            })?;

            Ok(Box::new(app::CodepadUiApp::new(kernel, preview_url)))
        }),
    )
}
