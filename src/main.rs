//! qrmaker entrypoint

use clap::Parser;
use qrmaker::app::{self, RfdSaveDialog};
use qrmaker::{
    AppOptions, Error, QrDecoder, QrGenerator, QrMakerApp, QrMakerConfig, QrSession, Result,
    clipboard, logging,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "qrmaker", version, about = "Desktop QR code maker")]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrmaker.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Text encoded into the first preview (takes precedence over config file)
    #[arg(long, value_name = "TEXT")]
    url: Option<String>,

    /// Write the QR code for --url to PATH as PNG and exit without opening a window
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// With --output, decode the written image and fail unless it matches
    #[arg(long, requires = "output")]
    verify: bool,

    /// Disable the right-click Copy/Paste menu on the URL field
    #[arg(long)]
    no_context_menu: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrMakerConfig::load(cli.config.as_deref())?;

    if let Some(ref url) = cli.url {
        config.window.default_url = url.clone();
    }

    if cli.no_context_menu {
        config.window.context_menu = false;
    }

    logging::init(&config.logging)?;

    let generator = QrGenerator::with_output(config.qr_style()?, &config.output);

    if let Some(ref output) = cli.output {
        return export_once(generator, &config.window.default_url, output, cli.verify);
    }

    run_window(generator, &config)
}

fn export_once(generator: QrGenerator, text: &str, output: &Path, verify: bool) -> Result<()> {
    let session = QrSession::start(generator, text, None)?;
    session.save_to(output)?;

    if verify {
        let decoded = QrDecoder::new().decode_file(output)?;
        if decoded != text {
            return Err(Error::QrDecode(format!(
                "{} decodes to {decoded:?}, expected {text:?}",
                output.display()
            )));
        }
        info!(path = %output.display(), "Verified QR round trip");
    }

    println!("QR code for {text:?} written to {}", output.display());
    session.shutdown();
    Ok(())
}

fn run_window(generator: QrGenerator, config: &QrMakerConfig) -> Result<()> {
    let window = &config.window;
    let session = QrSession::start(generator, &window.default_url, window.icon_text.as_deref())?;

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(window.title.as_str())
        .with_inner_size([window.width, window.height])
        .with_min_inner_size([window.min_width, window.min_height]);

    if let Some(icon) = session.icon() {
        match app::load_icon(icon.path()) {
            Ok(icon) => viewport = viewport.with_icon(icon),
            Err(e) => tracing::warn!("Window icon not set: {e}"),
        }
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app_options = AppOptions {
        context_menu: window.context_menu,
        dark_title_bar: window.dark_title_bar,
    };

    info!(title = %window.title, "Opening window");

    eframe::run_native(
        &window.title,
        options,
        Box::new(move |cc| {
            app::apply_theme(&cc.egui_ctx);
            Ok(Box::new(QrMakerApp::new(
                session,
                clipboard::system_clipboard(),
                Box::new(RfdSaveDialog::default()),
                app_options,
            )))
        }),
    )?;

    Ok(())
}
