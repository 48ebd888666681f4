use gtk::prelude::*;
use gtk::{Application, glib};

use idiom::cli::Cli;
use idiom::config::Config;
use idiom::logging;

mod widgets;

use widgets::IdiomWindow;

const APP_ID: &str = "org.gtk_rs.idiom";

fn build_ui(app: &Application, cli: &Cli, config: &Config) {
    let window = IdiomWindow::new(app, config.clone());
    window.present();

    if cli.primary {
        window.translate_primary_selection();
    }
}

fn main() -> glib::ExitCode {
    let cli = Cli::parse_or_exit();
    logging::init();

    let config = Config::load();
    tracing::info!(
        endpoint = %config.endpoint,
        method = ?config.request_method,
        "starting idiom"
    );

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_startup(|app| {
        app.set_accels_for_action("win.quit", &["<Ctrl>q"]);
    });
    app.connect_activate(move |app| build_ui(app, &cli, &config));

    // Arguments were already handled by clap.
    app.run_with_args::<&str>(&[])
}
