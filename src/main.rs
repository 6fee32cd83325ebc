use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use clash_cleaner::constants::CONFIG_FILE_NAME;
use clash_cleaner::interfaces::converter::{refresh, refresh_claimed, validate_url};
use clash_cleaner::models::AppState;
use clash_cleaner::utils::find_free_port;
use clash_cleaner::web_handlers::interfaces::{self, default_headers, sub_info_header};
use clash_cleaner::Settings;

/// Cleans Clash Meta subscriptions and serves the result locally
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subscription URL, saved to the settings file
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Preferred listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Directory for the cleaned config and the metadata cache
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Convert once and exit instead of starting the server
    #[arg(long)]
    once: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let mut settings = Settings::load(&config_path);
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }

    let app_state = Arc::new(AppState::new(settings, config_path));
    if let Some(url) = args.url {
        let url = url.trim();
        if let Err(e) = validate_url(url) {
            error!("{}", e);
            std::process::exit(1);
        }
        app_state.set_url(url);
    }
    app_state.load_cached_subscription();

    if args.once {
        return match refresh(&app_state).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Conversion failed: {}", e);
                std::process::exit(1);
            }
        };
    }

    let preferred = app_state.settings().port;
    let port = find_free_port(preferred).unwrap_or_else(|| {
        warn!("No free port found near {}, trying it anyway", preferred);
        preferred
    });
    if port != preferred {
        warn!("Port {} is busy, using {}", preferred, port);
    }
    info!(
        "Serving http://127.0.0.1:{}/{}",
        port,
        clash_cleaner::constants::OUTPUT_FILE_NAME
    );

    if app_state.settings().url.trim().is_empty() {
        info!("No subscription URL configured, pass one with --url");
    } else if let Some(guard) = app_state.try_begin_conversion() {
        let state = Arc::clone(&app_state);
        actix_web::rt::spawn(async move {
            if let Err(e) = refresh_claimed(&state, guard).await {
                error!("Conversion failed: {}", e);
            }
        });
    }

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&app_state)))
            .wrap(middleware::from_fn(sub_info_header))
            .wrap(default_headers())
            .configure(interfaces::config)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
