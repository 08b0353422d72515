use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_appender::rolling;

use attendance_client::api::ApiClient;
use attendance_client::config::Config;
use attendance_client::controllers::{
    self, LoginController, LoginForm, MarkAttendanceController, ProfileController,
    RegisterController, RegisterForm,
};
use attendance_client::geo::{Coordinates, FileCamera, FixedLocation, Geocoder};
use attendance_client::models::{AttendanceStatus, ReportFilter};
use attendance_client::notify::{ConsoleNavigator, ConsoleNotifier};
use attendance_client::report::ReportQueryController;
use attendance_client::session::SessionStore;

#[derive(Parser)]
#[command(name = "attendance-client", about = "Terminal client for the attendance API")]
struct Cli {
    /// Account email; falls back to ATTEND_EMAIL.
    #[arg(long, global = true)]
    email: Option<String>,
    /// Account password; falls back to ATTEND_PASSWORD.
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the session token.
    Login,
    /// Create an account, then log in separately.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Mark attendance at the given coordinates, with an optional photo.
    Mark {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        /// PRESENT, ABSENT or SICK.
        #[arg(long, default_value = "PRESENT")]
        status: String,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Show a page of the attendance report.
    Report {
        #[arg(long)]
        start_date: chrono::NaiveDate,
        #[arg(long)]
        end_date: chrono::NaiveDate,
        #[arg(long)]
        timezone: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Show the stored profile.
    Profile,
    /// Update profile fields.
    UpdateProfile {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Log in, then immediately log out again (server-side token revocation).
    Logout,
}

fn credentials(cli: &Cli) -> anyhow::Result<(String, String)> {
    let email = cli
        .email
        .clone()
        .or_else(|| std::env::var("ATTEND_EMAIL").ok())
        .context("email required: --email or ATTEND_EMAIL")?;
    let password = cli
        .password
        .clone()
        .or_else(|| std::env::var("ATTEND_PASSWORD").ok())
        .context("password required: --password or ATTEND_PASSWORD")?;
    Ok((email, password))
}

/// Run the login flow and hand back the authenticated session token.
async fn login(cli: &Cli, config: &Config, api: &ApiClient, session: &SessionStore) -> anyhow::Result<String> {
    let (email, password) = credentials(cli)?;

    let notifier = ConsoleNotifier;
    let navigator = ConsoleNavigator;
    let controller = LoginController::new(
        api,
        session,
        &notifier,
        &navigator,
        Duration::from_millis(config.notify_delay_ms),
    );
    controller.submit(&LoginForm { email, password }).await?;

    let token = session.token().context("session missing after login")?;
    Ok(token)
}

fn print_report(api: &ApiClient, report: &ReportQueryController) {
    for record in report.records() {
        let photo = record
            .photo_url
            .as_deref()
            .map(|p| api.photo_display_url(p))
            .unwrap_or_default();
        println!(
            "{}  {:<8} {}  {}",
            record.timestamp, record.status, record.location, photo
        );
    }
    println!(
        "offset={} previous={} next={}",
        report.filter().offset,
        report.has_previous(),
        report.has_next()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!("Client starting...");

    let api = ApiClient::new(config.api_base_url.clone());
    let session = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    let notifier = ConsoleNotifier;
    let navigator = ConsoleNavigator;

    match &cli.command {
        Command::Login => {
            let token = login(&cli, &config, &api, &session).await?;
            println!("{token}");
        }

        Command::Register {
            first_name,
            last_name,
        } => {
            let (email, password) = credentials(&cli)?;
            let controller = RegisterController::new(
                &api,
                &notifier,
                &navigator,
                Duration::from_millis(config.notify_delay_ms),
            );
            controller
                .submit(&RegisterForm {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    email,
                    password,
                })
                .await?;
        }

        Command::Mark {
            latitude,
            longitude,
            status,
            photo,
        } => {
            let Ok(status) = status.parse::<AttendanceStatus>() else {
                bail!("invalid status {status:?}: expected PRESENT, ABSENT or SICK");
            };

            let token = login(&cli, &config, &api, &session).await?;
            let geocoder = Geocoder::new(config.geocode_url.clone(), config.geocode_app_id.clone());
            let mut controller = MarkAttendanceController::new(&api, &geocoder, &token, &notifier);

            let provider = FixedLocation(Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            });
            controller.resolve_location(&provider).await?;

            if let Some(path) = photo {
                let camera = FileCamera { path: path.clone() };
                controller.capture_photo(&camera).await?;
            }

            let today = chrono::Utc::now().date_naive();
            let mut report = ReportQueryController::new(
                api.clone(),
                &token,
                ReportFilter {
                    start_date: today,
                    end_date: today,
                    timezone: config.report_timezone.clone(),
                    limit: config.report_limit,
                    offset: 0,
                },
            );
            let record = controller.submit(status, &mut report).await?;
            println!("marked: {} at {}", record.status, record.location);
            print_report(&api, &report);
        }

        Command::Report {
            start_date,
            end_date,
            timezone,
            limit,
            page,
        } => {
            let token = login(&cli, &config, &api, &session).await?;
            let limit = limit.unwrap_or(config.report_limit);
            let mut report = ReportQueryController::new(
                api.clone(),
                &token,
                ReportFilter {
                    start_date: *start_date,
                    end_date: *end_date,
                    timezone: timezone.clone().unwrap_or_else(|| config.report_timezone.clone()),
                    limit,
                    offset: 0,
                },
            );
            report.refresh().await?;
            for _ in 0..*page {
                if !report.has_next() {
                    break;
                }
                report.next_page().await?;
            }
            print_report(&api, &report);
        }

        Command::Profile => {
            let token = login(&cli, &config, &api, &session).await?;
            let controller = ProfileController::new(&api, &token, &notifier);
            let form = controller.load().await?;
            println!("{} {}", form.first_name, form.last_name);
            println!("email:   {}", form.email);
            println!("phone:   {}", form.phone.as_deref().unwrap_or("-"));
            println!("address: {}", form.address.as_deref().unwrap_or("-"));
        }

        Command::UpdateProfile {
            first_name,
            last_name,
            phone,
            address,
        } => {
            let token = login(&cli, &config, &api, &session).await?;
            let controller = ProfileController::new(&api, &token, &notifier);
            let mut form = controller.load().await?;
            form.first_name = first_name.clone();
            form.last_name = last_name.clone();
            form.phone = phone.clone().or(form.phone);
            form.address = address.clone().or(form.address);
            controller.submit(&form).await?;
        }

        Command::Logout => {
            login(&cli, &config, &api, &session).await?;
            controllers::logout(&api, &session, &navigator).await;
        }
    }

    Ok(())
}
