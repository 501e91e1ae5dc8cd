use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use url::Url;

use courier::adapters::{ConsolePresenter, HttpBackend};
use courier::config::AppConfig;
use courier::manager::keys;
use courier::ports::BackendApi;
use courier::worker::events::PushEvent;
use courier::worker::receive::{self, PushOutcome};
use courier::worker::{render, router};

pub(crate) async fn run() -> i32 {
    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };

    match cli.command {
        Command::Status => run_status(&config).await,
        Command::VapidKey => run_vapid_key(&config).await,
        Command::Deliver(args) => run_deliver(&config, args).await,
        Command::Route(args) => run_route(&config, args),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "courier",
    version,
    about = "Push delivery companion for the marketplace backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    #[arg(long, default_value = "courier.toml")]
    config: PathBuf,
    #[arg(long, env = "COURIER_BACKEND")]
    backend: Option<String>,
    #[arg(long, env = "COURIER_CSRF_TOKEN")]
    csrf_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the backend's push subscriptions for the current user
    Status,
    /// Fetch the server's VAPID public key and check it decodes
    VapidKey,
    /// Render a push payload exactly as a device would display it
    Deliver(PayloadArgs),
    /// Print the in-app URL a notification click would route to
    Route(RouteArgs),
}

#[derive(Args, Debug)]
struct PayloadArgs {
    /// Payload JSON; read from stdin when omitted
    #[arg(long)]
    payload: Option<String>,
}

#[derive(Args, Debug)]
struct RouteArgs {
    #[command(flatten)]
    payload: PayloadArgs,
    /// Named action button, e.g. view-message or reply
    #[arg(long)]
    action: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = if cli.config.exists() {
        AppConfig::load(&cli.config).map_err(|err| err.to_string())?
    } else {
        AppConfig::default()
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(backend) = cli.backend.as_ref() {
        config.backend_base = backend.clone();
    }
    if let Some(token) = cli.csrf_token.as_ref() {
        config.csrf_token = Some(token.clone());
    }
}

fn backend_client(config: &AppConfig) -> Result<HttpBackend, String> {
    let base = Url::parse(&config.backend_base)
        .map_err(|err| format!("invalid backend base url '{}': {err}", config.backend_base))?;
    HttpBackend::new(&base, config.csrf_token.clone())
        .map_err(|err| format!("invalid backend endpoint: {err}"))
}

fn read_payload(payload: Option<String>) -> Result<String, String> {
    match payload {
        Some(payload) => Ok(payload),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read payload from stdin: {err}"))?;
            Ok(buffer)
        }
    }
}

async fn run_status(config: &AppConfig) -> i32 {
    let backend = match backend_client(config) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };
    match backend.subscriptions().await {
        Ok(records) if records.is_empty() => {
            println!("no push subscriptions registered");
            0
        }
        Ok(records) => {
            println!("{} push subscription(s):", records.len());
            for record in records {
                match record.created_at {
                    Some(created_at) => println!("  {} (created {created_at})", record.endpoint),
                    None => println!("  {}", record.endpoint),
                }
            }
            0
        }
        Err(err) => {
            eprintln!("failed to list subscriptions: {err}");
            1
        }
    }
}

async fn run_vapid_key(config: &AppConfig) -> i32 {
    let backend = match backend_client(config) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };
    let encoded = match backend.vapid_public_key().await {
        Ok(encoded) => encoded,
        Err(err) => {
            eprintln!("failed to fetch server key: {err}");
            return 1;
        }
    };
    match keys::decode_server_key(&encoded) {
        Ok(bytes) => {
            println!("server key: {encoded}");
            match bytes.first() {
                Some(first) => {
                    println!("decodes to {} bytes (leading byte 0x{first:02x})", bytes.len())
                }
                None => println!("decodes to 0 bytes"),
            }
            0
        }
        Err(err) => {
            eprintln!("server key did not decode: {err}");
            1
        }
    }
}

async fn run_deliver(config: &AppConfig, args: PayloadArgs) -> i32 {
    let payload = match read_payload(args.payload) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };
    let event = if payload.trim().is_empty() {
        PushEvent::empty()
    } else {
        PushEvent::with_payload(payload)
    };

    let outcome = receive::handle_push(&ConsolePresenter, &config.defaults(), &event).await;
    match outcome {
        PushOutcome::EmptyPing => println!("empty ping; nothing to display"),
        PushOutcome::Displayed => println!("displayed"),
        PushOutcome::FallbackDisplayed => {
            println!("displayed the generic fallback (payload did not parse)")
        }
        PushOutcome::Dropped => println!("dropped"),
    }
    0
}

fn run_route(config: &AppConfig, args: RouteArgs) -> i32 {
    let payload = match read_payload(args.payload.payload) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };
    let payload = if payload.trim().is_empty() {
        "{}".to_string()
    } else {
        payload
    };
    let value: serde_json::Value = match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("payload is not valid json: {err}");
            return 2;
        }
    };

    let rendered = render::normalize(&value, &config.defaults());
    let target = router::resolve_target(args.action.as_deref(), &rendered.data);
    match Url::parse(&config.origin).and_then(|origin| origin.join(&target)) {
        Ok(url) => {
            println!("{url}");
            0
        }
        Err(err) => {
            eprintln!(
                "target '{target}' did not resolve against origin '{}': {err}",
                config.origin
            );
            2
        }
    }
}
