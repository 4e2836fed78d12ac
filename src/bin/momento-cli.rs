//! Inspect Momento API keys and the credentials they resolve to.
//!
//! Key material is never printed; only the key format and the endpoints are.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use momento_sdk::credential::{DEFAULT_API_KEY_VAR, DEFAULT_ENDPOINT_VAR, TokenKind, token};
use momento_sdk::{Configuration, Credential, HostOverrides, MomentoError};

#[derive(Parser)]
#[command(name = "momento-cli")]
#[command(about = "Inspect Momento API keys and resolved endpoints")]
struct Args {
    /// Config file path (only the [logging] section is used)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a key and show the endpoints it resolves to
    Inspect {
        token: String,

        /// Cell endpoint, required for V2 keys
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Replace the decoded control host
        #[arg(long)]
        control_host: Option<String>,

        /// Replace the decoded cache host
        #[arg(long)]
        cache_host: Option<String>,
    },
    /// Resolve a legacy or V1 key from an environment variable
    Env {
        #[arg(long, default_value = DEFAULT_API_KEY_VAR)]
        var: String,
    },
    /// Resolve a V2 key and endpoint from environment variables
    EnvV2 {
        #[arg(long, default_value = DEFAULT_API_KEY_VAR)]
        api_key_var: String,

        #[arg(long, default_value = DEFAULT_ENDPOINT_VAR)]
        endpoint_var: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Configuration::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Configuration::default(),
    };
    if let Err(e) = momento_sdk::logging::init(&config.logging) {
        eprintln!("warning: logging unavailable: {e}");
    }

    let resolved = match args.command {
        Command::Inspect {
            token,
            endpoint,
            control_host,
            cache_host,
        } => inspect(&token, endpoint, control_host, cache_host),
        Command::Env { var } => Credential::from_env_var(&var, HostOverrides::none()),
        Command::EnvV2 {
            api_key_var,
            endpoint_var,
        } => Credential::from_env_var_v2(&api_key_var, &endpoint_var),
    };

    match resolved {
        Ok(credential) => {
            println!("control endpoint: {}", credential.control_endpoint());
            println!("data endpoint:    {}", credential.data_endpoint());
            println!("port:             {}", credential.port());
            println!("tls:              {}", credential.is_secure());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(code = e.error_code(), "credential resolution failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn inspect(
    raw: &str,
    endpoint: Option<String>,
    control_host: Option<String>,
    cache_host: Option<String>,
) -> momento_sdk::Result<Credential> {
    let kind = token::classify(raw);
    println!("format:           {kind:?}");

    match kind {
        TokenKind::V2 => {
            if control_host.is_some() || cache_host.is_some() {
                return Err(MomentoError::invalid_argument(
                    "--control-host and --cache-host apply only to legacy and V1 keys",
                ));
            }
            match endpoint {
                Some(endpoint) => Credential::from_api_key_v2(raw, endpoint),
                None => Err(MomentoError::invalid_argument(
                    "V2 keys carry no endpoint; pass --endpoint",
                )),
            }
        }
        TokenKind::Invalid => {
            if let Err(e) = token::decode(raw) {
                println!("reason:           {e}");
            }
            Err(MomentoError::invalid_argument("Invalid API key"))
        }
        TokenKind::Legacy | TokenKind::V1 => {
            if endpoint.is_some() {
                return Err(MomentoError::invalid_argument(
                    "--endpoint applies only to V2 keys",
                ));
            }
            let mut overrides = HostOverrides::none();
            if let Some(host) = control_host {
                overrides = overrides.with_control(host);
            }
            if let Some(host) = cache_host {
                overrides = overrides.with_cache(host);
            }
            Credential::from_string(raw, overrides)
        }
    }
}
