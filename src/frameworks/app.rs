// Framework bootstrap for the terminal client.

use crate::frameworks::config::ClientConfig;
use crate::interface_adapters::clients::PersonalityClient;
use crate::interface_adapters::console::{self, ConsolePage, TerminalWidget};
use crate::use_cases::{FormSubmission, SubmitFlow};
use std::process::ExitCode;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Answers gathered from the terminal before the flow starts.
struct FormInput {
    agreed: bool,
    handle: String,
    token: String,
}

// Blocking prompts; runs on the blocking pool. Handle and token are only
// asked for after consent, mirroring the widget appearing on agree.
fn gather_input(
    handle: Option<String>,
    token: Option<String>,
    auto_agree: bool,
) -> std::io::Result<FormInput> {
    let agreed =
        auto_agree || console::confirm("Your tweets will be sent for analysis. Do you agree?");
    if !agreed {
        return Ok(FormInput {
            agreed,
            handle: handle.unwrap_or_default(),
            token: String::new(),
        });
    }

    let handle = match handle {
        Some(handle) => handle,
        None => console::prompt_line("Twitter handle: ")?,
    };
    let token = match token {
        Some(token) => token,
        None => console::prompt_line("Verification token: ")?,
    };
    Ok(FormInput {
        agreed,
        handle,
        token,
    })
}

// Runs one consent + submit round. The handle comes from the first argument
// or a prompt.
pub async fn run(handle: Option<String>) -> ExitCode {
    init_runtime();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(api_url = %config.api_url, "personality client configured.");

    let api = match PersonalityClient::new(&config.api_url) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "failed to build personality client");
            return ExitCode::FAILURE;
        }
    };

    let token = config.verification_token.clone();
    let auto_agree = config.auto_agree;
    let input =
        match tokio::task::spawn_blocking(move || gather_input(handle, token, auto_agree)).await {
            Ok(Ok(input)) => input,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "failed to read form input");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                tracing::error!(error = %e, "form input task failed");
                return ExitCode::FAILURE;
            }
        };

    let flow = SubmitFlow::new(
        ConsolePage::stdout(input.handle),
        TerminalWidget::new(input.token),
        api,
        config.submit_settings(),
    );

    if input.agreed {
        flow.agree();
    }

    match flow.on_submit(&mut FormSubmission::new()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "submit ended without a result.");
            ExitCode::FAILURE
        }
    }
}
