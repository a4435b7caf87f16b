use std::{process::ExitCode, time::Duration};

use anyhow::Result;
use clap::Parser;
use client_core::{ContactFormController, FormState, HttpTransport, SubmitPhase};
use shared::domain::Field;
use tracing_subscriber::EnvFilter;

/// Send a message through a portfolio site's contact endpoint.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
}

impl Args {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let transport =
        HttpTransport::with_timeout(&args.server_url, Duration::from_secs(args.timeout_secs))?;
    let mut controller = ContactFormController::new(transport);
    for field in Field::ALL {
        controller.update_field(field, args.value(field));
    }

    let phase = controller.submit().await;
    print_outcome(controller.state());

    Ok(if phase == SubmitPhase::Succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(state: &FormState) {
    for (field, message) in &state.errors {
        eprintln!("  {}: {message}", field.label());
    }
    if state.phase == SubmitPhase::Succeeded {
        println!("{}", state.feedback);
    } else {
        eprintln!("{}", state.feedback);
    }
}
