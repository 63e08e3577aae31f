use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bbb_client::{ApiCall, ApiResponse, BigBlueButtonClient, Element};

/// Call a BigBlueButton API resource and print the result.
///
/// The server is taken from BBB_API_URL and BBB_SECRET (a `.env` file is
/// honoured).
#[derive(Debug, Parser)]
#[command(name = "bbb-call", version)]
struct Args {
    /// Resource name, e.g. `create`, `join`, `isMeetingRunning`
    call: String,

    /// Already encoded query string, e.g. `meetingID=abc&name=Demo`
    #[arg(default_value = "")]
    query: String,

    /// Presentation URL to preload (only used by `create`)
    #[arg(long)]
    pre_upload_slide: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, env = "BBB_CALL_TIMEOUT")]
    timeout: Option<u64>,

    /// Print whether this field is `true` instead of the whole response
    #[arg(long)]
    field: Option<String>,
}

impl Args {
    fn api_call(&self) -> ApiCall {
        let mut call = ApiCall::new(&self.call, &self.query);
        if let Some(slide) = &self.pre_upload_slide {
            call = call.with_pre_upload_slide(slide);
        }
        if let Some(secs) = self.timeout {
            call = call.with_timeout(Duration::from_secs(secs));
        }
        call
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let client = BigBlueButtonClient::from_env().context("Failed to load BigBlueButton config")?;
    info!("Using BigBlueButton API at {}", client.config().api_url);

    let response = client
        .get_xml(&args.api_call())
        .await
        .with_context(|| format!("Call to {} failed", args.call))?;

    let succeeded = render(&response, args.field.as_deref(), &mut io::stdout().lock())?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Write the outcome of a call. Returns false when the response was absent.
fn render<W: Write>(response: &ApiResponse, field: Option<&str>, out: &mut W) -> io::Result<bool> {
    if let Some(field) = field {
        writeln!(out, "{}", response.matches(field))?;
        return Ok(true);
    }

    match response {
        ApiResponse::Document(document) => {
            writeln!(out, "SUCCESS")?;
            write_fields(document, 0, out)?;
            Ok(true)
        }
        ApiResponse::Absent => {
            writeln!(out, "FAILED")?;
            Ok(false)
        }
    }
}

fn write_fields<W: Write>(element: &Element, depth: usize, out: &mut W) -> io::Result<()> {
    for child in &element.children {
        let indent = "  ".repeat(depth);
        match child.text() {
            Some(text) if child.children.is_empty() => {
                writeln!(out, "{}{}: {}", indent, child.name, text.trim())?
            }
            _ => writeln!(out, "{}{}:", indent, child.name)?,
        }
        write_fields(child, depth + 1, out)?;
    }
    Ok(())
}
