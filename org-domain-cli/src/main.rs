//! Org domain diagnostic CLI
//!
//! Classifies an org URL and prints a JSON summary: host flags, the JWT
//! audience and the login/audience candidates. Optionally waits for the
//! Lightning domain to propagate (`--wait`) or resolves the host itself
//! (`--lookup`), optionally through a single DNS server (`--nameserver`).
//! Logs go to stderr, the summary to stdout.

mod args;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use args::{Args, USAGE};
use org_domain_core::{
    AudienceLoginCandidate, AudienceService, CoreError, OrgUrl, Resolution, ResolutionGate,
    ServiceContext,
};
use org_domain_resolver::DnsHostProbe;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    url: String,
    origin: String,
    secure: bool,
    salesforce_domain: bool,
    internal: bool,
    local: bool,
    sandbox: bool,
    lightning_domain: bool,
    lightning_url: String,
    audience_url: String,
    candidates: Vec<AudienceLoginCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    propagation: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lookup: Option<Resolution>,
}

fn summarize(ctx: &Arc<ServiceContext>, url: &OrgUrl, instance: Option<&str>) -> Result<Summary> {
    let audience_url = AudienceService::new(Arc::clone(ctx)).jwt_audience_url(url, instance);
    let candidates = AudienceService::login_audience_candidates(&audience_url, url.origin())?;

    Ok(Summary {
        url: url.to_string(),
        origin: url.origin().to_string(),
        secure: url.is_secure(),
        salesforce_domain: url.is_salesforce_domain(),
        internal: url.is_internal_url(),
        local: url.is_local_url(),
        sandbox: url.is_sandbox_url(instance),
        lightning_domain: url.is_lightning_domain(),
        lightning_url: url.to_lightning_domain(),
        audience_url,
        candidates,
        propagation: None,
        lookup: None,
    })
}

fn host_probe(args: &Args) -> DnsHostProbe {
    let probe = match args.nameserver {
        Some(ip) => DnsHostProbe::with_nameserver(ip),
        None => DnsHostProbe::system(),
    };
    tracing::debug!("Resolving through {}", probe.nameservers());
    probe
}

/// Slow DNS propagation and bad input are ordinary outcomes, not faults.
fn is_expected_failure(e: &anyhow::Error) -> bool {
    e.downcast_ref::<CoreError>().is_some_and(CoreError::is_expected)
}

async fn run(args: Args) -> Result<Summary> {
    let ctx = Arc::new(ServiceContext::with_host_probe(Arc::new(host_probe(&args))));
    let url = ctx.parse_url(&args.url)?;
    let instance = args.instance.as_deref();

    let mut summary = summarize(&ctx, &url, instance)?;
    let gate = ResolutionGate::new(Arc::clone(&ctx));

    if args.wait {
        tracing::info!("Waiting for {} to propagate", url.to_lightning_domain());
        summary.propagation = Some(gate.ensure_resolvable(&url, instance).await?);
    }
    if args.lookup {
        summary.lookup = Some(gate.lookup_origin(&url).await?);
    }

    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the JSON summary
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let summary = match run(args).await {
        Ok(summary) => summary,
        Err(e) => {
            if is_expected_failure(&e) {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize summary: {}", e);
            ExitCode::FAILURE
        }
    }
}
