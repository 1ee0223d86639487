//! Command line parsing

use std::net::IpAddr;

use anyhow::{bail, Context, Result};

pub const USAGE: &str =
    "usage: org-domain-cli <url> [--instance <hint>] [--nameserver <ip>] [--wait] [--lookup]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub url: String,
    pub instance: Option<String>,
    /// Ask only this DNS server instead of the system resolvers
    pub nameserver: Option<IpAddr>,
    /// Wait for the Lightning domain to resolve
    pub wait: bool,
    /// Resolve the URL's own host
    pub lookup: bool,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut url = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--instance" => {
                    let hint = args.next().context("--instance needs a value")?;
                    parsed.instance = Some(hint);
                }
                "--nameserver" => {
                    let raw = args.next().context("--nameserver needs a value")?;
                    let ip = raw
                        .parse()
                        .with_context(|| format!("--nameserver expects an IP address, got {raw}"))?;
                    parsed.nameserver = Some(ip);
                }
                "--wait" => parsed.wait = true,
                "--lookup" => parsed.lookup = true,
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ if url.is_some() => bail!("unexpected argument {arg}"),
                _ => url = Some(arg),
            }
        }

        parsed.url = url.context("missing <url>")?;
        Ok(parsed)
    }
}
