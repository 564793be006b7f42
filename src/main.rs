use anyhow::Result;
use clap::Parser;
use optscrape::{
    app,
    config::Args,
    fetch::{build_client, fetch_page},
};
use std::io::{self, BufWriter};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging (stderr; stdout is for data) ────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    // ─── 2) run; a client that fails to build counts as a failed fetch ─
    let args = Args::parse();
    let timeout = args.timeout();
    let fetch = |url: Url| async move {
        let client = build_client(timeout)?;
        fetch_page(&client, &url).await
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let outcome = app::run(&args, fetch, &mut out, &mut io::stderr()).await?;
    debug!(?outcome, "done");
    Ok(())
}
