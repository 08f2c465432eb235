use std::sync::Arc;

use tracing::{error, info};

use catalogdb_cli::{init_tracing, load_catalog, progress_bar, router};
use catalogdb_core::config::Config;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("catalogdb_cli=info,catalogdb_ingest=info,catalogdb_search=info,catalogdb_text=info");
    let settings = Config::load()
        .and_then(|c| c.settings())
        .map_err(|e| { eprintln!("Error loading config: {}", e); e })?;

    let pb = progress_bar()?;
    let load_settings = settings.clone();
    let service = match tokio::task::spawn_blocking(move || load_catalog(&load_settings, pb)).await? {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!(error = %e, "indexing failed");
            return Err(e);
        }
    };
    let report = service.load_report();
    println!("📊 Indexed {} products in {:.2}s ({:.0} docs/sec)", report.records, report.elapsed.as_secs_f64(), report.docs_per_sec);

    let app = router(Arc::clone(&service));
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    println!("🔍 Try: curl 'http://{}/search?q=wireles+mouse'", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    service.shutdown()?;
    info!("index closed");
    Ok(())
}
