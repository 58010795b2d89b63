//! # nlp-web: Servidor HTTP de Análise Linguística
//!
//! Expõe o `nlp-core` por HTTP:
//!
//! - `GET /`: mensagem de boas-vindas.
//! - `POST /analyze`: tokens, entidades e sentenças em uma única resposta.
//! - `POST /analyze-stream`: os mesmos tokens e entidades em NDJSON, um
//!   registro por linha.
//! - `GET /demo` e `GET /demo-texts`: página de demonstração e seus textos.

mod config;
mod routes;
mod state;
mod stream;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::state::{AppState, ModelHolder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` é opcional
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into()))
        .with(fmt::layer())
        .init();

    let config = Config::parse();
    let addr = config.addr()?;
    let cors = routes::cors_layer(&config.cors_origins)?;

    let holder = Arc::new(ModelHolder::new(&config.model));
    holder.load().await;

    let state = AppState::new(Arc::clone(&holder));
    let app = routes::create_router(state, cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Servidor NLP iniciado em http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    holder.unload().await;
    info!("servidor encerrado");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "falha ao instalar o handler de Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "falha ao instalar o handler de SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("sinal de encerramento recebido");
}
