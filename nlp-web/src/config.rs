//! Configuração do servidor: flags de linha de comando com fallback para
//! variáveis de ambiente (e `.env`, carregado em `main`).

use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "nlp-web", version, about = "Servidor HTTP de análise linguística")]
pub struct Config {
    /// Endereço de escuta
    #[arg(long, env = "NLP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Porta de escuta
    #[arg(long, env = "NLP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Modelo a carregar: `en_core_web_rules` ou caminho para um léxico `.json`
    #[arg(long, env = "NLP_MODEL", default_value = nlp_core::BUILTIN_MODEL)]
    pub model: String,

    /// Origens CORS permitidas (separadas por vírgula); vazio libera todas
    #[arg(long = "cors-origin", env = "NLP_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
