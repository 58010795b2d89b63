//! Estado compartilhado da aplicação e ciclo de vida do modelo.

use std::sync::Arc;
use std::time::Instant;

use nlp_core::model::{self, AnnotationModel};
use tokio::sync::RwLock;
use tracing::{error, info};

/// Situação do modelo dentro do holder.
pub enum ModelState {
    /// Ainda não carregado, ou já descarregado no encerramento.
    Empty,
    Ready(Arc<dyn AnnotationModel>),
    /// O carregamento falhou; guarda o motivo.
    Failed(String),
}

/// Guarda o modelo carregado no início do processo.
///
/// Falha no carregamento não derruba o servidor: o estado fica `Failed` e
/// toda análise responde `ModelUnavailable`.
pub struct ModelHolder {
    identifier: String,
    slot: RwLock<ModelState>,
}

impl ModelHolder {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            slot: RwLock::new(ModelState::Empty),
        }
    }

    /// Holder já pronto com um modelo construído externamente.
    #[cfg(test)]
    pub fn preloaded(model: Arc<dyn AnnotationModel>) -> Self {
        Self {
            identifier: model.name().to_string(),
            slot: RwLock::new(ModelState::Ready(model)),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Carrega o modelo (uma única vez). Retorna se o modelo ficou disponível.
    pub async fn load(&self) -> bool {
        let mut slot = self.slot.write().await;
        if matches!(*slot, ModelState::Ready(_)) {
            return true;
        }

        let identifier = self.identifier.clone();
        let started = Instant::now();
        let outcome = tokio::task::spawn_blocking(move || model::load(&identifier)).await;

        match outcome {
            Ok(Ok(loaded)) => {
                info!(
                    model = %self.identifier,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "modelo carregado"
                );
                *slot = ModelState::Ready(loaded);
                true
            }
            Ok(Err(err)) => {
                error!(model = %self.identifier, error = %err, "falha ao carregar o modelo; análises ficarão indisponíveis");
                *slot = ModelState::Failed(err.to_string());
                false
            }
            Err(err) => {
                error!(model = %self.identifier, error = %err, "carregamento do modelo abortado");
                *slot = ModelState::Failed(err.to_string());
                false
            }
        }
    }

    /// O modelo compartilhado, se disponível.
    pub async fn get(&self) -> Option<Arc<dyn AnnotationModel>> {
        match &*self.slot.read().await {
            ModelState::Ready(model) => Some(Arc::clone(model)),
            _ => None,
        }
    }

    /// Motivo da falha de carregamento, se houve.
    pub async fn failure(&self) -> Option<String> {
        match &*self.slot.read().await {
            ModelState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Libera o modelo no encerramento do servidor.
    pub async fn unload(&self) {
        let mut slot = self.slot.write().await;
        if matches!(*slot, ModelState::Ready(_)) {
            info!(model = %self.identifier, "modelo descarregado");
        }
        *slot = ModelState::Empty;
    }
}

/// Estado injetado nos handlers.
#[derive(Clone)]
pub struct AppState {
    pub holder: Arc<ModelHolder>,
}

impl AppState {
    pub fn new(holder: Arc<ModelHolder>) -> Self {
        Self { holder }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_builtin_model() {
        let holder = ModelHolder::new(nlp_core::BUILTIN_MODEL);
        assert!(holder.get().await.is_none());

        assert!(holder.load().await);
        let model = holder.get().await.unwrap();
        assert_eq!(model.name(), nlp_core::BUILTIN_MODEL);

        // Segunda chamada reaproveita o modelo carregado
        assert!(holder.load().await);
        assert!(Arc::ptr_eq(&model, &holder.get().await.unwrap()));
    }

    #[tokio::test]
    async fn test_failed_load_degrades() {
        let holder = ModelHolder::new("en_core_web_trf");
        assert!(!holder.load().await);
        assert!(holder.get().await.is_none());
        assert!(holder.failure().await.unwrap().contains("en_core_web_trf"));
    }

    #[tokio::test]
    async fn test_unload_clears_model() {
        let holder = ModelHolder::new(nlp_core::BUILTIN_MODEL);
        holder.load().await;
        holder.unload().await;
        assert!(holder.get().await.is_none());
        assert!(holder.failure().await.is_none());
    }
}
