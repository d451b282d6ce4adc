//! Biographical entry lookups.

use domains::error::{AppError, Result};
use domains::models::Pessoa;
use domains::ports::PessoaRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct PessoaService {
    repo: Arc<dyn PessoaRepo>,
}

impl PessoaService {
    pub fn new(repo: Arc<dyn PessoaRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: i32) -> Result<Pessoa> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("pessoa", id))
    }
}
