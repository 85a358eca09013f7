//! Tipos de dados para requisições e respostas da API REST do quadro.
//!
//! Todas as structs derivam `Serialize` e/ou `Deserialize` para conversão
//! JSON conforme o formato esperado pelo backend de agendamentos.

use serde::{Deserialize, Serialize};

/// Corpo da requisição `PATCH /cards/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveStatusRequest {
    /// Identificador opaco do status de destino (ex.: "confirmed", "done").
    pub status: String,
}

/// Envelope de erro convencional retornado pelo backend.
///
/// Todos os campos são opcionais com `serde(default)`: qualquer corpo de
/// erro REST razoável deve desserializar sem falhar, mesmo que parcial.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    /// Lista de erros estruturados. O primeiro elemento tem prioridade
    /// na normalização.
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
    /// Código de erro de nível superior, usado quando `errors` está vazio.
    #[serde(default)]
    pub code: Option<String>,
    /// Mensagem humana de nível superior.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Constrói um envelope contendo apenas uma mensagem, para corpos de
    /// resposta que não são JSON.
    pub fn from_message(message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::default()
        }
    }
}

/// Um erro estruturado dentro do array `errors` do envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorObject {
    /// Código legível por máquina (ex.: "invalid_transition").
    #[serde(default)]
    pub code: Option<String>,
    /// Descrição humana do erro.
    #[serde(default)]
    pub detail: Option<String>,
}
