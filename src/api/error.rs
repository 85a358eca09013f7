//! Tipos de erro para o cliente da API do quadro.
//!
//! Define [`ApiError`] com variantes para rate limiting, erros da API
//! e erros de rede. Usa `thiserror` para derivar `Display` e `Error`
//! automaticamente a partir dos atributos `#[error(...)]`.

use thiserror::Error;

use super::types::ErrorEnvelope;

/// Erros que podem ocorrer ao mover um card pela API do quadro.
///
/// As variantes cobrem os três cenários mais comuns de falha:
/// - [`RateLimited`](ApiError::RateLimited) — o servidor retornou HTTP 429
/// - [`Api`](ApiError::Api) — qualquer outro erro HTTP (4xx/5xx)
/// - [`Network`](ApiError::Network) — falha na camada de rede
#[derive(Debug, Error)]
pub enum ApiError {
    /// O servidor retornou HTTP 429 (rate limit).
    /// O campo `retry_after_ms` carrega o cabeçalho `retry-after` convertido
    /// para milissegundos, quando presente.
    #[error("Rate limited by server")]
    RateLimited { retry_after_ms: Option<u64> },

    /// Erro retornado pela API (ex.: 400 transição inválida, 500 erro interno).
    /// Contém o código de status HTTP e o envelope de erro do corpo da resposta.
    #[error("API returned status {status}")]
    Api { status: u16, body: ErrorEnvelope },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    /// Encapsula o erro original do `reqwest` via `#[from]`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
