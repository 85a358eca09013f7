//! Configuração do boardshift carregada a partir de `boardshift.toml`.
//!
//! A struct [`BoardshiftConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `BOARDSHIFT_API_TOKEN` tem precedência sobre o arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `boardshift.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardshiftConfig {
    /// URL base da API REST do quadro (ex.: `https://api.example.com/v1`).
    #[serde(default)]
    pub api_base_url: String,

    /// Token de autenticação enviado como bearer token.
    #[serde(default)]
    pub api_token: String,

    /// Máximo de tentativas por card antes de registrar a falha.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Atraso base em milissegundos para backoff exponencial.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Atraso fixo em milissegundos entre cards consecutivos de um lote.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

// Valor padrão para tentativas máximas: 5.
fn default_max_retries() -> u32 {
    5
}

// Valor padrão para o atraso base: 400ms.
fn default_base_delay_ms() -> u64 {
    400
}

// Valor padrão para o throttle entre cards: 200ms.
fn default_throttle_ms() -> u64 {
    200
}

impl Default for BoardshiftConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            api_token: String::new(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

impl BoardshiftConfig {
    /// Carrega a configuração de `boardshift.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let path = Path::new("boardshift.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<BoardshiftConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para o token.
        if let Ok(token) = std::env::var("BOARDSHIFT_API_TOKEN")
            && !token.is_empty()
        {
            config.api_token = token;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = BoardshiftConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_delay_ms, 400);
        assert_eq!(config.throttle_ms, 200);
        assert!(config.api_base_url.is_empty());
        assert!(config.api_token.is_empty());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            api_base_url = "https://api.example.com/v1"
            max_retries = 3
        "#;
        let config: BoardshiftConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay_ms, 400);
        assert_eq!(config.throttle_ms, 200);
    }

    #[test]
    fn load_falls_back_to_defaults() {
        // No ambiente de teste, tipicamente não há boardshift.toml no diretório de trabalho.
        let config = BoardshiftConfig::load().unwrap();
        assert_eq!(config.base_delay_ms, 400);
    }
}
