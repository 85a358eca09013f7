//! Interface de linha de comando do boardshift baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, status, demo)
//! e flags globais (--max-retries, --throttle-ms, --verbose).

use clap::{Parser, Subcommand};

/// boardshift — Motor de transição de status em lote para quadros de agendamento.
#[derive(Debug, Parser)]
#[command(name = "boardshift", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Número máximo de tentativas por card em caso de rate limiting.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Atraso em milissegundos entre cards consecutivos do lote.
    #[arg(long, global = true)]
    pub throttle_ms: Option<u64>,

    /// Habilita saída detalhada (inclui o dump JSON do resultado).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move os cards selecionados para o status de destino.
    Run {
        /// Status de destino (identificador opaco, ex.: "confirmed").
        target: String,

        /// Caminho para o snapshot JSON do quadro.
        #[arg(long)]
        file: String,

        /// Ids dos cards a mover, separados por vírgula.
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,

        /// Seleciona todos os cards atualmente nesta coluna.
        #[arg(long, conflicts_with = "ids")]
        column: Option<String>,
    },

    /// Mostra a contagem de cards por coluna do quadro.
    Status {
        /// Caminho para o snapshot JSON do quadro.
        #[arg(long)]
        file: String,
    },

    /// Executa a demonstração embutida com um mover local (sem rede).
    Demo,
}
