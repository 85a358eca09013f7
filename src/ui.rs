//! Interface de terminal do boardshift — spinners e saída colorida.
//!
//! Usa as crates `indicatif` para spinners de progresso e `console` para
//! estilização com cores. O [`BatchProgress`] acompanha visualmente
//! a execução de um lote de movimentações no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::engine::{BatchOutcome, Summary};

/// Indicador visual de progresso para a execução de um lote no terminal.
///
/// Exibe um spinner animado durante o processamento e mensagens
/// coloridas para sucesso (verde), falha (vermelho) e retentativa (amarelo).
pub struct BatchProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
    // Estilo amarelo para mensagens de retentativa.
    yellow: Style,
}

impl BatchProgress {
    /// Inicia o spinner com o tamanho do lote e o status de destino.
    pub fn start(count: usize, target_status: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("Moving {count} cards to '{target_status}'"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Atualiza a mensagem do spinner para o card em andamento.
    #[allow(dead_code)]
    pub fn update_card(&self, card_id: &str) {
        self.pb.set_message(format!("Moving {card_id}"));
    }

    /// Exibe uma mensagem de retentativa com o número da tentativa e o atraso.
    #[allow(dead_code)]
    pub fn retry(&self, attempt: u32, max: u32, delay_ms: u64) {
        self.pb.println(format!(
            "  {} Retry {attempt}/{max} (waiting {delay_ms}ms)",
            self.yellow.apply_to("↻")
        ));
    }

    /// Finaliza o spinner e exibe o veredito do lote.
    ///
    /// Sucesso é mostrado em verde com checkmark; falha em vermelho com X.
    pub fn complete(&self, summary: &Summary) {
        self.pb.finish_and_clear();
        if summary.ok {
            println!("  {} {}", self.green.apply_to("✓"), summary.message);
        } else {
            println!("  {} {}", self.red.apply_to("✗"), summary.message);
        }
    }

    /// Imprime o resultado do lote formatado em JSON com estilo colorido.
    pub fn print_outcome(&self, outcome: &BatchOutcome) {
        let style = if outcome.is_clean() {
            &self.green
        } else {
            &self.red
        };
        println!();
        println!("{}", style.apply_to("─── Batch Outcome ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(outcome).unwrap_or_default()
        );
    }
}
