use verso_core::domain::Song;
use verso_core::ports::MeterAnalyzer;
use verso_core::services::edit::import_lyrics;
use verso_core::services::meter::meter_request;
use verso_remote::{HttpMeterAnalyzer, RemoteConfig};

// uso: analyze_meter <letra.txt>
#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let Some(input) = std::env::args().nth(1) else {
    eprintln!("uso: analyze_meter <letra.txt>");
    return;
  };
  let text = match std::fs::read_to_string(&input) {
    Ok(t) => t,
    Err(e) => {
      eprintln!("No se pudo leer {input}: {e}");
      return;
    }
  };

  let config = match RemoteConfig::load() {
    Ok(c) => c,
    Err(e) => {
      eprintln!("Config [remote] inválida: {e}");
      return;
    }
  };
  let analyzer = match HttpMeterAnalyzer::new(&config) {
    Ok(a) => a,
    Err(e) => {
      eprintln!("{e}");
      return;
    }
  };

  let song = Song::empty_with(import_lyrics(&text));
  match analyzer.analyze(&meter_request(&song)).await {
    Ok(report) => {
      for (i, line) in report.lines.iter().enumerate() {
        println!("Linha {}: {} (Total de sílabas: {})", i + 1, line.original, line.total_syllables);
        for w in &line.words {
          println!("  {} | {} ({})", w.word, w.syllable_breakdown, w.scansion);
        }
      }
    }
    Err(e) => eprintln!("Erro na análise da métrica: {e}"),
  }
}
