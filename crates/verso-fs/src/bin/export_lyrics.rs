use std::path::PathBuf;

use verso_core::domain::Song;
use verso_core::ports::Exporter;
use verso_core::services::edit::import_lyrics;
use verso_core::services::export::{LyricSheet, Storyboard};
use verso_fs::{TextExporter, write_document};

// uso: export_lyrics <letra.txt> [directorio_salida]
fn main() {
  let mut args = std::env::args().skip(1);
  let Some(input) = args.next().map(PathBuf::from) else {
    eprintln!("uso: export_lyrics <letra.txt> [directorio_salida]");
    return;
  };
  let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

  let text = match std::fs::read_to_string(&input) {
    Ok(t) => t,
    Err(e) => {
      eprintln!("No se pudo leer {}: {e}", input.display());
      return;
    }
  };

  let mut song = Song::empty_with(import_lyrics(&text));
  song.song_info.title = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

  let exporter = TextExporter::default();
  let sheet = LyricSheet::from_song(&song);

  match exporter.render_lyrics(&sheet).map(|doc| write_document(&out_dir, &sheet.file_stem, &doc)) {
    Ok(Ok(path)) => println!("Letra: {}", path.display()),
    Ok(Err(e)) => eprintln!("Error al escribir la letra: {e}"),
    Err(e) => eprintln!("Error al maquetar la letra: {e}"),
  }

  match exporter.render_storyboard(&Storyboard::from_song(&song)) {
    Ok(doc) => match write_document(&out_dir, "storyboard", &doc) {
      Ok(path) => println!("Storyboard: {} ({} páginas)", path.display(), doc.page_count()),
      Err(e) => eprintln!("Error al escribir el storyboard: {e}"),
    },
    Err(e) => eprintln!("Error al maquetar el storyboard: {e}"),
  }
}
