use crate::domain::song::Song;

/// Una línea en bruto por verso, en orden de lectura, para el analizador métrico.
pub fn meter_request(song: &Song) -> Vec<String> {
  song.verses().map(|v| v.text()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::services::edit::import_lyrics;

  #[test]
  fn test_one_line_per_verse_in_reading_order() {
    let song = Song::empty_with(import_lyrics("sou lâmina\nsou código\n\neco"));
    assert_eq!(meter_request(&song), vec!["SOU LÂMINA", "SOU CÓDIGO", "ECO"]);
  }
}
