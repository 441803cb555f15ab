use parse_dts::loc::Loc;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A line (1-based) and column (0-based, in characters) within a source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

/// The start and end positions of a source range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Range {
  pub start: Position,
  pub end: Position,
}

impl Display for Range {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}:{}:{}:{}",
      self.start.line, self.start.column, self.end.line, self.end.column
    )
  }
}

/// Maps byte offsets to line and column positions.
pub struct LineIndex<'a> {
  text: &'a str,
  starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub fn new(text: &'a str) -> Self {
    let mut starts = vec![0];
    for (idx, ch) in text.char_indices() {
      if ch == '\n' {
        starts.push(idx + 1);
      }
    }
    Self { text, starts }
  }

  pub fn position(&self, offset: usize) -> Position {
    let offset = clamp_offset_to_char_boundary(self.text, offset);
    let line_idx = match self.starts.binary_search(&offset) {
      Ok(idx) => idx,
      Err(idx) => idx - 1,
    };
    let line_start = self.starts[line_idx];
    Position {
      line: line_idx + 1,
      column: self.text[line_start..offset].chars().count(),
    }
  }

  pub fn range(&self, loc: Loc) -> Range {
    Range {
      start: self.position(loc.0),
      end: self.position(loc.1),
    }
  }
}

fn clamp_offset_to_char_boundary(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

#[cfg(test)]
mod tests {
  use super::LineIndex;
  use super::Position;
  use parse_dts::loc::Loc;

  #[test]
  fn maps_offsets_to_lines_and_columns() {
    let index = LineIndex::new("ab\ncd\n\nef");
    assert_eq!(index.position(0), Position { line: 1, column: 0 });
    assert_eq!(index.position(2), Position { line: 1, column: 2 });
    assert_eq!(index.position(3), Position { line: 2, column: 0 });
    assert_eq!(index.position(6), Position { line: 3, column: 0 });
    assert_eq!(index.position(8), Position { line: 4, column: 1 });
    // Offsets past the end clamp to the end.
    assert_eq!(index.position(100), Position { line: 4, column: 2 });
  }

  #[test]
  fn counts_columns_in_characters() {
    let index = LineIndex::new("é = x");
    assert_eq!(index.position(3), Position { line: 1, column: 2 });
    // Inside a multibyte character.
    assert_eq!(index.position(1), Position { line: 1, column: 0 });
  }

  #[test]
  fn formats_ranges() {
    let index = LineIndex::new("declare type Foo = string;\n");
    assert_eq!(index.range(Loc(13, 16)).to_string(), "1:13:1:16");
  }
}
