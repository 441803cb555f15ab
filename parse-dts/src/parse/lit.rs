use super::Parser;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

/// Decodes the body of a string literal (without quotes), resolving escape sequences.
pub fn normalise_literal_string(raw: &str) -> Option<String> {
  let mut norm = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      norm.push(c);
      continue;
    };
    match chars.next()? {
      'b' => norm.push('\x08'),
      'f' => norm.push('\x0c'),
      'n' => norm.push('\n'),
      'r' => norm.push('\r'),
      't' => norm.push('\t'),
      'v' => norm.push('\x0b'),
      '0' if !chars.peek().is_some_and(|c| c.is_ascii_digit()) => norm.push('\0'),
      'x' => {
        let hex: String = chars.by_ref().take(2).collect();
        if hex.len() != 2 {
          return None;
        };
        norm.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
      }
      'u' => {
        let cp = if chars.peek() == Some(&'{') {
          chars.next();
          let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
          u32::from_str_radix(&hex, 16).ok()?
        } else {
          let hex: String = chars.by_ref().take(4).collect();
          if hex.len() != 4 {
            return None;
          };
          u32::from_str_radix(&hex, 16).ok()?
        };
        norm.push(char::from_u32(cp)?);
      }
      // Line continuation.
      '\r' => {
        if chars.peek() == Some(&'\n') {
          chars.next();
        };
      }
      '\n' | '\u{2028}' | '\u{2029}' => {}
      c if c.is_ascii_digit() => return None,
      c => norm.push(c),
    };
  }
  Some(norm)
}

impl<'a> Parser<'a> {
  pub fn lit_str_val(&mut self) -> SyntaxResult<String> {
    let (_, value) = self.lit_str_val_with_loc()?;
    Ok(value)
  }

  pub fn lit_str_val_with_loc(&mut self) -> SyntaxResult<(Loc, String)> {
    let t = self.require(TT::LiteralString)?;
    let raw = self.str(t.loc);
    // The lexer only produces LiteralString for terminated strings, so both quotes are present.
    let body = &raw[1..raw.len() - 1];
    let value = normalise_literal_string(body)
      .ok_or_else(|| t.error(SyntaxErrorType::InvalidCharacterEscape))?;
    Ok((t.loc, value))
  }

  /// Returns the raw source text of a number literal after validating it.
  pub fn lit_num_raw(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralNumber)?;
    let raw = self.string(t.loc);
    let valid = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
      Some(hex) => u64::from_str_radix(hex, 16).is_ok(),
      None => raw.parse::<f64>().is_ok(),
    };
    if !valid {
      return Err(t.error(SyntaxErrorType::MalformedLiteralNumber));
    };
    Ok(raw)
  }
}

#[cfg(test)]
mod tests {
  use super::normalise_literal_string;

  #[test]
  fn decodes_escapes() {
    assert_eq!(normalise_literal_string(r"a\nb").as_deref(), Some("a\nb"));
    assert_eq!(normalise_literal_string(r#"\"q\""#).as_deref(), Some("\"q\""));
    assert_eq!(normalise_literal_string(r"\x41B\u{43}").as_deref(), Some("ABC"));
    assert_eq!(normalise_literal_string(r"\/").as_deref(), Some("/"));
  }

  #[test]
  fn rejects_malformed_escapes() {
    assert_eq!(normalise_literal_string(r"\x4"), None);
    assert_eq!(normalise_literal_string(r"\u12"), None);
    assert_eq!(normalise_literal_string(r"\1"), None);
  }
}
