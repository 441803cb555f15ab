//! First-letter case checks for declaration names. `_` and `$` are neither case, and an empty name fails both checks.

pub fn is_first_letter_lowercase(name: &str) -> bool {
  name.chars().next().is_some_and(char::is_lowercase)
}

pub fn is_first_letter_uppercase(name: &str) -> bool {
  name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn checks_only_the_first_character() {
    assert!(is_first_letter_lowercase("fooBar"));
    assert!(!is_first_letter_lowercase("FooBar"));
    assert!(is_first_letter_uppercase("FooBar"));
    assert!(!is_first_letter_uppercase("fOO"));
    assert!(is_first_letter_lowercase("élan"));
    assert!(is_first_letter_uppercase("Élan"));
  }

  #[test]
  fn symbols_and_empty_names_have_no_case() {
    for name in ["", "_foo", "$Foo", "1x"] {
      assert!(!is_first_letter_lowercase(name), "{name:?}");
      assert!(!is_first_letter_uppercase(name), "{name:?}");
    }
  }
}
