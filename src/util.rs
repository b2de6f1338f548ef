//! Small utility helpers used across modules.

/// Log-safe truncation for large strings. Avoids spamming logs with huge
/// model payloads. Cuts on a char boundary since responses carry Urdu text.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_pass_through() {
    assert_eq!(trunc_for_log("hello", 10), "hello");
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let urdu = "چکا ہے، چکی ہے، چکے ہیں";
    let out = trunc_for_log(urdu, 10);
    assert!(out.contains("bytes total"));
  }
}
