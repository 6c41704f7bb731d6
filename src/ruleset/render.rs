use std::io::{self, Write};

use crate::rule::Rule;

/// Explanations of `rules`, verbatim and in order.
pub fn explain_rules(rules: &[Rule]) -> Vec<String> {
    rules.iter().map(|r| r.explanation().to_string()).collect()
}

/// Write one explanation per line. Writes nothing for an empty slice.
///
/// The text is assembled first and handed over in a single write.
pub fn write_explanations<W: Write>(writer: &mut W, rules: &[Rule]) -> io::Result<()> {
    if rules.is_empty() {
        return Ok(());
    }
    let mut text = String::new();
    for rule in rules {
        text.push_str(rule.explanation());
        text.push('\n');
    }
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

/// `[i] explanation` lines for presenting candidates to a person.
pub fn numbered_listing(rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{i}] {}", r.explanation()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::fixtures::{certain, possible};

    #[test]
    fn explain_is_verbatim() {
        let rules = vec![certain(0.5), possible(0.3, 0.7)];
        let lines = explain_rules(&rules);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], rules[0].explanation());
        assert_eq!(lines[1], rules[1].explanation());
    }

    #[test]
    fn explain_empty() {
        assert!(explain_rules(&[]).is_empty());
        let mut out = Vec::new();
        write_explanations(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn write_one_line_per_rule() {
        let rules = vec![certain(0.5), possible(0.3, 0.7)];
        let mut out = Vec::new();
        write_explanations(&mut out, &rules).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = format!("{}\n{}\n", rules[0].explanation(), rules[1].explanation());
        assert_eq!(text, expected);
    }

    /// Accepts one write, then fails every later one.
    struct OneShot {
        out: Vec<u8>,
        writes: usize,
    }

    impl Write for OneShot {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            if self.writes > 1 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_emits_all_lines_at_once() {
        let rules = vec![certain(0.5), possible(0.3, 0.7), possible(0.2, 0.6)];
        let mut writer = OneShot {
            out: Vec::new(),
            writes: 0,
        };
        write_explanations(&mut writer, &rules).unwrap();
        assert_eq!(writer.writes, 1);
        assert_eq!(String::from_utf8(writer.out).unwrap().lines().count(), 3);
    }

    #[test]
    fn listing_is_numbered_from_zero() {
        let rules = vec![certain(0.5), possible(0.3, 0.7)];
        let listing = numbered_listing(&rules);
        assert_eq!(listing[0], format!("[0] {}", rules[0].explanation()));
        assert_eq!(listing[1], format!("[1] {}", rules[1].explanation()));
    }
}
