//! Load — token table loading from comma-delimited definition files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use super::model::{token_key, TokenRecord, TokenTable};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not open token definition file \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load one or more token definition files into a fresh [`TokenTable`].
///
/// Files are processed in argument order, rows in file order; duplicate keys
/// are last-write-wins. A malformed row is logged and skipped; an unreadable
/// file fails the whole load.
pub fn load_tables<P: AsRef<Path>>(paths: &[P]) -> Result<TokenTable, LoadError> {
    let mut table = TokenTable::default();

    for path in paths {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        for (idx, row) in text.lines().enumerate() {
            let fields = split_row(row);
            if fields.is_empty() {
                continue;
            }
            if !apply_row(&mut table, &fields) {
                warn!(
                    file = %path.display(),
                    line = idx + 1,
                    "invalid token definition row, skipping"
                );
            }
        }
    }

    Ok(table)
}

/// Classify one row and insert it. Rows with a positive line number are log
/// sites and need all six fields; rows with line ≤ 0 are filename aliases and
/// need only the first three (extras ignored).
///
/// A log-site row's line number and module id each occupy 16 bits of the
/// composed key; values that do not fit would alias onto another row's key,
/// so such rows are malformed.
fn apply_row(table: &mut TokenTable, fields: &[String]) -> bool {
    if fields.len() < 3 {
        return false;
    }

    let module_id = match parse_hex(&fields[0]) {
        Some(id) => id,
        None => return false,
    };
    let line: i64 = match fields[1].trim().parse() {
        Ok(line) => line,
        Err(_) => return false,
    };
    let filename = basename(&fields[2]);

    if line > 0 {
        if fields.len() < 6 || line > 0xFFFF || module_id > 0xFFFF {
            return false;
        }
        let record = TokenRecord {
            source: format!("{}:{}", filename, line),
            severity: fields[4].clone(),
            subsys: fields[3].clone(),
            format: fields[5].clone(),
        };
        table.insert_token(token_key(line as u32, module_id), record);
    } else {
        table.insert_source(module_id, filename.to_string());
    }

    true
}

fn parse_hex(field: &str) -> Option<u32> {
    let digits = field.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    u32::from_str_radix(digits, 16).ok()
}

fn basename(field: &str) -> &str {
    field
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(field)
}

/// Split one comma-delimited row into fields.
///
/// Double quotes group a field (format strings may contain commas); `""`
/// inside a quoted field is a literal quote. Whitespace after a delimiter is
/// skipped. A blank row yields no fields.
fn split_row(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    if row.trim().is_empty() {
        return fields;
    }

    let mut chars = row.chars().peekable();
    loop {
        while chars.peek() == Some(&' ') {
            chars.next();
        }

        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(c) = chars.next() {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        break;
                    }
                } else {
                    field.push(c);
                }
            }
            // anything between the closing quote and the delimiter is dropped
            while chars.peek().is_some_and(|&c| c != ',') {
                chars.next();
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                field.push(c);
                chars.next();
            }
        }
        fields.push(field);

        if chars.next().is_none() {
            break;
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tracetail-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).expect("create temp token file");
        file.write_all(contents.as_bytes()).expect("write temp token file");
        path
    }

    #[test]
    fn split_row_plain_fields() {
        assert_eq!(
            split_row("0x12, 34, main.c, APP, INFO, hello"),
            vec!["0x12", "34", "main.c", "APP", "INFO", "hello"]
        );
    }

    #[test]
    fn split_row_quoted_field_keeps_commas() {
        assert_eq!(
            split_row(r#"0x12, 34, main.c, APP, INFO, "x=%d, y=%d""#),
            vec!["0x12", "34", "main.c", "APP", "INFO", "x=%d, y=%d"]
        );
    }

    #[test]
    fn split_row_doubled_quote_is_literal() {
        assert_eq!(split_row(r#""say ""hi""", 2"#), vec![r#"say "hi""#, "2"]);
    }

    #[test]
    fn split_row_blank_line_is_empty() {
        assert!(split_row("").is_empty());
        assert!(split_row("   ").is_empty());
    }

    #[test]
    fn load_log_site_and_alias_rows() {
        let path = write_temp(
            "basic.txt",
            "0x34, 57, src/dm_main.c, DM, INFO, advertising started\n\
             0x34, -1, src/dm_main.c\n",
        );

        let table = load_tables(&[&path]).expect("load");
        std::fs::remove_file(&path).ok();

        let record = table.lookup(token_key(57, 0x34)).expect("log-site row");
        assert_eq!(record.source, "dm_main.c:57");
        assert_eq!(record.subsys, "DM");
        assert_eq!(record.severity, "INFO");
        assert_eq!(record.format, "advertising started");
        assert_eq!(table.param_str(0x34), "dm_main.c");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let path = write_temp(
            "malformed.txt",
            "not-hex, 10, a.c, X, INFO, ok\n\
             0x10, ten, a.c, X, INFO, ok\n\
             0x10\n\
             0x10, 10, a.c\n\
             0x10, 11, a.c, X, INFO, survives\n",
        );

        let table = load_tables(&[&path]).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 1);
        assert!(table.lookup(token_key(11, 0x10)).is_some());
    }

    #[test]
    fn later_file_wins_on_duplicate_key() {
        let first = write_temp("dup-a.txt", "0x10, 20, a.c, X, INFO, first\n");
        let second = write_temp("dup-b.txt", "0x10, 20, a.c, X, WARN, second\n");

        let table = load_tables(&[&first, &second]).expect("load");
        std::fs::remove_file(&first).ok();
        std::fs::remove_file(&second).ok();

        let record = table.lookup(token_key(20, 0x10)).expect("key present");
        assert_eq!(record.format, "second");
        assert_eq!(record.severity, "WARN");
    }

    #[test]
    fn double_load_is_deterministic() {
        let path = write_temp(
            "det.txt",
            "0x1, 10, a.c, X, INFO, one\n\
             0x2, 20, b.c, Y, WARN, two\n\
             0x2, -1, b.c\n",
        );

        let first = load_tables(&[&path]).expect("load");
        let second = load_tables(&[&path]).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(first.len(), second.len());
        assert_eq!(
            first.lookup(token_key(10, 0x1)),
            second.lookup(token_key(10, 0x1))
        );
        assert_eq!(
            first.lookup(token_key(20, 0x2)),
            second.lookup(token_key(20, 0x2))
        );
        assert_eq!(first.param_str(0x2), second.param_str(0x2));
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let missing = std::env::temp_dir().join("tracetail-does-not-exist.txt");
        let err = load_tables(&[&missing]).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn oversized_line_number_cannot_alias_another_key() {
        // 70000 truncated into the 16-bit line field lands on line 4464's
        // key; the row must be skipped instead of clobbering that entry.
        let path = write_temp(
            "line-overflow.txt",
            "0x10, 4464, real.c, X, INFO, legitimate message\n\
             0x10, 70000, huge.c, X, ERR, bogus overwrite\n",
        );

        let table = load_tables(&[&path]).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 1);
        let record = table.lookup(token_key(4464, 0x10)).expect("key present");
        assert_eq!(record.source, "real.c:4464");
        assert_eq!(record.format, "legitimate message");
    }

    #[test]
    fn oversized_module_id_cannot_alias_another_key() {
        // 0x1ABCD's 17th bit spills into the line field, composing the same
        // key as (9, 0xABCD); only the in-range row survives.
        let path = write_temp(
            "module-overflow.txt",
            "0xABCD, 9, real.c, X, INFO, legitimate message\n\
             0x1ABCD, 9, huge.c, X, ERR, bogus overwrite\n",
        );

        let table = load_tables(&[&path]).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 1);
        let record = table.lookup(token_key(9, 0xABCD)).expect("key present");
        assert_eq!(record.format, "legitimate message");
    }

    #[test]
    fn filename_is_reduced_to_basename() {
        let path = write_temp(
            "paths.txt",
            "0x5, 30, deep/nested/path/hci_core.c, HCI, ERR, reset failed\n",
        );

        let table = load_tables(&[&path]).expect("load");
        std::fs::remove_file(&path).ok();

        let record = table.lookup(token_key(30, 0x5)).expect("key present");
        assert_eq!(record.source, "hci_core.c:30");
    }
}
