//! Line — placeholder inference, parameter splitting, prefix columns.

use tracing::debug;

use crate::token::{TokenRecord, TokenTable};

use super::printf::{render, Arg};

/// Render a record's message from its 32-bit parameter word.
///
/// The wire carries no argument list; field widths are inferred from the
/// format text alone. `num_spec` counts every `%` character, `num_str` counts
/// `%s` occurrences, and the branch structure below matches the device-side
/// format-string conventions bit for bit. Any pattern outside the table, and
/// any render mismatch, degrades to the literal format text.
pub fn format_message(record: &TokenRecord, table: &TokenTable, param: u32) -> String {
    let format = record.format.as_str();
    let num_spec = format.matches('%').count();
    let num_str = format.matches("%s").count();

    let args = if num_str >= 1 {
        match (num_spec, num_str) {
            (1, _) => Some(vec![Arg::Str(table.param_str(param & 0xFFFF))]),
            (2, 1) => {
                // Ordering is positional: when the first placeholder overall
                // is the %s, the id rides in the low half. Both orderings are
                // live in shipped firmware; do not symmetrize.
                if format.find("%s") == format.find('%') {
                    Some(vec![
                        Arg::Str(table.param_str(param & 0xFFFF)),
                        Arg::Num(param >> 16),
                    ])
                } else {
                    Some(vec![
                        Arg::Num(param & 0xFFFF),
                        Arg::Str(table.param_str(param >> 16)),
                    ])
                }
            }
            (2, 2) => Some(vec![
                Arg::Str(table.param_str(param & 0xFFFF)),
                Arg::Str(table.param_str(param >> 16)),
            ]),
            _ => None,
        }
    } else {
        match num_spec {
            1 => Some(vec![Arg::Num(param)]),
            2 => Some(vec![Arg::Num(param & 0xFFFF), Arg::Num(param >> 16)]),
            3 => Some(vec![
                Arg::Num(param & 0xFF),
                Arg::Num((param >> 8) & 0xFF),
                Arg::Num((param >> 16) & 0xFFFF),
            ]),
            4 => Some(vec![
                Arg::Num(param & 0xFF),
                Arg::Num((param >> 8) & 0xFF),
                Arg::Num((param >> 16) & 0xFF),
                Arg::Num(param >> 24),
            ]),
            _ => None,
        }
    };

    match args {
        Some(args) => render(format, &args).unwrap_or_else(|err| {
            debug!(format, %err, "placeholder mismatch, emitting literal text");
            format.to_string()
        }),
        None => format.to_string(),
    }
}

/// Prefix a rendered message with the fixed-width columns: sequence number,
/// flag marker, source, subsystem, severity.
pub fn format_line(seq: u64, record: &TokenRecord, message: &str, flags: u8) -> String {
    format!(
        "{:7}{}| {:<30} | {:<3} | {:<4} | {}",
        seq,
        if flags != 0 { '*' } else { ' ' },
        record.source,
        record.subsys,
        record.severity,
        message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(format: &str) -> TokenRecord {
        TokenRecord {
            source: "dm_main.c:57".to_string(),
            severity: "INFO".to_string(),
            subsys: "DM".to_string(),
            format: format.to_string(),
        }
    }

    fn table() -> TokenTable {
        let mut table = TokenTable::default();
        table.insert_source(0x0001, "hci_core.c".to_string());
        table.insert_source(0x0002, "dm_main.c".to_string());
        table
    }

    #[test]
    fn single_string_uses_low_half_only() {
        let msg = format_message(&record("opened %s"), &table(), 0xBEEF_0002);
        assert_eq!(msg, "opened dm_main.c");
    }

    #[test]
    fn single_string_unresolved_id_falls_back_to_hex() {
        let msg = format_message(&record("opened %s"), &table(), 0x0000_00AB);
        assert_eq!(msg, "opened <0x00ab>");
    }

    #[test]
    fn string_second_takes_numeric_from_low_half() {
        // num_spec=2, num_str=1, %s is not the first placeholder: the
        // numeric field is the low half, the id the high half.
        let msg = format_message(&record("value=%d id=%s"), &table(), 0x0002_0001);
        assert_eq!(msg, "value=1 id=dm_main.c");
    }

    #[test]
    fn string_first_takes_id_from_low_half() {
        let msg = format_message(&record("id=%s value=%d"), &table(), 0x0002_0001);
        assert_eq!(msg, "id=hci_core.c value=2");
    }

    #[test]
    fn two_strings_resolve_both_halves() {
        let msg = format_message(&record("%s calls %s"), &table(), 0x0002_0001);
        assert_eq!(msg, "hci_core.c calls dm_main.c");
    }

    #[test]
    fn numeric_splits_by_placeholder_count() {
        let t = table();
        assert_eq!(
            format_message(&record("word=%u"), &t, 0x1234_5678),
            "word=305419896"
        );
        assert_eq!(
            format_message(&record("lo=%u hi=%u"), &t, 0x0002_0001),
            "lo=1 hi=2"
        );
        assert_eq!(
            format_message(&record("b0=%u b1=%u hi=%u"), &t, 0x1234_02_01),
            "b0=1 b1=2 hi=4660"
        );
        assert_eq!(
            format_message(&record("%u.%u.%u.%u"), &t, 0x0403_0201),
            "1.2.3.4"
        );
    }

    #[test]
    fn no_placeholders_is_literal() {
        assert_eq!(
            format_message(&record("stack initialized"), &table(), 0xDEAD_BEEF),
            "stack initialized"
        );
    }

    #[test]
    fn five_placeholders_degrade_to_literal() {
        let format = "%u %u %u %u %u";
        assert_eq!(format_message(&record(format), &table(), 1), format);
    }

    #[test]
    fn string_count_outside_table_degrades_to_literal() {
        let format = "%s %s %s";
        assert_eq!(format_message(&record(format), &table(), 1), format);
    }

    #[test]
    fn percent_escape_counts_push_pattern_to_literal() {
        // "%%" contributes two to the census, so the row renders literally
        // rather than misinterpreting the parameter split.
        let format = "battery at 100%% (%u mV)";
        assert_eq!(format_message(&record(format), &table(), 3300), format);
    }

    #[test]
    fn prefix_columns_are_fixed_width() {
        let line = format_line(1, &record("x"), "advertising started", 0);
        assert_eq!(
            line,
            "      1 | dm_main.c:57                   | DM  | INFO | advertising started"
        );
    }

    #[test]
    fn flags_set_marks_the_sequence_column() {
        let line = format_line(42, &record("x"), "msg", 0x3);
        assert!(line.starts_with("     42*| "));
    }

    #[test]
    fn undefined_record_renders_exact_literal() {
        let rec = TokenRecord::undefined(0x0000_ABCD, 0x1234_5678);
        let msg = format_message(&rec, &table(), 0);
        assert_eq!(msg, "undefined message token=0x0000abcd, param=0x12345678");

        let line = format_line(3, &rec, &msg, 0);
        assert_eq!(
            line,
            "      3 | <internal>                     | --- | ERR  | undefined message token=0x0000abcd, param=0x12345678"
        );
    }
}
