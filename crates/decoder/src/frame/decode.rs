//! Decode — frame classification against the token table.

use crate::token::TokenTable;

use super::model::{DecodedEvent, Frame, RELOAD_PARAM_WORD};

const RELOAD_TOKEN_ID: u32 = 0x0FFF_FFFF;

/// Classify one frame. A table hit wins over everything, then the reserved
/// reload control frame, then unknown; the three outcomes are exhaustive.
pub fn decode(frame: Frame, table: &TokenTable) -> DecodedEvent {
    let flags = frame.flags();
    let token_id = frame.token_id();

    if let Some(record) = table.lookup(token_id) {
        return DecodedEvent::Resolved {
            record: record.clone(),
            param: frame.param_word,
            flags,
        };
    }

    if flags == 0xF && token_id == RELOAD_TOKEN_ID && frame.param_word == RELOAD_PARAM_WORD {
        return DecodedEvent::ReloadSignal;
    }

    DecodedEvent::Unknown {
        token_id,
        param_word: frame.param_word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{token_key, TokenRecord};

    fn table_with(key: u32) -> TokenTable {
        let mut table = TokenTable::default();
        table.insert_token(
            key,
            TokenRecord {
                source: "main.c:10".to_string(),
                severity: "INFO".to_string(),
                subsys: "APP".to_string(),
                format: "hello".to_string(),
            },
        );
        table
    }

    #[test]
    fn known_token_resolves() {
        let key = token_key(10, 0xAB);
        let table = table_with(key);
        let frame = Frame {
            token_word: 0x3000_0000 | key,
            param_word: 42,
        };

        match decode(frame, &table) {
            DecodedEvent::Resolved { record, param, flags } => {
                assert_eq!(record.format, "hello");
                assert_eq!(param, 42);
                assert_eq!(flags, 0x3);
            }
            other => panic!("expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn reload_control_frame() {
        let table = TokenTable::default();
        let frame = Frame {
            token_word: 0xFFFF_FFFF,
            param_word: 0xFFFF_FFFF,
        };

        assert_eq!(decode(frame, &table), DecodedEvent::ReloadSignal);
    }

    #[test]
    fn table_hit_beats_reload_pattern() {
        // A table entry for the reserved id takes priority over the
        // control-frame interpretation.
        let table = table_with(RELOAD_TOKEN_ID);
        let frame = Frame {
            token_word: 0xFFFF_FFFF,
            param_word: 0xFFFF_FFFF,
        };

        assert!(matches!(decode(frame, &table), DecodedEvent::Resolved { .. }));
    }

    #[test]
    fn all_ones_token_without_all_ones_param_is_unknown() {
        let table = TokenTable::default();
        let frame = Frame {
            token_word: 0xFFFF_FFFF,
            param_word: 0x0000_0001,
        };

        assert_eq!(
            decode(frame, &table),
            DecodedEvent::Unknown {
                token_id: RELOAD_TOKEN_ID,
                param_word: 0x0000_0001,
            }
        );
    }

    #[test]
    fn unknown_token() {
        let table = TokenTable::default();
        let frame = Frame {
            token_word: 0x0000_ABCD,
            param_word: 0x1234_5678,
        };

        assert_eq!(
            decode(frame, &table),
            DecodedEvent::Unknown {
                token_id: 0x0000_ABCD,
                param_word: 0x1234_5678,
            }
        );
    }
}
