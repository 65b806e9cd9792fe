//! Model — token table and record types.

use std::collections::HashMap;

/// One log-site definition: everything needed to render a resolved token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    /// Source tag, `filename:line`.
    pub source: String,
    /// Severity tag, free-form; conventionally INFO/WARN/ERR.
    pub severity: String,
    /// Short subsystem tag.
    pub subsys: String,
    /// printf-style format string for the 32-bit parameter word.
    pub format: String,
}

impl TokenRecord {
    /// Synthetic record for a token id that has no table entry. The message
    /// is pre-rendered, so it flows through formatting as literal text.
    pub fn undefined(token_id: u32, param_word: u32) -> Self {
        Self {
            source: "<internal>".to_string(),
            severity: "ERR".to_string(),
            subsys: "---".to_string(),
            format: format!(
                "undefined message token=0x{:08x}, param=0x{:08x}",
                token_id, param_word
            ),
        }
    }
}

/// Compose a table key from a line number and module id.
///
/// Keys are `(line << 16) | module_id`; the device transmits the same
/// composition in the low 28 bits of its token word.
pub fn token_key(line: u32, module_id: u32) -> u32 {
    (line << 16) | module_id
}

/// Immutable token lookup table.
///
/// Two views over one load pass: log-site rows land in `tokens`, keyed by
/// [`token_key`]; filename-alias rows (declared line ≤ 0) land in `sources`,
/// keyed by module id, and resolve `%s` parameters to file names.
#[derive(Debug, Default, Clone)]
pub struct TokenTable {
    tokens: HashMap<u32, TokenRecord>,
    sources: HashMap<u32, String>,
}

impl TokenTable {
    pub(crate) fn insert_token(&mut self, key: u32, record: TokenRecord) {
        // Last write wins across files and rows.
        self.tokens.insert(key, record);
    }

    pub(crate) fn insert_source(&mut self, module_id: u32, filename: String) {
        self.sources.insert(module_id, filename);
    }

    /// Look up a 28-bit token id from the wire.
    pub fn lookup(&self, token_id: u32) -> Option<&TokenRecord> {
        self.tokens.get(&token_id)
    }

    /// Number of log-site entries (alias rows are not counted).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resolve an encoded string parameter to its filename, or the
    /// `<0x%04x>` placeholder when the alias table has no entry.
    ///
    /// The wire only ever carries 16-bit ids here; callers mask before
    /// calling so alias entries above 0xFFFF are unreachable by design.
    pub fn param_str(&self, module_id: u32) -> String {
        match self.sources.get(&module_id) {
            Some(name) => name.clone(),
            None => format!("<{:#06x}>", module_id),
        }
    }
}
