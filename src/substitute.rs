//! `%token%` placeholder substitution for incoming chat text.
//!
//! Server announcements carry placeholders like `Press %toggleChat% to
//! chat`; they are rewritten once, before the text is stored. Unknown
//! tokens and stray `%` signs pass through verbatim.

use std::collections::HashMap;

/// Resolves a token (the text between `%` delimiters) to its replacement.
pub trait VarResolver {
    fn resolve(&self, var: &str) -> Option<String>;
}

/// Rewrite every `%token%` span in `raw` via `resolver`.
///
/// The scan pairs up `%` delimiters left to right. A resolver miss keeps
/// the `%token%` text untouched, an unpaired trailing `%` leaves the rest
/// of the string as-is, and replacement text is never rescanned.
pub fn substitute(raw: &str, resolver: &dyn VarResolver) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(open) = rest.find('%') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('%') else {
            // Unpaired opening delimiter: keep the tail verbatim.
            out.push_str(&rest[open..]);
            return out;
        };
        let var = &after[..close];
        match resolver.resolve(var) {
            Some(val) => out.push_str(&val),
            None => {
                out.push('%');
                out.push_str(var);
                out.push('%');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// A default key assignment: binding name -> key cap label.
struct DefaultBinding {
    action: &'static str,
    key: &'static str,
}

/// Bindings every install starts with; the host overrides these as the
/// player rebinds keys.
const DEFAULT_BINDINGS: &[DefaultBinding] = &[
    DefaultBinding { action: "toggleChat", key: "T" },
    DefaultBinding { action: "teamChat", key: "Y" },
    DefaultBinding { action: "quickChat", key: "V" },
    DefaultBinding { action: "toggleScoreboard", key: "TAB" },
    DefaultBinding { action: "toggleConsole", key: "`" },
    DefaultBinding { action: "help", key: "F1" },
    DefaultBinding { action: "mission", key: "F2" },
];

/// The reserved token for the active player's display name.
const PLAYER_NAME_VAR: &str = "playerName";

/// Token resolver backed by the keybinding table and a fixed set of named
/// values.
///
/// Keybinding names resolve first, to the bound key in brackets (`[TAB]`);
/// then the reserved `playerName` token. All lookups are case-insensitive.
pub struct GameResolver {
    /// Rebound keys (lowercase binding name -> key cap label). Checked
    /// before the built-in defaults.
    overrides: HashMap<String, String>,
    player_name: Option<String>,
}

impl GameResolver {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            player_name: None,
        }
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = Some(name.into());
    }

    /// Rebind `action` to `key`, shadowing the default table.
    pub fn bind(&mut self, action: &str, key: impl Into<String>) {
        self.overrides.insert(action.to_lowercase(), key.into());
    }

    fn key_for(&self, action: &str) -> Option<&str> {
        let lower = action.to_lowercase();
        if let Some(key) = self.overrides.get(&lower) {
            return Some(key);
        }
        DEFAULT_BINDINGS
            .iter()
            .find(|b| b.action.eq_ignore_ascii_case(&lower))
            .map(|b| b.key)
    }
}

impl Default for GameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl VarResolver for GameResolver {
    fn resolve(&self, var: &str) -> Option<String> {
        if let Some(key) = self.key_for(var) {
            return Some(format!("[{key}]"));
        }
        if var.eq_ignore_ascii_case(PLAYER_NAME_VAR) {
            return self.player_name.clone();
        }
        None
    }
}

/// A resolver that knows nothing; every token passes through verbatim.
pub struct NullResolver;

impl VarResolver for NullResolver {
    fn resolve(&self, _var: &str) -> Option<String> {
        None
    }
}
