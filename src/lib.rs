pub mod api;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod formatter;
pub mod image;
pub mod json;
pub mod keywords;
pub mod lexer;
pub mod regexp;
pub mod textcase;
pub mod token;

// Re-export the main public API
pub use api::{render_diff, sql_is_formatted};
pub use config::{load_config, Config, DEFAULT_MAX_MATCHES};
pub use dictionary::{parse_dictionary, Dictionary};
pub use error::{NexusError, Result};
pub use formatter::{format_sql, needs_space_between, SqlFormatOptions, SqlMode};
pub use json::{canonicalize_json, JsonOptions};
pub use regexp::{
    analyze_meta, compile_regex, find_matches, normalize_flags, CompiledPattern, GroupMatch,
    MatchRecord, RegexMeta,
};
pub use textcase::{convert_text, text_stats, CaseOperation, TextStats};
