//! Grammar table: symbols, operator precedence and the plugin vocabulary

mod rules;
mod table;

pub use rules::{DATASTAR, Precedence};
pub use table::{
    Assoc, BinaryOperator, GrammarDefinition, GrammarTable, Plugin, PluginTier, SymbolInfo,
};

/// Version of the generated-parser ABI the loader entry point reports
pub const ABI_VERSION: u32 = 14;
