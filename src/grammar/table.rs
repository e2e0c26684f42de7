//! The compiled grammar table
//!
//! Built once from a [`GrammarDefinition`], validated, and then only read.
//! Every lookup the lexer and parser need at runtime is an index or hash
//! lookup here.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::LanguageError;
use crate::parser::SyntaxKind;

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// Standard plugins ship with Datastar; Pro plugins need a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginTier {
    Standard,
    Pro,
}

/// Raw grammar data, before validation
#[derive(Debug, Clone, Copy)]
pub struct GrammarDefinition {
    pub name: &'static str,
    pub symbols: &'static [(SyntaxKind, &'static str, bool)],
    pub binary_operators: &'static [(SyntaxKind, u8, Assoc)],
    pub prefix_operators: &'static [SyntaxKind],
    pub postfix_operators: &'static [SyntaxKind],
    pub assignment_operators: &'static [SyntaxKind],
    pub plugins: &'static [(&'static str, PluginTier)],
}

/// Name and visibility of a syntax kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolInfo {
    pub kind: SyntaxKind,
    pub name: &'static str,
    /// Named symbols are the ones a tree-sitter style S-expression shows
    pub named: bool,
}

/// A binary operator entry of the precedence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryOperator {
    pub kind: SyntaxKind,
    pub precedence: u8,
    pub assoc: Assoc,
}

impl BinaryOperator {
    /// Minimum precedence for the right operand
    pub fn right_precedence(&self) -> u8 {
        match self.assoc {
            Assoc::Left => self.precedence + 1,
            Assoc::Right => self.precedence,
        }
    }
}

/// A `data-*` plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plugin {
    pub name: &'static str,
    pub tier: PluginTier,
}

/// The validated, indexed grammar
#[derive(Debug)]
pub struct GrammarTable {
    name: &'static str,
    /// Indexed by `SyntaxKind as usize`
    symbols: Vec<SymbolInfo>,
    symbol_ids: FxHashMap<(&'static str, bool), SyntaxKind>,
    binary: FxHashMap<SyntaxKind, BinaryOperator>,
    prefix: FxHashSet<SyntaxKind>,
    postfix: FxHashSet<SyntaxKind>,
    assignment: FxHashSet<SyntaxKind>,
    plugins: IndexMap<&'static str, Plugin>,
    /// Plugin names, longest first, for longest-match scanning
    plugins_by_length: Vec<&'static str>,
}

impl GrammarTable {
    /// Build the table for the grammar shipped with this crate
    pub fn build() -> Result<Self, LanguageError> {
        Self::from_definition(&super::rules::DATASTAR)
    }

    /// Validate and index a grammar definition
    pub fn from_definition(def: &GrammarDefinition) -> Result<Self, LanguageError> {
        let symbols = Self::build_symbols(def)?;

        let mut symbol_ids = FxHashMap::default();
        for info in &symbols {
            if symbol_ids.insert((info.name, info.named), info.kind).is_some() {
                return Err(LanguageError::DuplicateSymbolName {
                    name: info.name,
                    named: info.named,
                });
            }
        }

        let mut binary = FxHashMap::default();
        for &(kind, precedence, assoc) in def.binary_operators {
            if !(kind.is_punct() || kind.is_keyword()) {
                return Err(LanguageError::NotAnOperator(kind));
            }
            let op = BinaryOperator {
                kind,
                precedence,
                assoc,
            };
            if binary.insert(kind, op).is_some() {
                return Err(LanguageError::ConflictingOperator(kind));
            }
        }

        let prefix = Self::operator_set(def.prefix_operators, |k| k.is_punct() || k.is_keyword())?;
        let postfix = Self::operator_set(def.postfix_operators, SyntaxKind::is_punct)?;
        let assignment = Self::operator_set(def.assignment_operators, SyntaxKind::is_assignment_op)?;

        if def.plugins.is_empty() {
            return Err(LanguageError::NoPlugins);
        }
        let mut plugins = IndexMap::with_capacity(def.plugins.len());
        for &(name, tier) in def.plugins {
            let valid = !name.is_empty()
                && !name.starts_with('-')
                && name
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
            if !valid {
                return Err(LanguageError::InvalidPluginName(name));
            }
            if plugins.insert(name, Plugin { name, tier }).is_some() {
                return Err(LanguageError::DuplicatePlugin(name));
            }
        }
        let mut plugins_by_length: Vec<_> = plugins.keys().copied().collect();
        plugins_by_length.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

        debug!(
            grammar = def.name,
            symbols = symbols.len(),
            operators = binary.len(),
            plugins = plugins.len(),
            "grammar table built"
        );

        Ok(Self {
            name: def.name,
            symbols,
            symbol_ids,
            binary,
            prefix,
            postfix,
            assignment,
            plugins,
            plugins_by_length,
        })
    }

    /// One symbol per syntax kind, in kind order
    fn build_symbols(def: &GrammarDefinition) -> Result<Vec<SymbolInfo>, LanguageError> {
        let mut slots: Vec<Option<SymbolInfo>> = vec![None; SyntaxKind::__LAST as usize];
        for &(kind, name, named) in def.symbols {
            let slot = &mut slots[kind as usize];
            if slot.is_some() {
                return Err(LanguageError::DuplicateSymbol(kind));
            }
            *slot = Some(SymbolInfo { kind, name, named });
        }
        SyntaxKind::all()
            .zip(slots)
            .map(|(kind, slot)| slot.ok_or(LanguageError::MissingSymbol(kind)))
            .collect()
    }

    fn operator_set(
        kinds: &[SyntaxKind],
        is_operator: impl Fn(SyntaxKind) -> bool,
    ) -> Result<FxHashSet<SyntaxKind>, LanguageError> {
        let mut set = FxHashSet::default();
        for &kind in kinds {
            if !is_operator(kind) {
                return Err(LanguageError::NotAnOperator(kind));
            }
            if !set.insert(kind) {
                return Err(LanguageError::ConflictingOperator(kind));
            }
        }
        Ok(set)
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn symbols(&self) -> &[SymbolInfo] {
        &self.symbols
    }

    pub fn symbol(&self, kind: SyntaxKind) -> &SymbolInfo {
        &self.symbols[kind as usize]
    }

    pub fn symbol_for_name(&self, name: &str, named: bool) -> Option<SyntaxKind> {
        // Shorten the key lifetime so a borrowed name can be looked up
        let ids: &FxHashMap<(&str, bool), SyntaxKind> = &self.symbol_ids;
        ids.get(&(name, named)).copied()
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub fn binary_operator(&self, kind: SyntaxKind) -> Option<&BinaryOperator> {
        self.binary.get(&kind)
    }

    pub fn is_prefix_operator(&self, kind: SyntaxKind) -> bool {
        self.prefix.contains(&kind)
    }

    pub fn is_postfix_operator(&self, kind: SyntaxKind) -> bool {
        self.postfix.contains(&kind)
    }

    pub fn is_assignment_operator(&self, kind: SyntaxKind) -> bool {
        self.assignment.contains(&kind)
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// All plugins, in declaration order
    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        self.plugins.get(name)
    }

    /// The longest plugin name `text` starts with
    pub fn longest_plugin_prefix(&self, text: &str) -> Option<&Plugin> {
        self.plugins_by_length
            .iter()
            .find(|name| text.starts_with(**name))
            .and_then(|name| self.plugins.get(*name))
    }
}
