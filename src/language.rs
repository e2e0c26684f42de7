//! Process-wide language handle
//!
//! The grammar table is built on first access and shared for the lifetime
//! of the process. Concurrent first calls race on a [`OnceLock`]: exactly one
//! thread builds the table and every caller observes the same result, success
//! or failure. A failed build is cached and never retried.

use std::ffi::c_void;
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::LanguageError;
use crate::grammar::{ABI_VERSION, BinaryOperator, GrammarTable, Plugin};
use crate::parser::SyntaxKind;

static GRAMMAR: OnceLock<Result<GrammarTable, LanguageError>> = OnceLock::new();

fn grammar() -> &'static Result<GrammarTable, LanguageError> {
    GRAMMAR.get_or_init(|| {
        debug!("building datastar grammar table");
        GrammarTable::build()
    })
}

/// A handle to the loaded Datastar grammar.
///
/// Cheap to copy. Two handles are equal when they refer to the same table.
#[derive(Clone, Copy)]
pub struct Language {
    table: &'static GrammarTable,
}

/// Returns the Datastar language.
///
/// # Panics
///
/// Panics if the grammar table fails validation. That is a defect of the
/// crate itself, not of any input; use [`try_language`] to observe it as an
/// error instead.
pub fn language() -> Language {
    match try_language() {
        Ok(language) => language,
        Err(err) => panic!("datastar grammar failed to initialize: {err}"),
    }
}

/// Returns the Datastar language, or the error that prevented the grammar
/// table from being built.
pub fn try_language() -> Result<Language, LanguageError> {
    match grammar() {
        Ok(table) => Ok(Language { table }),
        Err(err) => Err(err.clone()),
    }
}

/// Loader entry point for host runtimes.
///
/// Returns an opaque, pointer-sized handle to the grammar table, or null if
/// the table could not be built. Pass the result to [`Language::from_raw`].
#[unsafe(no_mangle)]
pub extern "C" fn datastar_language() -> *const c_void {
    match grammar() {
        Ok(table) => std::ptr::from_ref(table).cast(),
        Err(_) => std::ptr::null(),
    }
}

impl Language {
    /// Wrap a handle returned by [`datastar_language`].
    ///
    /// Returns `None` for a null handle.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a value returned by [`datastar_language`].
    pub unsafe fn from_raw(ptr: *const c_void) -> Option<Language> {
        // SAFETY: non-null handles come from `datastar_language`, which only
        // hands out pointers into the process-wide `GRAMMAR` cell.
        unsafe { ptr.cast::<GrammarTable>().as_ref() }.map(|table| Language { table })
    }

    /// The opaque handle for this language, as [`datastar_language`] returns it
    pub fn as_raw(self) -> *const c_void {
        std::ptr::from_ref(self.table).cast()
    }

    pub fn grammar(self) -> &'static GrammarTable {
        self.table
    }

    pub fn name(self) -> &'static str {
        self.table.name()
    }

    /// ABI version of the table layout
    pub fn version(self) -> u32 {
        ABI_VERSION
    }

    pub fn symbol_count(self) -> usize {
        self.table.symbols().len()
    }

    pub fn symbol_name(self, kind: SyntaxKind) -> &'static str {
        self.table.symbol(kind).name
    }

    pub fn symbol_for_name(self, name: &str, named: bool) -> Option<SyntaxKind> {
        self.table.symbol_for_name(name, named)
    }

    pub fn node_kind_is_named(self, kind: SyntaxKind) -> bool {
        self.table.symbol(kind).named
    }

    pub fn plugins(self) -> impl Iterator<Item = &'static Plugin> {
        self.table.plugins()
    }

    pub fn plugin(self, name: &str) -> Option<&'static Plugin> {
        self.table.plugin(name)
    }

    pub fn binary_operator(self, kind: SyntaxKind) -> Option<&'static BinaryOperator> {
        self.table.binary_operator(kind)
    }

    pub fn is_assignment_operator(self, kind: SyntaxKind) -> bool {
        self.table.is_assignment_operator(kind)
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table)
    }
}

impl Eq for Language {}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name())
            .field("version", &self.version())
            .field("symbols", &self.symbol_count())
            .finish()
    }
}
