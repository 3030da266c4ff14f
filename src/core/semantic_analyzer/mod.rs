//! Semantic bookkeeping consulted while the grammar is walked.
//!
//! The only component is the symbol table: tables, their columns, and the
//! relationships between them. The parser populates it from declarations
//! and resolves references in relationships and queries against it.

pub mod symbol_table;

pub use symbol_table::{
    Cardinality, ColumnSymbol, DataType, RelationshipSymbol, SymbolError,
    SymbolTable,
};
