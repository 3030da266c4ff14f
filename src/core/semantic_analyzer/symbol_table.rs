//! Symbol table for declared tables, their columns and relationships.
//!
//! A `SymbolTable` belongs to one parse session. Tables are registered when
//! their definition is read, columns are appended as they are declared, and
//! everything is consulted afterwards to resolve references in
//! relationships and queries. Nothing is ever removed.
//!
//! Every operation that breaks an invariant returns a `SymbolError`:
//! registering a table twice, touching a table that was never registered,
//! or asking for a column its table does not declare. After a failed parse
//! the table may hold partial declarations; start a new one for the next
//! run.

use std::collections::HashMap;

use compiler_macros::EnumKindName;
use thiserror::Error;

use crate::core::scanner::tokens::Token;

/// Scalar column types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumKindName)]
pub enum DataType {
    #[kind(rename = "int")]
    Int,
    #[kind(rename = "float")]
    Float,
    #[kind(rename = "bool")]
    Bool,
    #[kind(rename = "string")]
    String,
}

/// How many target rows a relationship may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumKindName)]
pub enum Cardinality {
    #[kind(rename = "many")]
    Many,
    #[kind(rename = "one")]
    One,
}

/// A declared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSymbol {
    /// The identifier token naming the column.
    pub name: Token,
    pub data_type: DataType,
    /// Declared with `[primary]`.
    pub primary_key: bool,
}

impl ColumnSymbol {
    #[must_use]
    pub fn new(name: Token, data_type: DataType, primary_key: bool) -> Self {
        Self {
            name,
            data_type,
            primary_key,
        }
    }

    /// The column name as written in the source.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        self.name.lexeme()
    }
}

/// A declared relationship `owner.many(target);` or `owner.one(target);`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipSymbol {
    pub owner: String,
    pub cardinality: Cardinality,
    pub target: String,
}

/// Errors that can occur during symbol table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The table name is already registered.
    #[error("Symbol {name} was previously defined in this scope")]
    DuplicateTable { name: String },

    /// The table name was never registered.
    #[error("Symbol {name} hasn't been defined in this scope")]
    UndefinedTable { name: String },

    /// The table exists but declares no column with this name.
    #[error("{column} not found in current context of table {table}")]
    ColumnNotFound { table: String, column: String },
}

/// Registry of tables and their ordered column lists.
///
/// ## Examples
/// ```
/// # use query_builder_rs::core::semantic_analyzer::symbol_table::*;
/// # use query_builder_rs::core::scanner::{Token, TokenKind};
/// let mut symbols = SymbolTable::new();
/// symbols.register_table("users").unwrap();
/// let id = Token::new(TokenKind::Identifier, "id", 1, 10);
/// symbols
///     .add_column("users", ColumnSymbol::new(id, DataType::Int, true))
///     .unwrap();
/// assert!(symbols.column("users", "id").unwrap().primary_key);
/// assert!(symbols.register_table("users").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    tables: HashMap<String, Vec<ColumnSymbol>>,
    // Table names in registration order.
    declaration_order: Vec<String>,
    relationships: Vec<RelationshipSymbol>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with no columns.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::DuplicateTable` if `name` is already registered.
    pub fn register_table(&mut self, name: &str) -> Result<(), SymbolError> {
        self.register_table_with_columns(name, Vec::new())
    }

    /// Register a table together with its columns.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::DuplicateTable` if `name` is already registered.
    pub fn register_table_with_columns(
        &mut self,
        name: &str,
        columns: Vec<ColumnSymbol>,
    ) -> Result<(), SymbolError> {
        if self.tables.contains_key(name) {
            return Err(SymbolError::DuplicateTable {
                name: name.to_string(),
            });
        }
        self.tables.insert(name.to_string(), columns);
        self.declaration_order.push(name.to_string());
        Ok(())
    }

    /// Append a column to an existing table.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::UndefinedTable` if `table` is not registered.
    pub fn add_column(
        &mut self,
        table: &str,
        column: ColumnSymbol,
    ) -> Result<(), SymbolError> {
        let columns = self.tables.get_mut(table).ok_or_else(|| {
            SymbolError::UndefinedTable {
                name: table.to_string(),
            }
        })?;
        columns.push(column);
        Ok(())
    }

    /// Find a column by name; the first declaration wins.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::UndefinedTable` if `table` is not registered and
    /// `SymbolError::ColumnNotFound` if it declares no such column.
    pub fn column(
        &self,
        table: &str,
        lexeme: &str,
    ) -> Result<&ColumnSymbol, SymbolError> {
        self.columns(table)?
            .iter()
            .find(|column| column.lexeme() == lexeme)
            .ok_or_else(|| SymbolError::ColumnNotFound {
                table: table.to_string(),
                column: lexeme.to_string(),
            })
    }

    /// All columns of a table, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::UndefinedTable` if `table` is not registered.
    pub fn columns(&self, table: &str) -> Result<&[ColumnSymbol], SymbolError> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| SymbolError::UndefinedTable {
                name: table.to_string(),
            })
    }

    /// Record a relationship between two registered tables.
    ///
    /// # Errors
    ///
    /// Returns `SymbolError::UndefinedTable` naming the first of `owner`,
    /// `target` that is not registered.
    pub fn add_relationship(
        &mut self,
        owner: &str,
        cardinality: Cardinality,
        target: &str,
    ) -> Result<(), SymbolError> {
        for name in [owner, target] {
            if !self.contains_table(name) {
                return Err(SymbolError::UndefinedTable {
                    name: name.to_string(),
                });
            }
        }
        self.relationships.push(RelationshipSymbol {
            owner: owner.to_string(),
            cardinality,
            target: target.to_string(),
        });
        Ok(())
    }

    /// Relationships in declaration order.
    #[must_use]
    pub fn relationships(&self) -> &[RelationshipSymbol] {
        &self.relationships
    }

    #[must_use]
    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in registration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.declaration_order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
