//! SQLite-backed pokemon repository.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use super::object_id::generate_object_id;
use super::{
    NewPokemon, Pagination, Pokemon, PokemonFilter, PokemonPatch, PokemonRepository,
    RepositoryError,
};

const UNIQUE_VIOLATION_PREFIX: &str = "UNIQUE constraint failed: pokemon.";

/// SQLite-backed pokemon repository.
pub struct SqlitePokemonRepository {
    conn: Mutex<Connection>,
}

impl SqlitePokemonRepository {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn new(path: &Path) -> Result<Self, RepositoryError> {
        let conn = Connection::open(path).map_err(|e| RepositoryError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory repository (useful for testing).
    pub fn in_memory() -> Result<Self, RepositoryError> {
        let conn =
            Connection::open_in_memory().map_err(|e| RepositoryError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), RepositoryError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS pokemon (
                id TEXT PRIMARY KEY,
                no INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL UNIQUE
            );
            "#,
        )
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::Database("connection mutex poisoned".to_string()))
    }

    fn row_to_pokemon(row: &rusqlite::Row) -> rusqlite::Result<Pokemon> {
        Ok(Pokemon {
            id: row.get(0)?,
            no: row.get(1)?,
            name: row.get(2)?,
        })
    }

    /// Column and bound value for a filter.
    fn filter_clause(filter: &PokemonFilter) -> (&'static str, Box<dyn rusqlite::ToSql>) {
        match filter {
            PokemonFilter::No(no) => ("no", Box::new(*no)),
            PokemonFilter::Id(id) => ("id", Box::new(id.to_lowercase())),
            PokemonFilter::Name(name) => ("name", Box::new(name.clone())),
        }
    }

    /// Turn a write failure into a repository error, recognising unique
    /// constraint violations. `values` supplies the attempted value per field.
    fn classify_write_error(e: rusqlite::Error, values: &[(&str, Value)]) -> RepositoryError {
        if let rusqlite::Error::SqliteFailure(ref err, Some(ref msg)) = e {
            if err.code == ErrorCode::ConstraintViolation {
                if let Some(field) = msg.strip_prefix(UNIQUE_VIOLATION_PREFIX) {
                    let value = values
                        .iter()
                        .find(|(name, _)| *name == field)
                        .map(|(_, v)| v.clone())
                        .unwrap_or(Value::Null);
                    return RepositoryError::DuplicateKey {
                        field: field.to_string(),
                        value,
                    };
                }
            }
        }
        RepositoryError::Database(e.to_string())
    }

    fn insert_row(conn: &Connection, input: &NewPokemon) -> Result<Pokemon, RepositoryError> {
        let id = generate_object_id();
        conn.execute(
            "INSERT INTO pokemon (id, no, name) VALUES (?, ?, ?)",
            params![&id, input.no, &input.name],
        )
        .map_err(|e| {
            Self::classify_write_error(
                e,
                &[
                    ("id", Value::from(id.clone())),
                    ("no", Value::from(input.no)),
                    ("name", Value::from(input.name.clone())),
                ],
            )
        })?;

        Ok(Pokemon {
            id,
            no: input.no,
            name: input.name.clone(),
        })
    }
}

impl PokemonRepository for SqlitePokemonRepository {
    fn create(&self, input: &NewPokemon) -> Result<Pokemon, RepositoryError> {
        let conn = self.conn()?;
        Self::insert_row(&conn, input)
    }

    fn find_one(&self, filter: &PokemonFilter) -> Result<Option<Pokemon>, RepositoryError> {
        let conn = self.conn()?;
        let (column, value) = Self::filter_clause(filter);

        let sql = format!("SELECT id, no, name FROM pokemon WHERE {} = ?", column);
        conn.query_row(&sql, [value.as_ref()], Self::row_to_pokemon)
            .optional()
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    fn find(&self, pagination: &Pagination) -> Result<Vec<Pokemon>, RepositoryError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare("SELECT id, no, name FROM pokemon ORDER BY no ASC LIMIT ? OFFSET ?")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(
                params![pagination.limit as i64, pagination.offset as i64],
                Self::row_to_pokemon,
            )
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| RepositoryError::Database(e.to_string()))?);
        }
        Ok(results)
    }

    fn update_one(&self, id: &str, patch: &PokemonPatch) -> Result<(), RepositoryError> {
        if patch.is_empty() {
            return Ok(());
        }

        let conn = self.conn()?;

        let mut sets = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        let mut attempted = Vec::new();

        if let Some(no) = patch.no {
            sets.push("no = ?");
            values.push(Box::new(no));
            attempted.push(("no", Value::from(no)));
        }
        if let Some(ref name) = patch.name {
            sets.push("name = ?");
            values.push(Box::new(name.clone()));
            attempted.push(("name", Value::from(name.clone())));
        }
        values.push(Box::new(id.to_lowercase()));

        let sql = format!("UPDATE pokemon SET {} WHERE id = ?", sets.join(", "));
        let param_refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|p| p.as_ref()).collect();

        let rows_affected = conn
            .execute(&sql, param_refs.as_slice())
            .map_err(|e| Self::classify_write_error(e, &attempted))?;
        debug!("update_one({}) touched {} row(s)", id, rows_affected);

        Ok(())
    }

    fn delete_one(&self, filter: &PokemonFilter) -> Result<u64, RepositoryError> {
        let conn = self.conn()?;
        let (column, value) = Self::filter_clause(filter);

        let sql = format!("DELETE FROM pokemon WHERE {} = ?", column);
        let rows_affected = conn
            .execute(&sql, [value.as_ref()])
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(rows_affected as u64)
    }

    fn delete_many(&self) -> Result<u64, RepositoryError> {
        let conn = self.conn()?;
        let rows_affected = conn
            .execute("DELETE FROM pokemon", [])
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(rows_affected as u64)
    }

    fn insert_many(&self, inputs: &[NewPokemon]) -> Result<Vec<Pokemon>, RepositoryError> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut inserted = Vec::with_capacity(inputs.len());
        for input in inputs {
            // Dropping `tx` on error rolls the whole batch back.
            inserted.push(Self::insert_row(&tx, input)?);
        }

        tx.commit()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(inserted)
    }

    fn count(&self) -> Result<u64, RepositoryError> {
        let conn = self.conn()?;
        conn.query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }
}
