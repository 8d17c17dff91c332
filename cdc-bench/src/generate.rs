//! Row construction on top of the sample data pools.
//!
//! A [`RowGenerator`] draws one legal value per column from a
//! [`SampleStore`], keyed either by type group or by column name. The
//! identifier and separator columns are never sampled; the DML engine
//! stamps those with running values.

use anyhow::bail;
use data_sampler::{KeyStrategy, SampleError, SampleStore};
use rand::Rng;
use table_def::{ColumnDefinition, Literal, TableDefinition};

/// The per-batch sequence column downstream CDC consumers use to correlate
/// rows with their originating batch.
pub const SEPARATOR_COLUMN: &str = "SEPARATE_COL";

fn is_separator(column: &ColumnDefinition) -> bool {
    column.name.as_str().eq_ignore_ascii_case(SEPARATOR_COLUMN)
}

#[derive(Debug, Clone, Copy)]
pub struct RowGenerator<'a> {
    store: &'a SampleStore,
    strategy: KeyStrategy,
}

impl<'a> RowGenerator<'a> {
    pub fn new(store: &'a SampleStore, strategy: KeyStrategy) -> Self {
        RowGenerator { store, strategy }
    }

    /// One sampled value for `column`, honoring its nullability and the
    /// sampling kind of its type group.
    pub fn value_for<R: Rng + ?Sized>(
        &self,
        column: &ColumnDefinition,
        rng: &mut R,
    ) -> Result<Literal, SampleError> {
        let group = column.data_type.sample_group();
        let key = self.strategy.key(column.name.as_str(), group);
        self.store
            .value_of_kind(&key, group.kind(), column.nullable, rng)
    }

    /// Builds one INSERT row over `columns`, in order. The identifier
    /// column (always the table's first) gets `id`, the separator column
    /// gets `separator`, everything else is sampled.
    pub fn insert_row<R: Rng + ?Sized>(
        &self,
        table: &TableDefinition,
        columns: &[&ColumnDefinition],
        id: i64,
        separator: i64,
        rng: &mut R,
    ) -> Result<Vec<Literal>, SampleError> {
        let identifier = &table.identifier_column().name;
        columns
            .iter()
            .map(|column| {
                if column.name == *identifier {
                    Ok(Literal::Integer(id))
                } else if is_separator(column) {
                    Ok(Literal::Integer(separator))
                } else {
                    self.value_for(column, rng)
                }
            })
            .collect()
    }

    /// Fresh values for an UPDATE's SET list, one per column, all sampled.
    pub fn update_values<R: Rng + ?Sized>(
        &self,
        columns: &[&ColumnDefinition],
        rng: &mut R,
    ) -> Result<Vec<Literal>, SampleError> {
        columns
            .iter()
            .map(|column| self.value_for(column, rng))
            .collect()
    }
}

/// Resolves the INSERT target column set: the requested columns (or all of
/// them) in definition order, always including the identifier and
/// separator columns.
pub fn insert_columns<'t>(
    table: &'t TableDefinition,
    requested: Option<&[String]>,
) -> anyhow::Result<Vec<&'t ColumnDefinition>> {
    let requested = validate_requested(table, requested)?;
    let identifier = &table.identifier_column().name;
    Ok(table
        .columns
        .iter()
        .filter(|column| {
            column.name == *identifier
                || is_separator(column)
                || requested
                    .as_ref()
                    .map_or(true, |names| contains(names, &column.name))
        })
        .collect())
}

/// Resolves the UPDATE target column set: the requested columns (or every
/// column except the identifier and separator) in definition order.
pub fn update_columns<'t>(
    table: &'t TableDefinition,
    requested: Option<&[String]>,
) -> anyhow::Result<Vec<&'t ColumnDefinition>> {
    let requested = validate_requested(table, requested)?;
    let identifier = &table.identifier_column().name;
    if let Some(names) = &requested {
        if contains(names, identifier) {
            bail!(
                "column {} is the identifier column of {} and cannot be updated",
                identifier,
                table.name
            );
        }
    }
    let columns: Vec<&ColumnDefinition> = table
        .columns
        .iter()
        .filter(|column| {
            if column.name == *identifier || is_separator(column) {
                return false;
            }
            requested
                .as_ref()
                .map_or(true, |names| contains(names, &column.name))
        })
        .collect();
    if columns.is_empty() {
        bail!(
            "table {} has no updatable columns besides the identifier and separator",
            table.name
        );
    }
    Ok(columns)
}

fn contains(names: &[String], name: &table_def::ColumnName) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name.as_str()))
}

fn validate_requested<'r>(
    table: &TableDefinition,
    requested: Option<&'r [String]>,
) -> anyhow::Result<Option<&'r [String]>> {
    if let Some(names) = requested {
        for name in names {
            if table.column(name).is_none() {
                bail!("table {} has no column named {}", table.name, name);
            }
        }
    }
    Ok(requested)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use table_def::{parse_table_definition, Dialect};

    use super::*;

    const DEFINITION: &str = "SAMPLE (
  T_ID NUMBER NOT NULL,
  COL_VARCHAR2 VARCHAR2(50 BYTE) NOT NULL,
  COL_NUMBER NUMBER,
  SEPARATE_COL NUMBER,
  CONSTRAINT SAMPLE_PK PRIMARY KEY (T_ID)
);
";

    const DATA: &str = "
VARCHAR:
  - alpha
  - beta
DECIMAL:
  - 1
  - 2
";

    fn table() -> TableDefinition {
        parse_table_definition(Dialect::Oracle, DEFINITION, Path::new("SAMPLE.def")).unwrap()
    }

    fn store() -> SampleStore {
        SampleStore::from_yaml(DATA, Path::new("sample.yaml"), Path::new(".")).unwrap()
    }

    #[test]
    fn insert_row_stamps_id_and_separator() {
        let table = table();
        let store = store();
        let generator = RowGenerator::new(&store, KeyStrategy::TypeGroup);
        let columns = insert_columns(&table, None).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let row = generator
            .insert_row(&table, &columns, 42, 3, &mut rng)
            .unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row[0], Literal::Integer(42));
        assert!(matches!(row[1], Literal::String(_)));
        assert_eq!(row[3], Literal::Integer(3));
    }

    #[test]
    fn insert_columns_always_keep_id_and_separator() {
        let table = table();
        let columns = insert_columns(&table, Some(&["col_number".to_owned()])).unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["T_ID", "COL_NUMBER", "SEPARATE_COL"]);
    }

    #[test]
    fn update_columns_exclude_id_and_separator() {
        let table = table();
        let columns = update_columns(&table, None).unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["COL_VARCHAR2", "COL_NUMBER"]);
    }

    #[test]
    fn table_with_only_id_and_separator_has_no_update_columns() {
        let definition = "BARE_TEST (
            T_ID NUMBER NOT NULL,
            SEPARATE_COL NUMBER,
            CONSTRAINT BARE_TEST_PK PRIMARY KEY (T_ID)
        );";
        let table =
            parse_table_definition(Dialect::Oracle, definition, Path::new("BARE_TEST.def"))
                .unwrap();
        let err = update_columns(&table, None).unwrap_err();
        assert!(err.to_string().contains("no updatable columns"));
    }

    #[test]
    fn updating_the_identifier_is_rejected() {
        let table = table();
        assert!(update_columns(&table, Some(&["T_ID".to_owned()])).is_err());
    }

    #[test]
    fn unknown_requested_column_is_rejected() {
        let table = table();
        let err = insert_columns(&table, Some(&["NO_SUCH".to_owned()])).unwrap_err();
        assert!(err.to_string().contains("NO_SUCH"));
    }
}
