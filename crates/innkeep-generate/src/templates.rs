use std::fmt::Write as _;

/// A value substituted positionally into an `INSERT` template.
///
/// Text is wrapped in single quotes without escaping; values are trusted
/// not to contain delimiter characters.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Rendered with two decimal places.
    Money(f64),
    Text(String),
    /// Emitted verbatim, e.g. `now()`.
    Expr(String),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    pub fn int(value: impl Into<i64>) -> Self {
        SqlValue::Int(value.into())
    }

    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(value) => value.to_string(),
            SqlValue::Int(value) => value.to_string(),
            SqlValue::Money(value) => format!("{value:.2}"),
            SqlValue::Text(value) => format!("'{value}'"),
            SqlValue::Expr(value) => value.clone(),
        }
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        SqlValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// A row of one of the fixed hotel-schema tables.
pub trait InsertRow {
    /// Table name as written in the statement.
    const TABLE: &'static str;
    /// Column list, in template order.
    const COLUMNS: &'static [&'static str];

    /// Values matching [`InsertRow::COLUMNS`] one to one.
    fn values(&self) -> Vec<SqlValue>;
}

/// Render `INSERT INTO Table(col, ...) VALUES (v, ...);`.
pub fn render_insert<T: InsertRow>(row: &T) -> String {
    let mut statement = String::with_capacity(128);
    let _ = write!(
        statement,
        "INSERT INTO {}({}) VALUES (",
        T::TABLE,
        T::COLUMNS.join(", ")
    );
    for (index, value) in row.values().iter().enumerate() {
        if index > 0 {
            statement.push_str(", ");
        }
        statement.push_str(&value.to_sql());
    }
    statement.push_str(");");
    statement
}
