//! Generic Data-Access Layer
//!
//! One configuration-driven engine for every entity instead of a repository
//! class hierarchy. An entity contributes a descriptor ([`Entity`]): table
//! name, column list, fuzzy/unique columns, default ordering and restricting
//! references. [`Dao`] turns a [`QuerySpec`] into parameterized SQL and maps
//! rows back through `sqlx::FromRow`.
//!
//! Semantics:
//! - filters combine with AND; the free-text value ORs substring matches
//!   across the entity's fuzzy columns
//! - `limit = 0` returns every matching row, otherwise rows
//!   `[offset, offset + limit)`
//! - soft-deleted rows are excluded everywhere unless explicitly included
//! - hard deletes are refused while restricting references have live rows

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use std::marker::PhantomData;

use super::repository::{RepoError, RepoResult};

/// A bindable SQL argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    I64(i64),
    F64(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::I64(v)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::F64(v)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Text(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Text(v.to_string())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Arg::Null,
        }
    }
}

/// Bind a `Vec<Arg>` onto any sqlx query type
macro_rules! bind_args {
    ($query:expr, $args:expr) => {{
        let mut q = $query;
        for arg in $args {
            q = match arg {
                Arg::I64(v) => q.bind(v),
                Arg::F64(v) => q.bind(v),
                Arg::Text(v) => q.bind(v),
                Arg::Bool(v) => q.bind(v),
                Arg::Null => q.bind(Option::<i64>::None),
            };
        }
        q
    }};
}

/// One filter condition; conditions combine with AND
#[derive(Debug, Clone)]
pub enum Filter {
    Eq(&'static str, Arg),
    Like(&'static str, String),
    In(&'static str, Vec<Arg>),
    Gte(&'static str, Arg),
    Lte(&'static str, Arg),
}

/// A reference that blocks hard deletion while live rows point at the entity
#[derive(Debug, Clone, Copy)]
pub struct RefCheck {
    pub table: &'static str,
    pub column: &'static str,
    /// Junction tables carry no soft-delete flag; entity tables do
    pub live_only: bool,
}

/// Declarative per-entity configuration for the generic DAO
pub trait Entity: for<'r> sqlx::FromRow<'r, SqliteRow> + Serialize + Send + Unpin {
    const TABLE: &'static str;
    /// Every persisted column including the audit set
    const COLUMNS: &'static [&'static str];
    /// Text columns ORed together for the free-text fuzzy filter
    const FUZZY: &'static [&'static str] = &[];
    /// Columns that must be unique among live rows
    const UNIQUE: &'static [&'static str] = &[];
    /// Default ordering when the query spec does not override
    const DEFAULT_ORDER: &'static str = "id DESC";
    /// References that block hard deletion
    const RESTRICT_REFS: &'static [RefCheck] = &[];

    /// Human-readable name used in error messages
    fn resource() -> &'static str {
        Self::TABLE
    }
}

/// Ephemeral, per-request query description
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    filters: Vec<Filter>,
    fuzzy: Option<String>,
    /// 0 means "no slicing, return all matching rows"
    pub limit: i64,
    pub offset: i64,
    order_by: Option<String>,
    include_deleted: bool,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Arg>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    /// Equality filter applied only when the value is present
    pub fn eq_opt(mut self, column: &'static str, value: Option<impl Into<Arg>>) -> Self {
        if let Some(v) = value {
            self.filters.push(Filter::Eq(column, v.into()));
        }
        self
    }

    /// Substring filter applied only when the value is present and non-empty
    pub fn like_opt(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(v) = value
            && !v.is_empty()
        {
            self.filters.push(Filter::Like(column, v));
        }
        self
    }

    pub fn in_list(mut self, column: &'static str, values: Vec<Arg>) -> Self {
        self.filters.push(Filter::In(column, values));
        self
    }

    pub fn gte(mut self, column: &'static str, value: impl Into<Arg>) -> Self {
        self.filters.push(Filter::Gte(column, value.into()));
        self
    }

    pub fn lte(mut self, column: &'static str, value: impl Into<Arg>) -> Self {
        self.filters.push(Filter::Lte(column, value.into()));
        self
    }

    /// Free-text value matched against the entity's fuzzy columns
    pub fn fuzzy_opt(mut self, value: Option<String>) -> Self {
        if let Some(v) = value
            && !v.is_empty()
        {
            self.fuzzy = Some(v);
        }
        self
    }

    pub fn order(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn paged(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit.max(0);
        self.offset = offset.max(0);
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty() || self.fuzzy.is_some()
    }

    /// Render the WHERE clause and its bind arguments
    fn build_where(&self, fuzzy_columns: &[&'static str]) -> (String, Vec<Arg>) {
        let mut conds: Vec<String> = Vec::new();
        let mut args: Vec<Arg> = Vec::new();

        if !self.include_deleted {
            conds.push("is_deleted = 0".to_string());
        }

        for filter in &self.filters {
            match filter {
                Filter::Eq(col, arg) => {
                    if *arg == Arg::Null {
                        conds.push(format!("{col} IS NULL"));
                    } else {
                        conds.push(format!("{col} = ?"));
                        args.push(arg.clone());
                    }
                }
                Filter::Like(col, text) => {
                    conds.push(format!("{col} LIKE ?"));
                    args.push(Arg::Text(format!("%{text}%")));
                }
                Filter::In(col, values) => {
                    if values.is_empty() {
                        // IN () matches nothing
                        conds.push("1 = 0".to_string());
                    } else {
                        let marks = vec!["?"; values.len()].join(", ");
                        conds.push(format!("{col} IN ({marks})"));
                        args.extend(values.iter().cloned());
                    }
                }
                Filter::Gte(col, arg) => {
                    conds.push(format!("{col} >= ?"));
                    args.push(arg.clone());
                }
                Filter::Lte(col, arg) => {
                    conds.push(format!("{col} <= ?"));
                    args.push(arg.clone());
                }
            }
        }

        if let Some(text) = &self.fuzzy
            && !fuzzy_columns.is_empty()
        {
            let ors: Vec<String> = fuzzy_columns
                .iter()
                .map(|col| format!("{col} LIKE ?"))
                .collect();
            conds.push(format!("({})", ors.join(" OR ")));
            let pattern = format!("%{text}%");
            for _ in fuzzy_columns {
                args.push(Arg::Text(pattern.clone()));
            }
        }

        if conds.is_empty() {
            (String::new(), args)
        } else {
            (format!(" WHERE {}", conds.join(" AND ")), args)
        }
    }
}

/// Import header schema: display label, entity field, required flag
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportColumn {
    pub label: &'static str,
    pub field: &'static str,
    pub required: bool,
}

/// Export result: label row plus value rows for the matching entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// The generic data-access object, parameterized by an entity descriptor
pub struct Dao<'a, E> {
    pool: &'a SqlitePool,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> Dao<'a, E> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn select_columns() -> String {
        E::COLUMNS.join(", ")
    }

    /// List rows matching the spec, returning `(rows, total)` where `total`
    /// ignores pagination
    pub async fn list(&self, spec: &QuerySpec) -> RepoResult<(Vec<E>, i64)> {
        let (where_sql, args) = spec.build_where(E::FUZZY);

        let count_sql = format!("SELECT COUNT(*) FROM {}{}", E::TABLE, where_sql);
        let total: i64 = bind_args!(sqlx::query_scalar(&count_sql), args.iter().cloned())
            .fetch_one(self.pool)
            .await?;

        let order = spec.order_by.as_deref().unwrap_or(E::DEFAULT_ORDER);
        let mut sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            Self::select_columns(),
            E::TABLE,
            where_sql,
            order
        );
        if spec.limit > 0 {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", spec.limit, spec.offset));
        }

        let rows = bind_args!(sqlx::query_as::<_, E>(&sql), args)
            .fetch_all(self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Get a live row by id
    pub async fn get(&self, id: i64) -> RepoResult<E> {
        self.try_get(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{} {} not found", E::resource(), id)))
    }

    pub async fn try_get(&self, id: i64) -> RepoResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ? AND is_deleted = 0",
            Self::select_columns(),
            E::TABLE
        );
        Ok(sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?)
    }

    /// Get a row by id regardless of its soft-delete state (audit/undo)
    pub async fn get_with_deleted(&self, id: i64) -> RepoResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            Self::select_columns(),
            E::TABLE
        );
        Ok(sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?)
    }

    /// Lookup by an alternate unique column (e.g. telephone)
    pub async fn get_by(&self, column: &'static str, value: impl Into<Arg>) -> RepoResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? AND is_deleted = 0 LIMIT 1",
            Self::select_columns(),
            E::TABLE,
            column
        );
        Ok(bind_args!(sqlx::query_as::<_, E>(&sql), [value.into()])
            .fetch_optional(self.pool)
            .await?)
    }

    /// Fetch exactly one row for the spec
    ///
    /// Fails with `Ambiguous` when the caller supplied no identifying filter
    /// at all: "give me exactly one of everything" is not a lookup.
    pub async fn find_one(&self, spec: &QuerySpec) -> RepoResult<E> {
        if !spec.has_filters() {
            return Err(RepoError::Ambiguous(format!(
                "{} lookup requires an id or a unique field value",
                E::resource()
            )));
        }
        let (rows, _) = self.list(spec).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("{} not found", E::resource())))
    }

    /// Insert a new row from column/value pairs; audit columns are stamped
    /// here and declared unique columns are checked among live rows
    pub async fn insert(&self, columns: Vec<(&'static str, Arg)>) -> RepoResult<E> {
        for (col, arg) in &columns {
            if E::UNIQUE.contains(col) {
                self.assert_unique(col, arg, None).await?;
            }
        }

        let id = snowflake_id();
        let now = now_millis();
        let (sql, args) = build_insert(E::TABLE, id, now, &columns);

        bind_args!(sqlx::query(&sql), args)
            .execute(self.pool)
            .await?;

        self.get(id).await
    }

    /// Partial update: only the supplied columns change
    pub async fn update(&self, id: i64, columns: Vec<(&'static str, Arg)>) -> RepoResult<E> {
        // Live row required; a soft-deleted row is not updatable
        let _existing = self.get(id).await?;

        if columns.is_empty() {
            return self.get(id).await;
        }

        for (col, arg) in &columns {
            if E::UNIQUE.contains(col) {
                self.assert_unique(col, arg, Some(id)).await?;
            }
        }

        let mut sets: Vec<String> = Vec::new();
        let mut args: Vec<Arg> = Vec::new();
        for (col, arg) in columns {
            sets.push(format!("{col} = ?"));
            args.push(arg);
        }
        sets.push("updated_at = ?".to_string());
        args.push(Arg::I64(now_millis()));
        args.push(Arg::I64(id));

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? AND is_deleted = 0",
            E::TABLE,
            sets.join(", ")
        );
        bind_args!(sqlx::query(&sql), args)
            .execute(self.pool)
            .await?;

        self.get(id).await
    }

    /// Delete rows by id
    ///
    /// Soft deletion marks rows and stamps `deleted_at`, optionally setting
    /// caller-supplied extra columns; re-deleting an already-deleted row is
    /// a no-op that keeps the original `deleted_at`. Hard deletion refuses
    /// while any restricting reference still has live rows.
    pub async fn delete(
        &self,
        ids: &[i64],
        soft: bool,
        extra: Vec<(&'static str, Arg)>,
    ) -> RepoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let marks = vec!["?"; ids.len()].join(", ");
        let id_args: Vec<Arg> = ids.iter().map(|id| Arg::I64(*id)).collect();

        if soft {
            let now = now_millis();
            let mut sets = vec![
                "is_deleted = 1".to_string(),
                "deleted_at = ?".to_string(),
                "updated_at = ?".to_string(),
            ];
            let mut args = vec![Arg::I64(now), Arg::I64(now)];
            for (col, arg) in extra {
                sets.push(format!("{col} = ?"));
                args.push(arg);
            }
            args.extend(id_args);

            let sql = format!(
                "UPDATE {} SET {} WHERE id IN ({marks}) AND is_deleted = 0",
                E::TABLE,
                sets.join(", ")
            );
            let result = bind_args!(sqlx::query(&sql), args)
                .execute(self.pool)
                .await?;
            Ok(result.rows_affected())
        } else {
            for check in E::RESTRICT_REFS {
                let filter = if check.live_only {
                    " AND is_deleted = 0"
                } else {
                    ""
                };
                let sql = format!(
                    "SELECT COUNT(*) FROM {} WHERE {} IN ({marks}){filter}",
                    check.table, check.column
                );
                let count: i64 = bind_args!(sqlx::query_scalar(&sql), id_args.iter().cloned())
                    .fetch_one(self.pool)
                    .await?;
                if count > 0 {
                    return Err(RepoError::Referenced(format!(
                        "{} is still referenced by {}",
                        E::resource(),
                        check.table
                    )));
                }
            }

            let sql = format!("DELETE FROM {} WHERE id IN ({marks})", E::TABLE);
            let result = bind_args!(sqlx::query(&sql), id_args)
                .execute(self.pool)
                .await?;
            Ok(result.rows_affected())
        }
    }

    /// Bulk import rows validated against a declared header schema
    ///
    /// Fails fast on the first row missing a required field, reporting the
    /// 1-based row index and the field label. The whole batch runs in one
    /// transaction, so a failed batch commits nothing.
    pub async fn import(
        &self,
        headers: &[ImportColumn],
        rows: &[Map<String, Value>],
    ) -> RepoResult<u64> {
        validate_import_rows(headers, rows)?;

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for row in rows {
            let mut columns: Vec<(&'static str, Arg)> = Vec::new();
            for header in headers {
                if let Some(value) = row.get(header.field)
                    && let Some(arg) = json_to_arg(value)
                {
                    columns.push((header.field, arg));
                }
            }

            for (col, arg) in &columns {
                if E::UNIQUE.contains(col)
                    && let Arg::Text(text) = arg
                {
                    let sql = format!(
                        "SELECT COUNT(*) FROM {} WHERE {} = ? AND is_deleted = 0",
                        E::TABLE,
                        col
                    );
                    let count: i64 = sqlx::query_scalar(&sql)
                        .bind(text.clone())
                        .fetch_one(&mut *tx)
                        .await?;
                    if count > 0 {
                        return Err(RepoError::Duplicate(format!(
                            "{} '{}' already exists",
                            col, text
                        )));
                    }
                }
            }

            let (sql, args) = build_insert(E::TABLE, snowflake_id(), now_millis(), &columns);
            bind_args!(sqlx::query(&sql), args).execute(&mut *tx).await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Export the rows matching the spec as a label-headed sheet
    pub async fn export(
        &self,
        headers: &[ImportColumn],
        spec: &QuerySpec,
    ) -> RepoResult<ExportSheet> {
        let (rows, _) = self.list(spec).await?;

        let mut sheet = ExportSheet {
            headers: headers.iter().map(|h| h.label.to_string()).collect(),
            rows: Vec::with_capacity(rows.len()),
        };

        for row in rows {
            let value = serde_json::to_value(&row)
                .map_err(|e| RepoError::Database(format!("serialize {}: {e}", E::resource())))?;
            let object = value.as_object().cloned().unwrap_or_default();
            sheet.rows.push(
                headers
                    .iter()
                    .map(|h| object.get(h.field).cloned().unwrap_or(Value::Null))
                    .collect(),
            );
        }

        Ok(sheet)
    }

    async fn assert_unique(
        &self,
        column: &'static str,
        value: &Arg,
        exclude_id: Option<i64>,
    ) -> RepoResult<()> {
        if *value == Arg::Null {
            return Ok(());
        }
        let mut sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ? AND is_deleted = 0",
            E::TABLE,
            column
        );
        let mut args = vec![value.clone()];
        if let Some(id) = exclude_id {
            sql.push_str(" AND id != ?");
            args.push(Arg::I64(id));
        }
        let count: i64 = bind_args!(sqlx::query_scalar(&sql), args)
            .fetch_one(self.pool)
            .await?;
        if count > 0 {
            return Err(RepoError::Duplicate(format!(
                "{} {} already exists",
                E::resource(),
                column
            )));
        }
        Ok(())
    }
}

/// Render an INSERT statement with stamped audit columns
fn build_insert(
    table: &str,
    id: i64,
    now: i64,
    columns: &[(&'static str, Arg)],
) -> (String, Vec<Arg>) {
    let mut names = vec!["id".to_string()];
    let mut args = vec![Arg::I64(id)];
    for (col, arg) in columns {
        names.push((*col).to_string());
        args.push(arg.clone());
    }
    names.push("created_at".to_string());
    args.push(Arg::I64(now));
    names.push("updated_at".to_string());
    args.push(Arg::I64(now));
    names.push("is_deleted".to_string());
    args.push(Arg::Bool(false));

    let marks = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        names.join(", "),
        marks
    );
    (sql, args)
}

/// Fail fast on the first row missing a required field
fn validate_import_rows(headers: &[ImportColumn], rows: &[Map<String, Value>]) -> RepoResult<()> {
    for (index, row) in rows.iter().enumerate() {
        for header in headers {
            if !header.required {
                continue;
            }
            let missing = match row.get(header.field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if missing {
                return Err(RepoError::ImportRow {
                    row: index + 1,
                    label: header.label.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn json_to_arg(value: &Value) -> Option<Arg> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Arg::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Arg::I64(i))
            } else {
                n.as_f64().map(Arg::F64)
            }
        }
        Value::String(s) => Some(Arg::Text(s.clone())),
        // Arrays/objects are not column values
        _ => None,
    }
}

/// Pagination parameters accepted on list endpoints
///
/// `limit = 0` disables slicing and returns every matching row.
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Convert to a query spec slice; page numbering is 1-based
    pub fn to_spec(&self) -> QuerySpec {
        let limit = self.limit.unwrap_or(Self::DEFAULT_LIMIT).max(0);
        let page = self.page.unwrap_or(1).max(1);
        let offset = if limit > 0 { (page - 1) * limit } else { 0 };
        QuerySpec::new().paged(limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_sql(spec: &QuerySpec, fuzzy: &[&'static str]) -> (String, usize) {
        let (sql, args) = spec.build_where(fuzzy);
        (sql, args.len())
    }

    #[test]
    fn test_where_excludes_soft_deleted_by_default() {
        let (sql, binds) = spec_sql(&QuerySpec::new(), &[]);
        assert_eq!(sql, " WHERE is_deleted = 0");
        assert_eq!(binds, 0);

        let (sql, _) = spec_sql(&QuerySpec::new().with_deleted(), &[]);
        assert_eq!(sql, "");
    }

    #[test]
    fn test_where_combines_filters_with_and() {
        let spec = QuerySpec::new()
            .eq("status", 2i64)
            .like_opt("name", Some("soup".to_string()));
        let (sql, binds) = spec_sql(&spec, &[]);
        assert_eq!(sql, " WHERE is_deleted = 0 AND status = ? AND name LIKE ?");
        assert_eq!(binds, 2);
    }

    #[test]
    fn test_where_fuzzy_ors_across_columns() {
        let spec = QuerySpec::new().fuzzy_opt(Some("wok".to_string()));
        let (sql, binds) = spec_sql(&spec, &["name", "display_name"]);
        assert_eq!(
            sql,
            " WHERE is_deleted = 0 AND (name LIKE ? OR display_name LIKE ?)"
        );
        assert_eq!(binds, 2);
    }

    #[test]
    fn test_where_empty_in_matches_nothing() {
        let spec = QuerySpec::new().in_list("id", vec![]);
        let (sql, binds) = spec_sql(&spec, &[]);
        assert_eq!(sql, " WHERE is_deleted = 0 AND 1 = 0");
        assert_eq!(binds, 0);
    }

    #[test]
    fn test_where_eq_null_renders_is_null() {
        let spec = QuerySpec::new().eq("parent_id", Arg::Null);
        let (sql, binds) = spec_sql(&spec, &[]);
        assert_eq!(sql, " WHERE is_deleted = 0 AND parent_id IS NULL");
        assert_eq!(binds, 0);
    }

    #[test]
    fn test_build_insert_stamps_audit_columns() {
        let (sql, args) = build_insert("tag", 42, 1000, &[("name", Arg::Text("hot".into()))]);
        assert_eq!(
            sql,
            "INSERT INTO tag (id, name, created_at, updated_at, is_deleted) VALUES (?, ?, ?, ?, ?)"
        );
        assert_eq!(args.len(), 5);
        assert_eq!(args[0], Arg::I64(42));
        assert_eq!(args[2], Arg::I64(1000));
        assert_eq!(args[4], Arg::Bool(false));
    }

    #[test]
    fn test_import_validation_reports_row_and_label() {
        let headers = [
            ImportColumn {
                label: "名称",
                field: "name",
                required: true,
            },
            ImportColumn {
                label: "排序号",
                field: "sort",
                required: false,
            },
        ];

        let ok: Map<String, Value> = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        let bad: Map<String, Value> = serde_json::from_str(r#"{"sort": 3}"#).unwrap();

        let rows = vec![ok.clone(), ok.clone(), bad, ok];
        let err = validate_import_rows(&headers, &rows).unwrap_err();
        match err {
            RepoError::ImportRow { row, label } => {
                assert_eq!(row, 3);
                assert_eq!(label, "名称");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Empty strings count as missing for required fields
        let empty: Map<String, Value> = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(validate_import_rows(&headers, &[empty]).is_err());
    }

    #[test]
    fn test_page_params_window() {
        let spec = PageParams {
            page: Some(3),
            limit: Some(20),
        }
        .to_spec();
        assert_eq!(spec.limit, 20);
        assert_eq!(spec.offset, 40);

        // limit = 0 means "all rows"
        let spec = PageParams {
            page: Some(7),
            limit: Some(0),
        }
        .to_spec();
        assert_eq!(spec.limit, 0);
        assert_eq!(spec.offset, 0);
    }
}
