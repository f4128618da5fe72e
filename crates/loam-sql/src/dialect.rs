use loam_core::schema::db::JdbcType;

/// Everything the walker needs to know about a SQL dialect.
///
/// A plain capability object, not a type hierarchy: rendering decisions
/// branch on these fields at the render site, so the set of dialect
/// differences stays visible in one place.
#[derive(Debug, Clone)]
pub struct Dialect {
    /// How OFFSET/FETCH is rendered (or emulated).
    pub pagination: PaginationStrategy,

    /// Row-value (tuple) constructor support, per syntactic position.
    pub row_value: RowValueSupport,

    /// `NULLS FIRST` / `NULLS LAST` on sort specifications.
    pub supports_null_precedence: bool,

    /// Whether GROUP BY may reference a select alias or 1-based position.
    /// When false, the walker re-resolves the underlying expression.
    pub supports_select_alias_in_group_by: bool,

    /// Some databases lose result-set metadata for untyped select-list
    /// items; when true, literals and typed parameters in the SELECT
    /// clause are wrapped in CAST.
    pub requires_casting_of_parameters_in_select_clause: bool,

    /// `WITH TIES` on the fetch clause (native or emulated by the
    /// pagination strategy).
    pub supports_with_ties: bool,

    /// `FETCH FIRST n PERCENT ROWS` support in the native fetch syntax.
    pub supports_fetch_percent: bool,

    pub placeholder: PlaceholderStyle,

    cast_names: CastNames,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStrategy {
    /// `OFFSET n ROWS FETCH FIRST m ROWS ONLY`
    OffsetFetch,

    /// `LIMIT m OFFSET n`
    LimitOffset,

    /// `SELECT TOP (m) ...`, with a row-numbering wrapper when an offset
    /// is present
    Top,

    /// `row_number()` / `rank()` wrapper emulation
    WindowFunction,
}

#[derive(Debug, Clone, Copy)]
pub struct RowValueSupport {
    /// `(a, b) = (x, y)` comparisons
    pub constructor: bool,

    /// `(a, b) IN ((1, 2), (3, 4))`
    pub in_list: bool,

    /// `(a, b) IN (subquery)`
    pub in_subquery: bool,

    /// `(a, b) > ALL (subquery)`
    pub quantified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?`
    Positional,

    /// `$1`, `$2`, ...
    Numbered,
}

#[derive(Debug, Clone, Copy)]
enum CastNames {
    Ansi,
    Mysql,
}

impl RowValueSupport {
    pub const FULL: RowValueSupport = RowValueSupport {
        constructor: true,
        in_list: true,
        in_subquery: true,
        quantified: true,
    };

    pub const NONE: RowValueSupport = RowValueSupport {
        constructor: false,
        in_list: false,
        in_subquery: false,
        quantified: false,
    };
}

impl Dialect {
    /// The SQL standard: everything native.
    pub const ANSI: Dialect = Dialect {
        pagination: PaginationStrategy::OffsetFetch,
        row_value: RowValueSupport::FULL,
        supports_null_precedence: true,
        supports_select_alias_in_group_by: true,
        requires_casting_of_parameters_in_select_clause: false,
        supports_with_ties: true,
        supports_fetch_percent: true,
        placeholder: PlaceholderStyle::Positional,
        cast_names: CastNames::Ansi,
    };

    pub const POSTGRESQL: Dialect = Dialect {
        row_value: RowValueSupport {
            quantified: false,
            ..RowValueSupport::FULL
        },
        supports_fetch_percent: false,
        placeholder: PlaceholderStyle::Numbered,
        ..Self::ANSI
    };

    pub const MYSQL: Dialect = Dialect {
        pagination: PaginationStrategy::LimitOffset,
        row_value: RowValueSupport {
            constructor: true,
            in_list: true,
            in_subquery: false,
            quantified: false,
        },
        supports_null_precedence: false,
        supports_with_ties: false,
        supports_fetch_percent: false,
        cast_names: CastNames::Mysql,
        ..Self::ANSI
    };

    pub const SQLSERVER: Dialect = Dialect {
        pagination: PaginationStrategy::Top,
        row_value: RowValueSupport::NONE,
        supports_null_precedence: false,
        supports_select_alias_in_group_by: false,
        requires_casting_of_parameters_in_select_clause: true,
        ..Self::ANSI
    };

    /// Lowest common denominator: no native limit syntax, no row values.
    pub const LEGACY: Dialect = Dialect {
        pagination: PaginationStrategy::WindowFunction,
        row_value: RowValueSupport::NONE,
        supports_null_precedence: false,
        supports_select_alias_in_group_by: false,
        supports_fetch_percent: true,
        ..Self::ANSI
    };

    /// The type name used in CAST targets for the given JDBC type.
    pub fn cast_type_name(&self, ty: JdbcType) -> &'static str {
        match self.cast_names {
            CastNames::Ansi => match ty {
                JdbcType::Boolean => "boolean",
                JdbcType::SmallInt => "smallint",
                JdbcType::Integer => "integer",
                JdbcType::BigInt => "bigint",
                JdbcType::Double => "double precision",
                JdbcType::Decimal => "decimal",
                JdbcType::Varchar => "varchar",
                JdbcType::Timestamp => "timestamp",
                JdbcType::Date => "date",
                JdbcType::Binary => "varbinary",
            },
            // MySQL CAST accepts a restricted target vocabulary.
            CastNames::Mysql => match ty {
                JdbcType::Boolean => "unsigned",
                JdbcType::SmallInt | JdbcType::Integer | JdbcType::BigInt => "signed",
                JdbcType::Double | JdbcType::Decimal => "decimal",
                JdbcType::Varchar => "char",
                JdbcType::Timestamp => "datetime",
                JdbcType::Date => "date",
                JdbcType::Binary => "binary",
            },
        }
    }
}
