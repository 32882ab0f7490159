use tablemaker_core::Error;

/// Classify a driver error as a connectivity or a query failure.
pub fn map_sqlx_error(err: sqlx::Error) -> Error {
    if is_connectivity_error(&err) {
        Error::Connect(err.to_string())
    } else {
        Error::Query(err.to_string())
    }
}

/// Failures while opening a session (acquire, login, `begin`) are always
/// connectivity failures.
pub fn map_connect_error(err: sqlx::Error) -> Error {
    Error::Connect(err.to_string())
}

fn is_connectivity_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => true,
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| is_connectivity_sqlstate(&code)),
        _ => false,
    }
}

/// SQLSTATE classes 08 (connection exception), 28 (invalid authorization)
/// and 3D (invalid catalog name).
pub fn is_connectivity_sqlstate(code: &str) -> bool {
    matches!(code.get(..2), Some("08" | "28" | "3D"))
}

/// Element type name for an array type: the catalog prefixes array type names
/// with a single underscore (`_int4` for `int4[]`).
pub fn element_type_name(array_type: &str, element_type: &str) -> String {
    array_type
        .strip_prefix('_')
        .filter(|name| !name.is_empty())
        .unwrap_or(element_type)
        .to_string()
}
