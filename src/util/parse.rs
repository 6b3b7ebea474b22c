use sea_orm::DbErr;

/// Parses a stored snowflake column at the repository boundary.
///
/// # Returns
/// - `Err(DbErr::Custom)` - The column does not hold a valid u64
pub fn parse_snowflake(value: &str, column: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

/// Nullable variant of `parse_snowflake`.
pub fn parse_optional_snowflake(value: Option<&str>, column: &str) -> Result<Option<u64>, DbErr> {
    value.map(|v| parse_snowflake(v, column)).transpose()
}

/// Extracts the numeric id following `prefix` in a component custom id, e.g.
/// `attend_yes_42` with prefix `attend_yes_`.
pub fn id_after_prefix<T: std::str::FromStr>(custom_id: &str, prefix: &str) -> Option<T> {
    custom_id.strip_prefix(prefix)?.parse::<T>().ok()
}
