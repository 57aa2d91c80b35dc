pub use masterror::{AppError, AppErrorKind, AppResult};

/// Human-readable message of an error, falling back to its kind
pub fn error_message(err: &AppError) -> String {
    match err.message.as_deref() {
        Some(message) => message.to_string(),
        None => err.to_string()
    }
}

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create error for a comparison request that is missing or malformed input
pub fn input_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Invalid comparison request: {}", message.into()))
}

/// Create error for a failure of the comparison itself (not of either query)
pub fn comparison_error(message: impl Into<String>) -> AppError {
    AppError::service(format!("Query comparison failed: {}", message.into()))
}

/// Create error for a second comparison issued on a card that is still running
pub fn comparison_in_flight(card: &str) -> AppError {
    AppError::conflict(format!(
        "A comparison is already running for card '{}'",
        card
    ))
}

/// Create analysis payload decode error
pub fn analysis_decode_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Analysis payload error:\n  {}", message.into()))
}

/// Create HTTP error
pub fn http_error(err: reqwest::Error) -> AppError {
    let msg = if err.is_timeout() {
        format!("Request timeout: {}", err)
    } else if err.is_connect() {
        format!("Connection failed: {}", err)
    } else if err.is_status() {
        format!("HTTP error {}: {}", err.status().unwrap_or_default(), err)
    } else {
        err.to_string()
    };
    AppError::service(msg)
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create query guard error with optional position info
pub fn query_guard_error(message: impl Into<String>) -> String {
    let msg = message.into();
    // sqlparser format: "... at Line: X, Column Y"
    match extract_position(&msg) {
        Some(pos) => format!(
            "Query rejected at line {}, column {}: {}",
            pos.line, pos.column, msg
        ),
        None => format!("Query rejected: {}", msg)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let col_marker = ", Column ";

    let line_start = message.find(line_marker)? + line_marker.len();
    let col_start = message[line_start..].find(col_marker)?;
    let line_str = &message[line_start..line_start + col_start];
    let col_num_start = line_start + col_start + col_marker.len();
    let col_end = message[col_num_start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(message.len() - col_num_start);
    let col_str = &message[col_num_start..col_num_start + col_end];

    match (line_str.parse(), col_str.parse()) {
        (Ok(line), Ok(column)) => Some(SqlPosition { line, column }),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_error_with_position() {
        let msg = query_guard_error("Expected: end of statement at Line: 2, Column 7");
        assert!(msg.starts_with("Query rejected at line 2, column 7"));
    }

    #[test]
    fn test_guard_error_without_position() {
        let msg = query_guard_error("only queries can be compared");
        assert_eq!(msg, "Query rejected: only queries can be compared");
    }
}
