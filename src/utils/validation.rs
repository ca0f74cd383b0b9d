use anyhow::{anyhow, Result};

/// Longest free-text station query accepted from a user.
pub const MAX_QUERY_LEN: usize = 50;

pub fn validate_station_query(query: &str) -> Result<&str> {
    let query = query.trim();

    if query.is_empty() {
        return Err(anyhow!("Station query cannot be empty"));
    }

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(anyhow!(
            "Station query cannot be longer than {} characters",
            MAX_QUERY_LEN
        ));
    }

    if query.contains('\n') || query.contains('\r') {
        return Err(anyhow!("Station query cannot contain line breaks"));
    }

    Ok(query)
}

pub fn validate_station_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(anyhow!("Station ID cannot be empty"));
    }

    // The API only uses numeric station codes
    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Station ID '{}' must be numeric", id));
    }

    Ok(())
}
