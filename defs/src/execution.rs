use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StorageError;

const EXECUTION_ID_DELIMITER: char = '_';

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Execution {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Time")]
    pub time: DateTime<Utc>,
}

/// Splits `<name>_<unix seconds>` on the last delimiter. The name may contain delimiters itself.
pub fn parse_execution_id(execution_id: &str) -> Result<Execution, StorageError> {
    let (name, timestamp) = execution_id
        .rsplit_once(EXECUTION_ID_DELIMITER)
        .ok_or_else(|| StorageError::InvalidExecutionId(execution_id.to_string()))?;

    let seconds = timestamp
        .parse::<i64>()
        .map_err(|_| StorageError::InvalidExecutionId(execution_id.to_string()))?;

    let time = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| StorageError::InvalidExecutionId(execution_id.to_string()))?;

    Ok(Execution {
        id: execution_id.to_string(),
        name: name.to_string(),
        time,
    })
}
