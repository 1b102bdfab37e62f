use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field that can be either a single item or a vector, but can also be null/missing
pub fn single_or_vec_or_null<'de, T, D>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SingleOrVecOrNull<T> {
        Null,
        Single(T),
        Multiple(Vec<T>),
    }

    match SingleOrVecOrNull::deserialize(deserializer)? {
        SingleOrVecOrNull::Null => Ok(None),
        SingleOrVecOrNull::Single(val) => Ok(Some(vec![val])),
        SingleOrVecOrNull::Multiple(vec) => Ok(Some(vec)),
    }
}

/// Deserialize a page number that may arrive as a number, a numeric string, or
/// something else entirely (null, bool). Anything unusable becomes `None`.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}
