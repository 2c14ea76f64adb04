/// A single query parameter value. Lists go on the wire comma-joined.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn encode(&self) -> String {
        match self {
            ParamValue::Scalar(s) => s.clone(),
            ParamValue::List(items) => items.join(","),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        ParamValue::Scalar(s.clone())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Scalar(b.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<&[String]> for ParamValue {
    fn from(items: &[String]) -> Self {
        ParamValue::List(items.to_vec())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(items: &[&str]) -> Self {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordered query parameters. Unset values are never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pairs: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an earlier value. `None` removes the key.
    pub fn set<V: Into<ParamValue>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        self.pairs.retain(|(k, _)| k != key);
        if let Some(v) = value {
            self.pairs.push((key.to_string(), v.into()));
        }
        self
    }

    pub fn with<V: Into<ParamValue>>(mut self, key: &str, value: V) -> Self {
        self.set(key, Some(value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Wire form: `(key, value)` pairs with lists joined.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|(k, v)| (k.clone(), v.encode()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_comma_joined() {
        let params = Params::new().with(
            "include",
            vec!["sponsorships".to_string(), "actions".to_string()],
        );
        assert_eq!(
            params.to_query(),
            vec![("include".to_string(), "sponsorships,actions".to_string())]
        );
    }

    #[test]
    fn none_values_are_omitted() {
        let mut params = Params::new();
        params.set("name", None::<&str>).set("district", Some("12"));
        assert_eq!(params.to_query(), vec![("district".to_string(), "12".to_string())]);
    }

    #[test]
    fn setting_none_clears_earlier_value() {
        let mut params = Params::new().with("page", 3u32);
        params.set("page", None::<u32>);
        assert!(params.is_empty());
    }

    #[test]
    fn later_set_replaces_earlier() {
        let mut params = Params::new().with("page", 1u32).with("per_page", 20u32);
        params.set("page", Some(2u32));
        assert_eq!(params.get("page"), Some(&ParamValue::Scalar("2".to_string())));
        assert_eq!(params.to_query().len(), 2);
    }
}
