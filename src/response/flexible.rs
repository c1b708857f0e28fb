use crate::error::{Result, SauceError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 型別不固定的欄位
///
/// SauceNAO 的 `user_id`、`account_type`、`creator` 等欄位，依帳號狀態
/// 有時是字串、有時是整數。解碼時原樣保留，只透過 [`as_int`](Self::as_int)
/// 與 [`as_string`](Self::as_string) 取值。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlexibleValue(Repr);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Text(String),
    Integer(i64),
    Other(Value),
}

impl Default for Repr {
    fn default() -> Self {
        Repr::Other(Value::Null)
    }
}

impl FlexibleValue {
    /// 轉成整數：字串以十進位解析，其他型別一律失敗
    pub fn as_int(&self) -> Result<i64> {
        match &self.0 {
            Repr::Text(text) => text
                .parse::<i64>()
                .map_err(|e| SauceError::Parse(format!("\"{}\" 不是整數: {}", text, e))),
            Repr::Integer(n) => Ok(*n),
            Repr::Other(value) => Err(SauceError::Parse(format!(
                "無法將 {} 轉成整數",
                value
            ))),
        }
    }

    /// 轉成字串，不支援的型別回傳空字串
    pub fn as_string(&self) -> String {
        match &self.0 {
            Repr::Text(text) => text.clone(),
            Repr::Integer(n) => n.to_string(),
            Repr::Other(_) => String::new(),
        }
    }
}

impl From<&str> for FlexibleValue {
    fn from(text: &str) -> Self {
        FlexibleValue(Repr::Text(text.to_string()))
    }
}

impl From<String> for FlexibleValue {
    fn from(text: String) -> Self {
        FlexibleValue(Repr::Text(text))
    }
}

impl From<i64> for FlexibleValue {
    fn from(n: i64) -> Self {
        FlexibleValue(Repr::Integer(n))
    }
}

impl From<Value> for FlexibleValue {
    fn from(value: Value) -> Self {
        let repr = match value {
            Value::String(text) => Repr::Text(text),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Repr::Integer(i),
                None => Repr::Other(Value::Number(n)),
            },
            other => Repr::Other(other),
        };
        FlexibleValue(repr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_int() {
        assert_eq!(FlexibleValue::from("3").as_int().unwrap(), 3);
        assert_eq!(FlexibleValue::from(12i64).as_int().unwrap(), 12);
        assert_eq!(FlexibleValue::from("-7").as_int().unwrap(), -7);
    }

    #[test]
    fn test_as_int_failures() {
        for value in [
            FlexibleValue::from("abc"),
            FlexibleValue::from(""),
            FlexibleValue::from(json!(true)),
            FlexibleValue::from(json!(1.5)),
            FlexibleValue::from(json!(["a"])),
            FlexibleValue::default(),
        ] {
            assert!(matches!(value.as_int(), Err(SauceError::Parse(_))));
        }
    }

    #[test]
    fn test_as_string_never_fails() {
        assert_eq!(FlexibleValue::from("Koyori").as_string(), "Koyori");
        assert_eq!(FlexibleValue::from(42i64).as_string(), "42");
        assert_eq!(FlexibleValue::from(json!(false)).as_string(), "");
        assert_eq!(FlexibleValue::from(json!({"a": 1})).as_string(), "");
        assert_eq!(FlexibleValue::from(json!(["a", "b"])).as_string(), "");
        assert_eq!(FlexibleValue::default().as_string(), "");
    }

    #[test]
    fn test_deserialize_matches_from_value() {
        for raw in [json!("3"), json!(12), json!(true), json!(null), json!(2.5), json!([1])] {
            let decoded: FlexibleValue = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(decoded, FlexibleValue::from(raw));
        }
    }
}
