use crate::{Player, RequestFailure};
use serde_json::{Map, Value};

pub const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            status: STATUS_OK,
            message: None,
            data: Some(data),
        }
    }

    pub fn failed(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Objects and arrays pass through; any other payload becomes an empty mapping.
pub fn parse_data(envelope: ResponseEnvelope) -> Result<Value, RequestFailure> {
    if envelope.status != STATUS_OK {
        return Err(RequestFailure::Status {
            status: envelope.status,
            message: envelope.message.unwrap_or_default(),
        });
    }
    match envelope.data {
        Some(value @ (Value::Object(_) | Value::Array(_))) => Ok(value),
        _ => Ok(Value::Object(Map::new())),
    }
}

pub fn decode_player(value: Value) -> Result<Player, RequestFailure> {
    Ok(serde_json::from_value(value)?)
}

pub fn decode_players(value: Value) -> Result<Vec<Player>, RequestFailure> {
    match value {
        Value::Array(items) => items.into_iter().map(decode_player).collect(),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Err(RequestFailure::Decode(format!(
            "expected a list of players, got {other}"
        ))),
    }
}

/// Cross-player transfers answer with `[from, to]`.
pub fn decode_player_pair(value: Value) -> Result<(Player, Player), RequestFailure> {
    let Value::Array(items) = value else {
        return Err(RequestFailure::Decode(
            "expected a two-player list".to_string(),
        ));
    };
    let count = items.len();
    let mut iter = items.into_iter();
    match (iter.next(), iter.next(), iter.next()) {
        (Some(from), Some(to), None) => Ok((decode_player(from)?, decode_player(to)?)),
        _ => Err(RequestFailure::Decode(format!(
            "expected two players, got {count}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_ok_status_fails_with_message() {
        let err = parse_data(ResponseEnvelope::failed(500, "boom")).unwrap_err();
        assert_eq!(
            err,
            RequestFailure::Status {
                status: 500,
                message: "boom".to_string()
            }
        );
        let err = parse_data(ResponseEnvelope {
            status: 404,
            message: None,
            data: Some(json!({"id": "p1"})),
        })
        .unwrap_err();
        assert!(matches!(err, RequestFailure::Status { status: 404, .. }));
    }

    #[test]
    fn ok_without_data_is_empty_mapping() {
        let envelope = ResponseEnvelope {
            status: 200,
            message: None,
            data: None,
        };
        assert_eq!(parse_data(envelope).expect("parse"), json!({}));
        assert_eq!(
            parse_data(ResponseEnvelope::ok(Value::Null)).expect("parse"),
            json!({})
        );
    }

    #[test]
    fn ok_with_scalar_data_is_empty_mapping() {
        assert_eq!(
            parse_data(ResponseEnvelope::ok(json!("text"))).expect("parse"),
            json!({})
        );
        assert_eq!(
            parse_data(ResponseEnvelope::ok(json!(42))).expect("parse"),
            json!({})
        );
    }

    #[test]
    fn ok_passes_objects_and_arrays() {
        let obj = json!({"id": "p1"});
        assert_eq!(parse_data(ResponseEnvelope::ok(obj.clone())).expect("parse"), obj);
        let list = json!([{"id": "p1"}]);
        assert_eq!(
            parse_data(ResponseEnvelope::ok(list.clone())).expect("parse"),
            list
        );
    }

    #[test]
    fn players_from_empty_mapping_is_empty_list() {
        assert!(decode_players(json!({})).expect("decode").is_empty());
        assert!(decode_players(json!({"id": "p1"})).is_err());
    }

    #[test]
    fn player_pair_requires_exactly_two() {
        let (from, to) =
            decode_player_pair(json!([{"id": "a"}, {"id": "b"}])).expect("decode pair");
        assert_eq!(from.id, "a");
        assert_eq!(to.id, "b");
        assert!(decode_player_pair(json!([{"id": "a"}])).is_err());
        assert!(decode_player_pair(json!([{}, {}, {}])).is_err());
        assert!(decode_player_pair(json!({})).is_err());
    }
}
