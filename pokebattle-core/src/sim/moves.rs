use serde::{Deserialize, Serialize};

fn default_accuracy() -> u32 {
    100
}

/// A single attack a pokemon knows. Pure data; resolution lives on
/// [`crate::sim::pokemon::Pokemon`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,
    pub pp: u32,
    pub max_pp: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_defaults_to_100_when_absent() {
        let json = r#"{"name":"tackle","type":"normal","power":4,"pp":35,"max_pp":35}"#;
        let mv: Move = serde_json::from_str(json).expect("valid move json");
        assert_eq!(mv.accuracy, 100);
    }

    #[test]
    fn type_field_uses_the_wire_name() {
        let mv = Move {
            name: "ember".to_string(),
            move_type: "fire".to_string(),
            power: 4,
            accuracy: 100,
            pp: 25,
            max_pp: 25,
        };
        let json = serde_json::to_value(&mv).expect("serializable move");
        assert_eq!(json["type"], "fire");
    }
}
