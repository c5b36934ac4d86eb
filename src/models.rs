use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Prediction {
    pub ingredient: String,
    /// Probability of `ingredient`, in percent.
    pub confidence: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PredictionResponse {
    #[serde(flatten)]
    pub top: Prediction,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Prediction>,
}

impl PredictionResponse {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prediction_shape() {
        let response = PredictionResponse {
            top: Prediction {
                ingredient: "banana".to_string(),
                confidence: 87.5,
            },
            alternatives: Vec::new(),
        };
        let json = response.to_json(false).unwrap();
        assert_eq!(json, r#"{"ingredient":"banana","confidence":87.5}"#);
    }

    #[test]
    fn test_alternatives_are_listed() {
        let response = PredictionResponse {
            top: Prediction {
                ingredient: "lemon".to_string(),
                confidence: 60.0,
            },
            alternatives: vec![Prediction {
                ingredient: "lime".to_string(),
                confidence: 30.0,
            }],
        };
        let value: serde_json::Value =
            serde_json::from_str(&response.to_json(true).unwrap()).unwrap();
        assert_eq!(value["ingredient"], "lemon");
        assert_eq!(value["alternatives"][0]["ingredient"], "lime");
        assert_eq!(value["alternatives"][0]["confidence"], 30.0);
    }
}
