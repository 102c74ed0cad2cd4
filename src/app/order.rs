use std::path::Path;
use serde::Deserialize;
use crate::errors::ShopError;
use crate::models::find_mission;
use crate::session::Session;
use super::AppState;
use tracing::info;

/// A pre-recorded mission run, replayed for one-shot rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFile {
    pub mission: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub reasons: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
}

impl OrderFile {
    /// Parse YAML or JSON (JSON is valid YAML).
    pub fn parse(content: &str) -> Result<Self, ShopError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub async fn load(path: &Path) -> Result<Self, ShopError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ShopError::Config(format!("cannot read order file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Drive a fresh session through the normal flow: pick, add, submit, explain.
///
/// Budget and quantity rules apply exactly as in the interactive session.
pub fn replay_order(state: &AppState, order: &OrderFile) -> Result<Session, ShopError> {
    let mission = find_mission(&state.missions, &order.mission)
        .ok_or_else(|| ShopError::NotFound(format!("mission '{}'", order.mission)))?;

    let mut session = Session::new();
    session.pick_mission(mission)?;

    for item in &order.items {
        let product = state
            .catalog
            .find(&item.name)
            .ok_or_else(|| ShopError::NotFound(format!("product '{}'", item.name)))?;
        session.add_item(product, item.quantity)?;
    }

    session.submit()?;
    session.set_reasons(&order.reasons)?;
    info!(session = %session.id(), mission = %mission.title, spent = session.spent(), "Order replayed");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = "mission: 카레 만들기\nitems:\n  - name: 감자\n    quantity: 2\nreasons: 카레 재료\n";
        let order = OrderFile::parse(yaml).unwrap();
        assert_eq!(order.items[0].quantity, 2);

        let json = r#"{"mission": "1", "items": [{"name": "감자", "quantity": 1}]}"#;
        let order = OrderFile::parse(json).unwrap();
        assert_eq!(order.mission, "1");
        assert!(order.reasons.is_empty());
    }
}
