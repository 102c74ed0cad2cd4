use serde::{Deserialize, Serialize};

/// A themed shopping scenario with a fixed budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    pub budget: u64,
    /// Decorative cover picture shown next to the mission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Mission {
    pub fn new(title: &str, budget: u64, image: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            budget,
            image: image.map(|s| s.to_string()),
        }
    }
}

/// The built-in mission set used when the configuration file defines none.
pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            "카레 만들기",
            15_000,
            Some("https://images.unsplash.com/photo-1604909052604-0e96f2b0f2a3?q=80&w=1200&auto=format&fit=crop"),
        ),
        Mission::new(
            "여름캠핑 준비하기",
            30_000,
            Some("https://images.unsplash.com/photo-1502920917128-1aa500764ce7?q=80&w=1200&auto=format&fit=crop"),
        ),
        Mission::new(
            "친구 생일파티 준비하기",
            25_000,
            Some("https://images.unsplash.com/photo-1527489342828-043c3f7fbb61?q=80&w=1200&auto=format&fit=crop"),
        ),
    ]
}

/// Look a mission up by 1-based position or by exact title.
pub fn find_mission<'a>(missions: &'a [Mission], selector: &str) -> Option<&'a Mission> {
    let selector = selector.trim();
    if let Ok(index) = selector.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| missions.get(i));
    }
    missions.iter().find(|m| m.title == selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_missions_budgets() {
        let missions = default_missions();
        assert_eq!(missions.len(), 3);
        assert_eq!(missions[0].budget, 15_000);
        assert_eq!(missions[1].budget, 30_000);
        assert_eq!(missions[2].budget, 25_000);
    }

    #[test]
    fn test_find_mission_by_index_and_title() {
        let missions = default_missions();
        assert_eq!(find_mission(&missions, "2").unwrap().title, "여름캠핑 준비하기");
        assert_eq!(find_mission(&missions, "카레 만들기").unwrap().budget, 15_000);
        assert!(find_mission(&missions, "0").is_none());
        assert!(find_mission(&missions, "4").is_none());
        assert!(find_mission(&missions, "unknown").is_none());
    }
}
