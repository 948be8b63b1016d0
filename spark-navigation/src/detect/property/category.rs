use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Semantic category the arbiter reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionType {
    TrafficLight,
    Crosswalk,
    Obstacle,
    Other,
}

impl Display for DetectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionType::TrafficLight => write!(f, "traffic_light"),
            DetectionType::Crosswalk => write!(f, "crosswalk"),
            DetectionType::Obstacle => write!(f, "obstacle"),
            DetectionType::Other => write!(f, "other"),
        }
    }
}

/// Category and spoken (Spanish) label for a detector class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub kind: DetectionType,
    pub label_es: &'static str,
}

const CLASS_TABLE: &[(&str, DetectionType, &str)] = &[
    ("person", DetectionType::Obstacle, "persona"),
    ("car", DetectionType::Obstacle, "auto"),
    ("truck", DetectionType::Obstacle, "camión"),
    ("bus", DetectionType::Obstacle, "autobús"),
    ("motorcycle", DetectionType::Obstacle, "motocicleta"),
    ("bicycle", DetectionType::Obstacle, "bicicleta"),
    ("umbrella", DetectionType::Obstacle, "paraguas"),
    ("backpack", DetectionType::Obstacle, "mochila"),
    ("handbag", DetectionType::Obstacle, "bolso"),
    ("suitcase", DetectionType::Obstacle, "maleta"),
    ("chair", DetectionType::Obstacle, "silla"),
    ("bench", DetectionType::Obstacle, "banco"),
    ("traffic light", DetectionType::TrafficLight, "semáforo"),
    ("stop sign", DetectionType::TrafficLight, "señal de alto"),
    ("crosswalk", DetectionType::Crosswalk, "paso de peatones"),
];

impl ClassInfo {
    /// Case-insensitive lookup. Classes outside the table are not relevant for navigation.
    pub fn lookup(class_name: &str) -> Option<Self> {
        let class_name = class_name.trim();
        CLASS_TABLE
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(class_name))
            .map(|&(_, kind, label_es)| ClassInfo { kind, label_es })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_classes() {
        let car = ClassInfo::lookup("car").unwrap();
        assert_eq!(car.kind, DetectionType::Obstacle);
        assert_eq!(car.label_es, "auto");

        let light = ClassInfo::lookup("Traffic Light").unwrap();
        assert_eq!(light.kind, DetectionType::TrafficLight);

        let crosswalk = ClassInfo::lookup("crosswalk").unwrap();
        assert_eq!(crosswalk.kind, DetectionType::Crosswalk);
    }

    #[test]
    fn unknown_classes_are_dropped() {
        assert!(ClassInfo::lookup("giraffe").is_none());
        assert!(ClassInfo::lookup("").is_none());
    }
}
