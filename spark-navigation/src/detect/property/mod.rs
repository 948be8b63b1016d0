pub mod bbox;
pub mod category;
pub mod detection;
pub mod direction;
pub mod distance;
pub mod traffic_light;
