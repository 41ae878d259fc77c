pub mod capture;
pub mod monitors;
pub mod rule_match;
pub mod zones;
