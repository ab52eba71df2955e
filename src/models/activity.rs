use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SportType {
    Run,
    TrailRun,
    VirtualRun,
    Ride,
    VirtualRide,
    EBikeRide,
    NordicSki,
    BackcountrySki,
    AlpineSki,
    Hike,
    Walk,
    Swim,
    Workout,
    WeightTraining,
    Yoga,
    Other(String),
}

impl SportType {
    pub fn runs() -> Vec<SportType> {
        vec![SportType::Run, SportType::TrailRun, SportType::VirtualRun]
    }

    pub fn skis() -> Vec<SportType> {
        vec![SportType::NordicSki, SportType::BackcountrySki]
    }

    pub fn as_str(&self) -> &str {
        match self {
            SportType::Run => "Run",
            SportType::TrailRun => "TrailRun",
            SportType::VirtualRun => "VirtualRun",
            SportType::Ride => "Ride",
            SportType::VirtualRide => "VirtualRide",
            SportType::EBikeRide => "EBikeRide",
            SportType::NordicSki => "NordicSki",
            SportType::BackcountrySki => "BackcountrySki",
            SportType::AlpineSki => "AlpineSki",
            SportType::Hike => "Hike",
            SportType::Walk => "Walk",
            SportType::Swim => "Swim",
            SportType::Workout => "Workout",
            SportType::WeightTraining => "WeightTraining",
            SportType::Yoga => "Yoga",
            SportType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for SportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Never fails: sport types we don't model are carried verbatim.
impl FromStr for SportType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Run" => SportType::Run,
            "TrailRun" => SportType::TrailRun,
            "VirtualRun" => SportType::VirtualRun,
            "Ride" => SportType::Ride,
            "VirtualRide" => SportType::VirtualRide,
            "EBikeRide" => SportType::EBikeRide,
            "NordicSki" => SportType::NordicSki,
            "BackcountrySki" => SportType::BackcountrySki,
            "AlpineSki" => SportType::AlpineSki,
            "Hike" => SportType::Hike,
            "Walk" => SportType::Walk,
            "Swim" => SportType::Swim,
            "Workout" => SportType::Workout,
            "WeightTraining" => SportType::WeightTraining,
            "Yoga" => SportType::Yoga,
            other => SportType::Other(other.to_string()),
        })
    }
}

impl From<String> for SportType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(sport) => sport,
            Err(never) => match never {},
        }
    }
}

impl From<SportType> for String {
    fn from(sport: SportType) -> Self {
        sport.as_str().to_string()
    }
}

/// One recorded activity. Distances are metres, times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub sport_type: SportType,
    pub distance: f64,
    pub moving_time: i64,
    pub elapsed_time: i64,
    pub total_elevation_gain: f64,
}

/// Summary activity as found in a provider export. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryActivity {
    pub id: i64,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub sport_type: SportType,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub moving_time: i64,
    #[serde(default)]
    pub elapsed_time: i64,
    #[serde(default)]
    pub total_elevation_gain: f64,
}

impl From<SummaryActivity> for Activity {
    fn from(s: SummaryActivity) -> Self {
        Activity {
            id: s.id,
            name: s.name,
            date: s.start_date,
            sport_type: s.sport_type,
            distance: s.distance,
            moving_time: s.moving_time,
            elapsed_time: s.elapsed_time,
            total_elevation_gain: s.total_elevation_gain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sport_types_survive_a_round_trip() {
        let sport: SportType = "Kitesurf".parse().unwrap();
        assert_eq!(sport, SportType::Other("Kitesurf".to_string()));
        assert_eq!(String::from(sport), "Kitesurf");
    }

    #[test]
    fn summary_activity_maps_provider_fields() {
        let json = r#"{
            "id": 42,
            "name": "Morning Run",
            "start_date": "2023-08-15T05:12:00Z",
            "sport_type": "Run",
            "distance": 10012.4,
            "moving_time": 2710,
            "elapsed_time": 2800,
            "total_elevation_gain": 45.0,
            "kudos_count": 3,
            "map": { "id": "a1", "summary_polyline": "" }
        }"#;
        let summary: SummaryActivity = serde_json::from_str(json).unwrap();
        let activity = Activity::from(summary);
        assert_eq!(activity.id, 42);
        assert_eq!(activity.sport_type, SportType::Run);
        assert_eq!(activity.date.to_rfc3339(), "2023-08-15T05:12:00+00:00");
        assert_eq!(activity.moving_time, 2710);
    }
}
