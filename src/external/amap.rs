//! Driving-direction client for the AMap web service.
//!
//! The raw response is kept vendor-shaped: numeric fields arrive as strings
//! and geometry may live on the path, on the individual steps, or both. The
//! planner module turns this into a canonical plan.

use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Coordinates,
    error::{provider_error, validation_error, Error},
};

/// Routing preference, as the vendor numbers them. Callers may surface the
/// numeric value verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Fastest = 0,
    AvoidTolls = 1,
    Shortest = 2,
    AvoidExpressway = 3,
    AvoidCongestion = 4,
    MultiCriteria = 5,
    AvoidHighway = 6,
    AvoidHighwayAndTolls = 7,
    AvoidTollsAndCongestion = 8,
    AvoidHighwayTollsAndCongestion = 9,
    Alternatives = 10,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Fastest
    }
}

impl TryFrom<i64> for Strategy {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let strategy = match value {
            0 => Strategy::Fastest,
            1 => Strategy::AvoidTolls,
            2 => Strategy::Shortest,
            3 => Strategy::AvoidExpressway,
            4 => Strategy::AvoidCongestion,
            5 => Strategy::MultiCriteria,
            6 => Strategy::AvoidHighway,
            7 => Strategy::AvoidHighwayAndTolls,
            8 => Strategy::AvoidTollsAndCongestion,
            9 => Strategy::AvoidHighwayTollsAndCongestion,
            10 => Strategy::Alternatives,
            _ => return Err(validation_error(&["strategy"])),
        };

        Ok(strategy)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrivingResponse {
    pub status: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub infocode: Option<String>,
    #[serde(default)]
    pub route: Option<DrivingRoute>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrivingRoute {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub paths: Vec<RawPath>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPath {
    pub distance: String,
    pub duration: String,
    pub tolls: String,
    pub traffic_lights: String,
    pub strategy: Option<String>,
    pub polyline: Option<String>,
    pub steps: Vec<RawStep>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStep {
    pub instruction: String,
    pub orientation: String,
    pub road: String,
    pub distance: String,
    pub duration: String,
    pub polyline: Option<String>,
}

#[tracing::instrument]
pub async fn compute_route(
    origin: &Coordinates,
    destination: &Coordinates,
    waypoints: &[Coordinates],
    strategy: Strategy,
) -> Result<DrivingResponse, Error> {
    let api_base = env::var("AMAP_API_BASE")?;
    let url = format!("https://{}/v3/direction/driving", api_base);
    let key = env::var("AMAP_API_KEY")?;

    let origin: String = origin.into();
    let destination: String = destination.into();
    let waypoints = waypoints
        .iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(";");

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("key", key)])
        .query(&[("origin", origin)])
        .query(&[("destination", destination)])
        .query(&[("waypoints", waypoints)])
        .query(&[("strategy", (strategy as i64).to_string())])
        .query(&[("extensions", "all".to_string())])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code != 200 {
        return Err(provider_error(
            &format!("http_{}", status_code),
            "unexpected response status",
        ));
    }

    Ok(res.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_round_trips_through_vendor_numbering() {
        assert_eq!(Strategy::try_from(0).unwrap(), Strategy::Fastest);
        assert_eq!(Strategy::try_from(4).unwrap(), Strategy::AvoidCongestion);
        assert_eq!(Strategy::try_from(10).unwrap(), Strategy::Alternatives);
        assert_eq!(Strategy::AvoidHighwayAndTolls as i64, 7);
    }

    #[test]
    fn out_of_range_strategy_is_rejected() {
        assert!(Strategy::try_from(11).is_err());
        assert!(Strategy::try_from(-1).is_err());
    }

    #[test]
    fn coordinates_format_as_lng_lat_pairs() {
        let formatted: String = (&Coordinates::new(116.397, 39.909)).into();
        assert_eq!(formatted, "116.397,39.909");
    }
}
