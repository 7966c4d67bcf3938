//! Survey records: rivers, stations and the fish observed at each station

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rivers keyed by id (iterates in ascending id order)
pub type RiverMap = BTreeMap<u32, River>;

/// Stations keyed by id (iterates in ascending id order)
pub type StationMap = BTreeMap<u32, Station>;

/// Date format used in sheets and chart labels
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Format a date the way it is written to sheets
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A river survey (one boat trip along a river)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct River {
    pub id: u32,
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Water flow in m3/s
    #[serde(default)]
    pub waterflow: Option<f64>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub water_temp: Option<f64>,
    #[serde(default)]
    pub air_temp: Option<f64>,
    #[serde(default)]
    pub boat_type: Option<String>,
    #[serde(default)]
    pub crew: Vec<String>,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub station_ids: Vec<u32>,
}

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A fishing station along a river
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: u32,
    pub river_id: u32,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_pos: Option<Position>,
    #[serde(default)]
    pub end_pos: Option<Position>,
    #[serde(default)]
    pub river_temp: Option<f64>,
    #[serde(default)]
    pub air_temp: Option<f64>,
    #[serde(default)]
    pub seconds_fished: Option<u32>,
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub pulse: Option<f64>,
    #[serde(default)]
    pub conductivity: Option<f64>,
    /// Length of the fished transect in metres
    #[serde(default)]
    pub transect_length: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// Sex of an observed fish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Hann,
    Hunn,
    Ukjent,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Hann => "hann",
            Gender::Hunn => "hunn",
            Gender::Ukjent => "ukjent",
        }
    }
}

/// One observation line: `count` fish of `species`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: u32,
    pub species: String,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Length in centimetres
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub adipose_fin_clipped: Option<bool>,
    #[serde(default)]
    pub released: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>,
}

fn default_count() -> u32 {
    1
}

impl River {
    /// Stations of this river that are present in `stations`, in `station_ids` order
    pub fn stations_in<'a>(&self, stations: &'a StationMap) -> Vec<&'a Station> {
        self.station_ids
            .iter()
            .filter_map(|id| stations.get(id))
            .collect()
    }

    /// All observations recorded at this river's stations
    pub fn observations_in<'a>(&self, stations: &'a StationMap) -> Vec<&'a Observation> {
        self.stations_in(stations)
            .into_iter()
            .flat_map(|station| station.observations.iter())
            .collect()
    }
}

/// Rivers and stations loaded together, as the application keeps them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub rivers: Vec<River>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

impl Dataset {
    pub fn river_map(&self) -> RiverMap {
        self.rivers.iter().map(|r| (r.id, r.clone())).collect()
    }

    pub fn station_map(&self) -> StationMap {
        self.stations.iter().map(|s| (s.id, s.clone())).collect()
    }
}
