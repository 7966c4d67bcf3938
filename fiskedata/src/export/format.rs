//! Flatten rivers and stations into sheet rows

use std::collections::BTreeSet;

use crate::model::{
    CellValue, Observation, River, RiverMap, Row, Station, StationMap, format_date,
};

pub const RIVER_HEADER: [&str; 13] = [
    "ID",
    "Navn",
    "Startdato",
    "Sluttdato",
    "Prosjekt",
    "Vannforing",
    "Vaer",
    "Vanntemperatur",
    "Lufttemperatur",
    "Baattype",
    "Mannskap",
    "Sjafor",
    "Antall stasjoner",
];

pub const STATION_HEADER: [&str; 17] = [
    "ID",
    "Elv ID",
    "Navn",
    "Dato",
    "Start breddegrad",
    "Start lengdegrad",
    "Slutt breddegrad",
    "Slutt lengdegrad",
    "Elvetemperatur",
    "Lufttemperatur",
    "Sekunder fisket",
    "Volt",
    "Puls",
    "Konduktivitet",
    "Transektlengde",
    "Kommentar",
    "Antall observasjoner",
];

pub const OBSERVATION_HEADER: [&str; 9] = [
    "ID",
    "Stasjon ID",
    "Art",
    "Antall",
    "Lengde",
    "Kjonn",
    "Fettfinne klippet",
    "Sluppet ut",
    "Kommentar",
];

pub const CSV_HEADER: [&str; 11] = [
    "Elv",
    "Elvedato",
    "Stasjon",
    "Stasjonsdato",
    "Art",
    "Antall",
    "Lengde",
    "Kjonn",
    "Fettfinne klippet",
    "Sluppet ut",
    "Kommentar",
];

/// Rows for the three export sheets, each starting with its header
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub river_rows: Vec<Row>,
    pub station_rows: Vec<Row>,
    pub observation_rows: Vec<Row>,
}

impl SheetData {
    fn with_headers() -> Self {
        Self {
            river_rows: vec![header_row(&RIVER_HEADER)],
            station_rows: vec![header_row(&STATION_HEADER)],
            observation_rows: vec![header_row(&OBSERVATION_HEADER)],
        }
    }

    fn push_station(&mut self, station: &Station) {
        self.station_rows.push(station_row(station));
        for observation in &station.observations {
            self.observation_rows.push(observation_row(station.id, observation));
        }
    }
}

/// Every river in `rivers`, plus their stations and observations
pub fn format_rivers_for_excel(rivers: &RiverMap, stations: &StationMap) -> SheetData {
    let mut data = SheetData::with_headers();
    let mut seen = BTreeSet::new();

    for river in rivers.values() {
        data.river_rows.push(river_row(river));

        for station in river.stations_in(stations) {
            if seen.insert(station.id) {
                data.push_station(station);
            }
        }
    }

    data
}

/// Every station in `stations`, plus their parent rivers and observations
pub fn format_stations_for_excel(stations: &StationMap, rivers: &RiverMap) -> SheetData {
    let mut data = SheetData::with_headers();
    let mut seen_rivers = BTreeSet::new();

    for station in stations.values() {
        if seen_rivers.insert(station.river_id) {
            match rivers.get(&station.river_id) {
                Some(river) => data.river_rows.push(river_row(river)),
                None => log::warn!(
                    "Station {} references unknown river {}",
                    station.id,
                    station.river_id
                ),
            }
        }

        data.push_station(station);
    }

    data
}

/// One row per observation of every river's stations
pub fn format_rivers_for_csv(rivers: &RiverMap, stations: &StationMap) -> Vec<Row> {
    let mut rows = vec![header_row(&CSV_HEADER)];

    for river in rivers.values() {
        for station in river.stations_in(stations) {
            push_csv_rows(&mut rows, Some(river), station);
        }
    }

    rows
}

/// One row per observation of every station
pub fn format_stations_for_csv(stations: &StationMap, rivers: &RiverMap) -> Vec<Row> {
    let mut rows = vec![header_row(&CSV_HEADER)];

    for station in stations.values() {
        push_csv_rows(&mut rows, rivers.get(&station.river_id), station);
    }

    rows
}

fn push_csv_rows(rows: &mut Vec<Row>, river: Option<&River>, station: &Station) {
    for observation in &station.observations {
        let mut row: Row = vec![
            river.map(|r| r.name.clone()).into(),
            river.map(|r| format_date(r.start_date)).into(),
            station.name.clone().into(),
            format_date(station.date).into(),
        ];
        row.extend(observation_row(station.id, observation).into_iter().skip(2));
        rows.push(row);
    }
}

fn header_row(names: &[&str]) -> Row {
    names.iter().map(|name| CellValue::from(*name)).collect()
}

fn river_row(river: &River) -> Row {
    let crew = if river.crew.is_empty() {
        None
    } else {
        Some(river.crew.join(", "))
    };

    vec![
        river.id.into(),
        river.name.clone().into(),
        format_date(river.start_date).into(),
        river.end_date.map(format_date).into(),
        river.project_id.clone().into(),
        river.waterflow.into(),
        river.weather.clone().into(),
        river.water_temp.into(),
        river.air_temp.into(),
        river.boat_type.clone().into(),
        crew.into(),
        river.driver.clone().into(),
        (river.station_ids.len() as i64).into(),
    ]
}

fn station_row(station: &Station) -> Row {
    vec![
        station.id.into(),
        station.river_id.into(),
        station.name.clone().into(),
        format_date(station.date).into(),
        station.start_pos.map(|p| p.latitude).into(),
        station.start_pos.map(|p| p.longitude).into(),
        station.end_pos.map(|p| p.latitude).into(),
        station.end_pos.map(|p| p.longitude).into(),
        station.river_temp.into(),
        station.air_temp.into(),
        station.seconds_fished.into(),
        station.voltage.into(),
        station.pulse.into(),
        station.conductivity.into(),
        station.transect_length.into(),
        station.comment.clone().into(),
        (station.observations.len() as i64).into(),
    ]
}

fn observation_row(station_id: u32, observation: &Observation) -> Row {
    vec![
        observation.id.into(),
        station_id.into(),
        observation.species.clone().into(),
        observation.count.into(),
        observation.length.into(),
        observation.gender.map(|g| g.as_str()).into(),
        observation.adipose_fin_clipped.into(),
        observation.released.into(),
        observation.comment.clone().into(),
    ]
}
