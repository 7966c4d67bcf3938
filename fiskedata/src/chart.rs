//! Species counts per river or station, shaped for bar and pie charts

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::model::{Observation, River, RiverMap, Station, StationMap, format_date};

/// Key used for the tally of species outside the requested list
pub const OTHERS_KEY: &str = "others";

/// Something observations can be grouped under in a chart
pub trait ObservationPoint {
    /// Observations that belong to this point
    fn observations_of(&self) -> Vec<&Observation>;

    /// Display label, also the key in [`ChartData`]
    fn label_of(&self) -> String;
}

impl ObservationPoint for Station {
    fn observations_of(&self) -> Vec<&Observation> {
        self.observations.iter().collect()
    }

    fn label_of(&self) -> String {
        format!("{} {}", self.name, format_date(self.date))
    }
}

/// A river together with the stations its observations live on
#[derive(Debug, Clone, Copy)]
pub struct RiverPoint<'a> {
    pub river: &'a River,
    pub stations: &'a StationMap,
}

impl<'a> RiverPoint<'a> {
    pub fn new(river: &'a River, stations: &'a StationMap) -> Self {
        Self { river, stations }
    }
}

impl ObservationPoint for RiverPoint<'_> {
    fn observations_of(&self) -> Vec<&Observation> {
        self.river.observations_in(self.stations)
    }

    fn label_of(&self) -> String {
        format!("{} {}", self.river.name, format_date(self.river.start_date))
    }
}

/// Total number of fish across `observations`
pub fn amount_of_fish_in_observations<'a, I>(observations: I) -> u64
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations.into_iter().map(|o| u64::from(o.count)).sum()
}

/// Insertion-ordered map where a repeated key replaces the value in place
#[derive(Debug, Clone, PartialEq)]
struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, key: String, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Fish count per species for one point, in request order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpeciesCount(OrderedMap<u64>);

impl SpeciesCount {
    pub fn get(&self, species: &str) -> Option<u64> {
        self.0.get(species).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.entries.iter().map(|(_, v)| v).sum()
    }
}

/// Species counts keyed by point label, in point order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartData(OrderedMap<SpeciesCount>);

impl ChartData {
    pub fn get(&self, label: &str) -> Option<&SpeciesCount> {
        self.0.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpeciesCount)> {
        self.0.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.entries.is_empty()
    }
}

fn species_count<S: AsRef<str>>(
    observations: &[&Observation],
    all_species: &[S],
    include_others: bool,
) -> SpeciesCount {
    let mut counts = OrderedMap::new();

    for species in all_species {
        let species = species.as_ref();
        let count = amount_of_fish_in_observations(
            observations.iter().copied().filter(|o| o.species == species),
        );
        counts.insert(species.to_string(), count);
    }

    if include_others {
        let count = amount_of_fish_in_observations(
            observations
                .iter()
                .copied()
                .filter(|o| !all_species.iter().any(|s| s.as_ref() == o.species)),
        );
        counts.insert(OTHERS_KEY.to_string(), count);
    }

    SpeciesCount(counts)
}

/// Tally fish per species for every point, keyed by the point's label.
///
/// Every species in `all_species` gets an entry, zero if unseen. With
/// `include_others`, an `"others"` entry sums all remaining species. A
/// repeated label replaces the earlier counts but keeps its position.
pub fn count_species_across_points<'p, P, I, S>(
    points: I,
    all_species: &[S],
    include_others: bool,
) -> ChartData
where
    P: ObservationPoint + 'p,
    I: IntoIterator<Item = &'p P>,
    S: AsRef<str>,
{
    let mut data = OrderedMap::new();

    for point in points {
        let observations = point.observations_of();
        let counts = species_count(&observations, all_species, include_others);
        let label = point.label_of();

        if data.get(&label).is_some() {
            log::debug!("Chart label '{}' appears more than once; keeping the last counts", label);
        }
        data.insert(label, counts);
    }

    ChartData(data)
}

/// What a chart is drawn over
#[derive(Debug, Clone, Copy)]
pub enum ChartSource<'a> {
    Rivers {
        rivers: &'a RiverMap,
        stations: &'a StationMap,
    },
    Stations(&'a StationMap),
}

/// Chart data for either every river or every station in `source`
pub fn data_for_bar_and_pie_chart<S: AsRef<str>>(
    source: ChartSource<'_>,
    species: &[S],
    include_others: bool,
) -> ChartData {
    match source {
        ChartSource::Rivers { rivers, stations } => {
            let points: Vec<RiverPoint> = rivers
                .values()
                .map(|river| RiverPoint::new(river, stations))
                .collect();
            count_species_across_points(&points, species, include_others)
        }
        ChartSource::Stations(stations) => {
            count_species_across_points(stations.values(), species, include_others)
        }
    }
}
