// Line topology shared by the demand and digital twin engines

/// Stations on the Aluva - SN Junction line, in running order.
pub const STATIONS: [&str; 23] = [
    "Aluva",
    "Pulinchodu",
    "Companypady",
    "Ambattukavu",
    "Muttom",
    "Kalamassery",
    "Cochin University",
    "Pathadipalam",
    "Edapally",
    "Changampuzha Park",
    "Palarivattom",
    "JLN Stadium",
    "Kaloor",
    "Town Hall",
    "MG Road",
    "Maharajas",
    "Ernakulam South",
    "Kadavanthra",
    "Elamkulam",
    "Vyttila",
    "Thaikoodam",
    "Petta",
    "SN Junction",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub name: &'static str,
    pub distance_km: f64,
    pub stops: u32,
}

pub const ROUTES: [Route; 5] = [
    Route { name: "Aluva → Petta", distance_km: 13.4, stops: 11 },
    Route { name: "Petta → Aluva", distance_km: 13.4, stops: 11 },
    Route { name: "JLN Stadium → Petta", distance_km: 6.2, stops: 6 },
    Route { name: "Aluva → MG Road", distance_km: 10.8, stops: 9 },
    Route { name: "Vyttila → Aluva", distance_km: 9.5, stops: 8 },
];

pub fn station_index(name: &str) -> Option<usize> {
    STATIONS.iter().position(|s| *s == name)
}

/// The next station in running order; the terminus wraps back to the first station.
pub fn next_station(current: &str) -> &'static str {
    match station_index(current) {
        Some(index) if index + 1 < STATIONS.len() => STATIONS[index + 1],
        _ => STATIONS[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_station_wraps_at_terminus() {
        assert_eq!(next_station("Aluva"), "Pulinchodu");
        assert_eq!(next_station("SN Junction"), "Aluva");
        assert_eq!(next_station("Nowhere"), "Aluva");
    }
}
