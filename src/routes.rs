//! Static per-route lookup tables.
//!
//! The feeds usually carry a headsign, but not always; these tables supply a
//! terminal name and a borough label when the realtime data comes up empty.
//! Everything here is constant for the process lifetime.

/// Terminal destination shown when a trip update carries no headsign.
pub fn fallback_destination(route_id: &str) -> Option<&'static str> {
    let name = match route_id {
        "1" => "South Ferry",
        "2" => "Flatbush Av",
        "3" => "New Lots Av",
        "4" => "Woodlawn",
        "5" => "Eastchester-Dyre Av",
        "6" => "Pelham Bay Park",
        "7" => "Flushing-Main St",
        "A" => "Inwood-207 St",
        "B" => "Brighton Beach",
        "C" => "Euclid Av",
        "D" => "Coney Island-Stillwell Av",
        "E" => "World Trade Center",
        "F" => "Jamaica-179 St",
        "G" => "Church Av",
        "J" => "Jamaica Center",
        "L" => "Canarsie-Rockaway Pkwy",
        "M" => "Middle Village-Metropolitan Av",
        "N" => "Coney Island-Stillwell Av",
        "Q" => "Coney Island-Stillwell Av",
        "R" => "Bay Ridge-95 St",
        "S" => "Times Sq-42 St",
        "W" => "Whitehall St",
        "Z" => "Jamaica Center",
        _ => return None,
    };
    Some(name)
}

/// Secondary label shown under the destination, where one exists.
pub fn route_detail(route_id: &str) -> Option<&'static str> {
    let detail = match route_id {
        "1" | "S" | "W" => "Manhattan",
        "2" | "3" | "B" | "C" | "D" | "G" | "L" | "N" | "Q" | "R" => "Brooklyn",
        "4" | "5" | "6" => "Bronx",
        "7" | "F" | "J" | "M" | "Z" => "Queens",
        "A" | "E" => "Manhattan",
        _ => return None,
    };
    Some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_train_falls_back_to_inwood() {
        assert_eq!(fallback_destination("A"), Some("Inwood-207 St"));
    }

    #[test]
    fn unknown_route_has_no_fallback() {
        assert_eq!(fallback_destination("X"), None);
        assert_eq!(route_detail("X"), None);
    }

    #[test]
    fn every_fallback_route_has_a_detail() {
        for route in [
            "1", "2", "3", "4", "5", "6", "7", "A", "B", "C", "D", "E", "F", "G", "J", "L", "M",
            "N", "Q", "R", "S", "W", "Z",
        ] {
            assert!(fallback_destination(route).is_some(), "route {route}");
            assert!(route_detail(route).is_some(), "route {route}");
        }
    }
}
