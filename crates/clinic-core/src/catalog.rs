//! Static booking reference data
//!
//! Reference data only: populates the booking selects and maps a
//! chosen service id to its display name. Nothing here is persisted.

/// A bookable service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub duration: &'static str,
    pub price: &'static str,
}

pub const SERVICES: &[ServiceEntry] = &[
    ServiceEntry {
        id: "cleaning",
        name: "Dental Cleaning",
        duration: "1 hour",
        price: "₱2,500",
    },
    ServiceEntry {
        id: "checkup",
        name: "General Checkup",
        duration: "30 minutes",
        price: "₱1,500",
    },
    ServiceEntry {
        id: "filling",
        name: "Dental Filling",
        duration: "1.5 hours",
        price: "₱3,500",
    },
    ServiceEntry {
        id: "whitening",
        name: "Teeth Whitening",
        duration: "2 hours",
        price: "₱8,000",
    },
    ServiceEntry {
        id: "extraction",
        name: "Tooth Extraction",
        duration: "1 hour",
        price: "₱4,000",
    },
    ServiceEntry {
        id: "root-canal",
        name: "Root Canal Treatment",
        duration: "2 hours",
        price: "₱12,000",
    },
    ServiceEntry {
        id: "braces",
        name: "Orthodontic Consultation",
        duration: "45 minutes",
        price: "₱2,000",
    },
    ServiceEntry {
        id: "implant",
        name: "Dental Implant Consultation",
        duration: "1 hour",
        price: "₱3,000",
    },
];

pub const DOCTORS: &[&str] = &[
    "Dr. Sarah Johnson",
    "Dr. Michael Chen",
    "Dr. Emily Rodriguez",
    "Dr. David Martinez",
];

pub const LOCATIONS: &[&str] = &[
    "Main Clinic - Downtown",
    "Branch Clinic - Uptown",
    "Medical Center - Mall",
];

pub const TIME_SLOTS: &[&str] = &[
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "13:00", "13:30", "14:00", "14:30",
    "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

pub fn find_service(id: &str) -> Option<&'static ServiceEntry> {
    SERVICES.iter().find(|s| s.id == id)
}

pub fn find_service_by_name(name: &str) -> Option<&'static ServiceEntry> {
    SERVICES.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_ids_resolve() {
        assert_eq!(find_service("cleaning").unwrap().name, "Dental Cleaning");
        assert_eq!(find_service("implant").unwrap().price, "₱3,000");
        assert!(find_service("massage").is_none());
    }

    #[test]
    fn names_round_trip_to_ids() {
        for service in SERVICES {
            assert_eq!(find_service_by_name(service.name).unwrap().id, service.id);
        }
    }
}
