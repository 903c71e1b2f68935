//! Seeded demo catalog tables. Values mirror the canned inventory the demo
//! strategies are benchmarked against; changing them changes tested outputs.

use crate::types::{ActivityOption, FlightOption, HotelOption};
use std::collections::HashMap;

fn flight(
    airline: &str,
    departure_time: &str,
    arrival_time: &str,
    duration: &str,
    price: f64,
    stops: u32,
) -> FlightOption {
    FlightOption {
        airline: airline.to_string(),
        departure_time: departure_time.to_string(),
        arrival_time: arrival_time.to_string(),
        duration: duration.to_string(),
        price,
        stops,
    }
}

fn hotel(
    name: &str,
    location: &str,
    price_per_night: f64,
    rating: f64,
    amenities: &[&str],
) -> HotelOption {
    HotelOption {
        name: name.to_string(),
        location: location.to_string(),
        price_per_night,
        // Recomputed from the requested nights on every lookup.
        total_price: 0.0,
        rating,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

fn activity(name: &str, description: &str, cost: f64, duration: &str, category: &str) -> ActivityOption {
    ActivityOption {
        name: name.to_string(),
        description: description.to_string(),
        cost,
        duration: duration.to_string(),
        category: category.to_string(),
    }
}

pub(super) fn seed_flights() -> HashMap<String, Vec<FlightOption>> {
    let mut flights = HashMap::new();

    flights.insert(
        "tokyo".to_string(),
        vec![
            flight(
                "Japan Airlines",
                "2025-02-01 10:00",
                "2025-02-01 14:30",
                "11h 30m",
                650.00,
                0,
            ),
            flight("ANA", "2025-02-01 14:00", "2025-02-01 18:00", "10h 00m", 720.00, 0),
            flight(
                "United Airlines",
                "2025-02-01 08:00",
                "2025-02-01 15:00",
                "13h 00m",
                580.00,
                1,
            ),
            flight(
                "Premium Business Class - ANA",
                "2025-02-01 09:00",
                "2025-02-01 13:00",
                "10h 00m",
                1250.00,
                0,
            ),
        ],
    );
    flights.insert(
        "paris".to_string(),
        vec![flight(
            "Air France",
            "2025-02-01 18:00",
            "2025-02-02 08:00",
            "8h 00m",
            450.00,
            0,
        )],
    );
    flights.insert(
        "london".to_string(),
        vec![flight(
            "British Airways",
            "2025-02-01 16:00",
            "2025-02-02 06:00",
            "7h 00m",
            380.00,
            0,
        )],
    );

    flights
}

pub(super) fn seed_hotels() -> HashMap<String, Vec<HotelOption>> {
    let mut hotels = HashMap::new();

    hotels.insert(
        "tokyo".to_string(),
        vec![
            hotel(
                "Shibuya Grand Hotel",
                "Shibuya, Tokyo",
                120.00,
                4.2,
                &["WiFi", "Breakfast", "Gym", "City View"],
            ),
            hotel(
                "Shinjuku Budget Inn",
                "Shinjuku, Tokyo",
                85.00,
                3.8,
                &["WiFi", "24/7 Desk"],
            ),
            hotel(
                "Tokyo Luxury Suites",
                "Ginza, Tokyo",
                250.00,
                4.8,
                &["WiFi", "Breakfast", "Spa", "Pool", "Concierge"],
            ),
            hotel(
                "Asakusa Traditional Ryokan",
                "Asakusa, Tokyo",
                150.00,
                4.5,
                &["WiFi", "Traditional Breakfast", "Onsen", "Tea Ceremony"],
            ),
            hotel(
                "Imperial Suite - Ritz-Carlton Tokyo",
                "Roppongi, Tokyo",
                450.00,
                5.0,
                &[
                    "WiFi",
                    "Butler Service",
                    "Spa",
                    "Michelin Restaurant",
                    "Panoramic Views",
                    "Private Lounge",
                ],
            ),
        ],
    );
    hotels.insert(
        "paris".to_string(),
        vec![hotel(
            "Eiffel View Hotel",
            "7th Arrondissement, Paris",
            180.00,
            4.5,
            &["WiFi", "Breakfast", "Eiffel Tower View"],
        )],
    );
    hotels.insert(
        "london".to_string(),
        vec![hotel(
            "Westminster Inn",
            "Westminster, London",
            150.00,
            4.3,
            &["WiFi", "Breakfast", "Central Location"],
        )],
    );

    hotels
}

pub(super) fn seed_activities() -> HashMap<String, HashMap<String, Vec<ActivityOption>>> {
    let mut activities = HashMap::new();

    let mut tokyo = HashMap::new();
    tokyo.insert(
        "tech".to_string(),
        vec![
            activity(
                "Akihabara Tech District Tour",
                "Explore Tokyo's electronics and anime paradise",
                30.00,
                "3 hours",
                "tech",
            ),
            activity(
                "TeamLab Borderless Digital Art Museum",
                "Immersive digital art experience",
                35.00,
                "2 hours",
                "tech",
            ),
            activity(
                "Sony ExploraScience",
                "Interactive technology exhibition",
                25.00,
                "2 hours",
                "tech",
            ),
        ],
    );
    tokyo.insert(
        "food".to_string(),
        vec![
            activity(
                "Tsukiji Outer Market Food Tour",
                "Fresh sushi and street food experience",
                50.00,
                "3 hours",
                "food",
            ),
            activity(
                "Ramen Making Class",
                "Learn to make authentic Japanese ramen",
                65.00,
                "2.5 hours",
                "food",
            ),
            activity(
                "Sushi Masterclass at Toyosu Market",
                "Professional sushi making experience",
                80.00,
                "3 hours",
                "food",
            ),
            activity(
                "Private Michelin Star Chef Experience",
                "Exclusive dining with 3-star Michelin chef",
                250.00,
                "4 hours",
                "food",
            ),
        ],
    );
    tokyo.insert(
        "temples".to_string(),
        vec![
            activity(
                "Senso-ji Temple Visit",
                "Tokyo's oldest Buddhist temple in Asakusa",
                0.00,
                "2 hours",
                "temples",
            ),
            activity(
                "Meiji Shrine Experience",
                "Peaceful Shinto shrine in forest setting",
                0.00,
                "1.5 hours",
                "temples",
            ),
            activity(
                "Guided Temple Tour (Senso-ji + Meiji + Yasukuni)",
                "Comprehensive temple tour with expert guide",
                45.00,
                "5 hours",
                "temples",
            ),
        ],
    );
    tokyo.insert(
        "nature".to_string(),
        vec![
            activity(
                "Mount Fuji Day Trip",
                "Scenic tour to Japan's iconic mountain",
                120.00,
                "10 hours",
                "nature",
            ),
            activity(
                "Shinjuku Gyoen National Garden",
                "Beautiful traditional Japanese garden",
                5.00,
                "2 hours",
                "nature",
            ),
        ],
    );
    tokyo.insert(
        "sightseeing".to_string(),
        vec![
            activity(
                "Tokyo Skytree Observation Deck",
                "Panoramic views from tallest tower",
                28.00,
                "1.5 hours",
                "sightseeing",
            ),
            activity(
                "Shibuya Crossing & Harajuku Walking Tour",
                "Experience Tokyo's most vibrant districts",
                20.00,
                "3 hours",
                "sightseeing",
            ),
            activity(
                "Imperial Palace East Gardens",
                "Historic palace grounds and gardens",
                0.00,
                "2 hours",
                "sightseeing",
            ),
        ],
    );
    activities.insert("tokyo".to_string(), tokyo);

    let mut paris = HashMap::new();
    paris.insert(
        "sightseeing".to_string(),
        vec![activity(
            "Eiffel Tower Visit",
            "Iconic Parisian landmark",
            30.00,
            "2 hours",
            "sightseeing",
        )],
    );
    activities.insert("paris".to_string(), paris);

    let mut london = HashMap::new();
    london.insert(
        "sightseeing".to_string(),
        vec![activity(
            "Big Ben & Westminster Abbey",
            "Historic London landmarks",
            25.00,
            "3 hours",
            "sightseeing",
        )],
    );
    activities.insert("london".to_string(), london);

    activities
}
