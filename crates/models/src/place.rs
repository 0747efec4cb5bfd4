use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::payload::Payload;

/// A rentable place in a city, owned by a user.
///
/// `city_id` and `user_id` are fixed at creation; `amenity_ids` is only
/// changed through the place/amenity link operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: Base,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPlace {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

const PLACE_FIELDS: &[&str] = &[
    "name",
    "description",
    "number_rooms",
    "number_bathrooms",
    "max_guest",
    "price_by_night",
    "latitude",
    "longitude",
];

impl Payload for NewPlace {
    const FIELDS: &'static [&'static str] = &[
        "user_id",
        "name",
        "description",
        "number_rooms",
        "number_bathrooms",
        "max_guest",
        "price_by_night",
        "latitude",
        "longitude",
    ];
    const IGNORED: &'static [&'static str] = &["id", "created_at", "updated_at", "city_id", "amenity_ids"];
    const REJECT_UNKNOWN: bool = false;
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Payload for PlacePatch {
    const FIELDS: &'static [&'static str] = PLACE_FIELDS;
    const IGNORED: &'static [&'static str] =
        &["id", "created_at", "updated_at", "city_id", "user_id", "amenity_ids"];
}

impl Place {
    pub fn new(city_id: &str, input: NewPlace) -> Self {
        Self {
            base: Base::new(),
            city_id: city_id.to_string(),
            user_id: input.user_id,
            name: input.name,
            description: input.description,
            number_rooms: input.number_rooms,
            number_bathrooms: input.number_bathrooms,
            max_guest: input.max_guest,
            price_by_night: input.price_by_night,
            latitude: input.latitude,
            longitude: input.longitude,
            amenity_ids: Vec::new(),
        }
    }

    pub fn apply(&mut self, patch: PlacePatch) {
        if let Some(v) = patch.name { self.name = v; }
        if let Some(v) = patch.description { self.description = v; }
        if let Some(v) = patch.number_rooms { self.number_rooms = v; }
        if let Some(v) = patch.number_bathrooms { self.number_bathrooms = v; }
        if let Some(v) = patch.max_guest { self.max_guest = v; }
        if let Some(v) = patch.price_by_night { self.price_by_night = v; }
        if let Some(v) = patch.latitude { self.latitude = v; }
        if let Some(v) = patch.longitude { self.longitude = v; }
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Returns `false` when the amenity was already linked.
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        true
    }

    /// Returns `false` when the amenity was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_place() -> Place {
        let input: NewPlace = serde_json::from_value(json!({"user_id": "u1", "name": "Loft"})).unwrap();
        Place::new("c1", input)
    }

    #[test]
    fn optional_fields_default_to_zero() {
        let place = new_place();
        assert_eq!(place.city_id, "c1");
        assert_eq!(place.number_rooms, 0);
        assert_eq!(place.latitude, 0.0);
        assert!(place.description.is_empty());
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut place = new_place();
        place.apply(PlacePatch { max_guest: Some(4), latitude: Some(37.77), ..Default::default() });
        assert_eq!(place.max_guest, 4);
        assert_eq!(place.latitude, 37.77);
        assert_eq!(place.name, "Loft");
    }

    #[test]
    fn amenity_links_are_a_set() {
        let mut place = new_place();
        assert!(place.link_amenity("a1"));
        assert!(!place.link_amenity("a1"));
        assert_eq!(place.amenity_ids, vec!["a1".to_string()]);
        assert!(place.unlink_amenity("a1"));
        assert!(!place.unlink_amenity("a1"));
    }
}
