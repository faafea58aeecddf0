//! Metadata for the per-store reference tables (makes, colors, fuel types...).
//!
//! Every reference entity shares the same shape and the same CRUD surface, so
//! instead of fifteen copies of the same handler/service pair there is one
//! generic implementation driven by this table.

/// Static description of one reference entity.
#[derive(Debug, PartialEq, Eq)]
pub struct ReferenceMeta {
    /// URL path segment, e.g. `fuel-types` in `/api/{storeId}/fuel-types`.
    pub path: &'static str,
    /// Postgres table name.
    pub table: &'static str,
    /// Human label used in validation messages and CLI output.
    pub label: &'static str,
    /// Only makes carry an image URL.
    pub has_image_url: bool,
}

macro_rules! reference_meta {
    ($name:ident, $path:literal, $table:literal, $label:literal) => {
        reference_meta!($name, $path, $table, $label, false);
    };
    ($name:ident, $path:literal, $table:literal, $label:literal, $image:literal) => {
        pub const $name: ReferenceMeta = ReferenceMeta {
            path: $path,
            table: $table,
            label: $label,
            has_image_url: $image,
        };
    };
}

reference_meta!(BILLBOARDS, "billboards", "billboards", "Billboard");
reference_meta!(CATEGORIES, "categories", "categories", "Category");
reference_meta!(COLORS, "colors", "colors", "Color");
reference_meta!(CONDITIONS, "conditions", "conditions", "Condition");
reference_meta!(DRIVE_TYPES, "drive-types", "drive_types", "Drive Type");
reference_meta!(ENGINE_VOLUMES, "engine-volumes", "engine_volumes", "Engine Volume");
reference_meta!(FUEL_TYPES, "fuel-types", "fuel_types", "Fuel Type");
reference_meta!(LOCATIONS, "locations", "locations", "Location");
reference_meta!(MAKES, "makes", "makes", "Make", true);
reference_meta!(MODELS, "models", "models", "Model");
reference_meta!(OPTIONS, "options", "options", "Option");
reference_meta!(PASSENGERS, "passengers", "passengers", "Passenger");
reference_meta!(STEERINGS, "steerings", "steerings", "Steering");
reference_meta!(TRANSMISSIONS, "transmissions", "transmissions", "Transmission");
reference_meta!(YEARS, "years", "years", "Year");

pub const ALL: &[&ReferenceMeta] = &[
    &BILLBOARDS,
    &CATEGORIES,
    &COLORS,
    &CONDITIONS,
    &DRIVE_TYPES,
    &ENGINE_VOLUMES,
    &FUEL_TYPES,
    &LOCATIONS,
    &MAKES,
    &MODELS,
    &OPTIONS,
    &PASSENGERS,
    &STEERINGS,
    &TRANSMISSIONS,
    &YEARS,
];

impl ReferenceMeta {
    /// Resolve a URL path segment to its metadata. Unknown segments are a
    /// routing miss, not a validation failure.
    pub fn by_path(segment: &str) -> Option<&'static ReferenceMeta> {
        ALL.iter().copied().find(|m| m.path == segment)
    }

    /// Column list used by every query. Tables without an image column still
    /// project `image_url` so the rows all decode into the same struct.
    pub fn columns(&self) -> &'static str {
        if self.has_image_url {
            "id, store_id, name, image_url, created_at, updated_at"
        } else {
            "id, store_id, name, NULL::text AS image_url, created_at, updated_at"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_segments() {
        assert_eq!(ReferenceMeta::by_path("fuel-types"), Some(&FUEL_TYPES));
        assert_eq!(ReferenceMeta::by_path("makes"), Some(&MAKES));
        assert_eq!(ReferenceMeta::by_path("years"), Some(&YEARS));
    }

    #[test]
    fn unknown_segment_is_none() {
        assert_eq!(ReferenceMeta::by_path("products"), None);
        assert_eq!(ReferenceMeta::by_path("fueltypes"), None);
        assert_eq!(ReferenceMeta::by_path(""), None);
    }

    #[test]
    fn only_makes_carry_an_image() {
        let with_image: Vec<_> = ALL.iter().filter(|m| m.has_image_url).collect();
        assert_eq!(with_image.len(), 1);
        assert_eq!(with_image[0].table, "makes");
    }

    #[test]
    fn fifteen_reference_entities() {
        assert_eq!(ALL.len(), 15);
    }
}
