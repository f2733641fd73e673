//! Domain to knowledge-base type mapping

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Wikidata type identifiers used by the built-in domains
pub mod qid {
    /// Placeholder for entities without a usable type
    pub const UNKNOWN: &str = "unk";
    /// human
    pub const HUMAN: &str = "Q5";
    /// song
    pub const SONG: &str = "Q7366";
    /// studio album
    pub const STUDIO_ALBUM: &str = "Q208569";
    /// language
    pub const LANGUAGE: &str = "Q315";
    /// music genre
    pub const MUSIC_GENRE: &str = "Q188451";
    /// film
    pub const FILM: &str = "Q11424";
    /// book
    pub const BOOK: &str = "Q571";
    /// award
    pub const AWARD: &str = "Q618779";
    /// version, edition, or translation
    pub const BOOK_EDITION: &str = "Q57933693";
    /// organization
    pub const ORGANIZATION: &str = "Q43229";
    /// geographic location
    pub const GEOGRAPHIC_LOCATION: &str = "Q2221906";
}

/// Mapping from domain name to `{semantic role -> type identifier}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainTypeMapping {
    domains: BTreeMap<String, BTreeMap<String, String>>,
}

impl DomainTypeMapping {
    /// Empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping for the built-in question-answering and dialogue domains
    pub fn builtin() -> Self {
        let mut mapping = Self::new();

        // question answering
        mapping.insert_domain(
            "music",
            &[
                ("MusicRecording", qid::SONG),
                ("Person", qid::HUMAN),
                ("MusicAlbum", qid::STUDIO_ALBUM),
                ("inLanguage", qid::LANGUAGE),
            ],
        );
        // TODO: split creator, director and actor once the linker types them apart
        mapping.insert_domain(
            "movies",
            &[
                ("Movie", qid::FILM),
                ("Person.creator", "Q2500638"),
                ("Person.director", "Q3455803"),
                ("Person.actor", "Q33999"),
            ],
        );
        // isbn is left to the semantic parser
        mapping.insert_domain(
            "books",
            &[
                ("Book", qid::BOOK),
                ("Person", qid::HUMAN),
                ("inLanguage", qid::LANGUAGE),
                ("iso_lang_code", qid::LANGUAGE),
                ("award", qid::AWARD),
                ("bookEdition", qid::BOOK_EDITION),
            ],
        );
        mapping.insert_domain(
            "linkedin",
            &[
                ("Organization", qid::ORGANIZATION),
                ("Person", qid::HUMAN),
                ("addressLocality", qid::GEOGRAPHIC_LOCATION),
                ("award", qid::AWARD),
            ],
        );
        mapping.insert_domain(
            "restaurants",
            &[
                ("Restaurant", qid::BOOK),
                ("Person", qid::HUMAN),
                ("servesCuisine", "Q1778821"),
                ("Location", qid::GEOGRAPHIC_LOCATION),
                ("postalCode", "Q37447"),
                ("ratingValue", "Q2283373"),
                ("reviewCount", "Q265158"),
            ],
        );
        mapping.insert_domain(
            "hotels",
            &[
                ("Hotel", qid::BOOK),
                ("LocationFeatureSpecification", "Q5912147"),
                ("Location", qid::GEOGRAPHIC_LOCATION),
                ("CheckinTime", "Q1068755"),
                ("CheckoutTime", "Q56353377"),
                ("ratingValue", "Q2976556"),
            ],
        );

        // dialogues
        mapping.insert_domain(
            "spotify",
            &[
                ("song", qid::SONG),
                ("artist", qid::HUMAN),
                ("artists", qid::HUMAN),
                ("album", qid::STUDIO_ALBUM),
                ("genres", qid::MUSIC_GENRE),
            ],
        );

        mapping
    }

    /// Parse a mapping from a JSON object of objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a mapping from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read domain types from {}: {}", path.display(), e))
        })?;
        let mapping = Self::from_json_str(&data)?;
        log::debug!("Loaded {} domains from {}", mapping.domains.len(), path.display());
        Ok(mapping)
    }

    /// Add or replace a domain
    pub fn insert_domain(&mut self, domain: impl Into<String>, roles: &[(&str, &str)]) {
        let roles = roles
            .iter()
            .map(|(role, type_id)| (role.to_string(), type_id.to_string()))
            .collect();
        self.domains.insert(domain.into(), roles);
    }

    /// Role table of a domain
    pub fn domain(&self, domain: &str) -> Option<&BTreeMap<String, String>> {
        self.domains.get(domain)
    }

    /// Type identifier of a role within a domain
    pub fn type_id(&self, domain: &str, role: &str) -> Option<&str> {
        self.domains.get(domain)?.get(role).map(String::as_str)
    }

    /// Every type identifier mapped by the given domains, deduplicated
    pub fn type_ids<S: AsRef<str>>(&self, domains: &[S]) -> Vec<&str> {
        let mut ids: Vec<&str> = domains
            .iter()
            .filter_map(|d| self.domains.get(d.as_ref()))
            .flat_map(|roles| roles.values().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Domain names in sorted order
    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// Check if a domain is known
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }
}
